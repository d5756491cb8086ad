//! This library decodes the metadata trailer that the Solidity compiler
//! appends to the end of deployed [EVM](https://ethereum.org/en/developers/docs/evm/)
//! bytecode.
//!
//! The trailer is a [CBOR](https://www.rfc-editor.org/rfc/rfc8949) map that
//! records which compiler produced the bytecode and the content hash under
//! which the contract's metadata (and hence its sources) can be found. It is
//! followed by a two-byte, big-endian length, so it can be found by reading
//! the bytecode from the end.
//!
//! Note that this library only decodes trailers. It does not resolve content
//! hashes against the network, and it does not construct trailers.
//!
//! # How it Works
//!
//! 1. The bytecode is ingested, either as bytes or as a hex string, and the
//!    [`trailer::Trailer`] is located using the length field at its end.
//! 2. The trailer bytes are decoded as a single CBOR data item, which must be a
//!    map with text keys.
//! 3. Each entry in that map is interpreted by a [`metadata::field::Field`]
//!    depending on its key. The `ipfs` multihash is encoded as base-58, the
//!    `solc` version is joined into a dotted string, and any other entry is
//!    passed through as hex.
//! 4. The entries are collected into an immutable [`Metadata`].
//!
//! # Basic Usage
//!
//! For the most basic usage of the library, it is sufficient to call
//! [`decode`] with the hex-encoded bytecode.
//!
//! ```
//! let bytecode = "0x6080604052fe\
//!                 a2646970667358221220d6f9a316976b2cac0aa11c283b691f3c6baefa58\
//!                 64190e887819bc293e7cb18464736f6c63430008110033";
//!
//! let metadata = bytecode_metadata::decode(bytecode).unwrap();
//!
//! assert_eq!(metadata.cbor().length(), 51);
//! assert_eq!(
//!     metadata.ipfs(),
//!     Some("Qmcopji18H4MppSeHA5DHzMJAamZTW6qZ2huju4rd6VkoV")
//! );
//! assert_eq!(metadata.solc_version(), Some("0.8.17"));
//! ```
//!
//! Where the defaults are not appropriate, construct a [`Decoder`] with a
//! custom [`Config`] instead.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming

pub mod constant;
pub mod contract;
pub mod decoder;
pub mod error;
pub mod metadata;
pub mod trailer;
pub mod utility;

// Re-exports to provide the library interface.
pub use decoder::{decode, Config, Decoder};
pub use metadata::Metadata;
