//! This module contains constants that are needed throughout the codebase.

/// The number of bytes at the very end of the bytecode that encode the length
/// of the metadata trailer.
///
/// The length is stored as a big-endian `u16`, so a trailer can never be
/// larger than [`MAXIMUM_TRAILER_SIZE_BYTES`].
pub const LENGTH_FIELD_SIZE_BYTES: usize = 2;

/// The largest trailer that can be described by the length field.
pub const MAXIMUM_TRAILER_SIZE_BYTES: usize = u16::MAX as usize;

/// The marker that prefixes hexadecimal strings, both on input and on output.
pub const HEX_PREFIX: &str = "0x";

/// The trailer key under which the compiler stores the IPFS multihash of the
/// contract metadata.
pub const IPFS_KEY: &str = "ipfs";

/// The trailer key under which the compiler stores its version as a sequence
/// of components.
pub const SOLC_KEY: &str = "solc";

/// The output field holding the raw trailer.
pub const CBOR_FIELD: &str = "cbor";

/// The output field holding the base-58 rendering of the [`IPFS_KEY`] value.
pub const IPFS_FIELD: &str = "ipfs";

/// The output field holding the dotted rendering of the [`SOLC_KEY`] value.
pub const SOLC_VERSION_FIELD: &str = "solcVersion";

/// Output field names that passthrough entries of the same name are never
/// serialized over.
pub const RESERVED_FIELDS: [&str; 2] = [CBOR_FIELD, SOLC_VERSION_FIELD];

/// The separator placed between the components of the compiler version.
pub const SOLC_VERSION_SEPARATOR: &str = ".";

/// The default for whether hexadecimal output strings carry [`HEX_PREFIX`].
pub const DEFAULT_PREFIX_HEX_OUTPUT: bool = true;

/// The default for whether the trailer may contain bytes after the CBOR data
/// item it encodes.
pub const DEFAULT_ALLOW_TRAILING_DATA: bool = false;
