//! This module contains types useful for dealing with concrete contracts whose
//! metadata you want to inspect.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::{
    decoder::Decoder,
    error::Result,
    metadata::Metadata,
    trailer::{self, Trailer},
    utility,
};

/// The deployed bytecode of a contract, including its metadata trailer.
///
/// It is intended to be immutable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contract {
    /// The bytecode of the contract.
    bytecode: Vec<u8>,
}

impl Contract {
    /// Creates a new contract from the provided `bytecode`.
    ///
    /// This must be the contract bytecode _with_ the CBOR metadata still
    /// attached.
    #[must_use]
    pub fn new(bytecode: Vec<u8>) -> Self {
        Self { bytecode }
    }

    /// Creates a new contract from the hex-encoded `code`, with or without the
    /// `0x` prefix.
    ///
    /// # Errors
    ///
    /// If `code` is not valid hex.
    pub fn from_hex(code: &str) -> Result<Self> {
        let bytecode = utility::decode_hex(code)?;
        Ok(Self::new(bytecode))
    }

    /// Creates a new contract from `json`, the compiled representation of a
    /// Solidity contract as output by tools such as Foundry or Hardhat.
    ///
    /// The deployed bytecode is read from `deployedBytecode.object`.
    ///
    /// # Errors
    ///
    /// If `json` does not have that shape, or the bytecode in it is not hex.
    pub fn from_compiled_json(json: &str) -> anyhow::Result<Self> {
        let contract_rep: CompiledContract = serde_json::from_str(json)
            .map_err(|e| anyhow!("Could not parse compiled contract: {e}"))?;

        Ok(Self::from_hex(&contract_rep.deployed_bytecode.object)?)
    }

    /// Gets a reference to the bytecode of the contract.
    #[must_use]
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Locates the metadata trailer at the end of the bytecode.
    ///
    /// # Errors
    ///
    /// If the bytecode does not end in a consistent trailer length field.
    pub fn trailer(&self) -> Result<Trailer> {
        Ok(Trailer::locate(&self.bytecode)?)
    }

    /// Gets the executable part of the bytecode, that is the bytecode with the
    /// metadata trailer and its length field removed.
    ///
    /// # Errors
    ///
    /// If the bytecode does not end in a consistent trailer length field.
    pub fn executable_code(&self) -> Result<&[u8]> {
        let (offset, _) = trailer::span(&self.bytecode)?;
        Ok(&self.bytecode[..offset])
    }

    /// Decodes the metadata trailer of the contract using `decoder`.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode_bytes`].
    pub fn metadata(&self, decoder: &Decoder) -> Result<Metadata> {
        decoder.decode_bytes(&self.bytecode)
    }
}

/// A wrapper for the parts of the JSON representation of the compiled contract
/// that we care about.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledContract {
    deployed_bytecode: DeployedBytecode,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedBytecode {
    object: String,
}
