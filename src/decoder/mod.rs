//! This module contains the definition of the [`Decoder`], which turns contract
//! bytecode into the [`Metadata`] described by its trailer.

use std::collections::HashSet;

use ciborium::Value;

use crate::{
    constant::{DEFAULT_ALLOW_TRAILING_DATA, DEFAULT_PREFIX_HEX_OUTPUT},
    error::{
        container::{Locatable, Located},
        metadata,
        metadata::Error,
        Result,
    },
    metadata::{field::Field, CborTrailer, Metadata},
    trailer::Trailer,
    utility,
};

/// Decodes the metadata trailer of the hex-encoded `bytecode` (with or without
/// the `0x` prefix) using the default configuration.
///
/// # Errors
///
/// See [`Decoder::decode`].
pub fn decode(bytecode: &str) -> Result<Metadata> {
    Decoder::default().decode(bytecode)
}

/// The decoder is responsible for locating the trailer at the end of a
/// contract's bytecode, decoding the CBOR map it contains, and interpreting the
/// entries of that map.
///
/// It holds no state beyond its [`Config`], so a single decoder can be shared
/// freely and used for any number of contracts.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Decoder {
    config: Config,
}

impl Decoder {
    /// Constructs a new decoder with the provided `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Gets the configuration of the decoder.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decodes the metadata trailer of the hex-encoded `bytecode`.
    ///
    /// The input may carry a `0x` prefix and its digits may be of either case.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `bytecode` is not valid hex, and otherwise as for
    /// [`Self::decode_bytes`].
    pub fn decode(&self, bytecode: &str) -> Result<Metadata> {
        let bytes = utility::decode_hex(bytecode)?;
        self.decode_bytes(&bytes)
    }

    /// Decodes the metadata trailer at the end of `bytecode`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the trailer cannot be located in `bytecode`, and
    /// otherwise as for [`Self::decode_trailer`].
    pub fn decode_bytes(&self, bytecode: &[u8]) -> Result<Metadata> {
        let trailer = Trailer::locate(bytecode)?;
        self.decode_trailer(&trailer)
    }

    /// Decodes the already-located `trailer`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the trailer is not a single valid CBOR data item, if
    /// that item is not a map with unique text keys, or if any entry in that
    /// map has a value of the wrong shape for its key.
    ///
    /// Items nested deeper than the CBOR reader's recursion limit (256 levels)
    /// are rejected as a decoding error located at the end of the trailer.
    pub fn decode_trailer(&self, trailer: &Trailer) -> Result<Metadata> {
        let result = self.interpret(trailer);

        match &result {
            Ok(metadata) => tracing::debug!(
                length = trailer.len(),
                ipfs = metadata.ipfs(),
                solc_version = metadata.solc_version(),
                "Decoded metadata trailer"
            ),
            Err(error) => tracing::debug!(%error, "Failed to decode metadata trailer"),
        }

        result
    }

    /// Builds the metadata for `trailer` in one pass over its entries.
    fn interpret(&self, trailer: &Trailer) -> Result<Metadata> {
        let offset = trailer.offset();
        let prefix_hex = self.config.prefix_hex_output;

        let entries = read_map(trailer.bytes(), self.config.allow_trailing_data).map_err(|e| {
            Located {
                location: offset + e.location,
                payload:  e.payload,
            }
        })?;

        let fields = entries
            .into_iter()
            .map(|(key, value)| {
                tracing::trace!(key = key.as_str(), "Interpreting trailer entry");
                Field::interpret(key, &value, prefix_hex).locate(offset)
            })
            .collect::<metadata::Result<Vec<_>>>()?;

        let cbor = CborTrailer::new(
            utility::encode_hex(trailer.bytes(), prefix_hex),
            trailer.len(),
        );

        Ok(Metadata::new(cbor, fields))
    }
}

/// Decodes `bytes` as a single CBOR data item that must be a map with unique
/// text keys, returning its entries in the order they were encoded.
///
/// Locations in the returned errors are relative to the start of `bytes`.
fn read_map(bytes: &[u8], allow_trailing_data: bool) -> metadata::Result<Vec<(String, Value)>> {
    let mut reader = bytes;
    let root: Value = ciborium::de::from_reader(&mut reader).map_err(|e| {
        let (location, message) = match e {
            ciborium::de::Error::Io(io) => (bytes.len(), io.to_string()),
            ciborium::de::Error::Syntax(offset) => (offset, "invalid syntax".to_string()),
            ciborium::de::Error::Semantic(offset, message) => (offset.unwrap_or(0), message),
            ciborium::de::Error::RecursionLimitExceeded => {
                (bytes.len(), "nesting exceeds the maximum depth".to_string())
            }
        };
        Error::Decode(message).locate(location)
    })?;

    let consumed = bytes.len() - reader.len();
    if !reader.is_empty() && !allow_trailing_data {
        return Err(Error::TrailingData {
            remaining: reader.len(),
        }
        .locate(consumed));
    }

    let entries = match root {
        Value::Map(entries) => entries,
        other => {
            return Err(Error::NotAMap {
                found: utility::describe(&other),
            }
            .locate(0))
        }
    };

    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .map(|(key, value)| {
            let key = match key {
                Value::Text(key) => key,
                other => {
                    return Err(Error::NonTextKey {
                        found: utility::describe(&other),
                    }
                    .locate(0))
                }
            };
            if !seen.insert(key.clone()) {
                return Err(Error::DuplicateKey(key).locate(0));
            }
            Ok((key, value))
        })
        .collect()
}

/// The configuration for the [`Decoder`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Whether the hex strings in the output (the raw trailer and the values of
    /// unrecognised entries) start with `0x`.
    ///
    /// Defaults to [`DEFAULT_PREFIX_HEX_OUTPUT`].
    pub prefix_hex_output: bool,

    /// Whether to accept trailers that contain further bytes after the CBOR
    /// map. Those bytes still appear in the raw trailer output, but are
    /// otherwise ignored.
    ///
    /// Defaults to [`DEFAULT_ALLOW_TRAILING_DATA`].
    pub allow_trailing_data: bool,
}

impl Config {
    /// Sets the `prefix_hex_output` config parameter to `value`.
    #[must_use]
    pub fn with_prefix_hex_output(mut self, value: bool) -> Self {
        self.prefix_hex_output = value;
        self
    }

    /// Sets the `allow_trailing_data` config parameter to `value`.
    #[must_use]
    pub fn with_allow_trailing_data(mut self, value: bool) -> Self {
        self.allow_trailing_data = value;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix_hex_output:   DEFAULT_PREFIX_HEX_OUTPUT,
            allow_trailing_data: DEFAULT_ALLOW_TRAILING_DATA,
        }
    }
}
