//! Utility functions useful throughout the codebase.

use ciborium::Value;
use hex::FromHexError;

use crate::{
    constant::HEX_PREFIX,
    error::{container::Locatable, trailer},
};

/// Gets the bytes from the provided hex-encoded string `code`.
///
/// This hex-encoded string may or may not start with the `0x` prefix (in either
/// case), and its digits may be upper or lower case. Both cases will be
/// handled.
///
/// # Errors
///
/// If `code` contains a character that is not a hex digit, or an odd number of
/// digits. The location of the error is the character index in `code`.
pub fn decode_hex(code: &str) -> trailer::Result<Vec<u8>> {
    let digits = strip_hex_prefix(code);
    let prefix_length = code.len() - digits.len();

    hex::decode(digits).map_err(|e| {
        if let FromHexError::InvalidHexCharacter { c, index } = e {
            let location = prefix_length + index;
            trailer::Error::InvalidHexCharacter(c, location).locate(location)
        } else {
            trailer::Error::InvalidHexLength.locate(code.len())
        }
    })
}

/// Removes the `0x` or `0X` prefix from `code` if it is present.
#[must_use]
pub fn strip_hex_prefix(code: &str) -> &str {
    code.strip_prefix(HEX_PREFIX)
        .or_else(|| code.strip_prefix("0X"))
        .unwrap_or(code)
}

/// Encodes `bytes` as lower-case hex, with the `0x` marker in front if
/// `prefixed` is set.
#[must_use]
pub fn encode_hex(bytes: impl AsRef<[u8]>, prefixed: bool) -> String {
    let digits = hex::encode(bytes);
    if prefixed {
        format!("{HEX_PREFIX}{digits}")
    } else {
        digits
    }
}

/// Gets a human-readable name for the kind of CBOR data item `value` is, for
/// use in error messages.
#[must_use]
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Integer(_) => "integer",
        Value::Bytes(_) => "byte string",
        Value::Float(_) => "float",
        Value::Text(_) => "text string",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
        Value::Tag(..) => "tagged item",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
        _ => "unknown item",
    }
}
