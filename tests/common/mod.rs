//! This module contains common utilities for simplifying the writing of
//! integration tests for this library.

#![cfg(test)]

use anyhow::anyhow;
use ciborium::{value::Integer, Value};

/// The executable part of a small contract, used as the code in front of the
/// trailers built by these tests.
#[allow(unused)] // It is actually
pub const CODE: &str =
    "6080604052348015600f57600080fd5b50603f80601d6000396000f3fe6080604052600080fdfe";

/// Encodes `value` as CBOR.
#[allow(unused)] // It is actually
pub fn encode(value: &Value) -> anyhow::Result<Vec<u8>> {
    let mut bytes = vec![];
    ciborium::ser::into_writer(value, &mut bytes)
        .map_err(|e| anyhow!("Could not encode: {e:?}"))?;
    Ok(bytes)
}

/// Builds a CBOR map with text keys from `entries`.
#[allow(unused)] // It is actually
pub fn map(entries: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(key, value)| (Value::Text(key.to_string()), value))
            .collect(),
    )
}

/// Builds a CBOR array of integers from `items`.
#[allow(unused)] // It is actually
pub fn ints(items: &[u64]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|item| Value::Integer(Integer::from(*item)))
            .collect(),
    )
}

/// Appends `body` and its big-endian length to `code`, producing the bytes of a
/// contract with a metadata trailer.
///
/// # Panics
///
/// If `body` is longer than the length field can describe.
#[allow(unused)] // It is actually
pub fn with_trailer(code: &[u8], body: &[u8]) -> Vec<u8> {
    let length = u16::try_from(body.len()).expect("Trailer body too long");
    let mut bytecode = code.to_vec();
    bytecode.extend_from_slice(body);
    bytecode.extend(length.to_be_bytes());
    bytecode
}

/// Builds the hex-encoded bytecode, with the `0x` prefix, of [`CODE`] followed
/// by a trailer containing the CBOR encoding of `value`.
#[allow(unused)] // It is actually
pub fn bytecode_for(value: &Value) -> anyhow::Result<String> {
    let code = hex::decode(CODE)?;
    let body = encode(value)?;
    Ok(format!("0x{}", hex::encode(with_trailer(&code, &body))))
}
