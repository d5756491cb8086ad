//! This module contains the interpretation of individual trailer entries.
//!
//! Each entry of the decoded CBOR map is dispatched on its key. The keys that
//! the compiler is known to emit get dedicated treatment, while all others are
//! passed through as hex so that keys added by future compilers are preserved.

use base58::ToBase58;
use ciborium::Value;
use itertools::Itertools;

use crate::{
    constant::{IPFS_KEY, SOLC_KEY, SOLC_VERSION_SEPARATOR},
    error::metadata::Error,
    utility,
};

/// The shape that the `ipfs` value must have.
const EXPECTED_IPFS: &str = "a byte string";

/// The shape that the `solc` value must have.
const EXPECTED_SOLC: &str = "a sequence of unsigned integers";

/// The shape that any other value must have.
const EXPECTED_BYTES: &str = "a value convertible to bytes";

/// A single interpreted entry of the metadata trailer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Field {
    /// The base-58 rendering of the IPFS multihash stored under `ipfs`.
    Ipfs(String),

    /// The dotted rendering of the compiler version stored under `solc`.
    SolcVersion(String),

    /// Any other entry, with its value rendered as hex.
    Other { key: String, value: String },
}

impl Field {
    /// Interprets the `value` found under `key` in the trailer.
    ///
    /// Hex renderings carry the `0x` prefix if `prefix_hex` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldType`] if `value` does not have the shape required
    /// for `key`.
    pub fn interpret(key: String, value: &Value, prefix_hex: bool) -> Result<Self, Error> {
        match key.as_str() {
            IPFS_KEY => {
                let multihash = value.as_bytes().ok_or_else(|| {
                    Error::field_type(key.as_str(), EXPECTED_IPFS, utility::describe(value))
                })?;
                Ok(Self::Ipfs(multihash.to_base58()))
            }
            SOLC_KEY => {
                let components = version_components(&key, value)?;
                Ok(Self::SolcVersion(
                    components.iter().join(SOLC_VERSION_SEPARATOR),
                ))
            }
            _ => {
                let bytes = as_bytes(&key, value)?;
                let value = utility::encode_hex(bytes, prefix_hex);
                Ok(Self::Other { key, value })
            }
        }
    }
}

/// Reads the compiler version components out of `value`.
///
/// Compilers since 0.5.9 emit the version as a three-byte string, where each
/// byte is a component. A CBOR array of unsigned integers is accepted as well.
fn version_components(key: &str, value: &Value) -> Result<Vec<u64>, Error> {
    match value {
        Value::Bytes(bytes) => Ok(bytes.iter().copied().map(u64::from).collect()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Integer(int) => u64::try_from(*int)
                    .map_err(|_| Error::field_type(key, EXPECTED_SOLC, "negative integer")),
                other => Err(Error::field_type(
                    key,
                    EXPECTED_SOLC,
                    utility::describe(other),
                )),
            })
            .collect(),
        other => Err(Error::field_type(
            key,
            EXPECTED_SOLC,
            utility::describe(other),
        )),
    }
}

/// Gets the bytes that `value` represents.
///
/// Byte strings are taken as they are, arrays must consist of integers that fit
/// in a byte, and a non-negative integer becomes its shortest big-endian
/// encoding (with zero encoded as a single zero byte).
fn as_bytes(key: &str, value: &Value) -> Result<Vec<u8>, Error> {
    match value {
        Value::Bytes(bytes) => Ok(bytes.clone()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Integer(int) => u8::try_from(*int).map_err(|_| {
                    Error::field_type(key, EXPECTED_BYTES, "array of non-byte integers")
                }),
                other => Err(Error::field_type(
                    key,
                    EXPECTED_BYTES,
                    utility::describe(other),
                )),
            })
            .collect(),
        Value::Integer(int) => {
            let int = u64::try_from(*int)
                .map_err(|_| Error::field_type(key, EXPECTED_BYTES, "negative integer"))?;
            let be_bytes = int.to_be_bytes();
            let first_significant = be_bytes
                .iter()
                .position(|b| *b != 0)
                .unwrap_or(be_bytes.len() - 1);
            Ok(be_bytes[first_significant..].to_vec())
        }
        other => Err(Error::field_type(
            key,
            EXPECTED_BYTES,
            utility::describe(other),
        )),
    }
}

#[cfg(test)]
mod test {
    use base58::FromBase58;
    use ciborium::{value::Integer, Value};

    use crate::{error::metadata::Error, metadata::field::Field};

    fn int(value: i64) -> Value {
        Value::Integer(Integer::from(value))
    }

    #[test]
    fn renders_ipfs_as_base58() {
        let mut multihash = vec![0x12, 0x20];
        multihash.extend([0u8; 32]);

        let field = Field::interpret("ipfs".into(), &Value::Bytes(multihash.clone()), true)
            .expect("Interpretation errored");

        let Field::Ipfs(cid) = &field else {
            panic!("Did not interpret as ipfs: {field:?}")
        };
        assert_eq!(cid, "QmNLei78zWmzUdbeRB3CiUfAizWUrbeeZh5K1rhAQKCh51");
        assert_eq!(cid.from_base58().expect("Not base58"), multihash);
    }

    #[test]
    fn rejects_ipfs_that_is_not_bytes() {
        let result = Field::interpret("ipfs".into(), &Value::Text("Qm".into()), true);
        assert_eq!(
            result,
            Err(Error::field_type("ipfs", "a byte string", "text string"))
        );
    }

    #[test]
    fn joins_solc_components_from_array() {
        let value = Value::Array(vec![int(0), int(5), int(17)]);
        let field = Field::interpret("solc".into(), &value, true).expect("Interpretation errored");
        assert_eq!(field, Field::SolcVersion("0.5.17".into()));
    }

    #[test]
    fn joins_solc_components_from_bytes() {
        let value = Value::Bytes(vec![0, 8, 17]);
        let field = Field::interpret("solc".into(), &value, true).expect("Interpretation errored");
        assert_eq!(field, Field::SolcVersion("0.8.17".into()));

        let field = Field::interpret("solc".into(), &Value::Bytes(vec![]), true)
            .expect("Interpretation errored");
        assert_eq!(field, Field::SolcVersion(String::new()));
    }

    #[test]
    fn rejects_solc_with_non_integer_components() {
        let value = Value::Array(vec![int(0), Value::Text("8".into())]);
        let result = Field::interpret("solc".into(), &value, true);
        assert_eq!(
            result,
            Err(Error::field_type(
                "solc",
                "a sequence of unsigned integers",
                "text string"
            ))
        );

        let value = Value::Array(vec![int(0), int(-8)]);
        let result = Field::interpret("solc".into(), &value, true);
        assert!(matches!(result, Err(Error::FieldType { .. })));
    }

    #[test]
    fn passes_unknown_bytes_through_as_hex() {
        let value = Value::Bytes(vec![0x01, 0x02]);
        let field = Field::interpret("foo".into(), &value, true).expect("Interpretation errored");
        assert_eq!(
            field,
            Field::Other {
                key:   "foo".into(),
                value: "0x0102".into(),
            }
        );

        let field = Field::interpret("foo".into(), &value, false).expect("Interpretation errored");
        assert_eq!(
            field,
            Field::Other {
                key:   "foo".into(),
                value: "0102".into(),
            }
        );
    }

    #[test]
    fn passes_byte_like_values_through_as_hex() {
        let array = Value::Array(vec![int(0xde), int(0xad)]);
        let field = Field::interpret("bzzr1".into(), &array, true).expect("Interpretation errored");
        assert_eq!(
            field,
            Field::Other {
                key:   "bzzr1".into(),
                value: "0xdead".into(),
            }
        );

        let cases = [(0, "0x00"), (1, "0x01"), (256, "0x0100"), (0x0012_3456, "0x123456")];
        for (number, expected) in cases {
            let field =
                Field::interpret("n".into(), &int(number), true).expect("Interpretation errored");
            assert_eq!(
                field,
                Field::Other {
                    key:   "n".into(),
                    value: expected.into(),
                }
            );
        }
    }

    #[test]
    fn rejects_unknown_values_that_are_not_byte_like() {
        let cases = [
            (Value::Bool(true), "boolean"),
            (Value::Text("abc".into()), "text string"),
            (Value::Map(vec![]), "map"),
            (int(-1), "negative integer"),
            (Value::Array(vec![int(256)]), "array of non-byte integers"),
        ];

        for (value, found) in cases {
            let result = Field::interpret("experimental".into(), &value, true);
            assert_eq!(
                result,
                Err(Error::field_type(
                    "experimental",
                    "a value convertible to bytes",
                    found
                ))
            );
        }
    }

    #[test]
    fn passes_keys_named_like_output_fields_through() {
        let value = Value::Bytes(vec![0x01]);
        for key in ["cbor", "solcVersion"] {
            let field = Field::interpret(key.into(), &value, true).expect("Interpretation errored");
            assert_eq!(
                field,
                Field::Other {
                    key:   key.into(),
                    value: "0x01".into(),
                }
            );
        }
    }
}
