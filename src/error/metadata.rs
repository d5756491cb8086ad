//! This module contains the error type that pertains to decoding the CBOR
//! payload of the trailer and interpreting its fields.

use thiserror::Error;

use crate::error::container;

/// Errors that occur once the trailer bytes have been found, while decoding
/// them and turning the decoded fields into [`crate::Metadata`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("Trailer is not valid CBOR: {_0}")]
    Decode(String),

    #[error("Trailer has {remaining} bytes left over after its CBOR data item")]
    TrailingData { remaining: usize },

    #[error("Trailer decoded to a {found} where a map was expected")]
    NotAMap { found: &'static str },

    #[error("Trailer map has a {found} key where a text key was expected")]
    NonTextKey { found: &'static str },

    #[error("Trailer map contains the key {_0:?} more than once")]
    DuplicateKey(String),

    #[error("Value under {key:?} is a {found} but {expected} was expected")]
    FieldType {
        key:      String,
        expected: &'static str,
        found:    &'static str,
    },
}

impl Error {
    /// Constructs a field type error for the value under `key`.
    pub fn field_type(key: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::FieldType {
            key: key.into(),
            expected,
            found,
        }
    }
}

/// A metadata error with an associated location in the bytecode.
pub type LocatedError = container::Located<Error>;

/// The result type for functions that may return metadata errors.
pub type Result<T> = std::result::Result<T, LocatedError>;

/// Make it possible to attach locations to these errors.
impl container::Locatable for Error {
    type Located = LocatedError;

    fn locate(self, offset: usize) -> Self::Located {
        container::Located {
            location: offset,
            payload:  self,
        }
    }
}
