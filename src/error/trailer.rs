//! This module contains the error type that pertains to reading the bytecode
//! and locating the metadata trailer within it.

use thiserror::Error;

use crate::error::container;

/// Errors that occur while turning the input into bytes and finding the
/// length-prefixed trailer at the end of those bytes.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("Bytecode cannot be empty")]
    EmptyBytecode,

    #[error("The provided hexadecimal input had an odd length")]
    InvalidHexLength,

    #[error("Encountered invalid hex char {_0:?} at index {_1:?}")]
    InvalidHexCharacter(char, usize),

    #[error("Bytecode of {available} bytes is too short to contain the 2-byte trailer length")]
    MissingLengthField { available: usize },

    #[error("Trailer declares {declared} bytes but only {available} precede the length field")]
    TruncatedTrailer { declared: usize, available: usize },
}

/// A trailer error with an associated location in the input.
pub type LocatedError = container::Located<Error>;

/// The result type for functions that may return trailer errors.
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
