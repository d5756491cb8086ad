//! This module contains the primary error type for the library's interface.
//! It also re-exports the more specific error types that are
//! subsystem-specific.
//!
//! All of the errors implement [`std::error::Error`], and hence can be used
//! with [`anyhow::Error`].

pub mod container;
pub mod metadata;
pub mod trailer;

use thiserror::Error;

/// The interface result type for the library.
///
/// # Usage
///
/// Any function considered to be part of the public interface of the library
/// should return this result type. Subsystems should return the more-specific
/// child error types as appropriate.
pub type Result<T> = std::result::Result<T, LocatedError>;

/// The interface error type for the library.
///
/// All errors returned from the library interface (and hence encountered by the
/// clients of the library) should be members of this enum.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Errors that come from reading the bytecode and locating the trailer.
    #[error(transparent)]
    Trailer(#[from] trailer::Error),

    /// Errors that come from decoding the trailer and its fields.
    #[error(transparent)]
    Metadata(#[from] metadata::Error),
}

/// The coarse classification of every error the library can return.
///
/// Callers that only need to decide whether to skip, log, or abort can match on
/// this rather than on the individual error variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The input had zero length.
    EmptyInput,

    /// The input was text that is not valid hexadecimal.
    InvalidHex,

    /// The length field is missing or inconsistent with the input length.
    MalformedTrailer,

    /// The trailer bytes are not a single valid CBOR data item.
    Decode,

    /// The decoded trailer is not a map of unique text keys.
    Schema,

    /// A value does not have the shape required by its key.
    FieldType,
}

impl Error {
    /// Gets the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Trailer(e) => match e {
                trailer::Error::EmptyBytecode => ErrorKind::EmptyInput,
                trailer::Error::InvalidHexLength | trailer::Error::InvalidHexCharacter(..) => {
                    ErrorKind::InvalidHex
                }
                trailer::Error::MissingLengthField { .. }
                | trailer::Error::TruncatedTrailer { .. } => ErrorKind::MalformedTrailer,
            },
            Self::Metadata(e) => match e {
                metadata::Error::Decode(_) | metadata::Error::TrailingData { .. } => {
                    ErrorKind::Decode
                }
                metadata::Error::NotAMap { .. }
                | metadata::Error::NonTextKey { .. }
                | metadata::Error::DuplicateKey(_) => ErrorKind::Schema,
                metadata::Error::FieldType { .. } => ErrorKind::FieldType,
            },
        }
    }
}

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

/// A library error with an associated location.
pub type LocatedError = container::Located<Error>;

impl LocatedError {
    /// Gets the classification of the contained error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.payload.kind()
    }
}

/// Allow simple conversions from located trailer errors by re-wrapping the
/// located error around the more general payload.
impl From<trailer::LocatedError> for LocatedError {
    fn from(value: trailer::LocatedError) -> Self {
        value.map(Error::from)
    }
}

/// Allow simple conversions from located metadata errors by re-wrapping the
/// located error around the more general payload.
impl From<metadata::LocatedError> for LocatedError {
    fn from(value: metadata::LocatedError) -> Self {
        value.map(Error::from)
    }
}
