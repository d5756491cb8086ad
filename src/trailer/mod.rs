//! This module contains the implementation of the [`Trailer`], the
//! length-prefixed block of CBOR metadata that the compiler appends to the end
//! of deployed bytecode.

use crate::{
    constant::LENGTH_FIELD_SIZE_BYTES,
    error::{container::Locatable, trailer, trailer::Error},
    utility,
};

/// The metadata trailer found at the end of a contract's bytecode.
///
/// # Layout
///
/// The final [`LENGTH_FIELD_SIZE_BYTES`] bytes of the bytecode hold a
/// big-endian `u16` that is the length, in bytes, of the CBOR data that
/// immediately precedes them:
///
/// ```text
/// | executable code ... | CBOR trailer (N bytes) | N as u16 big-endian |
/// ^ 0                   ^ offset                 ^ offset + N
/// ```
///
/// This makes the trailer self-locating from the end of the bytecode, so that
/// nothing needs to be parsed from the front.
///
/// # Validity
///
/// Construction only checks that the length field is present and consistent
/// with the length of the bytecode. Whether the trailer bytes are valid CBOR is
/// the concern of the [`crate::decoder::Decoder`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trailer {
    /// The byte offset in the bytecode at which the trailer starts.
    offset: usize,

    /// The raw trailer bytes, without the length field.
    bytes: Vec<u8>,
}

impl Trailer {
    /// Locates the trailer at the end of `bytecode`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `bytecode` is empty, is too short to hold the length
    /// field, or declares a trailer longer than the bytes available before the
    /// length field.
    pub fn locate(bytecode: &[u8]) -> trailer::Result<Self> {
        let (offset, length) = span(bytecode)?;
        let bytes = bytecode[offset..offset + length].to_vec();

        tracing::debug!(
            bytecode_length = bytecode.len(),
            offset,
            length,
            "Located metadata trailer"
        );

        Ok(Self { offset, bytes })
    }

    /// Gets the raw trailer bytes, excluding the length field.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Gets the length of the trailer in bytes, as declared by the length
    /// field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Checks if the length field declared an empty trailer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Gets the byte offset in the bytecode at which the trailer starts.
    ///
    /// This is also the length of the executable code that precedes it.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Gets the byte offset in the bytecode of the length field that follows
    /// the trailer.
    #[must_use]
    pub fn length_field_offset(&self) -> usize {
        self.offset + self.len()
    }

    /// Gets the value of the length field exactly as it appears in the
    /// bytecode.
    #[must_use]
    pub fn declared_length(&self) -> u16 {
        // Construction bounds the length by the two-byte field it was read from.
        u16::try_from(self.len()).unwrap_or(u16::MAX)
    }
}

/// A [`Trailer`] is usually located in a byte array of bytecode.
impl<'a> TryFrom<&'a [u8]> for Trailer {
    type Error = trailer::LocatedError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        Self::locate(value)
    }
}

/// A [`Trailer`] can be located in a string as long as that string is a
/// hexadecimal encoding of the bytecode, with or without the `0x` prefix.
impl TryFrom<&str> for Trailer {
    type Error = trailer::LocatedError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let bytes = utility::decode_hex(value)?;
        Self::locate(bytes.as_slice())
    }
}

/// Computes the offset and length of the trailer in `bytecode`, validating the
/// length field against the size of the bytecode.
///
/// # Errors
///
/// As for [`Trailer::locate`].
pub fn span(bytecode: &[u8]) -> trailer::Result<(usize, usize)> {
    if bytecode.is_empty() {
        return Err(Error::EmptyBytecode.locate(0));
    }

    let Some(available) = bytecode.len().checked_sub(LENGTH_FIELD_SIZE_BYTES) else {
        return Err(Error::MissingLengthField {
            available: bytecode.len(),
        }
        .locate(0));
    };

    let declared = usize::from(u16::from_be_bytes([
        bytecode[available],
        bytecode[available + 1],
    ]));

    let Some(offset) = available.checked_sub(declared) else {
        return Err(Error::TruncatedTrailer {
            declared,
            available,
        }
        .locate(available));
    };

    Ok((offset, declared))
}
