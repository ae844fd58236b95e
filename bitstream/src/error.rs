//! Error types for bitstream operations.

use std::fmt;

/// Result type for bitstream operations.
pub type BitResult<T> = Result<T, BitError>;

/// Errors that can occur during bit-level encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    /// Attempted to read past the end of the buffer.
    UnexpectedEof {
        /// Number of bits requested.
        requested: usize,
        /// Number of bits available.
        available: usize,
    },

    /// Invalid bit count for the operation.
    InvalidBitCount {
        /// The invalid bit count provided.
        bits: u8,
        /// Maximum allowed bits for this operation.
        max_bits: u8,
    },

    /// Value exceeds the range representable by the specified number of bits.
    ValueOutOfRange {
        /// The value that was out of range.
        value: u32,
        /// Number of bits available.
        bits: u8,
    },

    /// A string exceeded the field's maximum byte length during encoding.
    StringTooLong {
        /// Byte length of the offending string.
        len: usize,
        /// Maximum byte length of the field.
        max: u32,
    },

    /// A decoded string length prefix exceeded the field's maximum.
    StringLengthOutOfRange {
        /// The declared byte length.
        len: u32,
        /// Maximum byte length of the field.
        max: u32,
    },

    /// Decoded string bytes were not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for BitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "unexpected EOF: requested {requested} bits, {available} available"
                )
            }
            Self::InvalidBitCount { bits, max_bits } => {
                write!(f, "invalid bit count {bits}, maximum allowed is {max_bits}")
            }
            Self::ValueOutOfRange { value, bits } => {
                write!(f, "value {value} cannot be represented in {bits} bits")
            }
            Self::StringTooLong { len, max } => {
                write!(f, "string of {len} bytes exceeds field maximum of {max}")
            }
            Self::StringLengthOutOfRange { len, max } => {
                write!(
                    f,
                    "declared string length {len} exceeds field maximum of {max}"
                )
            }
            Self::InvalidUtf8 => {
                write!(f, "decoded string bytes are not valid UTF-8")
            }
        }
    }
}

impl std::error::Error for BitError {}
