//! Error types for codec operations.

use std::fmt;

use bitstream::BitError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding a map.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    /// Bit-level error: truncated input, an over-long string field, or a
    /// value that does not fit its field.
    Bits(BitError),

    /// Unsupported codec version in the stream header.
    UnsupportedVersion {
        /// The version found in the stream.
        found: u8,
    },

    /// A cell references a palette index not present in the input palette.
    UnknownTileType {
        /// The offending palette index.
        index: u16,
        /// Number of entries in the input palette.
        palette_len: usize,
    },

    /// The caller-provided tile buffer does not cover `width * height` cells.
    InvalidDimensions {
        /// Declared map width.
        width: u16,
        /// Declared map height.
        height: u16,
        /// Actual number of tile entries supplied.
        tiles: usize,
    },

    /// The input palette has more entries than the 16-bit palette length
    /// field can describe.
    PaletteTooLarge {
        /// Number of entries in the input palette.
        len: usize,
    },

    /// A decoded line walked outside the map grid.
    CellOutOfBounds {
        /// The offending cell index (may be negative for an underflowing
        /// step).
        cell: i64,
        /// Number of cells in the grid.
        cells: usize,
    },

    /// A consecutive pair of line cells is not a 4-neighbor step.
    InvalidStep {
        /// First cell of the pair.
        from: u32,
        /// Second cell of the pair.
        to: u32,
    },

    /// Decoder limits exceeded.
    LimitsExceeded {
        /// Which limit was exceeded.
        kind: LimitKind,
        /// The configured limit.
        limit: usize,
        /// The value found in the stream.
        actual: usize,
    },
}

/// Specific decoder limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Cells,
    PaletteEntries,
    Lines,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits(e) => write!(f, "bitstream error: {e}"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported codec version: {found}")
            }
            Self::UnknownTileType { index, palette_len } => {
                write!(
                    f,
                    "unknown tile type {index} (palette has {palette_len} entries)"
                )
            }
            Self::InvalidDimensions {
                width,
                height,
                tiles,
            } => {
                write!(
                    f,
                    "dimension mismatch: {width}x{height} map with {tiles} tile entries"
                )
            }
            Self::PaletteTooLarge { len } => {
                write!(f, "palette of {len} entries exceeds the 16-bit length field")
            }
            Self::CellOutOfBounds { cell, cells } => {
                write!(f, "line cell {cell} outside grid of {cells} cells")
            }
            Self::InvalidStep { from, to } => {
                write!(f, "cells {from} and {to} are not 4-neighbors")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cells => "cell count",
            Self::PaletteEntries => "palette entries",
            Self::Lines => "line count",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bits(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BitError> for CodecError {
    fn from(err: BitError) -> Self {
        Self::Bits(err)
    }
}
