//! Low-level bit packing primitives for the tilecodec map codec.
//!
//! This crate provides [`BitWriter`] and [`BitReader`] for bit-level
//! encoding and decoding: unsigned integers of 1-32 bits packed MSB-first
//! within each byte, single-bit booleans, and length-prefixed UTF-8
//! strings with a fixed maximum byte length.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about maps, tiles,
//!   or zones.
//! - **Explicit errors** - All failures return structured errors, never
//!   panic.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bool(true);
//! writer.write_bits(42, 7).unwrap();
//! writer.write_str("sand", 32).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(reader.read_bool().unwrap());
//! assert_eq!(reader.read_bits(7).unwrap(), 42);
//! assert_eq!(reader.read_str(32).unwrap(), "sand");
//! ```

mod error;
mod reader;
mod writer;

pub use error::{BitError, BitResult};
pub use reader::BitReader;
pub use writer::BitWriter;

/// Width in bits of the length prefix for a string field whose maximum
/// byte length is `max_bytes`: `ceil(log2(max_bytes + 1))`.
pub(crate) const fn length_prefix_bits(max_bytes: u32) -> u8 {
    (u32::BITS - max_bytes.leading_zeros()) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_prefix_widths() {
        assert_eq!(length_prefix_bits(0), 0);
        assert_eq!(length_prefix_bits(1), 1);
        assert_eq!(length_prefix_bits(4), 3);
        assert_eq!(length_prefix_bits(15), 4);
        assert_eq!(length_prefix_bits(16), 5);
        assert_eq!(length_prefix_bits(32), 6);
    }

    #[test]
    fn empty_roundtrip() {
        let writer = BitWriter::new();
        let bytes = writer.finish();
        assert!(bytes.is_empty());

        let reader = BitReader::new(&bytes);
        assert!(reader.is_empty());
    }

    #[test]
    fn single_bit_roundtrip() {
        let mut writer = BitWriter::new();
        writer.write_bool(true);
        let bytes = writer.finish();

        let mut reader = BitReader::new(&bytes);
        assert!(reader.read_bool().unwrap());
    }

    #[test]
    fn multiple_bits_roundtrip() {
        let mut writer = BitWriter::new();
        writer.write_bool(true);
        writer.write_bool(false);
        writer.write_bool(true);
        writer.write_bool(true);
        writer.write_bool(false);
        let bytes = writer.finish();

        let mut reader = BitReader::new(&bytes);
        assert!(reader.read_bool().unwrap());
        assert!(!reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
        assert!(!reader.read_bool().unwrap());
    }

    #[test]
    fn bits_roundtrip_various_sizes() {
        let test_cases = [
            (0b1010u32, 4u8),
            (0xFFu32, 8u8),
            (0xABCDu32, 16u8),
            (0x1234_5678u32, 32u8),
            (u32::MAX, 32u8),
        ];

        for (value, bits) in test_cases {
            let mut writer = BitWriter::new();
            writer.write_bits(value, bits).unwrap();
            let bytes = writer.finish();

            let mut reader = BitReader::new(&bytes);
            let read_value = reader.read_bits(bits).unwrap();
            assert_eq!(
                read_value, value,
                "roundtrip failed for {bits}-bit value {value}"
            );
        }
    }

    #[test]
    fn string_roundtrip_various_maxima() {
        for max in [1, 4, 16, 32] {
            let s = "abc".get(..usize::min(3, max as usize)).unwrap();
            let mut writer = BitWriter::new();
            writer.write_str(s, max).unwrap();
            let bytes = writer.finish();

            let mut reader = BitReader::new(&bytes);
            assert_eq!(reader.read_str(max).unwrap(), s, "max {max}");
        }
    }

    #[test]
    fn string_roundtrip_multibyte() {
        let s = "héllo";
        let mut writer = BitWriter::new();
        writer.write_str(s, 32).unwrap();
        let bytes = writer.finish();

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_str(32).unwrap(), s);
    }

    #[test]
    fn mixed_roundtrip() {
        let mut writer = BitWriter::new();
        writer.write_bool(true);
        writer.write_bits(0b1010, 4).unwrap();
        writer.write_bool(false);
        writer.write_str("grass", 32).unwrap();
        writer.write_bits(0xFF, 8).unwrap();
        writer.write_bits(42, 7).unwrap();
        let bytes = writer.finish();

        let mut reader = BitReader::new(&bytes);
        assert!(reader.read_bool().unwrap());
        assert_eq!(reader.read_bits(4).unwrap(), 0b1010);
        assert!(!reader.read_bool().unwrap());
        assert_eq!(reader.read_str(32).unwrap(), "grass");
        assert_eq!(reader.read_bits(8).unwrap(), 0xFF);
        assert_eq!(reader.read_bits(7).unwrap(), 42);
    }
}
