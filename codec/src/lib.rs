//! Lossless bit-packed codec for 2D tile maps.
//!
//! A map is a rectangular grid of cells, each referencing a tile type
//! from a small palette. [`encode_map`] compresses such a map by
//! partitioning it into zones (maximal 4-connected regions of equal
//! type), reducing each zone to border points, stitching those points
//! into short chains, and emitting the chains as chunk-relative line
//! records. [`decode_map`] places the lines back onto the grid and
//! restores every remaining cell with a single directional sweep.
//!
//! # Design Principles
//!
//! - **Correctness first** - Decoding an encoded map reproduces the
//!   input exactly, including unused palette entries.
//! - **Deterministic** - Same input produces the same bytes.
//! - **Bounded decoding** - Declared sizes are checked against
//!   [`CodecLimits`] before allocation; malformed input returns errors,
//!   never panics.
//!
//! # Example
//!
//! ```
//! use codec::{decode_map, encode_map, RawMap, TileType};
//!
//! let grass = TileType {
//!     name: "grass".to_owned(),
//!     color_base: "#4a7".to_owned(),
//!     color_variant: 0,
//!     conquerable: true,
//!     navigable: true,
//!     expansion_time: 2,
//!     expansion_cost: 10,
//! };
//! let map = RawMap::new(2, 2, vec![0, 0, 0, 0], vec![grass]).unwrap();
//!
//! let bytes = encode_map(&map).unwrap();
//! assert_eq!(decode_map(&bytes).unwrap(), map);
//! ```

mod error;
mod frame;
mod limits;
mod lines;
mod types;
mod zones;

pub use error::{CodecError, CodecResult, LimitKind};
pub use frame::{
    decode_map, decode_map_with_limits, encode_map, CURRENT_VERSION, MINIMUM_VERSION,
};
pub use limits::CodecLimits;
pub use types::{RawMap, TileType, MAX_COLOR_BYTES, MAX_NAME_BYTES};
