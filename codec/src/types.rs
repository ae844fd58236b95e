//! Data model for raw (uncompressed) tile maps.

use crate::error::{CodecError, CodecResult};

/// Maximum byte length of a tile type name.
pub const MAX_NAME_BYTES: u32 = 32;

/// Maximum byte length of a tile type color base string.
pub const MAX_COLOR_BYTES: u32 = 16;

/// A tile type: one palette entry describing the visual and gameplay
/// properties shared by every cell of that type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileType {
    /// Display name, at most [`MAX_NAME_BYTES`] UTF-8 bytes.
    pub name: String,
    /// Base color identifier, at most [`MAX_COLOR_BYTES`] UTF-8 bytes.
    pub color_base: String,
    /// Color variant in `[0, 15]`.
    pub color_variant: u8,
    /// Whether players can claim cells of this type.
    pub conquerable: bool,
    /// Whether units can path through cells of this type.
    pub navigable: bool,
    /// Ticks to expand into a cell of this type.
    pub expansion_time: u8,
    /// Resource cost to expand into a cell of this type.
    pub expansion_cost: u8,
}

/// A raw, uncompressed tile map.
///
/// `tiles` is row-major with row 0 at the top; each entry is an index
/// into `types`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMap {
    /// Grid width in cells.
    pub width: u16,
    /// Grid height in cells.
    pub height: u16,
    /// Per-cell palette indices, `width * height` entries.
    pub tiles: Vec<u16>,
    /// The tile type palette.
    pub types: Vec<TileType>,
}

impl RawMap {
    /// Creates a map, validating that `tiles` covers exactly
    /// `width * height` cells.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidDimensions`] on a size mismatch.
    pub fn new(
        width: u16,
        height: u16,
        tiles: Vec<u16>,
        types: Vec<TileType>,
    ) -> CodecResult<Self> {
        if tiles.len() != usize::from(width) * usize::from(height) {
            return Err(CodecError::InvalidDimensions {
                width,
                height,
                tiles: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
            types,
        })
    }

    /// Returns the number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the tile type index at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn tile_at(&self, x: u16, y: u16) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles
            .get(usize::from(x) + usize::from(y) * usize::from(self.width))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile_type(name: &str) -> TileType {
        TileType {
            name: name.to_owned(),
            color_base: "#808080".to_owned(),
            color_variant: 0,
            conquerable: true,
            navigable: true,
            expansion_time: 1,
            expansion_cost: 1,
        }
    }

    #[test]
    fn new_accepts_matching_dimensions() {
        let map = RawMap::new(2, 3, vec![0; 6], vec![tile_type("grass")]).unwrap();
        assert_eq!(map.cell_count(), 6);
    }

    #[test]
    fn new_accepts_empty_map() {
        let map = RawMap::new(0, 0, Vec::new(), vec![tile_type("grass")]).unwrap();
        assert_eq!(map.cell_count(), 0);
    }

    #[test]
    fn new_rejects_mismatched_tiles() {
        let err = RawMap::new(2, 3, vec![0; 5], vec![tile_type("grass")]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidDimensions {
                width: 2,
                height: 3,
                tiles: 5
            }
        ));
    }

    #[test]
    fn tile_at_row_major() {
        let map = RawMap::new(
            2,
            2,
            vec![0, 1, 2, 3],
            vec![
                tile_type("a"),
                tile_type("b"),
                tile_type("c"),
                tile_type("d"),
            ],
        )
        .unwrap();
        assert_eq!(map.tile_at(0, 0), Some(0));
        assert_eq!(map.tile_at(1, 0), Some(1));
        assert_eq!(map.tile_at(0, 1), Some(2));
        assert_eq!(map.tile_at(1, 1), Some(3));
    }

    #[test]
    fn tile_at_out_of_bounds() {
        let map = RawMap::new(2, 2, vec![0; 4], vec![tile_type("a")]).unwrap();
        assert_eq!(map.tile_at(2, 0), None);
        assert_eq!(map.tile_at(0, 2), None);
    }

    #[test]
    fn map_equality() {
        let a = RawMap::new(1, 1, vec![0], vec![tile_type("a")]).unwrap();
        let b = a.clone();
        assert_eq!(a, b);
    }
}
