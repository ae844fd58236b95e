//! Inspection and conversion helpers for tilecodec map streams.
//!
//! The binary stays thin; this library owns the JSON map representation
//! and the report formatting so they can be tested directly.

use std::fmt;

use anyhow::{Context, Result};
use codec::{decode_map_with_limits, encode_map, CodecLimits, RawMap, TileType};
use serde::{Deserialize, Serialize};

/// JSON representation of a raw map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MapFile {
    pub width: u16,
    pub height: u16,
    pub tiles: Vec<u16>,
    pub types: Vec<TileTypeFile>,
}

/// JSON representation of a palette entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TileTypeFile {
    pub name: String,
    pub color_base: String,
    #[serde(default)]
    pub color_variant: u8,
    #[serde(default)]
    pub conquerable: bool,
    #[serde(default)]
    pub navigable: bool,
    #[serde(default)]
    pub expansion_time: u8,
    #[serde(default)]
    pub expansion_cost: u8,
}

impl From<TileTypeFile> for TileType {
    fn from(entry: TileTypeFile) -> Self {
        Self {
            name: entry.name,
            color_base: entry.color_base,
            color_variant: entry.color_variant,
            conquerable: entry.conquerable,
            navigable: entry.navigable,
            expansion_time: entry.expansion_time,
            expansion_cost: entry.expansion_cost,
        }
    }
}

impl From<TileType> for TileTypeFile {
    fn from(entry: TileType) -> Self {
        Self {
            name: entry.name,
            color_base: entry.color_base,
            color_variant: entry.color_variant,
            conquerable: entry.conquerable,
            navigable: entry.navigable,
            expansion_time: entry.expansion_time,
            expansion_cost: entry.expansion_cost,
        }
    }
}

impl TryFrom<MapFile> for RawMap {
    type Error = anyhow::Error;

    fn try_from(file: MapFile) -> Result<Self> {
        RawMap::new(
            file.width,
            file.height,
            file.tiles,
            file.types.into_iter().map(TileType::from).collect(),
        )
        .context("invalid map description")
    }
}

impl From<RawMap> for MapFile {
    fn from(map: RawMap) -> Self {
        Self {
            width: map.width,
            height: map.height,
            tiles: map.tiles,
            types: map.types.into_iter().map(TileTypeFile::from).collect(),
        }
    }
}

/// Compresses a JSON map description into the binary stream.
pub fn encode_json(json: &str) -> Result<Vec<u8>> {
    let file: MapFile = serde_json::from_str(json).context("parse map JSON")?;
    let map = RawMap::try_from(file)?;
    encode_map(&map).context("encode map")
}

/// Decompresses a binary stream back into pretty-printed JSON.
pub fn decode_to_json(bytes: &[u8], limits: &CodecLimits) -> Result<String> {
    let map = decode_map_with_limits(bytes, limits).context("decode map")?;
    let file = MapFile::from(map);
    serde_json::to_string_pretty(&file).context("serialize map JSON")
}

/// Summary of a compressed map stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub width: u16,
    pub height: u16,
    pub palette: Vec<String>,
    pub compressed_bytes: usize,
    pub raw_tile_bytes: usize,
}

/// Decodes a stream and summarizes its shape and compression ratio.
pub fn inspect_bytes(bytes: &[u8], limits: &CodecLimits) -> Result<InspectReport> {
    let map = decode_map_with_limits(bytes, limits).context("decode map")?;
    Ok(InspectReport {
        width: map.width,
        height: map.height,
        palette: map.types.iter().map(|entry| entry.name.clone()).collect(),
        compressed_bytes: bytes.len(),
        raw_tile_bytes: map.cell_count() * 2,
    })
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dimensions: {}x{}", self.width, self.height)?;
        writeln!(f, "palette ({} entries): {}", self.palette.len(), self.palette.join(", "))?;
        write!(
            f,
            "compressed: {} bytes ({} raw tile bytes)",
            self.compressed_bytes, self.raw_tile_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP_JSON: &str = r##"{
        "width": 2,
        "height": 2,
        "tiles": [0, 0, 1, 1],
        "types": [
            {"name": "grass", "colorBase": "#4a7", "navigable": true},
            {"name": "water", "colorBase": "#06c", "expansionCost": 9}
        ]
    }"##;

    #[test]
    fn json_roundtrip_through_codec() {
        let bytes = encode_json(MAP_JSON).unwrap();
        let json = decode_to_json(&bytes, &CodecLimits::default()).unwrap();
        let file: MapFile = serde_json::from_str(&json).unwrap();
        assert_eq!(file.width, 2);
        assert_eq!(file.tiles, vec![0, 0, 1, 1]);
        assert_eq!(file.types[0].name, "grass");
        assert_eq!(file.types[1].expansion_cost, 9);
    }

    #[test]
    fn camel_case_fields_accepted() {
        let json = r##"{
            "width": 1, "height": 1, "tiles": [0],
            "types": [{"name": "x", "colorBase": "#fff", "colorVariant": 2,
                       "conquerable": true, "navigable": true,
                       "expansionTime": 3, "expansionCost": 4}]
        }"##;
        let file: MapFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.types[0].color_variant, 2);
        assert_eq!(file.types[0].expansion_time, 3);
    }

    #[test]
    fn mismatched_tiles_rejected() {
        let json = r##"{"width": 2, "height": 2, "tiles": [0], "types": [{"name": "x", "colorBase": "#fff"}]}"##;
        assert!(encode_json(json).is_err());
    }

    #[test]
    fn inspect_reports_shape() {
        let bytes = encode_json(MAP_JSON).unwrap();
        let report = inspect_bytes(&bytes, &CodecLimits::default()).unwrap();
        assert_eq!(report.width, 2);
        assert_eq!(report.height, 2);
        assert_eq!(report.palette, vec!["grass", "water"]);
        assert_eq!(report.compressed_bytes, bytes.len());
        assert_eq!(report.raw_tile_bytes, 8);

        let rendered = report.to_string();
        assert!(rendered.contains("2x2"));
        assert!(rendered.contains("grass"));
    }
}
