//! Frame encoding/decoding and the public codec entry points.
//!
//! The frame starts with a fixed header (version, dimensions, fill
//! direction), then the palette, then the line stream. Lines are placed
//! relative to 32x32 chunks: each record advances the current chunk with a
//! unary run of 1-bits, then gives the start cell inside the chunk and a
//! 2-bit code per step. Decoding places every line cell as an anchor and
//! sweeps the grid once in the recorded direction, propagating each
//! anchor's tile until the next anchor.

use bitstream::{BitReader, BitWriter};

use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::lines::{self, chunk_id, chunk_width, Candidates, Line, CHUNK_DIM};
use crate::types::{RawMap, TileType, MAX_COLOR_BYTES, MAX_NAME_BYTES};
use crate::zones::{build_zones, ZonePartition};

/// Codec version written by the encoder.
pub const CURRENT_VERSION: u8 = 0;

/// Oldest codec version the decoder accepts.
pub const MINIMUM_VERSION: u8 = 0;

const VERSION_BITS: u8 = 4;
const DIMENSION_BITS: u8 = 16;
const RESERVED_BYTE_BITS: u8 = 8;
const PALETTE_LEN_BITS: u8 = 16;
const PALETTE_RESERVED_BITS: u8 = 3;
const COLOR_VARIANT_BITS: u8 = 4;
const EXPANSION_BITS: u8 = 8;
const LINE_COUNT_BITS: u8 = 32;
const SEGMENT_LEN_BITS: u8 = 8;
const POSITION_BITS: u8 = 10;
const STEP_BITS: u8 = 2;

const STEP_RIGHT: u32 = 0b00;
const STEP_LEFT: u32 = 0b01;
const STEP_DOWN: u32 = 0b10;
const STEP_UP: u32 = 0b11;

/// The decoder sweep direction recorded in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FillDirection {
    LeftToRight,
    TopToBottom,
}

/// Width in bits of a palette index field for the given palette size.
fn type_field_bits(palette_len: usize) -> u8 {
    if palette_len <= 1 {
        0
    } else {
        (usize::BITS - (palette_len - 1).leading_zeros()) as u8
    }
}

/// Compresses a map into the bit-packed byte stream.
///
/// # Errors
///
/// Returns [`CodecError::InvalidDimensions`] when `tiles` does not cover
/// `width * height` cells, [`CodecError::PaletteTooLarge`] when the
/// palette exceeds the 16-bit length field,
/// [`CodecError::UnknownTileType`] when a cell references a missing
/// palette entry, and [`CodecError::Bits`] when a palette string or field
/// value does not fit its field.
pub fn encode_map(map: &RawMap) -> CodecResult<Vec<u8>> {
    let cells = usize::from(map.width) * usize::from(map.height);
    if map.tiles.len() != cells {
        return Err(CodecError::InvalidDimensions {
            width: map.width,
            height: map.height,
            tiles: map.tiles.len(),
        });
    }
    if map.types.len() > usize::from(u16::MAX) {
        return Err(CodecError::PaletteTooLarge {
            len: map.types.len(),
        });
    }

    let partition = build_zones(map.width, &map.tiles);
    let used_len = count_used_types(&partition, map.types.len())?;

    let candidates = lines::build_candidates(&partition, map.width);
    let direction = select_direction(&candidates, type_field_bits(used_len), map);
    let lines = match direction {
        FillDirection::LeftToRight => &candidates.left_to_right,
        FillDirection::TopToBottom => &candidates.top_to_bottom,
    };

    write_frame(map, direction, lines)
}

/// Reconstructs a map from a bit-packed byte stream, with default limits.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedVersion`] for a foreign version
/// number, [`CodecError::Bits`] on truncated or malformed fields,
/// [`CodecError::CellOutOfBounds`] when a line walks off the grid, and
/// [`CodecError::LimitsExceeded`] when the stream's declared sizes exceed
/// [`CodecLimits::default`].
pub fn decode_map(bytes: &[u8]) -> CodecResult<RawMap> {
    decode_map_with_limits(bytes, &CodecLimits::default())
}

/// Reconstructs a map from a bit-packed byte stream.
///
/// See [`decode_map`]; this variant takes explicit decoder limits.
pub fn decode_map_with_limits(bytes: &[u8], limits: &CodecLimits) -> CodecResult<RawMap> {
    let mut reader = BitReader::new(bytes);

    let version = reader.read_bits(VERSION_BITS)? as u8;
    if !(MINIMUM_VERSION..=CURRENT_VERSION).contains(&version) {
        return Err(CodecError::UnsupportedVersion { found: version });
    }
    let width = reader.read_bits(DIMENSION_BITS)? as u16;
    let height = reader.read_bits(DIMENSION_BITS)? as u16;
    reader.read_bits(RESERVED_BYTE_BITS)?;
    let direction = if reader.read_bool()? {
        FillDirection::TopToBottom
    } else {
        FillDirection::LeftToRight
    };
    reader.read_bool()?;

    let cells = usize::from(width) * usize::from(height);
    if cells > limits.max_cells {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::Cells,
            limit: limits.max_cells,
            actual: cells,
        });
    }

    let palette_len = reader.read_bits(PALETTE_LEN_BITS)? as usize;
    if palette_len > limits.max_palette_entries {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::PaletteEntries,
            limit: limits.max_palette_entries,
            actual: palette_len,
        });
    }
    let mut types = Vec::with_capacity(palette_len);
    for _ in 0..palette_len {
        types.push(read_palette_entry(&mut reader)?);
    }

    let line_count = reader.read_bits(LINE_COUNT_BITS)? as usize;
    if line_count > limits.max_lines {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::Lines,
            limit: limits.max_lines,
            actual: line_count,
        });
    }

    let type_bits = type_field_bits(palette_len);
    let mut tiles = vec![0u16; cells];
    let mut anchors = vec![false; cells];
    let chunk_columns = chunk_width(width);
    let mut current_chunk = 0u64;

    for _ in 0..line_count {
        while reader.read_bool()? {
            current_chunk += 1;
        }
        let length = reader.read_bits(SEGMENT_LEN_BITS)? as usize + 1;
        let type_id = reader.read_bits(type_bits)? as u16;
        let position = reader.read_bits(POSITION_BITS)?;

        let mut cell = absolute_cell(current_chunk, position, width, chunk_columns, cells)?;
        tiles[cell as usize] = type_id;
        anchors[cell as usize] = true;
        for _ in 1..length {
            let code = reader.read_bits(STEP_BITS)?;
            cell = apply_step(cell, code, width, cells)?;
            tiles[cell as usize] = type_id;
            anchors[cell as usize] = true;
        }
    }

    reader.read_bool()?;
    reader.read_bits(RESERVED_BYTE_BITS)?;

    match direction {
        FillDirection::LeftToRight => fill_left_to_right(&mut tiles, &anchors),
        FillDirection::TopToBottom => fill_top_to_bottom(&mut tiles, &anchors, width),
    }

    Ok(RawMap {
        width,
        height,
        tiles,
        types,
    })
}

/// Validates every zone's palette reference and returns how many palette
/// entries the map actually uses. The used count sizes the type field of
/// the direction-cost heuristic.
fn count_used_types(partition: &ZonePartition, palette_len: usize) -> CodecResult<usize> {
    let mut used = vec![false; palette_len];
    for zone in &partition.zones {
        match used.get_mut(usize::from(zone.type_index)) {
            Some(slot) => *slot = true,
            None => {
                return Err(CodecError::UnknownTileType {
                    index: zone.type_index,
                    palette_len,
                })
            }
        }
    }
    Ok(used.iter().filter(|&&in_use| in_use).count())
}

/// Picks the cheaper candidate set.
///
/// Ties go to left-to-right. The top-to-bottom sweep never revisits the
/// final grid cell, so that candidate is only eligible when the final
/// cell's value survives decoding: either a line covers it or its tile
/// index is 0, the value the decoder's grid starts with.
fn select_direction(candidates: &Candidates, cost_type_bits: u8, map: &RawMap) -> FillDirection {
    let cost_l2r = lines::candidate_cost(&candidates.left_to_right, cost_type_bits, map.width);
    let cost_t2b = lines::candidate_cost(&candidates.top_to_bottom, cost_type_bits, map.width);
    if cost_l2r <= cost_t2b {
        return FillDirection::LeftToRight;
    }

    let last = map.tiles.len() - 1;
    if map.tiles[last] == 0 || lines::covers_cell(&candidates.top_to_bottom, last as u32) {
        FillDirection::TopToBottom
    } else {
        FillDirection::LeftToRight
    }
}

fn write_frame(map: &RawMap, direction: FillDirection, lines: &[Line]) -> CodecResult<Vec<u8>> {
    let mut writer = BitWriter::with_capacity(16 + map.types.len() * 8 + lines.len() * 4);

    writer.write_bits(u32::from(CURRENT_VERSION), VERSION_BITS)?;
    writer.write_bits(u32::from(map.width), DIMENSION_BITS)?;
    writer.write_bits(u32::from(map.height), DIMENSION_BITS)?;
    writer.write_bits(0, RESERVED_BYTE_BITS)?;
    writer.write_bool(direction == FillDirection::TopToBottom);
    writer.write_bool(false);

    writer.write_bits(map.types.len() as u32, PALETTE_LEN_BITS)?;
    for tile_type in &map.types {
        write_palette_entry(&mut writer, tile_type)?;
    }

    let type_bits = type_field_bits(map.types.len());
    writer.write_bits(lines.len() as u32, LINE_COUNT_BITS)?;
    let mut current_chunk = 0u32;
    for line in lines {
        let chunk = chunk_id(line.cells[0], map.width);
        for _ in current_chunk..chunk {
            writer.write_bool(true);
        }
        writer.write_bool(false);
        current_chunk = chunk;

        writer.write_bits(line.cells.len() as u32 - 1, SEGMENT_LEN_BITS)?;
        writer.write_bits(u32::from(line.type_index), type_bits)?;
        writer.write_bits(position_in_chunk(line.cells[0], map.width), POSITION_BITS)?;
        for pair in line.cells.windows(2) {
            writer.write_bits(step_code(pair[0], pair[1], map.width)?, STEP_BITS)?;
        }
    }

    writer.write_bool(false);
    writer.write_bits(0, RESERVED_BYTE_BITS)?;
    Ok(writer.finish())
}

fn write_palette_entry(writer: &mut BitWriter, tile_type: &TileType) -> CodecResult<()> {
    writer.write_bits(0, PALETTE_RESERVED_BITS)?;
    writer.write_str(&tile_type.name, MAX_NAME_BYTES)?;
    writer.write_str(&tile_type.color_base, MAX_COLOR_BYTES)?;
    writer.write_bits(u32::from(tile_type.color_variant), COLOR_VARIANT_BITS)?;
    writer.write_bool(tile_type.conquerable);
    writer.write_bool(tile_type.navigable);
    writer.write_bits(u32::from(tile_type.expansion_time), EXPANSION_BITS)?;
    writer.write_bits(u32::from(tile_type.expansion_cost), EXPANSION_BITS)?;
    Ok(())
}

fn read_palette_entry(reader: &mut BitReader<'_>) -> CodecResult<TileType> {
    reader.read_bits(PALETTE_RESERVED_BITS)?;
    let name = reader.read_str(MAX_NAME_BYTES)?;
    let color_base = reader.read_str(MAX_COLOR_BYTES)?;
    let color_variant = reader.read_bits(COLOR_VARIANT_BITS)? as u8;
    let conquerable = reader.read_bool()?;
    let navigable = reader.read_bool()?;
    let expansion_time = reader.read_bits(EXPANSION_BITS)? as u8;
    let expansion_cost = reader.read_bits(EXPANSION_BITS)? as u8;
    Ok(TileType {
        name,
        color_base,
        color_variant,
        conquerable,
        navigable,
        expansion_time,
        expansion_cost,
    })
}

/// Position of `cell` inside its 32x32 chunk, `(x % 32) + (y % 32) * 32`.
fn position_in_chunk(cell: u32, width: u16) -> u32 {
    let w = u32::from(width);
    let x = cell % w;
    let y = cell / w;
    (x % CHUNK_DIM) + (y % CHUNK_DIM) * CHUNK_DIM
}

/// Resolves a chunk id and in-chunk position to an absolute cell index.
fn absolute_cell(
    chunk: u64,
    position: u32,
    width: u16,
    chunk_columns: u32,
    cells: usize,
) -> CodecResult<u32> {
    if chunk_columns == 0 {
        return Err(CodecError::CellOutOfBounds {
            cell: 0,
            cells,
        });
    }
    let columns = u64::from(chunk_columns);
    let w = u64::from(width);
    let chunk_x = chunk % columns;
    let chunk_y = chunk / columns;
    let local_x = u64::from(position) % u64::from(CHUNK_DIM);
    let local_y = u64::from(position) / u64::from(CHUNK_DIM);

    let absolute = local_x
        + chunk_x * u64::from(CHUNK_DIM)
        + local_y * w
        + chunk_y * u64::from(CHUNK_DIM) * w;
    if absolute >= cells as u64 {
        return Err(CodecError::CellOutOfBounds {
            cell: absolute as i64,
            cells,
        });
    }
    Ok(absolute as u32)
}

/// Encodes the delta between two consecutive line cells as a step code.
fn step_code(from: u32, to: u32, width: u16) -> CodecResult<u32> {
    let w = u32::from(width);
    if to == from + 1 {
        Ok(STEP_RIGHT)
    } else if to + 1 == from {
        Ok(STEP_LEFT)
    } else if to == from + w {
        Ok(STEP_DOWN)
    } else if to + w == from {
        Ok(STEP_UP)
    } else {
        Err(CodecError::InvalidStep { from, to })
    }
}

/// Advances a cell index by a decoded step code, bounds-checked.
fn apply_step(cell: u32, code: u32, width: u16, cells: usize) -> CodecResult<u32> {
    let delta = match code {
        STEP_RIGHT => 1,
        STEP_LEFT => -1,
        STEP_DOWN => i64::from(width),
        _ => -i64::from(width),
    };
    let target = i64::from(cell) + delta;
    if target < 0 || target >= cells as i64 {
        return Err(CodecError::CellOutOfBounds {
            cell: target,
            cells,
        });
    }
    Ok(target as u32)
}

/// Row-major sweep: each anchor's tile propagates rightward (wrapping
/// into the next row) until the next anchor.
fn fill_left_to_right(tiles: &mut [u16], anchors: &[bool]) {
    let mut current = 0u16;
    for (cell, anchored) in anchors.iter().enumerate() {
        if *anchored {
            current = tiles[cell];
        }
        tiles[cell] = current;
    }
}

/// Column-major sweep: each anchor's tile propagates downward (wrapping
/// into the next column) until the next anchor.
///
/// Exactly `cells - 1` cells are processed; the final grid cell is never
/// revisited and keeps its placed or initial value. The encoder only
/// selects this direction when that value is already correct.
fn fill_top_to_bottom(tiles: &mut [u16], anchors: &[bool], width: u16) {
    let cells = tiles.len();
    if cells == 0 {
        return;
    }
    let w = usize::from(width);
    let mut current = 0u16;
    let mut cell = 0usize;
    while cell < cells - 1 {
        if anchors[cell] {
            current = tiles[cell];
        }
        tiles[cell] = current;
        cell += w;
        if cell >= cells {
            cell = (cell + 1) % w;
        }
    }
}
