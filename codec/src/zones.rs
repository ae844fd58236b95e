//! Zone partitioning: flood fill and border-point recording.
//!
//! A zone is a maximal 4-connected region of cells sharing one tile type.
//! The fill also records each zone's left and top border points, which are
//! the seeds the line builder stitches into emitted chains.

use std::collections::HashMap;

/// A maximal 4-connected region of equal-typed cells.
///
/// A cell is a left-border point when its left neighbor is off the map or
/// belongs to a different zone; top-border points are defined symmetrically
/// for the cell above. Both lists hold at least one cell per zone.
#[derive(Debug)]
pub(crate) struct Zone {
    /// Index into the caller's palette.
    pub type_index: u16,
    /// Left-border cells in fill order.
    pub left_border: Vec<u32>,
    /// Cell index to position in `left_border`.
    pub left_border_index: HashMap<u32, u32>,
    /// Top-border cells in fill order.
    pub top_border: Vec<u32>,
    /// Cell index to position in `top_border`.
    pub top_border_index: HashMap<u32, u32>,
}

impl Zone {
    fn new(type_index: u16) -> Self {
        Self {
            type_index,
            left_border: Vec::new(),
            left_border_index: HashMap::new(),
            top_border: Vec::new(),
            top_border_index: HashMap::new(),
        }
    }

    fn add_left_border(&mut self, cell: u32) {
        let next = self.left_border.len() as u32;
        if let std::collections::hash_map::Entry::Vacant(entry) =
            self.left_border_index.entry(cell)
        {
            entry.insert(next);
            self.left_border.push(cell);
        }
    }

    fn add_top_border(&mut self, cell: u32) {
        let next = self.top_border.len() as u32;
        if let std::collections::hash_map::Entry::Vacant(entry) = self.top_border_index.entry(cell)
        {
            entry.insert(next);
            self.top_border.push(cell);
        }
    }
}

/// The zone partition of a map.
///
/// `cell_map` assigns every cell a 1-based zone id (`k` means
/// `zones[k - 1]`); 0 marks a cell not yet reached and only occurs
/// mid-fill. Zone ids follow the order zones are first encountered by the
/// row-major scan.
#[derive(Debug)]
pub(crate) struct ZonePartition {
    pub zones: Vec<Zone>,
    pub cell_map: Vec<u32>,
}

/// Partitions the grid into zones with an explicit-stack flood fill.
pub(crate) fn build_zones(width: u16, tiles: &[u16]) -> ZonePartition {
    let w = usize::from(width);
    let cells = tiles.len();
    let mut cell_map = vec![0u32; cells];
    let mut zones: Vec<Zone> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..cells {
        if cell_map[start] != 0 {
            continue;
        }
        let zone_id = zones.len() as u32 + 1;
        let tile = tiles[start];
        let mut zone = Zone::new(tile);

        cell_map[start] = zone_id;
        stack.push(start);
        while let Some(cell) = stack.pop() {
            let x = cell % w;
            let y = cell / w;

            // A same-typed left neighbor extends the fill; anything else
            // (other zone or map edge) makes this cell a left-border point.
            if x > 0 && tiles[cell - 1] == tile {
                if cell_map[cell - 1] == 0 {
                    cell_map[cell - 1] = zone_id;
                    stack.push(cell - 1);
                }
            } else {
                zone.add_left_border(cell as u32);
            }

            if y > 0 && tiles[cell - w] == tile {
                if cell_map[cell - w] == 0 {
                    cell_map[cell - w] = zone_id;
                    stack.push(cell - w);
                }
            } else {
                zone.add_top_border(cell as u32);
            }

            // Right and bottom neighbors only feed the fill.
            if x + 1 < w && tiles[cell + 1] == tile && cell_map[cell + 1] == 0 {
                cell_map[cell + 1] = zone_id;
                stack.push(cell + 1);
            }
            if cell + w < cells && tiles[cell + w] == tile && cell_map[cell + w] == 0 {
                cell_map[cell + w] = zone_id;
                stack.push(cell + w);
            }
        }

        zones.push(zone);
    }

    ZonePartition { zones, cell_map }
}
