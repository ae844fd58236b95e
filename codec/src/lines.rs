//! Line building: short-path graphs between border points, greedy
//! stitching into chains, cropping, and chunk-ordered emission.
//!
//! Per zone, border points are connected by paths found with a bounded BFS
//! walking only inside the zone, then stitched shortest-first into chains
//! with a degree cap of two per point. The result is two candidate line
//! sets per map, one seeded from left borders and one from top borders;
//! the frame encoder keeps whichever costs fewer bits.

use std::collections::{HashMap, VecDeque};

use crate::zones::ZonePartition;

/// Upper bound on the BFS path length between two border points.
pub(crate) const MAX_PATH_STEPS: usize = 8;

/// Maximum number of cells in one emitted line.
pub(crate) const MAX_SEGMENT_CELLS: usize = 256;

/// Edge length of the position-compression chunks.
pub(crate) const CHUNK_DIM: u32 = 32;

/// An ordered chain of 4-adjacent cells within one zone, ready for
/// emission as a single line record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    /// Palette index written to the stream.
    pub type_index: u16,
    /// Cell indices; consecutive cells differ by one 4-neighbor step.
    pub cells: Vec<u32>,
}

/// Both fill-direction candidates for a map, each in chunk order.
#[derive(Debug)]
pub(crate) struct Candidates {
    /// Chains seeded from left borders, for the left-to-right sweep.
    pub left_to_right: Vec<Line>,
    /// Chains seeded from top borders, for the top-to-bottom sweep.
    pub top_to_bottom: Vec<Line>,
}

/// Number of chunk columns covering a map of the given width.
pub(crate) fn chunk_width(width: u16) -> u32 {
    u32::from(width).div_ceil(CHUNK_DIM)
}

/// Row-major index of the chunk containing `cell`.
pub(crate) fn chunk_id(cell: u32, width: u16) -> u32 {
    let w = u32::from(width);
    let x = cell % w;
    let y = cell / w;
    (x / CHUNK_DIM) + (y / CHUNK_DIM) * chunk_width(width)
}

/// Builds both direction candidates for the partitioned map.
pub(crate) fn build_candidates(partition: &ZonePartition, width: u16) -> Candidates {
    let mut scratch = BfsScratch::new(partition.cell_map.len());
    let mut left_to_right = Vec::new();
    let mut top_to_bottom = Vec::new();

    for (index, zone) in partition.zones.iter().enumerate() {
        let zone_id = index as u32 + 1;
        left_to_right.extend(build_zone_lines(
            zone_id,
            zone.type_index,
            &zone.left_border,
            &zone.left_border_index,
            &partition.cell_map,
            width,
            &mut scratch,
        ));
        top_to_bottom.extend(build_zone_lines(
            zone_id,
            zone.type_index,
            &zone.top_border,
            &zone.top_border_index,
            &partition.cell_map,
            width,
            &mut scratch,
        ));
    }

    // Group lines by the chunk of their first cell; the stable sort keeps
    // zone discovery order within a chunk.
    left_to_right.sort_by_key(|line| chunk_id(line.cells[0], width));
    top_to_bottom.sort_by_key(|line| chunk_id(line.cells[0], width));

    Candidates {
        left_to_right,
        top_to_bottom,
    }
}

/// Bit cost of emitting a candidate set, used to pick the fill direction.
///
/// Per line: two bits per step, a fixed record overhead, the type field,
/// and one chunk-advance bit per chunk skipped since the previous line.
pub(crate) fn candidate_cost(lines: &[Line], type_bits: u8, width: u16) -> u64 {
    let mut cost = 0u64;
    let mut previous_chunk = 0u64;
    for line in lines {
        let chunk = u64::from(chunk_id(line.cells[0], width));
        cost += (line.cells.len() as u64 - 1) * 2
            + 20
            + u64::from(type_bits)
            + (chunk - previous_chunk);
        previous_chunk = chunk;
    }
    cost
}

/// Returns `true` if any line in the set passes through `cell`.
pub(crate) fn covers_cell(lines: &[Line], cell: u32) -> bool {
    lines.iter().any(|line| line.cells.contains(&cell))
}

/// A candidate connection between two border points.
///
/// `from` and `to` index the zone's border list with `to < from`, so each
/// undirected pair is recorded once. `path` holds the cells strictly
/// between the two points, ordered from `from` to `to`.
#[derive(Debug)]
struct Connection {
    from: u32,
    to: u32,
    path: Vec<u32>,
}

/// Reusable BFS buffers, generation-stamped so consecutive searches skip
/// the O(cells) clear.
struct BfsScratch {
    visited: Vec<u32>,
    parent: Vec<u32>,
    generation: u32,
    queue: VecDeque<(u32, u8)>,
}

impl BfsScratch {
    fn new(cells: usize) -> Self {
        Self {
            visited: vec![0; cells],
            parent: vec![0; cells],
            generation: 0,
            queue: VecDeque::new(),
        }
    }
}

/// Builds the emitted lines for one zone from one of its border lists.
fn build_zone_lines(
    zone_id: u32,
    type_index: u16,
    border: &[u32],
    border_index: &HashMap<u32, u32>,
    cell_map: &[u32],
    width: u16,
    scratch: &mut BfsScratch,
) -> Vec<Line> {
    let buckets = collect_connections(zone_id, border, border_index, cell_map, width, scratch);
    let (mut segments, degree) = stitch(border, border_index, &buckets);

    // Crop pass: split over-long segments once. Tails are appended and not
    // revisited, matching the single-pass behavior the format grew up with.
    let stitched = segments.len();
    for i in 0..stitched {
        if segments[i].len() > MAX_SEGMENT_CELLS {
            let tail = segments[i].split_off(MAX_SEGMENT_CELLS);
            segments.push(tail);
        }
    }

    // Border points no connection ever claimed become one-cell lines.
    for (i, &cell) in border.iter().enumerate() {
        if degree[i] == 0 {
            segments.push(vec![cell]);
        }
    }

    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(|cells| Line { type_index, cells })
        .collect()
}

/// Runs a bounded BFS from every border point and buckets the discovered
/// connections by distance (1 to [`MAX_PATH_STEPS`]).
fn collect_connections(
    zone_id: u32,
    border: &[u32],
    border_index: &HashMap<u32, u32>,
    cell_map: &[u32],
    width: u16,
    scratch: &mut BfsScratch,
) -> [Vec<Connection>; MAX_PATH_STEPS] {
    let mut buckets: [Vec<Connection>; MAX_PATH_STEPS] = std::array::from_fn(|_| Vec::new());
    let w = u32::from(width);
    let cells = cell_map.len() as u32;

    for (from_index, &start) in border.iter().enumerate() {
        scratch.generation += 1;
        let generation = scratch.generation;
        scratch.visited[start as usize] = generation;
        scratch.queue.clear();
        scratch.queue.push_back((start, 0));

        while let Some((cell, distance)) = scratch.queue.pop_front() {
            if usize::from(distance) == MAX_PATH_STEPS {
                continue;
            }
            let x = cell % w;

            // Neighbor order mirrors the step codes: right, left, down, up.
            let neighbors = [
                (x + 1 < w).then(|| cell + 1),
                (x > 0).then(|| cell - 1),
                (cell + w < cells).then(|| cell + w),
                (cell >= w).then(|| cell - w),
            ];

            for next in neighbors.into_iter().flatten() {
                if cell_map[next as usize] != zone_id
                    || scratch.visited[next as usize] == generation
                {
                    continue;
                }
                scratch.visited[next as usize] = generation;
                scratch.parent[next as usize] = cell;
                let next_distance = distance + 1;

                if let Some(&to_index) = border_index.get(&next) {
                    if u64::from(to_index) < from_index as u64 {
                        buckets[usize::from(next_distance) - 1].push(Connection {
                            from: from_index as u32,
                            to: to_index,
                            path: walk_back(&scratch.parent, start, next),
                        });
                    }
                }
                scratch.queue.push_back((next, next_distance));
            }
        }
    }

    buckets
}

/// Collects the cells strictly between `start` and `end` along the BFS
/// parent chain, ordered from `start` to `end`.
fn walk_back(parent: &[u32], start: u32, end: u32) -> Vec<u32> {
    let mut path = Vec::new();
    let mut cell = parent[end as usize];
    while cell != start {
        path.push(cell);
        cell = parent[cell as usize];
    }
    path.reverse();
    path
}

/// Greedily stitches connections into chains, shortest bucket first.
///
/// Each border point joins at most two connections; a point's chain
/// membership is tracked so splices keep endpoints addressable. Returns
/// the segments (spliced-away slots stay behind as empty placeholders)
/// and the final degree of every border point.
fn stitch(
    border: &[u32],
    border_index: &HashMap<u32, u32>,
    buckets: &[Vec<Connection>; MAX_PATH_STEPS],
) -> (Vec<Vec<u32>>, Vec<u8>) {
    let mut degree = vec![0u8; border.len()];
    let mut segment_of = vec![usize::MAX; border.len()];
    let mut segments: Vec<Vec<u32>> = Vec::new();

    for bucket in buckets {
        for connection in bucket {
            let from = connection.from as usize;
            let to = connection.to as usize;
            if degree[from] >= 2 || degree[to] >= 2 {
                continue;
            }
            let a = border[from];
            let b = border[to];

            match (degree[from] == 0, degree[to] == 0) {
                (true, true) => {
                    let mut cells = Vec::with_capacity(connection.path.len() + 2);
                    cells.push(a);
                    cells.extend_from_slice(&connection.path);
                    cells.push(b);
                    segment_of[from] = segments.len();
                    segment_of[to] = segments.len();
                    segments.push(cells);
                }
                (true, false) => {
                    // `a` is new; hook it onto whichever end of `b`'s
                    // segment is `b`.
                    let slot = segment_of[to];
                    let segment = &mut segments[slot];
                    if segment.last() == Some(&b) {
                        segment.extend(connection.path.iter().rev());
                        segment.push(a);
                    } else {
                        let mut cells =
                            Vec::with_capacity(segment.len() + connection.path.len() + 1);
                        cells.push(a);
                        cells.extend_from_slice(&connection.path);
                        cells.append(segment);
                        *segment = cells;
                    }
                    segment_of[from] = slot;
                }
                (false, true) => {
                    let slot = segment_of[from];
                    let segment = &mut segments[slot];
                    if segment.last() == Some(&a) {
                        segment.extend_from_slice(&connection.path);
                        segment.push(b);
                    } else {
                        let mut cells =
                            Vec::with_capacity(segment.len() + connection.path.len() + 1);
                        cells.push(b);
                        cells.extend(connection.path.iter().rev());
                        cells.append(segment);
                        *segment = cells;
                    }
                    segment_of[to] = slot;
                }
                (false, false) => {
                    let slot_a = segment_of[from];
                    let slot_b = segment_of[to];
                    if slot_a == slot_b {
                        // Joining a chain to itself would close a cycle.
                        continue;
                    }
                    // Orient the left part to end at `a` and the right
                    // part to start at `b`, then run the path between.
                    let mut merged = std::mem::take(&mut segments[slot_a]);
                    if merged.first() == Some(&a) {
                        merged.reverse();
                    }
                    let mut right = std::mem::take(&mut segments[slot_b]);
                    if right.last() == Some(&b) {
                        right.reverse();
                    }
                    merged.extend_from_slice(&connection.path);
                    merged.append(&mut right);

                    for end in [merged.first(), merged.last()].into_iter().flatten() {
                        if let Some(&point) = border_index.get(end) {
                            segment_of[point as usize] = slot_a;
                        }
                    }
                    segments[slot_a] = merged;
                }
            }

            degree[from] += 1;
            degree[to] += 1;
        }
    }

    (segments, degree)
}
