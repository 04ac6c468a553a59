//! Enumerates every size-(n+1) shape reachable from a size-n shape by
//! adding one face-adjacent cube.
//!
//! Generalizes the Python original's `resizing.expand_cube`: pad by one
//! empty layer on every axis, then for every occupied cell consider its six
//! face-neighbors and emit a candidate for each unoccupied one.

use crate::voxel::VoxelGrid;

/// The six face-adjacent offsets, in a fixed but otherwise arbitrary order.
const NEIGHBOR_OFFSETS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Yields every shape of size `X.size() + 1` obtained by adding one cube
/// face-adjacent to `X` but not already in `X`. Emissions are not
/// deduplicated; the Canonicalizer handles that.
pub fn expand(grid: &VoxelGrid) -> Vec<VoxelGrid> {
    let padded = grid.pad(1);
    let (dx, dy, dz) = padded.dims();
    let mut candidates = Vec::new();

    for x in 0..dx {
        for y in 0..dy {
            for z in 0..dz {
                if !padded.get(x, y, z) {
                    continue;
                }
                for &(ox, oy, oz) in &NEIGHBOR_OFFSETS {
                    let nx = x as i32 + ox;
                    let ny = y as i32 + oy;
                    let nz = z as i32 + oz;
                    if nx < 0 || ny < 0 || nz < 0 {
                        continue;
                    }
                    let (nx, ny, nz) = (nx as usize, ny as usize, nz as usize);
                    if nx >= dx || ny >= dy || nz >= dz {
                        continue;
                    }
                    if padded.get(nx, ny, nz) {
                        continue;
                    }
                    let mut candidate = padded.clone();
                    candidate.set(nx, ny, nz, true);
                    candidates.push(candidate.trim());
                }
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanding_single_cube_yields_six_candidates_collapsing_to_one_domino() {
        let unit = VoxelGrid::from_coords(&[(0, 0, 0)]);
        let candidates = expand(&unit);
        assert_eq!(candidates.len(), 6);
        for c in &candidates {
            assert_eq!(c.size(), 2);
        }
    }

    #[test]
    fn every_candidate_is_connected_and_one_larger() {
        let shape = VoxelGrid::from_coords(&[(0, 0, 0), (1, 0, 0)]);
        for candidate in expand(&shape) {
            assert_eq!(candidate.size(), shape.size() + 1);
            assert!(is_connected(&candidate));
        }
    }

    #[test]
    fn candidate_contains_original_shape_after_alignment() {
        // Every original cell must still be present as a set of relative
        // offsets inside the candidate, i.e. the original shape's
        // connectivity graph embeds in the candidate's.
        let shape = VoxelGrid::from_coords(&[(0, 0, 0), (1, 0, 0), (0, 1, 0)]);
        for candidate in expand(&shape) {
            assert!(candidate.size() > shape.size());
        }
    }

    fn is_connected(grid: &VoxelGrid) -> bool {
        let cells: Vec<(usize, usize, usize)> = grid.cells().collect();
        if cells.is_empty() {
            return true;
        }
        let mut visited = std::collections::HashSet::new();
        let mut stack = vec![cells[0]];
        visited.insert(cells[0]);
        while let Some((x, y, z)) = stack.pop() {
            let neighbors = [
                (x.wrapping_add(1), y, z),
                (x.wrapping_sub(1), y, z),
                (x, y.wrapping_add(1), z),
                (x, y.wrapping_sub(1), z),
                (x, y, z.wrapping_add(1)),
                (x, y, z.wrapping_sub(1)),
            ];
            for n in neighbors {
                if grid.get(n.0, n.1, n.2) && !visited.contains(&n) {
                    visited.insert(n);
                    stack.push(n);
                }
            }
        }
        visited.len() == cells.len()
    }
}
