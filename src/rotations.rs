//! The 24 proper rotations of the cube.
//!
//! A cube has 24 possible orientations in 3D space (the rotation group of a
//! cube). These are the 6 ways to choose which face points up, times 4
//! rotations around the vertical axis.

use crate::voxel::{Coord, VoxelGrid};

/// All 24 rotation functions for a cube.
///
/// Organized as 6 face-up choices x 4 rotations around vertical:
/// - Rotations 0-3: +Z face up
/// - Rotations 4-7: +Y face up
/// - Rotations 8-11: -Z face up
/// - Rotations 12-15: -Y face up
/// - Rotations 16-19: +X face up
/// - Rotations 20-23: -X face up
pub const ROTATIONS: [fn(Coord) -> Coord; 24] = [
    // +Z face up (identity orientation), rotate around Z axis
    |(x, y, z)| (x, y, z),
    |(x, y, z)| (-y, x, z),
    |(x, y, z)| (-x, -y, z),
    |(x, y, z)| (y, -x, z),
    // +Y face up, rotate around Y axis
    |(x, y, z)| (x, -z, y),
    |(x, y, z)| (z, x, y),
    |(x, y, z)| (-x, z, y),
    |(x, y, z)| (-z, -x, y),
    // -Z face up, rotate around Z axis
    |(x, y, z)| (x, -y, -z),
    |(x, y, z)| (y, x, -z),
    |(x, y, z)| (-x, y, -z),
    |(x, y, z)| (-y, -x, -z),
    // -Y face up, rotate around Y axis
    |(x, y, z)| (x, z, -y),
    |(x, y, z)| (-z, x, -y),
    |(x, y, z)| (-x, -z, -y),
    |(x, y, z)| (z, -x, -y),
    // +X face up, rotate around X axis
    |(x, y, z)| (z, y, -x),
    |(x, y, z)| (-y, z, -x),
    |(x, y, z)| (-z, -y, -x),
    |(x, y, z)| (y, -z, -x),
    // -X face up, rotate around X axis
    |(x, y, z)| (-z, y, x),
    |(x, y, z)| (-y, -z, x),
    |(x, y, z)| (z, -y, x),
    |(x, y, z)| (y, z, x),
];

/// Applies a rotation function to every occupied cell of a grid.
///
/// The result is generally untrimmed and may contain negative-relative
/// coordinates; callers should `trim()` the grid built from the rotated
/// coordinates.
pub fn rotate_grid(grid: &VoxelGrid, rotate: fn(Coord) -> Coord) -> VoxelGrid {
    let rotated: Vec<Coord> = grid.coords().iter().map(|&c| rotate(c)).collect();
    VoxelGrid::from_coords(&rotated)
}

/// Yields the 24 (already trimmed) rotations of a grid.
///
/// Duplicates are expected: shapes with rotational symmetry repeat entries.
/// Ordering is fixed but not semantically meaningful — callers rely only on
/// the set of results.
pub fn orbit(grid: &VoxelGrid) -> [VoxelGrid; 24] {
    std::array::from_fn(|i| rotate_grid(grid, ROTATIONS[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rotation_preserves_grid() {
        let grid = VoxelGrid::from_coords(&[(0, 0, 0), (1, 0, 0), (0, 1, 0)]);
        let rotated = rotate_grid(&grid, ROTATIONS[0]);
        assert_eq!(rotated, grid);
    }

    #[test]
    fn all_rotations_preserve_cell_count() {
        let grid = VoxelGrid::from_coords(&[(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 0, 1)]);
        for grid_r in orbit(&grid) {
            assert_eq!(grid_r.size(), grid.size());
        }
    }

    #[test]
    fn orbit_has_24_entries_with_expected_duplicates_for_domino() {
        // The 2x1x1 domino has many rotational symmetries; the orbit should
        // collapse to just two distinct trimmed shapes (lying on each axis).
        let domino = VoxelGrid::from_coords(&[(0, 0, 0), (1, 0, 0)]);
        let mut distinct: Vec<VoxelGrid> = Vec::new();
        for grid_r in orbit(&domino) {
            if !distinct.contains(&grid_r) {
                distinct.push(grid_r);
            }
        }
        assert!(distinct.len() <= 3);
    }
}
