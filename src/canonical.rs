//! Computes a rotation-canonical fingerprint of a shape.
//!
//! `fp(X) = max` over the 24 proper rotations `R` of `pack(trim(R*X))`, with
//! lexicographic order on the packed bytes. Generalizes the Python
//! original's `cubes.py::get_canonical_packing` (same short-circuit
//! semantics: a hit against already-known ids returns immediately) merged
//! with the teacher's `grid::canonical_key` pattern of scanning a rotation
//! table for an extremal packing.

use rustc_hash::FxHashSet;

use crate::packer::pack;
use crate::rotations::ROTATIONS;
use crate::voxel::VoxelGrid;
use crate::rotations::rotate_grid;

/// Computes the canonical fingerprint of a candidate, short-circuiting on a
/// known orbit member.
///
/// Returns either the canonical lexicographic max (for new orbits) or an
/// arbitrary-but-deterministic orbit representative (when a rotation's
/// packing is already in `known`). For shapes `X`, `Y` in the same rotation
/// orbit, calling this with a consistent `known` set returns equal values,
/// which is what the dedup set in the Growth Engine relies on.
pub fn canonical_id(grid: &VoxelGrid, known: &FxHashSet<Vec<u8>>) -> Vec<u8> {
    let mut max_id: Vec<u8> = Vec::new();
    for &rotate in &ROTATIONS {
        let rotated = rotate_grid(grid, rotate).trim();
        let this_id = pack(&rotated);
        if known.contains(&this_id) {
            return this_id;
        }
        if this_id > max_id {
            max_id = this_id;
        }
    }
    max_id
}

/// The full rotation-invariant fingerprint of a shape (no short-circuit).
///
/// Used by property tests: for any rotation `R` of `X`,
/// `fingerprint(R*X) == fingerprint(X)`.
pub fn fingerprint(grid: &VoxelGrid) -> Vec<u8> {
    canonical_id(grid, &FxHashSet::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotations::orbit;

    #[test]
    fn rotation_invariance_holds_for_every_rotation() {
        let shape = VoxelGrid::from_coords(&[(0, 0, 0), (1, 0, 0), (0, 1, 0)]);
        let base_fp = fingerprint(&shape);
        for rotated in orbit(&shape) {
            assert_eq!(fingerprint(&rotated), base_fp);
        }
    }

    #[test]
    fn trominoes_share_fingerprint_when_congruent_under_rotation() {
        // Worked example from the spec: two L-trominoes placed differently
        // are the same shape up to rotation.
        let a = VoxelGrid::from_coords(&[(0, 0, 0), (-1, 0, 0), (-1, 1, 0)]);
        let b = VoxelGrid::from_coords(&[(0, 0, 0), (-1, 0, 0), (0, 1, 0)]);
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn distinct_trominoes_have_distinct_fingerprints() {
        let straight = VoxelGrid::from_coords(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)]);
        let bent = VoxelGrid::from_coords(&[(0, 0, 0), (1, 0, 0), (1, 1, 0)]);
        assert_ne!(fingerprint(&straight), fingerprint(&bent));
    }

    #[test]
    fn short_circuit_returns_member_of_same_orbit() {
        let shape = VoxelGrid::from_coords(&[(0, 0, 0), (1, 0, 0), (0, 1, 0)]);
        let mut known = FxHashSet::default();
        let fp = fingerprint(&shape);
        known.insert(fp.clone());

        for rotated in orbit(&shape) {
            let id = canonical_id(&rotated, &known);
            // any rotation's id, when some rotation is already known, must
            // belong to the known orbit's representative
            assert!(known.contains(&id) || id == fp);
        }
    }
}
