//! Drives `S(n-1) -> S(n)` generation, with optional on-disk caching.
//!
//! Generalizes the Python original's `generate_polycubes` (base cases,
//! cache check, recursive call, `known_ids` hash-fold, unpack back out) and
//! the teacher's `PuzzleOps::solve` + `persistence` orchestration in
//! `main.rs`.

use rustc_hash::FxHashSet;

use crate::cache;
use crate::canonical::canonical_id;
use crate::error::{Error, Result};
use crate::expander::expand;
use crate::packer::unpack;
use crate::voxel::VoxelGrid;

/// Generates `S(n)`, the set of all distinct polycubes of size `n`, up to
/// rotation.
///
/// Base cases: `n == 0` is the empty set; `n == 1` is the single unit cube;
/// `n == 2` is the single domino. `n < 0` is rejected as an invalid size.
/// For `n >= 3`, recurses on `S(n - 1)`, expands every shape in every valid
/// way, and folds duplicates via `canonical_id`.
pub fn generate(n: i64, use_cache: bool) -> Result<Vec<VoxelGrid>> {
    if n < 0 {
        return Err(Error::InvalidSize(n));
    }
    let n = n as u32;
    generate_unsigned(n, use_cache)
}

fn generate_unsigned(n: u32, use_cache: bool) -> Result<Vec<VoxelGrid>> {
    match n {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![VoxelGrid::from_coords(&[(0, 0, 0)])]),
        2 => return Ok(vec![VoxelGrid::from_coords(&[(0, 0, 0), (1, 0, 0)])]),
        _ => {}
    }

    if use_cache && cache::exists(n) {
        if let Some(shapes) = cache::load(n) {
            log::info!("loaded {} shapes for n={n} from cache", shapes.len());
            return Ok(shapes);
        }
        log::warn!("cache for n={n} exists but could not be read; recomputing");
    }

    let parents = generate_unsigned(n - 1, use_cache)?;

    let mut known: FxHashSet<Vec<u8>> = FxHashSet::default();
    let total = parents.len();
    for (done, parent) in parents.iter().enumerate() {
        for candidate in expand(parent) {
            if candidate.size() != n as usize {
                return Err(Error::InvariantViolation(format!(
                    "expander produced a shape of size {} while growing n={n}",
                    candidate.size()
                )));
            }
            let id = canonical_id(&candidate, &known);
            known.insert(id);
        }
        if done % 100 == 0 || done + 1 == total {
            log::info!(
                "n={n}: processed {}/{total} parent shapes ({:.2}%)",
                done + 1,
                100.0 * (done + 1) as f64 / total.max(1) as f64
            );
        }
    }

    let mut results = Vec::with_capacity(known.len());
    let mut seen_unpacked: FxHashSet<Vec<u8>> = FxHashSet::default();
    for id in known {
        if !seen_unpacked.insert(id.clone()) {
            return Err(Error::InvariantViolation(format!(
                "duplicate fingerprint encountered while materializing n={n}"
            )));
        }
        results.push(unpack(&id));
    }

    if use_cache && !cache::exists(n) {
        if let Err(e) = cache::store(n, &results) {
            log::warn!("failed to write cache for n={n}: {e}");
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_size() {
        let err = generate(-1, false).unwrap_err();
        assert!(matches!(err, Error::InvalidSize(-1)));
    }

    #[test]
    fn n_zero_is_empty() {
        assert_eq!(generate(0, false).unwrap().len(), 0);
    }

    #[test]
    fn known_counts_match_oeis_a000162() {
        let expected = [(1, 1), (2, 1), (3, 2), (4, 8), (5, 29)];
        for (n, count) in expected {
            let shapes = generate(n, false).unwrap();
            assert_eq!(shapes.len(), count, "mismatch at n={n}");
        }
    }

    #[test]
    fn every_shape_is_size_n() {
        let shapes = generate(5, false).unwrap();
        for shape in &shapes {
            assert_eq!(shape.size(), 5);
        }
    }

    #[test]
    fn n_four_shapes_are_pairwise_non_rotation_equivalent() {
        use crate::canonical::fingerprint;
        let shapes = generate(4, false).unwrap();
        assert_eq!(shapes.len(), 8);
        let mut fps: Vec<Vec<u8>> = shapes.iter().map(fingerprint).collect();
        fps.sort();
        fps.dedup();
        assert_eq!(fps.len(), 8);
    }
}
