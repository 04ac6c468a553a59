//! File I/O for saving and loading a generation's shapes.
//!
//! Binary format for `polycubes_<n>.bin` (little endian), generalizing the
//! teacher's `persistence.rs` (`BLKR` magic, version byte, count) to a
//! variable-size polycube generation:
//!
//! - 4 bytes: magic (`POLY`)
//! - u8: format version
//! - u32: n (polycube size this file holds)
//! - u32: shape count
//! - repeat per shape:
//!   - u32: packed byte length
//!   - that many bytes: the packed grid (see `packer::pack`)
//!
//! Writes go to a temp file in the same directory, then an atomic rename,
//! so a concurrent reader's `exists` never observes a partially-written
//! file (§5, §6).

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::packer::{pack, unpack};
use crate::voxel::VoxelGrid;

const FILE_MAGIC: [u8; 4] = *b"POLY";
const FILE_VERSION: u8 = 1;

fn cache_path(n: u32) -> PathBuf {
    PathBuf::from(format!("polycubes_{n}.bin"))
}

/// Returns whether a cache file exists for generation `n`.
pub fn exists(n: u32) -> bool {
    cache_path(n).exists()
}

/// Loads the cached shapes for generation `n`, if present and well-formed.
///
/// Any parse failure (wrong magic, truncated file, corrupt length prefix)
/// returns `None` rather than erroring: a cache-read failure is non-fatal
/// per §7, and the Growth Engine falls back to recomputation.
pub fn load(n: u32) -> Option<Vec<VoxelGrid>> {
    let mut file = File::open(cache_path(n)).ok()?;

    let mut header = [0u8; 4 + 1 + 4 + 4];
    file.read_exact(&mut header).ok()?;
    if header[0..4] != FILE_MAGIC {
        return None;
    }
    let version = header[4];
    if version != FILE_VERSION {
        return None;
    }
    let stored_n = u32::from_le_bytes(header[5..9].try_into().ok()?);
    if stored_n != n {
        return None;
    }
    let count = u32::from_le_bytes(header[9..13].try_into().ok()?) as usize;

    let mut shapes = Vec::with_capacity(count);
    for _ in 0..count {
        let mut len_buf = [0u8; 4];
        file.read_exact(&mut len_buf).ok()?;
        let len = u32::from_le_bytes(len_buf) as usize;
        let mut bytes = vec![0u8; len];
        file.read_exact(&mut bytes).ok()?;
        shapes.push(unpack(&bytes));
    }

    Some(shapes)
}

/// Persists `shapes` for generation `n`, atomically.
///
/// Failures are returned to the caller (the Growth Engine logs and
/// continues per §7 rather than treating this as fatal).
pub fn store(n: u32, shapes: &[VoxelGrid]) -> std::io::Result<()> {
    let final_path = cache_path(n);
    let tmp_path = final_path.with_extension("bin.tmp");

    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&FILE_MAGIC)?;
        file.write_all(&[FILE_VERSION])?;
        file.write_all(&n.to_le_bytes())?;
        file.write_all(&(shapes.len() as u32).to_le_bytes())?;

        for shape in shapes {
            let packed = pack(&shape.trim());
            file.write_all(&(packed.len() as u32).to_le_bytes())?;
            file.write_all(&packed)?;
        }
        file.sync_all()?;
    }

    fs::rename(&tmp_path, &final_path)
}

/// Removes a cache file, if present. Used by tests to avoid cross-test
/// interference; not part of the external Cache contract.
#[cfg(test)]
fn remove(n: u32) {
    let _ = fs::remove_file(cache_path(n));
}
