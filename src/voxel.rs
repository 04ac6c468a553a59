//! Voxel grid representation and operations for polycube shapes.
//!
//! A `VoxelGrid` is a tight 3-D occupancy box: a bounding box with no empty
//! leading/trailing slab on any axis, plus a flat bit-per-cell occupancy
//! array.

/// A 3D coordinate representing a unit cube position.
pub type Coord = (i32, i32, i32);

/// A trimmed or untrimmed 3-D occupancy grid.
///
/// Cells are stored x-major: `idx = x * dy * dz + y * dz + z`. This nesting
/// order is the one `cells()` iterates in and the one the Packer encodes.
#[derive(Debug, Clone, Eq)]
pub struct VoxelGrid {
    dims: (usize, usize, usize),
    occupied: Vec<bool>,
}

impl PartialEq for VoxelGrid {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims && self.occupied == other.occupied
    }
}

impl VoxelGrid {
    /// Builds a grid of the given dimensions with every cell empty.
    pub fn empty(dims: (usize, usize, usize)) -> Self {
        let (dx, dy, dz) = dims;
        Self {
            dims,
            occupied: vec![false; dx * dy * dz],
        }
    }

    /// Builds a grid from a set of occupied coordinates, normalized so the
    /// minimum coordinate on every axis is zero, then trimmed.
    pub fn from_coords(coords: &[Coord]) -> Self {
        assert!(!coords.is_empty(), "a polycube must occupy at least one cell");

        let min_x = coords.iter().map(|c| c.0).min().unwrap();
        let min_y = coords.iter().map(|c| c.1).min().unwrap();
        let min_z = coords.iter().map(|c| c.2).min().unwrap();
        let max_x = coords.iter().map(|c| c.0).max().unwrap();
        let max_y = coords.iter().map(|c| c.1).max().unwrap();
        let max_z = coords.iter().map(|c| c.2).max().unwrap();

        let dims = (
            (max_x - min_x + 1) as usize,
            (max_y - min_y + 1) as usize,
            (max_z - min_z + 1) as usize,
        );
        let mut grid = Self::empty(dims);
        for &(x, y, z) in coords {
            grid.set(
                (x - min_x) as usize,
                (y - min_y) as usize,
                (z - min_z) as usize,
                true,
            );
        }
        grid
    }

    /// Dimensions `(dx, dy, dz)` of the bounding box.
    pub fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    /// Number of occupied cells.
    pub fn size(&self) -> usize {
        self.occupied.iter().filter(|&&b| b).count()
    }

    #[inline]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        let (_, dy, dz) = self.dims;
        x * dy * dz + y * dz + z
    }

    /// Returns whether cell `(x, y, z)` is occupied. Out-of-bounds cells are
    /// always unoccupied.
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        let (dx, dy, dz) = self.dims;
        if x >= dx || y >= dy || z >= dz {
            return false;
        }
        self.occupied[self.idx(x, y, z)]
    }

    /// Sets cell `(x, y, z)`. Panics if out of bounds.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: bool) {
        let i = self.idx(x, y, z);
        self.occupied[i] = value;
    }

    /// Iterates occupied cells in fixed x-major, then y, then z order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (dx, dy, dz) = self.dims;
        (0..dx).flat_map(move |x| {
            (0..dy).flat_map(move |y| (0..dz).map(move |z| (x, y, z)))
        }).filter(move |&(x, y, z)| self.get(x, y, z))
    }

    /// Removes empty leading/trailing slabs on each axis. Idempotent;
    /// preserves connectivity and cell count.
    pub fn trim(&self) -> VoxelGrid {
        let (dx, dy, dz) = self.dims;
        let mut min_x = dx;
        let mut max_x = 0usize;
        let mut min_y = dy;
        let mut max_y = 0usize;
        let mut min_z = dz;
        let mut max_z = 0usize;
        let mut any = false;

        for x in 0..dx {
            for y in 0..dy {
                for z in 0..dz {
                    if self.get(x, y, z) {
                        any = true;
                        min_x = min_x.min(x);
                        max_x = max_x.max(x);
                        min_y = min_y.min(y);
                        max_y = max_y.max(y);
                        min_z = min_z.min(z);
                        max_z = max_z.max(z);
                    }
                }
            }
        }

        if !any {
            return VoxelGrid::empty((1, 1, 1));
        }

        let new_dims = (max_x - min_x + 1, max_y - min_y + 1, max_z - min_z + 1);
        let mut trimmed = VoxelGrid::empty(new_dims);
        for x in min_x..=max_x {
            for y in min_y..=max_y {
                for z in min_z..=max_z {
                    if self.get(x, y, z) {
                        trimmed.set(x - min_x, y - min_y, z - min_z, true);
                    }
                }
            }
        }
        trimmed
    }

    /// Extends every axis by `delta` cells on both sides, filling new cells
    /// with zero.
    pub fn pad(&self, delta: usize) -> VoxelGrid {
        let (dx, dy, dz) = self.dims;
        let new_dims = (dx + 2 * delta, dy + 2 * delta, dz + 2 * delta);
        let mut padded = VoxelGrid::empty(new_dims);
        for (x, y, z) in self.cells() {
            padded.set(x + delta, y + delta, z + delta, true);
        }
        padded
    }

    /// Returns the occupied cells as signed `Coord` values, for interop with
    /// rotation code operating on `(i32, i32, i32)`.
    pub fn coords(&self) -> Vec<Coord> {
        self.cells()
            .map(|(x, y, z)| (x as i32, y as i32, z as i32))
            .collect()
    }
}
