//! Polycube enumeration library.
//!
//! Generates all distinct polycubes of a given size, up to the 24 proper
//! rotations of the cube. Two independent canonicalization designs are
//! provided: the default rotation-fingerprint approach (`canonical`,
//! `rotations`, driving `growth`), and an alternative rotation-free
//! adjacency-graph approach (`graph`) kept as a cross-checkable design, per
//! §8.

pub mod cache;
pub mod canonical;
pub mod error;
pub mod expander;
pub mod graph;
pub mod growth;
pub mod packer;
pub mod renderer;
pub mod rotations;
pub mod voxel;

pub use error::{Error, Result};
pub use voxel::VoxelGrid;
