//! # Voxels Module
//!
//! Voxel data model: the packed cell format, chunk storage, the sparse chunk
//! store, the block/material catalog, and the grid accessor the mesher reads
//! through.

pub mod block;
pub mod cell;
pub mod chunk;
pub mod grid;
pub mod world;
