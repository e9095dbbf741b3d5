//! # World Module
//!
//! This module provides the `ChunkStore` trait the mesher resolves neighbor
//! chunks through, and `World`, a sparse in-memory implementation of it.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks that have been
//! loaded are kept in memory. An absent chunk is a normal, expected condition
//! (the streaming manager has simply not loaded it), never an error; the
//! mesher treats missing lateral neighbors as air.
//!
//! The streaming manager that decides *which* chunks to load and unload is an
//! external collaborator; `World` only stores whatever it is handed.

use std::collections::HashMap;

use cgmath::Point2;

use super::chunk::Chunk;

/// Read access to loaded chunks, keyed by chunk coordinates.
///
/// `chunk_at` returning `None` means "not loaded", never an error. Chunks
/// span the full world height, so lookups are lateral only.
pub trait ChunkStore {
    /// Retrieves the chunk at the given chunk coordinates, if loaded.
    fn chunk_at(&self, position: Point2<i32>) -> Option<&Chunk>;
}

/// A sparse collection of loaded chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point2;
/// use voxel_segments::voxels::{chunk::Chunk, world::{ChunkStore, World}};
///
/// let mut world = World::new();
/// world.insert(Chunk::empty(Point2::new(0, 0)));
/// assert!(world.chunk_at(Point2::new(0, 0)).is_some());
/// assert!(world.chunk_at(Point2::new(1, 0)).is_none());
/// ```
pub struct World {
    chunks: HashMap<Point2<i32>, Chunk>,
}

impl World {
    /// Creates a new, empty world with no chunks loaded.
    pub fn new() -> Self {
        World {
            chunks: HashMap::new(),
        }
    }

    /// Inserts a chunk, replacing any chunk already loaded at its position.
    pub fn insert(&mut self, chunk: Chunk) {
        self.chunks.insert(chunk.position, chunk);
    }

    /// Unloads and returns the chunk at the given position, if loaded.
    ///
    /// The caller is responsible for discarding the segment renderers that
    /// depended on it.
    pub fn remove(&mut self, position: Point2<i32>) -> Option<Chunk> {
        self.chunks.remove(&position)
    }

    /// Mutable access to a loaded chunk.
    ///
    /// Mutation must not happen while any dependent segment is mid-build;
    /// after mutating, mark the affected segments dirty.
    pub fn chunk_at_mut(&mut self, position: Point2<i32>) -> Option<&mut Chunk> {
        self.chunks.get_mut(&position)
    }

    /// The number of loaded chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if no chunks are loaded.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkStore for World {
    fn chunk_at(&self, position: Point2<i32>) -> Option<&Chunk> {
        self.chunks.get(&position)
    }
}
