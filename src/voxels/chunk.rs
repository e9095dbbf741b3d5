//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed-size
//! `SIZE_XZ × SIZE_Y × SIZE_XZ` grid of packed voxel cells, stored as one
//! flat array indexed with precomputed strides. Chunks are the unit of world
//! streaming; they are mutable, long-lived, and may be unloaded and later
//! reloaded with different contents.
//!
//! ## Storage
//!
//! Cells live in a single contiguous `Vec<Cell>` with the index
//! `y * STRIDE_Y + z * STRIDE_Z + x`. The strides are the values the segment
//! mesher uses to reach all six neighbors of an interior cell without any
//! coordinate math, so they are public constants rather than private details.

use cgmath::Point2;

use super::cell::{self, Cell};

/// The lateral dimension (width and depth) of a chunk in blocks.
pub const SIZE_XZ: i32 = 16;
/// The vertical dimension (height) of a chunk in blocks.
pub const SIZE_Y: i32 = 256;
/// Flat-array stride between cells one step apart along Z.
pub const STRIDE_Z: usize = SIZE_XZ as usize;
/// Flat-array stride between cells one step apart along Y.
pub const STRIDE_Y: usize = (SIZE_XZ * SIZE_XZ) as usize;
/// The total number of cells in a chunk.
pub const CHUNK_VOLUME: usize = STRIDE_Y * SIZE_Y as usize;

/// The edge length of a segment (the unit of mesh rebuild) in blocks.
pub const SEGMENT_SIZE: i32 = 16;
/// The number of segments a chunk column decomposes into.
pub const SEGMENTS_PER_CHUNK: i32 = SIZE_Y / SEGMENT_SIZE;

/// A vertical column of voxel data, the unit of world streaming.
///
/// The chunk owns its cell array; segment renderers and the mesher only ever
/// read it. Mutation goes through [`Chunk::set_cell`], and whoever mutates a
/// chunk is responsible for marking the dependent segments dirty (including
/// boundary-adjacent segments of the lateral neighbor chunks).
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point2<i32>,
    /// Packed cells in `y * STRIDE_Y + z * STRIDE_Z + x` order.
    cells: Vec<Cell>,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all cells are air).
    pub fn empty(position: Point2<i32>) -> Self {
        Chunk {
            position,
            cells: vec![0; CHUNK_VOLUME],
        }
    }

    /// Creates a chunk with every cell set to the given block id (for testing).
    pub fn solid(position: Point2<i32>, id: cell::BlockId) -> Self {
        Chunk {
            position,
            cells: vec![cell::pack_id(id); CHUNK_VOLUME],
        }
    }

    /// Creates a chunk with a 3D checkerboard of the given block id and air
    /// (for testing).
    pub fn checkerboard(position: Point2<i32>, id: cell::BlockId) -> Self {
        let mut chunk = Chunk::empty(position);
        for y in 0..SIZE_Y {
            for z in 0..SIZE_XZ {
                for x in 0..SIZE_XZ {
                    if (x + y + z) % 2 == 0 {
                        chunk.set_cell(x, y, z, cell::pack_id(id));
                    }
                }
            }
        }
        chunk
    }

    /// Computes the flat-array index of a chunk-local coordinate.
    ///
    /// # Panics
    /// Panics in debug builds if the coordinate is out of bounds.
    #[inline]
    pub fn index_of(x: i32, y: i32, z: i32) -> usize {
        debug_assert!(Self::in_bounds(x, y, z), "({x},{y},{z}) out of chunk bounds");
        y as usize * STRIDE_Y + z as usize * STRIDE_Z + x as usize
    }

    /// Returns true if the coordinate lies inside this chunk.
    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..SIZE_XZ).contains(&x) && (0..SIZE_Y).contains(&y) && (0..SIZE_XZ).contains(&z)
    }

    /// Gets the packed cell at the given chunk-local coordinate.
    #[inline]
    pub fn cell(&self, x: i32, y: i32, z: i32) -> Cell {
        self.cells[Self::index_of(x, y, z)]
    }

    /// Sets the packed cell at the given chunk-local coordinate.
    #[inline]
    pub fn set_cell(&mut self, x: i32, y: i32, z: i32, value: Cell) {
        self.cells[Self::index_of(x, y, z)] = value;
    }

    /// Direct read access to the flat cell array for the mesher's interior
    /// fast path.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The segment Y-offset (a multiple of [`SEGMENT_SIZE`]) containing the
    /// given world-local Y coordinate.
    #[inline]
    pub fn segment_offset_of(y: i32) -> i32 {
        (y / SEGMENT_SIZE) * SEGMENT_SIZE
    }
}
