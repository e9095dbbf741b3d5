//! # Voxel Grid Accessor Module
//!
//! Read-only view over one chunk plus its four lateral neighbor chunks,
//! gathered once per mesh build. It resolves a packed cell at any local
//! coordinate or at a coordinate one step into a lateral neighbor, applying
//! the streaming edge policies:
//!
//! - a lateral neighbor chunk that is not loaded reads as air (id 0), so a
//!   boundary face is never suppressed by presumed-empty unloaded space and
//!   never generated as solid from missing data;
//! - above the chunk top is air;
//! - below the chunk bottom reads as equal to the querying cell, so bottom
//!   faces at the world floor are always suppressed. This asymmetry with the
//!   above-top policy is deliberate and load-bearing.
//!
//! Vertical neighbor *chunks* do not exist: a chunk spans the full world
//! height, so only the four lateral directions ever cross a chunk border.

use cgmath::Point2;

use super::block::block_side::BlockSide;
use super::cell::Cell;
use super::chunk::{Chunk, SIZE_XZ, SIZE_Y};
use super::world::ChunkStore;

/// Lateral neighbor slots, indexed to match the lateral [`BlockSide`]s.
const NEIGHBOR_POS_Z: usize = 0;
const NEIGHBOR_NEG_Z: usize = 1;
const NEIGHBOR_POS_X: usize = 2;
const NEIGHBOR_NEG_X: usize = 3;

/// A read-only view over a chunk and its four lateral neighbors.
///
/// The referenced chunks must not be mutated for the lifetime of the view;
/// the borrow checker enforces this against the owning [`ChunkStore`].
pub struct VoxelGridAccessor<'a> {
    chunk: &'a Chunk,
    /// `[+Z, -Z, +X, -X]`; `None` means the neighbor chunk is not loaded.
    neighbors: [Option<&'a Chunk>; 4],
}

impl<'a> VoxelGridAccessor<'a> {
    /// Gathers the chunk at `position` and its four lateral neighbors from
    /// the store.
    ///
    /// Returns `None` if the center chunk itself is not loaded (its segments
    /// should be discarded, not built).
    pub fn gather(store: &'a impl ChunkStore, position: Point2<i32>) -> Option<Self> {
        let chunk = store.chunk_at(position)?;
        Some(VoxelGridAccessor {
            chunk,
            neighbors: [
                store.chunk_at(Point2::new(position.x, position.y + 1)),
                store.chunk_at(Point2::new(position.x, position.y - 1)),
                store.chunk_at(Point2::new(position.x + 1, position.y)),
                store.chunk_at(Point2::new(position.x - 1, position.y)),
            ],
        })
    }

    /// Builds a view directly from chunk references (tests, custom stores).
    pub fn with_neighbors(
        chunk: &'a Chunk,
        pos_z: Option<&'a Chunk>,
        neg_z: Option<&'a Chunk>,
        pos_x: Option<&'a Chunk>,
        neg_x: Option<&'a Chunk>,
    ) -> Self {
        VoxelGridAccessor {
            chunk,
            neighbors: [pos_z, neg_z, pos_x, neg_x],
        }
    }

    /// The chunk this view is centered on.
    #[inline]
    pub fn chunk(&self) -> &'a Chunk {
        self.chunk
    }

    /// Resolves the packed cell at a coordinate inside the chunk or one step
    /// into a lateral neighbor. `y` must be within the chunk height.
    ///
    /// At most one lateral axis may be out of range; the mesher only ever
    /// looks at face-adjacent neighbors, never diagonals.
    pub fn cell(&self, x: i32, y: i32, z: i32) -> Cell {
        debug_assert!((0..SIZE_Y).contains(&y), "y {y} outside chunk height");
        debug_assert!(
            (0..SIZE_XZ).contains(&x) || (0..SIZE_XZ).contains(&z),
            "diagonal neighbor lookup at ({x},{y},{z})"
        );

        let (slot, nx, nz) = if z >= SIZE_XZ {
            (NEIGHBOR_POS_Z, x, 0)
        } else if z < 0 {
            (NEIGHBOR_NEG_Z, x, SIZE_XZ - 1)
        } else if x >= SIZE_XZ {
            (NEIGHBOR_POS_X, 0, z)
        } else if x < 0 {
            (NEIGHBOR_NEG_X, SIZE_XZ - 1, z)
        } else {
            return self.chunk.cell(x, y, z);
        };

        match self.neighbors[slot] {
            Some(neighbor) => neighbor.cell(nx, y, nz),
            // Unloaded neighbor space reads as air.
            None => 0,
        }
    }

    /// Resolves the neighbor cell one step from `(x, y, z)` towards `side`,
    /// applying the vertical edge policies.
    pub fn neighbor_cell(&self, x: i32, y: i32, z: i32, side: BlockSide) -> Cell {
        let step = side.offset();
        let ny = y + step.y;
        if ny >= SIZE_Y {
            // Above the world ceiling is air.
            return 0;
        }
        if ny < 0 {
            // Below the world floor reads as the cell itself.
            return self.chunk.cell(x, y, z);
        }
        self.cell(x + step.x, ny, z + step.z)
    }
}
