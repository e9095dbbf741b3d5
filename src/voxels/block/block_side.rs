//! # Block Side Module
//!
//! This module defines the six oriented faces of a voxel block. The variant
//! order is the fixed wire order `{+Z, -Z, +Y, -Y, +X, -X}` = indices 0..5;
//! the neighbor arrays in the mesher, the per-face slot tables in the block
//! catalog, and the face emission tie-break all index by it, so the order
//! must never change.

use cgmath::Vector3;
use num_derive::FromPrimitive;

/// One of the six oriented faces of a voxel block.
///
/// The discriminants match the neighbor array indices 0..5 used throughout
/// the mesher and the catalog slot tables.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,
    /// The back face (facing negative Z)
    BACK = 1,
    /// The top face (facing positive Y)
    TOP = 2,
    /// The bottom face (facing negative Y)
    BOTTOM = 3,
    /// The right face (facing positive X)
    RIGHT = 4,
    /// The left face (facing negative X)
    LEFT = 5,
}

impl BlockSide {
    /// Returns all six faces in the fixed wire order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::RIGHT,
            BlockSide::LEFT,
        ]
    }

    /// Converts a neighbor array index (0..5) back to a face.
    ///
    /// # Panics
    /// Panics if the index is not in 0..=5.
    pub fn from_index(index: usize) -> Self {
        num::FromPrimitive::from_usize(index).expect("face index out of range")
    }

    /// The unit step from a cell towards the neighbor this face looks at.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
        }
    }
}
