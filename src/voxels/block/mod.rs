//! # Block Module
//!
//! This module provides the block descriptor and material model consumed by
//! the segment mesher: per-face texture slot resolution and the material flag
//! set, notably the MERGE flag that controls face suppression between
//! different block types.

pub mod block_side;
pub mod catalog;

pub use block_side::BlockSide;
pub use catalog::BlockCatalog;

use super::cell::BlockId;

/// Bitset of material properties.
///
/// Only MERGE participates in meshing today; the representation leaves room
/// for more flags without changing the descriptor layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct MaterialFlags(pub u32);

impl MaterialFlags {
    /// No flags set.
    pub const NONE: MaterialFlags = MaterialFlags(0);
    /// The material does not fully occlude its neighbors: a face between two
    /// *different* block types is still emitted when the neighbor carries
    /// this flag.
    pub const MERGE: MaterialFlags = MaterialFlags(1 << 0);

    /// Returns true if every flag in `other` is set in `self`.
    #[inline]
    pub fn contains(self, other: MaterialFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Material properties shared by every block of one type.
#[derive(Copy, Clone, Debug, Default)]
pub struct Material {
    /// The material flag set.
    pub flags: MaterialFlags,
}

/// Custom face-slot resolver: maps (descriptor, local position, face,
/// metadata, data) to a texture atlas slot index.
///
/// Used for blocks whose face texture varies with the cell's data field
/// (orientation, damage stages, ...). Blocks without one fall back to the
/// descriptor's static per-face slot table.
pub type FaceSlotResolver =
    fn(&BlockDescriptor, i32, i32, i32, BlockSide, u8, u16) -> u16;

/// Describes one block type: identity, material, and face-slot resolution.
#[derive(Clone, Debug)]
pub struct BlockDescriptor {
    /// The block-type id this descriptor is registered under.
    pub id: BlockId,
    /// Human-readable name, used in block definition files and logs.
    pub name: String,
    /// Material properties.
    pub material: Material,
    /// Static texture atlas slot per face, indexed by [`BlockSide`].
    pub face_slots: [u16; 6],
    /// Optional data-driven slot resolver overriding the static table.
    pub resolver: Option<FaceSlotResolver>,
}

impl BlockDescriptor {
    /// Creates a descriptor with a static per-face slot table and no flags.
    pub fn new(id: BlockId, name: impl Into<String>, face_slots: [u16; 6]) -> Self {
        BlockDescriptor {
            id,
            name: name.into(),
            material: Material::default(),
            face_slots,
            resolver: None,
        }
    }

    /// Sets the material flag set.
    pub fn with_flags(mut self, flags: MaterialFlags) -> Self {
        self.material.flags = flags;
        self
    }

    /// Sets a data-driven face-slot resolver.
    pub fn with_resolver(mut self, resolver: FaceSlotResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Resolves the texture atlas slot for one face of a block of this type.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - The block's chunk-local position
    /// * `side` - The face being emitted
    /// * `metadata` - The cell's metadata byte
    /// * `data` - The cell's 16-bit data/variant field
    pub fn face_slot(&self, x: i32, y: i32, z: i32, side: BlockSide, metadata: u8, data: u16) -> u16 {
        match self.resolver {
            Some(resolver) => resolver(self, x, y, z, side, metadata, data),
            None => self.face_slots[side as usize],
        }
    }
}
