//! # Block Catalog Module
//!
//! Maps block-type ids to [`BlockDescriptor`]s. The catalog is populated
//! either from the builtin table below or from a JSON block definition file,
//! and is read-only for the lifetime of a mesh build.

use serde::{Deserialize, Serialize};

use super::{BlockDescriptor, MaterialFlags};
use crate::voxels::cell::BlockId;

/// Builtin block definitions: id, per-face slot table (in wire face order),
/// and whether the material carries MERGE.
static BUILTIN_BLOCKS: phf::Map<&'static str, (u8, [u16; 6], bool)> = phf::phf_map! {
    "dirt" => (1u8, [1, 1, 1, 1, 1, 1], false),
    "grass" => (2u8, [2, 2, 3, 1, 2, 2], false),
    "wood" => (3u8, [0, 0, 0, 0, 0, 0], false),
    "white" => (4u8, [4, 4, 4, 4, 4, 4], false),
    "glass" => (5u8, [5, 5, 5, 5, 5, 5], true),
};

/// One entry of a JSON block definition file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BlockDef {
    /// The block-type id to register under (1..=255; 0 is reserved for air).
    pub id: BlockId,
    /// Human-readable block name.
    pub name: String,
    /// Whether the material carries the MERGE flag.
    #[serde(default)]
    pub merge: bool,
    /// Texture atlas slot per face, in wire face order.
    pub face_slots: [u16; 6],
}

/// Registry of block descriptors, indexed by block-type id.
///
/// Id 0 (air) is never registered; the mesher skips air cells before ever
/// consulting the catalog.
pub struct BlockCatalog {
    blocks: Vec<Option<BlockDescriptor>>,
}

impl BlockCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        let mut blocks = Vec::new();
        blocks.resize_with(usize::from(BlockId::MAX) + 1, || None);
        BlockCatalog { blocks }
    }

    /// Creates a catalog pre-populated with the builtin block set.
    pub fn with_builtin_blocks() -> Self {
        let mut catalog = Self::new();
        for (name, (id, face_slots, merge)) in BUILTIN_BLOCKS.entries() {
            let mut desc = BlockDescriptor::new(*id, *name, *face_slots);
            if *merge {
                desc = desc.with_flags(MaterialFlags::MERGE);
            }
            catalog.register(desc);
        }
        catalog
    }

    /// Creates a catalog from a JSON array of [`BlockDef`] entries.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let defs: Vec<BlockDef> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for def in defs {
            let mut desc = BlockDescriptor::new(def.id, def.name, def.face_slots);
            if def.merge {
                desc = desc.with_flags(MaterialFlags::MERGE);
            }
            catalog.register(desc);
        }
        Ok(catalog)
    }

    /// Registers a descriptor, replacing any previous registration of its id.
    pub fn register(&mut self, descriptor: BlockDescriptor) {
        let id = descriptor.id as usize;
        if self.blocks[id].is_some() {
            log::warn!("block id {} re-registered as {:?}", id, descriptor.name);
        }
        self.blocks[id] = Some(descriptor);
    }

    /// Looks up the descriptor registered for a block-type id.
    ///
    /// Returns `None` for unregistered ids; the mesher turns that into a
    /// fatal assertion since voxel data referencing an unknown block type is
    /// a programmer/data error.
    pub fn get_block_with_id(&self, id: BlockId) -> Option<&BlockDescriptor> {
        self.blocks[id as usize].as_ref()
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::new()
    }
}
