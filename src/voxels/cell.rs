//! # Packed Cell Module
//!
//! This module is the single owner of the packed voxel cell format. Every
//! other module goes through the typed accessors here instead of recomputing
//! bit masks at the call site, so the layout cannot drift between the chunk
//! storage, the mesher, and any unmanaged storage the cells interop with.
//!
//! ## Layout
//!
//! A cell is one `u32`:
//! - bits 0–15: 16-bit data/variant field (orientation, damage, ...)
//! - bits 16–23: metadata byte
//! - bits 24–31: block-type id (the full remaining high bits)
//!
//! Block id 0 is air: fully transparent and never meshed.

/// A packed voxel cell: block-type id, metadata byte, and 16-bit data field.
pub type Cell = u32;

/// The block-type id of air / empty space.
pub const AIR: BlockId = 0;

/// The integer type used for block-type ids.
///
/// Ids occupy the high byte of a [`Cell`], so the catalog can hold at most
/// 256 block types (including air).
pub type BlockId = u8;

/// Extracts the block-type id from a packed cell.
#[inline]
pub fn block_id(cell: Cell) -> BlockId {
    (cell >> 24) as BlockId
}

/// Extracts the metadata byte from a packed cell.
#[inline]
pub fn metadata(cell: Cell) -> u8 {
    ((cell >> 16) & 0xFF) as u8
}

/// Extracts the 16-bit data/variant field from a packed cell.
#[inline]
pub fn data(cell: Cell) -> u16 {
    (cell & 0xFFFF) as u16
}

/// Returns true if the cell holds a solid block (anything but air).
#[inline]
pub fn is_solid(cell: Cell) -> bool {
    block_id(cell) != AIR
}

/// Packs a block-type id, metadata byte, and data field into a cell.
#[inline]
pub fn pack(id: BlockId, metadata: u8, data: u16) -> Cell {
    ((id as u32) << 24) | ((metadata as u32) << 16) | data as u32
}

/// Packs a bare block-type id with zero metadata and data.
#[inline]
pub fn pack_id(id: BlockId) -> Cell {
    pack(id, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_round_trips_all_fields() {
        let cell = pack(7, 0x2A, 0xBEEF);
        assert_eq!(block_id(cell), 7);
        assert_eq!(metadata(cell), 0x2A);
        assert_eq!(data(cell), 0xBEEF);
    }

    #[test]
    fn air_is_not_solid() {
        assert!(!is_solid(pack_id(AIR)));
        assert!(!is_solid(pack(AIR, 0xFF, 0xFFFF)));
        assert!(is_solid(pack_id(1)));
    }

    #[test]
    fn fields_do_not_alias() {
        // A maxed-out data field must not leak into the metadata or id bits.
        let cell = pack(0, 0, 0xFFFF);
        assert_eq!(block_id(cell), AIR);
        assert_eq!(metadata(cell), 0);
    }
}
