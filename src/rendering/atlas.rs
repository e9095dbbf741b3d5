//! Texture atlas seam.
//!
//! The mesher resolves a face to a slot index through the block catalog, then
//! converts the slot to four texture coordinates through this trait. The
//! atlas itself (image data, sampler, bind group) is an external collaborator.

/// Converts texture atlas slot indices to texture coordinates.
pub trait TextureAtlas {
    /// The four texture coordinates covering a slot, in quad corner order
    /// (lower-left, lower-right, upper-left, upper-right).
    fn slot_coords(&self, slot: u16) -> [[f32; 2]; 4];
}

/// A uniform n×n grid atlas: slot `i` covers the sub-square at column
/// `i % n`, row `i / n`.
pub struct GridAtlas {
    slots_per_row: u16,
}

impl GridAtlas {
    /// Creates a grid atlas with the given number of slots per row.
    ///
    /// # Panics
    /// Panics if `slots_per_row` is zero.
    pub fn new(slots_per_row: u16) -> Self {
        assert!(slots_per_row > 0, "atlas must have at least one slot per row");
        GridAtlas { slots_per_row }
    }
}

impl TextureAtlas for GridAtlas {
    fn slot_coords(&self, slot: u16) -> [[f32; 2]; 4] {
        let step = 1.0 / self.slots_per_row as f32;
        let col = (slot % self.slots_per_row) as f32;
        let row = (slot / self.slots_per_row) as f32;
        let u0 = col * step;
        let v0 = row * step;
        let u1 = u0 + step;
        let v1 = v0 + step;
        // v grows downward in texture space: "upper" corners use v0.
        [[u0, v1], [u1, v1], [u0, v0], [u1, v0]]
    }
}
