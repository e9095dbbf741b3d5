//! # Face Emitter Module
//!
//! Build-local quad accumulator. The mesher hands it one visible face at a
//! time (segment-local block position, face direction, atlas coordinates);
//! it appends the four corner vertices and six indices for the quad.
//!
//! One emitter is shared across all segments built in a frame: `reset()`
//! clears the accumulated data but keeps the backing storage, so steady-state
//! builds allocate nothing.

use cgmath::Point3;

use crate::rendering::vertex::Vertex;
use crate::voxels::block::block_side::BlockSide;

/// Number of indices per emitted quad (two triangles).
pub const INDICES_PER_QUAD: u32 = 6;
/// Number of vertices per emitted quad.
pub const VERTICES_PER_QUAD: u32 = 4;

/// Accumulates visible faces into vertex/index data for one segment build.
pub struct FaceEmitter {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    quads: u32,
}

/// The finished output of one build: tightly packed vertex and index data
/// borrowed from the emitter, valid until the next `reset()`.
#[derive(Copy, Clone)]
pub struct BuiltMesh<'a> {
    /// Quad corner vertices, four per face.
    pub vertices: &'a [Vertex],
    /// Triangle-list indices, six per face.
    pub indices: &'a [u32],
}

impl BuiltMesh<'_> {
    /// The number of indices to draw.
    pub fn element_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Total byte size of the vertex and index data.
    pub fn byte_size(&self) -> u64 {
        (std::mem::size_of_val(self.vertices) + std::mem::size_of_val(self.indices)) as u64
    }
}

impl FaceEmitter {
    /// Creates an empty emitter.
    pub fn new() -> Self {
        FaceEmitter {
            vertices: Vec::new(),
            indices: Vec::new(),
            quads: 0,
        }
    }

    /// Clears accumulated faces, keeping the backing storage for the next
    /// build.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.quads = 0;
    }

    /// The number of quads emitted since the last reset.
    pub fn quad_count(&self) -> u32 {
        self.quads
    }

    /// Appends one quad for the face of the block at the given segment-local
    /// position.
    ///
    /// `coords` is the atlas coordinate quadruple in (lower-left, lower-right,
    /// upper-left, upper-right) order, matching the corner order the vertices
    /// are appended in.
    pub fn emit(&mut self, pos: Point3<i32>, side: BlockSide, coords: [[f32; 2]; 4]) {
        let Point3 { x, y, z } = pos;
        // Corner order per face: lower-left, lower-right, upper-left,
        // upper-right, wound counter-clockwise seen from outside the block.
        let corners: [Point3<i32>; 4] = match side {
            BlockSide::FRONT => [
                Point3::new(x, y, z + 1),
                Point3::new(x + 1, y, z + 1),
                Point3::new(x, y + 1, z + 1),
                Point3::new(x + 1, y + 1, z + 1),
            ],
            BlockSide::BACK => [
                Point3::new(x + 1, y, z),
                Point3::new(x, y, z),
                Point3::new(x + 1, y + 1, z),
                Point3::new(x, y + 1, z),
            ],
            BlockSide::TOP => [
                Point3::new(x, y + 1, z + 1),
                Point3::new(x + 1, y + 1, z + 1),
                Point3::new(x, y + 1, z),
                Point3::new(x + 1, y + 1, z),
            ],
            BlockSide::BOTTOM => [
                Point3::new(x, y, z),
                Point3::new(x + 1, y, z),
                Point3::new(x, y, z + 1),
                Point3::new(x + 1, y, z + 1),
            ],
            BlockSide::RIGHT => [
                Point3::new(x + 1, y, z + 1),
                Point3::new(x + 1, y, z),
                Point3::new(x + 1, y + 1, z + 1),
                Point3::new(x + 1, y + 1, z),
            ],
            BlockSide::LEFT => [
                Point3::new(x, y, z),
                Point3::new(x, y, z + 1),
                Point3::new(x, y + 1, z),
                Point3::new(x, y + 1, z + 1),
            ],
        };

        let base = self.quads * VERTICES_PER_QUAD;
        for (corner, uv) in corners.iter().zip(coords.iter()) {
            self.vertices.push(Vertex::new(*corner, *uv));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 3, base, base + 3, base + 2]);
        self.quads += 1;
    }

    /// Finishes the build, yielding the packed data to upload.
    pub fn finish(&self) -> BuiltMesh<'_> {
        BuiltMesh {
            vertices: &self.vertices,
            indices: &self.indices,
        }
    }
}

impl Default for FaceEmitter {
    fn default() -> Self {
        Self::new()
    }
}
