//! # Rendering Module
//!
//! GPU-facing half of the crate: the vertex format, the texture atlas seam,
//! the quad buffer primitive, the build queue seam, and the segment renderer
//! that ties them together.

pub mod atlas;
pub mod buffers;
pub mod queue;
pub mod segment;
pub mod vertex;

pub use atlas::{GridAtlas, TextureAtlas};
pub use buffers::{BufferError, QuadBufferDevice, SegmentGpuBuffers, WgpuQuadBuffers};
pub use queue::{BuildPriority, BuildQueue};
pub use segment::{
    Aabb, BoundingSphere, SegmentId, SegmentIdAllocator, SegmentRenderer, SegmentState,
};
pub use vertex::Vertex;
