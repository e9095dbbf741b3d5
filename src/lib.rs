#![warn(missing_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Segments
//!
//! Chunk segment meshing and rendering for a large, mutable, streamed voxel
//! world: dense voxel chunks are converted into a minimal set of textured
//! quads with correct face culling across both intra-chunk and cross-chunk
//! boundaries, with incremental rebuild and per-segment GPU buffer
//! lifecycle.
//!
//! ## Key Modules
//!
//! * `voxels` - The data model: packed cells, chunk storage, the sparse
//!   chunk store, the block/material catalog, and the grid accessor
//! * `meshing` - The face emitter and the two-pass segment mesher
//! * `rendering` - The vertex format, atlas and buffer seams, and the
//!   segment renderer state machine
//!
//! ## Architecture
//!
//! A chunk is a full-height column of voxel data; a segment is a cubic
//! 16-block slab of it and the unit of mesh rebuild and GPU buffer
//! ownership. World mutation marks segment renderers dirty; an external
//! streaming build queue schedules them; `SegmentRenderer::build` runs the
//! mesher against the grid accessor and catalog, fills the shared face
//! emitter, and swaps the segment's GPU buffer; later frames draw whatever
//! buffer each segment currently holds.
//!
//! Windowing, the GPU context, asset loading, and the streaming policy
//! itself are external collaborators consumed through the narrow traits in
//! `voxels::world`, `rendering::atlas`, `rendering::buffers`, and
//! `rendering::queue`.
//!
//! ## Usage
//!
//! ```
//! use cgmath::Point2;
//! use voxel_segments::meshing::FaceEmitter;
//! use voxel_segments::rendering::{GridAtlas, SegmentId, SegmentRenderer};
//! use voxel_segments::voxels::block::catalog::BlockCatalog;
//! use voxel_segments::voxels::cell;
//! use voxel_segments::voxels::chunk::Chunk;
//! use voxel_segments::voxels::world::World;
//! # use voxel_segments::rendering::{BufferError, QuadBufferDevice, Vertex};
//! # struct NullDevice;
//! # impl QuadBufferDevice for NullDevice {
//! #     type Handle = u64;
//! #     fn upload(&mut self, _: &str, v: &[Vertex], i: &[u32], _: Option<u64>)
//! #         -> Result<u64, BufferError> { Ok((v.len() + i.len()) as u64) }
//! #     fn release(&mut self, _: u64) {}
//! # }
//!
//! let mut world = World::new();
//! let mut chunk = Chunk::empty(Point2::new(0, 0));
//! chunk.set_cell(5, 5, 5, cell::pack_id(1));
//! world.insert(chunk);
//!
//! let catalog = BlockCatalog::with_builtin_blocks();
//! let atlas = GridAtlas::new(8);
//! let mut emitter = FaceEmitter::new();
//! let mut device = NullDevice;
//!
//! let mut segment = SegmentRenderer::new(SegmentId(0), Point2::new(0, 0), 0);
//! let delta = segment
//!     .build(&world, &catalog, &atlas, &mut emitter, &mut device)
//!     .unwrap();
//! assert!(delta > 0);
//! assert_eq!(segment.element_count(), 36); // 6 faces, 6 indices each
//! ```

pub mod meshing;
pub mod rendering;
pub mod voxels;
