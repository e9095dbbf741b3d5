//! # Segment Renderer Module
//!
//! One `SegmentRenderer` per segment: it owns the segment's GPU buffer,
//! tracks dirtiness and size accounting, carries the build-queue bookkeeping
//! (membership flag, priority, sort key, last-visible frame), and exposes the
//! render entry points.
//!
//! ## State machine
//!
//! `Unbuilt → Dirty → Building → Built → (Dirty again | Unbuilt)`.
//! `invalidate()` re-dirties, `build()` runs the mesher and swaps the buffer,
//! `discard()` drops everything on resource loss or chunk unload, `restore()`
//! re-enters the dirty state after a context recovery. Double discards and
//! renders after discard are safe no-ops.
//!
//! The debug wireframe toggle is deliberately independent of the mesh state
//! machine: it allocates or releases a bounding-cube line buffer and nothing
//! else.

use cgmath::{Matrix4, Point2, Point3, Vector3};

use crate::meshing::{mesh_segment, FaceEmitter};
use crate::rendering::atlas::TextureAtlas;
use crate::rendering::buffers::{BufferError, QuadBufferDevice, SegmentGpuBuffers, WgpuQuadBuffers};
use crate::rendering::queue::{BuildPriority, BuildQueue};
use crate::rendering::vertex::Vertex;
use crate::voxels::block::catalog::BlockCatalog;
use crate::voxels::chunk::{SEGMENT_SIZE, SIZE_XZ};
use crate::voxels::grid::VoxelGridAccessor;
use crate::voxels::world::ChunkStore;

/// Unique identity of a segment renderer, stable for its whole lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub u32);

/// Hands out segment ids in construction order.
///
/// Owned by whichever component constructs segment renderers (typically the
/// view renderer), so id assignment is explicit and deterministic rather
/// than hidden process-wide state.
#[derive(Debug, Default)]
pub struct SegmentIdAllocator {
    next: u32,
}

impl SegmentIdAllocator {
    /// Creates an allocator starting at id 0.
    pub fn new() -> Self {
        SegmentIdAllocator { next: 0 }
    }

    /// Allocates the next id.
    pub fn allocate(&mut self) -> SegmentId {
        let id = SegmentId(self.next);
        self.next += 1;
        id
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

/// Bounding sphere in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingSphere {
    /// Sphere center.
    pub center: Point3<f32>,
    /// Sphere radius.
    pub radius: f32,
}

/// Mesh lifecycle state of a segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentState {
    /// No buffer and no pending build (fresh, discarded, or chunk unloaded).
    Unbuilt,
    /// Voxel data changed since the buffer was last built.
    Dirty,
    /// A build is running right now.
    Building,
    /// The buffer matches the voxel data as of the last `build()`.
    Built,
}

/// Renders one segment: owns its GPU buffer and all per-segment state.
pub struct SegmentRenderer<D: QuadBufferDevice> {
    id: SegmentId,
    chunk_position: Point2<i32>,
    /// World-space Y offset of the segment base, a multiple of SEGMENT_SIZE.
    by: i32,
    transform: Matrix4<f32>,
    aabb: Aabb,
    sphere: BoundingSphere,
    state: SegmentState,
    buffer: Option<D::Handle>,
    element_count: u32,
    estimated_size: u64,
    in_build_queue: bool,
    priority: BuildPriority,
    /// Queue ordering hint, typically squared distance to the viewer.
    pub sort_key: f32,
    last_visible_frame: u64,
    debug_buffer: Option<D::Handle>,
    debug_element_count: u32,
    debug_enabled: bool,
}

impl<D: QuadBufferDevice> SegmentRenderer<D> {
    /// Creates the renderer for the segment at Y-offset `by` of the chunk at
    /// `chunk_position`. The world transform and bounds are computed once
    /// here and never change.
    pub fn new(id: SegmentId, chunk_position: Point2<i32>, by: i32) -> Self {
        debug_assert!(by % SEGMENT_SIZE == 0);

        let origin = Vector3::new(
            (chunk_position.x * SIZE_XZ) as f32,
            by as f32,
            (chunk_position.y * SIZE_XZ) as f32,
        );
        let size = SEGMENT_SIZE as f32;
        let min = Point3::new(origin.x, origin.y, origin.z);
        let max = min + Vector3::new(size, size, size);

        SegmentRenderer {
            id,
            chunk_position,
            by,
            transform: Matrix4::from_translation(origin),
            aabb: Aabb { min, max },
            sphere: BoundingSphere {
                center: min + Vector3::new(size / 2.0, size / 2.0, size / 2.0),
                radius: size,
            },
            state: SegmentState::Unbuilt,
            buffer: None,
            element_count: 0,
            estimated_size: 0,
            in_build_queue: false,
            priority: BuildPriority::Load,
            sort_key: 0.0,
            last_visible_frame: 0,
            debug_buffer: None,
            debug_element_count: 0,
            debug_enabled: false,
        }
    }

    /// This renderer's id.
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// The owning chunk's coordinates.
    pub fn chunk_position(&self) -> Point2<i32> {
        self.chunk_position
    }

    /// The segment's Y offset within the chunk.
    pub fn segment_offset(&self) -> i32 {
        self.by
    }

    /// The immutable world-space transform.
    pub fn transform(&self) -> &Matrix4<f32> {
        &self.transform
    }

    /// The world-space bounding box.
    pub fn aabb(&self) -> Aabb {
        self.aabb
    }

    /// The world-space bounding sphere (radius = segment size, since
    /// segments are cubic).
    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.sphere
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SegmentState {
        self.state
    }

    /// Bytes of GPU memory held by the current mesh buffer (0 when none).
    pub fn estimated_size(&self) -> u64 {
        self.estimated_size
    }

    /// Number of indices in the current buffer.
    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    /// Whether the segment is waiting in the build queue.
    pub fn in_build_queue(&self) -> bool {
        self.in_build_queue
    }

    /// Current build priority.
    pub fn priority(&self) -> BuildPriority {
        self.priority
    }

    /// Records the frame this segment last passed visibility culling.
    pub fn set_last_visible_frame(&mut self, frame: u64) {
        self.last_visible_frame = frame;
    }

    /// The frame this segment last passed visibility culling.
    pub fn last_visible_frame(&self) -> u64 {
        self.last_visible_frame
    }

    /// True if a build is pending or the current buffer is non-empty; a
    /// segment with no data never reaches the draw list.
    pub fn has_data(&self) -> bool {
        matches!(self.state, SegmentState::Dirty | SegmentState::Building)
            || self.element_count > 0
    }

    /// Marks the segment dirty and (re-)requests scheduling.
    ///
    /// Idempotent: re-invalidating a dirty segment only escalates its
    /// priority. Has no effect on an `Unbuilt` segment, which is resurrected
    /// through `restore()` instead.
    pub fn invalidate(&mut self, queue: &mut dyn BuildQueue, priority: BuildPriority) {
        if self.state == SegmentState::Unbuilt {
            return;
        }
        self.state = SegmentState::Dirty;
        if !self.in_build_queue || priority > self.priority {
            self.priority = priority;
            self.in_build_queue = true;
            queue.invalidate_segment(self.id, priority);
        }
    }

    /// Rebuilds the mesh from current voxel data and swaps the GPU buffer.
    ///
    /// Returns the byte-size delta against the previous buffer, so the
    /// caller can keep a running GPU memory total without re-summing every
    /// segment. If the owning chunk has been unloaded the build is skipped
    /// and the segment discarded (the delta still accounts for the freed
    /// buffer).
    ///
    /// On upload failure the segment drops back to `Dirty` with no buffer —
    /// never a permanent `Building` state and never stale geometry. The
    /// previous buffer is gone in that case and the `Err` carries no delta,
    /// so callers keeping a running byte total must subtract the segment's
    /// pre-build `estimated_size()` themselves (it reads 0 after the
    /// failure).
    pub fn build(
        &mut self,
        store: &impl ChunkStore,
        catalog: &BlockCatalog,
        atlas: &dyn TextureAtlas,
        emitter: &mut FaceEmitter,
        device: &mut D,
    ) -> Result<i64, BufferError> {
        self.in_build_queue = false;
        let previous_size = self.estimated_size as i64;

        let Some(grid) = VoxelGridAccessor::gather(store, self.chunk_position) else {
            self.release_buffers(device);
            return Ok(-previous_size);
        };

        self.state = SegmentState::Building;
        emitter.reset();
        let timings = mesh_segment(&grid, catalog, atlas, self.by, emitter);
        let mesh = emitter.finish();

        if mesh.element_count() == 0 {
            if let Some(buffer) = self.buffer.take() {
                device.release(buffer);
            }
            self.element_count = 0;
            self.estimated_size = 0;
            self.state = SegmentState::Built;
            return Ok(-previous_size);
        }

        let label = format!(
            "segment ({}, {}) by={}",
            self.chunk_position.x, self.chunk_position.y, self.by
        );
        match device.upload(&label, mesh.vertices, mesh.indices, self.buffer.take()) {
            Ok(buffer) => {
                self.buffer = Some(buffer);
                self.element_count = mesh.element_count();
                self.estimated_size = mesh.byte_size();
                self.state = SegmentState::Built;
                log::debug!(
                    "built {}: {} elements, {} bytes (interior {:?}, boundary {:?})",
                    label,
                    self.element_count,
                    self.estimated_size,
                    timings.interior,
                    timings.boundary,
                );
                Ok(self.estimated_size as i64 - previous_size)
            }
            Err(error) => {
                // The device released the old buffer; stale geometry must
                // not be drawn, so account the segment as empty and dirty.
                self.element_count = 0;
                self.estimated_size = 0;
                self.state = SegmentState::Dirty;
                Err(error)
            }
        }
    }

    /// Releases the GPU buffer and any debug buffer, zeroing all size
    /// accounting, and withdraws any pending scheduling request from the
    /// queue. Safe to call repeatedly and from any state; used on
    /// resource-context loss and chunk unload.
    pub fn discard(&mut self, device: &mut D, queue: &mut dyn BuildQueue) {
        if self.in_build_queue {
            queue.remove_segment(self.id);
            self.in_build_queue = false;
        }
        self.release_buffers(device);
    }

    /// Drops all buffers and resets the mesh accounting to `Unbuilt`.
    ///
    /// Queue bookkeeping is the caller's concern: `discard()` withdraws the
    /// scheduling request first, while the unloaded-chunk path inside
    /// `build()` runs under the queue's own dispatch and has already been
    /// dequeued.
    fn release_buffers(&mut self, device: &mut D) {
        if let Some(buffer) = self.buffer.take() {
            device.release(buffer);
        }
        if let Some(buffer) = self.debug_buffer.take() {
            device.release(buffer);
        }
        self.debug_element_count = 0;
        self.element_count = 0;
        self.estimated_size = 0;
        self.state = SegmentState::Unbuilt;
    }

    /// Re-enters the dirty state after a context recovery: re-establishes
    /// debug visuals if they were enabled and re-requests a load-priority
    /// rebuild. No-op unless the segment is `Unbuilt`.
    pub fn restore(
        &mut self,
        device: &mut D,
        queue: &mut dyn BuildQueue,
    ) -> Result<(), BufferError> {
        if self.state != SegmentState::Unbuilt {
            return Ok(());
        }
        self.state = SegmentState::Dirty;
        self.priority = BuildPriority::Load;
        self.in_build_queue = true;
        queue.invalidate_segment(self.id, BuildPriority::Load);

        if self.debug_enabled && self.debug_buffer.is_none() {
            self.create_debug_buffer(device)?;
        }
        Ok(())
    }

    /// Enables or disables the debug bounding-cube wireframe. Toggling to
    /// the current value is a no-op; the mesh state machine is unaffected
    /// either way.
    pub fn set_debug(&mut self, enabled: bool, device: &mut D) -> Result<(), BufferError> {
        if enabled == self.debug_enabled {
            return Ok(());
        }
        self.debug_enabled = enabled;
        if enabled {
            self.create_debug_buffer(device)
        } else {
            if let Some(buffer) = self.debug_buffer.take() {
                device.release(buffer);
            }
            self.debug_element_count = 0;
            Ok(())
        }
    }

    /// Whether debug visuals are enabled.
    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    /// The current mesh buffer and its element count, or `None` when there
    /// is nothing to draw.
    pub fn draw_elements(&self) -> Option<(&D::Handle, u32)> {
        match (&self.buffer, self.element_count) {
            (Some(buffer), count) if count > 0 => Some((buffer, count)),
            _ => None,
        }
    }

    /// The debug wireframe buffer and its element count, if present.
    pub fn debug_elements(&self) -> Option<(&D::Handle, u32)> {
        self.debug_buffer
            .as_ref()
            .map(|buffer| (buffer, self.debug_element_count))
    }

    /// Uploads the 12-edge line-list cube spanning the segment bounds.
    fn create_debug_buffer(&mut self, device: &mut D) -> Result<(), BufferError> {
        let size = SEGMENT_SIZE;
        let mut corners = [Vertex::new(Point3::new(0, 0, 0), [0.0, 0.0]); 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let i = i as i32;
            *corner = Vertex::new(
                Point3::new((i & 1) * size, ((i >> 2) & 1) * size, ((i >> 1) & 1) * size),
                [0.0, 0.0],
            );
        }
        // One index pair per cube edge.
        const EDGES: [u32; 24] = [
            0, 1, 2, 3, 4, 5, 6, 7, // X-aligned
            0, 2, 1, 3, 4, 6, 5, 7, // Z-aligned
            0, 4, 1, 5, 2, 6, 3, 7, // Y-aligned
        ];

        let label = format!(
            "segment debug ({}, {}) by={}",
            self.chunk_position.x, self.chunk_position.y, self.by
        );
        let buffer = device.upload(&label, &corners, &EDGES, self.debug_buffer.take())?;
        self.debug_buffer = Some(buffer);
        self.debug_element_count = EDGES.len() as u32;
        Ok(())
    }
}

impl SegmentRenderer<WgpuQuadBuffers> {
    /// Issues the segment's draw call into an open render pass. No-op when
    /// the segment has no elements; safe to call every frame in any state.
    ///
    /// The caller's pipeline owns bind groups and push constants; the
    /// segment's [`transform`](Self::transform) is read by the caller when
    /// setting them up.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        let Some((buffers, count)) = self.draw_elements() else {
            return;
        };
        self.draw_buffers(render_pass, buffers, count);
    }

    /// Draws the debug wireframe cube, if enabled. The caller binds a
    /// line-list pipeline first.
    pub fn render_debug(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        let Some((buffers, count)) = self.debug_elements() else {
            return;
        };
        self.draw_buffers(render_pass, buffers, count);
    }

    fn draw_buffers(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        buffers: &SegmentGpuBuffers,
        count: u32,
    ) {
        render_pass.set_vertex_buffer(0, buffers.vertex.slice(..));
        render_pass.set_index_buffer(buffers.index.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..count, 0, 0..1);
    }
}
