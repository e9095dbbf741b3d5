//! # Quad Buffer Module
//!
//! The low-level vertex/index buffer primitive the segment renderer uploads
//! meshes through. The primitive is a trait so the meshing core and its
//! tests never need a GPU; `WgpuQuadBuffers` is the production
//! implementation over a `wgpu` device/queue pair.
//!
//! ## Buffer reuse
//!
//! Rebuilds are frequent and mesh sizes are stable frame to frame, so an
//! upload may hand back the segment's previous handle: when its capacity
//! still fits the new data the implementation writes in place instead of
//! reallocating. When it reallocates, the old buffer is only destroyed after
//! the new one exists, so a segment never visibly loses its mesh mid-swap.

use thiserror::Error;
use wgpu::util::DeviceExt;

use crate::rendering::vertex::Vertex;

/// Failure uploading mesh data to the GPU.
///
/// Allocation failure is a normal runtime condition under GPU memory
/// pressure, surfaced so the caller can retry or evict the segment instead
/// of drawing stale geometry.
#[derive(Error, Debug)]
pub enum BufferError {
    /// The device could not allocate a buffer of the requested size.
    #[error("gpu buffer allocation of {bytes} bytes failed: {reason}")]
    Allocation {
        /// Total bytes requested.
        bytes: u64,
        /// Device-reported reason.
        reason: String,
    },
}

/// Allocates, updates, and releases per-segment vertex/index buffer pairs.
///
/// Implementations run on the render thread; handles are never shared across
/// threads.
pub trait QuadBufferDevice {
    /// The per-segment buffer handle type.
    type Handle;

    /// Uploads vertex and index data, reusing `reuse`'s storage when its
    /// capacity suffices.
    ///
    /// On error the reused handle has been released; the caller must treat
    /// the segment as having no buffer.
    fn upload(
        &mut self,
        label: &str,
        vertices: &[Vertex],
        indices: &[u32],
        reuse: Option<Self::Handle>,
    ) -> Result<Self::Handle, BufferError>;

    /// Releases a handle's GPU storage.
    fn release(&mut self, handle: Self::Handle);
}

/// A segment's uploaded mesh on a `wgpu` device.
pub struct SegmentGpuBuffers {
    /// Vertex data buffer.
    pub vertex: wgpu::Buffer,
    /// Index data buffer.
    pub index: wgpu::Buffer,
    vertex_capacity: u64,
    index_capacity: u64,
}

/// [`QuadBufferDevice`] implementation over a `wgpu` device/queue pair.
pub struct WgpuQuadBuffers {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl WgpuQuadBuffers {
    /// Creates the buffer device from a `wgpu` device and its queue.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        WgpuQuadBuffers { device, queue }
    }

    fn create_buffers(
        &self,
        label: &str,
        vertex_bytes: &[u8],
        index_bytes: &[u8],
    ) -> Result<SegmentGpuBuffers, BufferError> {
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

        let vertex = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: vertex_bytes,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        let index = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: index_bytes,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            });

        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            vertex.destroy();
            index.destroy();
            return Err(BufferError::Allocation {
                bytes: (vertex_bytes.len() + index_bytes.len()) as u64,
                reason: error.to_string(),
            });
        }

        Ok(SegmentGpuBuffers {
            vertex,
            index,
            vertex_capacity: vertex_bytes.len() as u64,
            index_capacity: index_bytes.len() as u64,
        })
    }
}

impl QuadBufferDevice for WgpuQuadBuffers {
    type Handle = SegmentGpuBuffers;

    fn upload(
        &mut self,
        label: &str,
        vertices: &[Vertex],
        indices: &[u32],
        reuse: Option<SegmentGpuBuffers>,
    ) -> Result<SegmentGpuBuffers, BufferError> {
        let vertex_bytes = bytemuck::cast_slice(vertices);
        let index_bytes = bytemuck::cast_slice(indices);

        if let Some(previous) = reuse {
            if previous.vertex_capacity >= vertex_bytes.len() as u64
                && previous.index_capacity >= index_bytes.len() as u64
            {
                self.queue.write_buffer(&previous.vertex, 0, vertex_bytes);
                self.queue.write_buffer(&previous.index, 0, index_bytes);
                return Ok(previous);
            }

            // Capacity outgrown: allocate first, destroy the old pair only
            // once the replacement exists.
            let fresh = self.create_buffers(label, vertex_bytes, index_bytes);
            match fresh {
                Ok(buffers) => {
                    previous.vertex.destroy();
                    previous.index.destroy();
                    Ok(buffers)
                }
                Err(error) => {
                    log::warn!("segment buffer reallocation failed: {error}");
                    previous.vertex.destroy();
                    previous.index.destroy();
                    Err(error)
                }
            }
        } else {
            self.create_buffers(label, vertex_bytes, index_bytes)
        }
    }

    fn release(&mut self, handle: SegmentGpuBuffers) {
        handle.vertex.destroy();
        handle.index.destroy();
    }
}
