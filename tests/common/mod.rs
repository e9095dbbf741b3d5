//! Shared test doubles: an in-memory quad buffer device and a recording
//! build queue.

#![allow(dead_code)]

use voxel_segments::rendering::{
    BufferError, BuildPriority, BuildQueue, QuadBufferDevice, SegmentId, Vertex,
};

/// An "uploaded" buffer: just the sizes the device would have allocated.
#[derive(Debug)]
pub struct FakeBuffer {
    pub bytes: u64,
    pub vertex_capacity: usize,
    pub index_capacity: usize,
}

/// In-memory [`QuadBufferDevice`] that tracks allocations and can be told to
/// fail the next upload, standing in for GPU memory pressure.
#[derive(Default)]
pub struct FakeDevice {
    pub live_buffers: usize,
    pub uploads: usize,
    pub releases: usize,
    pub fail_next_upload: bool,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuadBufferDevice for FakeDevice {
    type Handle = FakeBuffer;

    fn upload(
        &mut self,
        _label: &str,
        vertices: &[Vertex],
        indices: &[u32],
        reuse: Option<FakeBuffer>,
    ) -> Result<FakeBuffer, BufferError> {
        let vertex_bytes = std::mem::size_of_val(vertices);
        let index_bytes = std::mem::size_of_val(indices);
        let bytes = (vertex_bytes + index_bytes) as u64;

        if self.fail_next_upload {
            self.fail_next_upload = false;
            if reuse.is_some() {
                // Matches the real device: the reused handle is gone.
                self.live_buffers -= 1;
                self.releases += 1;
            }
            return Err(BufferError::Allocation {
                bytes,
                reason: "fake device out of memory".to_string(),
            });
        }

        self.uploads += 1;
        match reuse {
            Some(previous)
                if previous.vertex_capacity >= vertex_bytes
                    && previous.index_capacity >= index_bytes =>
            {
                Ok(FakeBuffer {
                    bytes,
                    vertex_capacity: previous.vertex_capacity,
                    index_capacity: previous.index_capacity,
                })
            }
            Some(_) => {
                // Undersized buffer is replaced in place; live count unchanged.
                self.releases += 1;
                Ok(FakeBuffer {
                    bytes,
                    vertex_capacity: vertex_bytes,
                    index_capacity: index_bytes,
                })
            }
            None => {
                self.live_buffers += 1;
                Ok(FakeBuffer {
                    bytes,
                    vertex_capacity: vertex_bytes,
                    index_capacity: index_bytes,
                })
            }
        }
    }

    fn release(&mut self, _handle: FakeBuffer) {
        self.live_buffers -= 1;
        self.releases += 1;
    }
}

/// Recording [`BuildQueue`]: remembers every scheduling request in order.
#[derive(Default)]
pub struct FakeQueue {
    pub invalidations: Vec<(SegmentId, BuildPriority)>,
    pub removals: Vec<SegmentId>,
}

impl FakeQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BuildQueue for FakeQueue {
    fn invalidate_segment(&mut self, id: SegmentId, priority: BuildPriority) {
        self.invalidations.push((id, priority));
    }

    fn remove_segment(&mut self, id: SegmentId) {
        self.removals.push(id);
    }
}
