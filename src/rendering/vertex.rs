//! Vertex format for segment meshes.
//!
//! One mesh vertex per quad corner: an integer segment-local position and
//! the texture atlas coordinates the face emitter resolved for it. The
//! layout must match the vertex shader's input attributes.

use cgmath::Point3;

/// A vertex of a segment mesh quad.
///
/// # Memory Layout
/// - Position: 3x i32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 20 bytes. `#[repr(C)]` keeps the layout stable for the GPU
/// upload path.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// X coordinate, segment-local block units
    x: i32,
    /// Y coordinate, segment-local block units
    y: i32,
    /// Z coordinate, segment-local block units
    z: i32,
    /// Texture atlas coordinates (normalized 0.0-1.0)
    tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex from a segment-local corner position and atlas
    /// coordinates.
    pub fn new(pos: Point3<i32>, tex_coords: [f32; 2]) -> Self {
        Vertex {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            tex_coords,
        }
    }

    /// The segment-local corner position.
    pub fn position(&self) -> Point3<i32> {
        Point3::new(self.x, self.y, self.z)
    }

    /// The texture atlas coordinates.
    pub fn tex_coords(&self) -> [f32; 2] {
        self.tex_coords
    }

    /// Returns the vertex buffer layout description for the render pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (i32, i32, i32)
    /// - `location = 1`: tex_coords (vec2<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Sint32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[i32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
