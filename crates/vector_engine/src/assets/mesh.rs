//! Triangle mesh data

use bytemuck::{Pod, Zeroable};

use crate::assets::BufferHandle;
use crate::foundation::math::{Vec2, Vec3};

/// Mesh vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Model-space position
    pub position: Vec3,
    /// Texture coordinate, zero unless set by a `tc` line
    pub tex_coord: Vec2,
}

impl Vertex {
    /// Vertex at `position` with a zero texture coordinate
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            tex_coord: Vec2::zeros(),
        }
    }
}

/// Triangle referencing three vertices by zero-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Vertex indices
    pub indices: [usize; 3],
}

/// Interleaved vertex as uploaded to the GPU
///
/// Five floats per vertex; the texture coordinate starts at byte 12.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    /// Position
    pub position: [f32; 3],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
}

impl GpuVertex {
    /// Size of one vertex in bytes
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Byte offset of the texture coordinate
    pub const TEX_COORD_OFFSET: usize = std::mem::size_of::<[f32; 3]>();
}

impl From<&Vertex> for GpuVertex {
    fn from(vertex: &Vertex) -> Self {
        Self {
            position: [vertex.position.x, vertex.position.y, vertex.position.z],
            tex_coord: [vertex.tex_coord.x, vertex.tex_coord.y],
        }
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    vertex_buffer: Option<BufferHandle>,
}

impl Mesh {
    /// Create a mesh; faces must index into `vertices`
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
            vertex_buffer: None,
        }
    }

    /// Mesh with no geometry, used when loading fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// Vertices in definition order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangles in definition order
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// GPU buffer holding [`Mesh::interleaved`], once uploaded
    pub fn vertex_buffer(&self) -> Option<BufferHandle> {
        self.vertex_buffer
    }

    pub(crate) fn set_vertex_buffer(&mut self, handle: BufferHandle) {
        self.vertex_buffer = Some(handle);
    }

    /// Vertices drawn: three per face
    pub fn vertex_count(&self) -> usize {
        self.faces.len() * 3
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Unindexed vertex stream, three vertices per face in face order
    pub fn interleaved(&self) -> Vec<GpuVertex> {
        self.faces
            .iter()
            .flat_map(|face| face.indices)
            .filter_map(|index| self.vertices.get(index))
            .map(GpuVertex::from)
            .collect()
    }
}
