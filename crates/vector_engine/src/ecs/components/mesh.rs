//! Mesh component

use std::rc::Rc;

use crate::assets::{BufferHandle, GpuVertex, Mesh};
use crate::ecs::{Component, ComponentTag};

/// Geometry drawn for an entity
///
/// Holds a shared reference to a cached [`Mesh`]. The interleaved vertex
/// stream is built when the component is attached.
#[derive(Debug, Clone)]
pub struct MeshComponent {
    mesh: Rc<Mesh>,
    vertices: Vec<GpuVertex>,
}

impl Component for MeshComponent {
    fn tag(&self) -> ComponentTag {
        Self::TAG
    }

    fn initialize(&mut self) {
        self.vertices = self.mesh.interleaved();
        if self.mesh.vertex_buffer().is_none() && !self.mesh.is_empty() {
            log::debug!(
                "Mesh with {} faces has no GPU buffer yet",
                self.mesh.faces().len()
            );
        }
    }

    fn teardown(&mut self) {
        self.vertices.clear();
    }
}

impl MeshComponent {
    /// Component tag
    pub const TAG: ComponentTag = ComponentTag::new("Mesh");

    /// Wrap a shared mesh
    pub fn new(mesh: Rc<Mesh>) -> Self {
        Self {
            mesh,
            vertices: Vec::new(),
        }
    }

    /// The shared mesh
    pub fn mesh(&self) -> &Rc<Mesh> {
        &self.mesh
    }

    /// GPU vertex buffer handle, if the mesh was uploaded
    pub fn vertex_buffer(&self) -> Option<BufferHandle> {
        self.mesh.vertex_buffer()
    }

    /// Interleaved vertex stream (empty until attached)
    pub fn vertices(&self) -> &[GpuVertex] {
        &self.vertices
    }

    /// Number of vertices submitted per draw
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MeshLoader;
    use crate::ecs::Entity;

    #[test]
    fn test_initialize_builds_vertex_stream() {
        let mesh = MeshLoader::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        let component = MeshComponent::new(Rc::new(mesh));
        assert!(component.vertices().is_empty());

        let entity = Entity::new("tri").with_component(component);
        let attached = entity.get_component::<MeshComponent>().unwrap();
        assert_eq!(attached.vertices().len(), 3);
        assert_eq!(attached.vertex_count(), 3);
        assert!(attached.vertex_buffer().is_none());
    }
}
