//! Per-frame draw calls
//!
//! A draw call is produced for every active live entity whose renderer is
//! active and that carries a transform, a mesh and a material. Entities
//! destroyed this frame have their renderer switched off immediately, so
//! they drop out of the next list even though the scene still holds them.

use crate::assets::{BufferHandle, TextureHandle};
use crate::ecs::components::{MaterialComponent, MeshComponent, RendererComponent, TransformComponent};
use crate::ecs::{Entity, EntityId};
use crate::foundation::math::{Mat4, Vec4};
use crate::render::context::RenderingContext;
use crate::render::shader::ShaderKind;
use crate::scene::Scene;

/// Everything a renderer needs for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Source entity
    pub entity: EntityId,
    /// Program to draw with
    pub shader: ShaderKind,
    /// Model matrix
    pub model: Mat4,
    /// Colour in 0..1
    pub colour: Vec4,
    /// Bound texture
    pub texture: Option<TextureHandle>,
    /// Vertex buffer
    pub vertex_buffer: Option<BufferHandle>,
    /// Vertices to draw
    pub vertex_count: usize,
}

/// Draw calls for one frame, in live-list order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the list for the current scene state
    pub fn collect(scene: &Scene, context: &RenderingContext) -> Self {
        let mut list = Self::new();
        list.rebuild(scene, context);
        list
    }

    /// Replace the calls with the current scene state
    pub fn rebuild(&mut self, scene: &Scene, context: &RenderingContext) {
        self.calls.clear();
        for (id, entity) in scene.active_entities() {
            let Some(call) = draw_call(id, entity) else {
                continue;
            };
            if context.shader(call.shader).is_none() {
                log::warn!("No '{}' shader for '{}'", call.shader.file_stem(), entity.name());
                continue;
            }
            self.calls.push(call);
        }
    }

    /// The calls
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of calls
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// True if nothing is drawn
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

fn draw_call(id: EntityId, entity: &Entity) -> Option<DrawCall> {
    let renderer = entity.get_component::<RendererComponent>()?;
    if !renderer.is_active() {
        return None;
    }
    let transform = entity.get_component::<TransformComponent>()?;
    let mesh = entity.get_component::<MeshComponent>()?;
    let material = entity.get_component::<MaterialComponent>()?;

    Some(DrawCall {
        entity: id,
        shader: renderer.shader(),
        model: transform.model_matrix(),
        colour: material.colour().normalize(),
        texture: material.texture().handle(),
        vertex_buffer: mesh.vertex_buffer(),
        vertex_count: mesh.vertex_count(),
    })
}
