//! Renderer component

use crate::ecs::{Component, ComponentTag};
use crate::render::ShaderKind;

/// Marks an entity as drawable with a given shader
///
/// Deactivating the renderer hides the entity from the draw list without
/// touching the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererComponent {
    active: bool,
    shader: ShaderKind,
}

impl Component for RendererComponent {
    fn tag(&self) -> ComponentTag {
        Self::TAG
    }
}

impl Default for RendererComponent {
    fn default() -> Self {
        Self::new(ShaderKind::Standard)
    }
}

impl RendererComponent {
    /// Component tag
    pub const TAG: ComponentTag = ComponentTag::new("Renderer");

    /// Active renderer using `shader`
    pub fn new(shader: ShaderKind) -> Self {
        Self { active: true, shader }
    }

    /// Whether the entity is drawn
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Show or hide the entity
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Shader used to draw the entity
    pub fn shader(&self) -> ShaderKind {
        self.shader
    }
}
