//! Shader programs and their interface names

use crate::assets::{GpuVertex, ResourceSystem};

/// The shader programs the engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Lit world geometry
    Standard,
    /// Screen-space interface quads
    Gui,
    /// Background cube
    Skybox,
}

impl ShaderKind {
    /// Every kind, in table order
    pub const ALL: [Self; 3] = [Self::Standard, Self::Gui, Self::Skybox];

    /// File stem of the `.vs` / `.fs` pair under `shaders/`
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Gui => "gui",
            Self::Skybox => "skybox",
        }
    }

    /// Uniform names the program expects
    pub fn uniforms(self) -> &'static [&'static str] {
        match self {
            Self::Standard => &["u_model", "u_view", "u_projection", "u_colour", "u_texture"],
            Self::Gui => &["u_model", "u_colour", "u_texture"],
            Self::Skybox => &["u_view", "u_projection", "u_cubemap"],
        }
    }

    /// Vertex attribute names, in [`GpuVertex`] field order
    pub fn attributes(self) -> &'static [&'static str] {
        match self {
            Self::Standard | Self::Gui => &["a_position", "a_texture_xy"],
            Self::Skybox => &["a_position"],
        }
    }
}

/// Source and interface of one shader program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgram {
    kind: ShaderKind,
    vertex_source: String,
    fragment_source: String,
}

impl ShaderProgram {
    /// Load `<stem>.vs` and `<stem>.fs` through the resource system
    pub fn load(kind: ShaderKind, resources: &mut ResourceSystem) -> Self {
        let stem = kind.file_stem();
        Self {
            kind,
            vertex_source: resources.load_shader(&format!("{stem}.vs")),
            fragment_source: resources.load_shader(&format!("{stem}.fs")),
        }
    }

    /// Program kind
    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    /// Vertex stage source
    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    /// Fragment stage source
    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    /// Uniform names
    pub fn uniforms(&self) -> &'static [&'static str] {
        self.kind.uniforms()
    }

    /// Attribute names
    pub fn attributes(&self) -> &'static [&'static str] {
        self.kind.attributes()
    }

    /// Byte stride between vertices
    pub fn vertex_stride(&self) -> usize {
        GpuVertex::STRIDE
    }

    /// Byte offset of each attribute within a vertex
    pub fn attribute_offsets(&self) -> Vec<(&'static str, usize)> {
        self.attributes()
            .iter()
            .map(|&name| match name {
                "a_texture_xy" => (name, GpuVertex::TEX_COORD_OFFSET),
                _ => (name, 0),
            })
            .collect()
    }

    /// True if both stages have source text
    pub fn is_complete(&self) -> bool {
        !self.vertex_source.is_empty() && !self.fragment_source.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gui_interface() {
        assert_eq!(ShaderKind::Gui.uniforms(), &["u_model", "u_colour", "u_texture"]);
        assert_eq!(ShaderKind::Gui.attributes(), &["a_position", "a_texture_xy"]);
        assert_eq!(ShaderKind::Gui.file_stem(), "gui");
    }

    #[test]
    fn test_attribute_offsets_match_vertex_layout() {
        let program = ShaderProgram {
            kind: ShaderKind::Gui,
            vertex_source: String::new(),
            fragment_source: String::new(),
        };
        assert_eq!(program.vertex_stride(), 20);
        assert_eq!(program.attribute_offsets(), vec![("a_position", 0), ("a_texture_xy", 12)]);
        assert!(!program.is_complete());
    }
}
