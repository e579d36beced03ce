//! Rendering collaborator surface
//!
//! The engine does not draw. It owns the shader table and produces a
//! per-frame [`DrawList`] that a platform renderer consumes.

pub mod shader;
pub mod context;
pub mod draw_list;

pub use shader::{ShaderKind, ShaderProgram};
pub use context::RenderingContext;
pub use draw_list::{DrawCall, DrawList};
