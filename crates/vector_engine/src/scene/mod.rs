//! Scene graph and deferred mutation
//!
//! The scene owns every entity and the ordered live list. Structural
//! changes are recorded in a [`CommandBuffer`] and applied by
//! [`Scene::flush`] once the frame's traversal phases are done.

pub mod scene_graph;
pub mod command_buffer;

pub use scene_graph::{Scene, SceneId, SceneError};
pub use command_buffer::{CommandBuffer, SceneCommand};
