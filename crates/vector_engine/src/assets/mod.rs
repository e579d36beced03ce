//! Asset loading: shaders, textures, meshes and sounds
//!
//! [`ResourceSystem`] is the single entry point. It caches every asset by
//! path and never fails a load outright; missing or broken files are logged
//! and replaced by a fallback.

pub mod mesh;
pub mod mesh_loader;
pub mod texture;
pub mod render_thread;
pub mod resource_system;

pub use mesh::{Vertex, Face, GpuVertex, Mesh};
pub use mesh_loader::{MeshLoader, MeshError};
pub use texture::{Texture, TextureHandle, DecodedImage};
pub use render_thread::{
    RenderThread,
    Completion,
    GpuDevice,
    GpuError,
    HeadlessDevice,
    BufferHandle,
};
pub use resource_system::ResourceSystem;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image bytes could not be decoded
    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// Mesh text could not be parsed
    #[error("Mesh parse error: {0}")]
    Mesh(#[from] MeshError),

    /// GPU upload failed
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}
