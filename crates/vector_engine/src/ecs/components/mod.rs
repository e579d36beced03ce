//! Built-in components
//!
//! Transform, Rigidbody and Collider feed the physics loop; Mesh, Material
//! and Renderer are read by the rendering collaborator.

pub mod transform;
pub mod rigidbody;
pub mod collider;
pub mod mesh;
pub mod material;
pub mod renderer;

pub use transform::TransformComponent;
pub use rigidbody::RigidbodyComponent;
pub use collider::{ColliderComponent, CollisionHandler, EntityPredicate, CollisionResponse};
pub use mesh::MeshComponent;
pub use material::{MaterialComponent, Colour};
pub use renderer::RendererComponent;
