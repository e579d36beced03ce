//! Physics module: collision detection and the resolution loop
//!
//! Per frame the driver calls, in order:
//! 1. [`PhysicsSystem::gather_information`] - snapshot collider positions
//! 2. [`CollisionDetector::detect`] feeding [`PhysicsSystem::queue_collision`]
//! 3. [`PhysicsSystem::simulate_physics`] - integrate gravity, then
//!    resolve every queued collision

pub mod collision;
pub mod collision_system;
pub mod physics_system;

pub use collision::{
    Collision,
    CollisionShape,
    CollisionLayers,
    WorldShape,
};
pub use collision_system::{CollisionDetector, DetectionStats};
pub use physics_system::{PhysicsSystem, CollisionContext, STANDARD_G};
