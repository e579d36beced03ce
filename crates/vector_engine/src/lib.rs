//! # Vector Engine
//!
//! A small component-based game engine built around a fixed-step physics
//! loop and a scene graph whose structural changes are deferred to a safe
//! point in every frame.
//!
//! ## Features
//!
//! - **Entity/Component Model**: named entities owning typed components,
//!   looked up by type with first-match-wins semantics
//! - **Deferred Scene Mutation**: `instantiate`/`destroy` go through a
//!   per-frame command buffer flushed after all traversal phases
//! - **Physics Resolution Loop**: gravity integration, custom per-pair
//!   collision handlers and revert-to-last-position resolution
//! - **Asset Loading**: shaders, textures, line-format meshes and sounds
//!   with graceful fallbacks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vector_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!
//!     let mut crate_box = Entity::new("crate");
//!     crate_box.add_component(TransformComponent::from_position(Vec3::new(0.0, 10.0, 0.0)));
//!     crate_box.add_component(RigidbodyComponent::new());
//!     crate_box.add_component(ColliderComponent::new(CollisionShape::aabb(Vec3::new(0.5, 0.5, 0.5))));
//!     engine.scene_mut().instantiate(crate_box);
//!
//!     for _ in 0..60 {
//!         engine.step(1.0 / 60.0);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod scene;
pub mod physics;
pub mod assets;
pub mod audio;
pub mod render;

mod engine;

pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineError,
        foundation::{
            math::{Vec2, Vec3, Vec4, Mat4, Quat},
            time::{Timer, FixedTimestep},
        },
        ecs::{
            Entity, EntityId, Component, ComponentTag, Script, ScriptContext,
            components::{
                TransformComponent, RigidbodyComponent, ColliderComponent,
                MeshComponent, MaterialComponent, RendererComponent, Colour,
            },
        },
        scene::{Scene, SceneError},
        physics::{
            Collision, CollisionShape, CollisionLayers, CollisionContext,
            CollisionDetector, PhysicsSystem,
        },
        assets::{ResourceSystem, Mesh, Texture},
        render::{RenderingContext, ShaderKind, DrawList, DrawCall},
        core::config::{EngineConfig, PhysicsConfig, AssetConfig, LoggingConfig},
        config::{Config, ConfigError},
    };
}
