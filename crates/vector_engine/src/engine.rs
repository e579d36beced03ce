//! Frame driver
//!
//! One fixed step runs, in order:
//!
//! 1. script `update` for active live entities
//! 2. physics gather (collider positions)
//! 3. collision detection, each pair offered to the physics queue
//! 4. gravity integration and collision resolution
//! 5. scene flush (deferred instantiate / destroy, `start` calls)
//! 6. draw list rebuild

use std::path::Path;

use thiserror::Error;

use crate::assets::{RenderThread, ResourceSystem};
use crate::audio::NullAudioBackend;
use crate::config::{Config, ConfigError};
use crate::core::config::EngineConfig;
use crate::foundation::time::{FixedTimestep, Timer};
use crate::physics::{CollisionDetector, PhysicsSystem};
use crate::render::{DrawList, RenderingContext};
use crate::scene::Scene;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A subsystem failed to start
    #[error("Initialization failed: {0}")]
    Initialization(String),
}

/// Owns the scene and every system, and runs frames
pub struct Engine {
    config: EngineConfig,
    scene: Scene,
    physics: PhysicsSystem,
    detector: CollisionDetector,
    resources: ResourceSystem,
    rendering: RenderingContext,
    draw_list: DrawList,
    timestep: FixedTimestep,
    timer: Timer,
    frame: u64,
}

impl Engine {
    /// Create an engine with a headless render thread and silent audio
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let render_thread = RenderThread::headless()
            .map_err(|e| EngineError::Initialization(format!("Render thread: {e}")))?;
        let resources = ResourceSystem::new(
            config.assets.clone(),
            Some(render_thread),
            Box::new(NullAudioBackend::new()),
        );
        Self::with_resources(config, resources)
    }

    /// Create an engine around a prepared resource system
    pub fn with_resources(config: EngineConfig, mut resources: ResourceSystem) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        let rendering = RenderingContext::new(&mut resources);
        let physics = PhysicsSystem::from_config(&config.physics);
        let timestep = FixedTimestep::new(config.physics.fixed_timestep, config.physics.max_steps_per_frame);

        log::info!(
            "Engine ready: g = {:.3}, step = {:.4}s",
            physics.g(),
            timestep.step()
        );

        Ok(Self {
            config,
            scene: Scene::new("main"),
            physics,
            detector: CollisionDetector::new(),
            resources,
            rendering,
            draw_list: DrawList::new(),
            timestep,
            timer: Timer::new(),
            frame: 0,
        })
    }

    /// Load a TOML or RON config file and create an engine from it
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let config = EngineConfig::load_from_file(path)?;
        Self::new(config)
    }

    /// Run one simulation step of `delta_time` seconds
    pub fn step(&mut self, delta_time: f32) {
        self.scene.update_scripts(delta_time);

        self.physics.gather_information(&self.scene);
        for collision in self.detector.detect(&self.scene) {
            self.physics.queue_collision(collision);
        }
        self.physics.simulate_physics(&mut self.scene, delta_time);

        self.scene.flush();
        self.draw_list.rebuild(&self.scene, &self.rendering);
        self.frame += 1;
    }

    /// Feed wall-clock time and run the fixed steps it covers
    ///
    /// Returns the number of steps run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let steps = self.timestep.accumulate(elapsed);
        let step = self.timestep.step();
        for _ in 0..steps {
            self.step(step);
        }
        steps
    }

    /// Measure time since the last call and advance by it
    pub fn tick(&mut self) -> u32 {
        self.timer.update();
        self.advance(self.timer.delta_time())
    }

    /// Steps run so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, for instantiate and destroy
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Physics system
    pub fn physics(&self) -> &PhysicsSystem {
        &self.physics
    }

    /// Physics system, for changing gravity at runtime
    pub fn physics_mut(&mut self) -> &mut PhysicsSystem {
        &mut self.physics
    }

    /// Collision detector
    pub fn detector(&self) -> &CollisionDetector {
        &self.detector
    }

    /// Asset loader
    pub fn resources_mut(&mut self) -> &mut ResourceSystem {
        &mut self.resources
    }

    /// Shader table
    pub fn rendering(&self) -> &RenderingContext {
        &self.rendering
    }

    /// Draw calls from the last step
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{RigidbodyComponent, TransformComponent};
    use crate::ecs::Entity;
    use approx::assert_relative_eq;

    fn engine() -> Engine {
        let config = EngineConfig::default().with_asset_root(std::env::temp_dir().join("vector_engine_engine_tests"));
        Engine::new(config).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig::default().with_gravity_scale(f32::NAN);
        assert!(matches!(Engine::new(config), Err(EngineError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_advance_runs_fixed_steps() {
        let mut engine = engine();
        let id = engine.scene_mut().instantiate(
            Entity::new("faller")
                .with_component(TransformComponent::identity())
                .with_component(RigidbodyComponent::new()),
        );

        // 5 steps fit in 0.09s at 60 Hz
        assert_eq!(engine.advance(0.09), 5);
        assert_eq!(engine.frame_count(), 5);

        // First step only flushes the entity in
        let velocity = engine
            .scene()
            .entity(id)
            .and_then(|entity| entity.get_component::<RigidbodyComponent>())
            .map(RigidbodyComponent::velocity)
            .unwrap();
        assert_relative_eq!(velocity, 4.0 * 9.81 / 60.0, epsilon = 1e-4);
    }

    #[test]
    fn test_step_caps_per_frame() {
        let mut engine = engine();
        assert_eq!(engine.advance(1.0), 5);
        assert!(engine.timestep.accumulated() < engine.timestep.step());
    }
}
