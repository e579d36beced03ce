//! Crate drop demo
//!
//! Runs the engine headless for a few simulated seconds: two crates fall
//! onto a floor and a player collects a coin through a collision handler.
//!
//! Usage: `crate_drop [config.toml|config.ron]`

use std::cell::Cell;
use std::rc::Rc;

use vector_engine::foundation::logging;
use vector_engine::prelude::*;

const SECONDS: u32 = 3;

/// Moves the player right at a fixed speed
struct Walker {
    speed: f32,
}

impl Script for Walker {
    fn update(&mut self, ctx: &mut ScriptContext<'_>, delta_time: f32) {
        if let Some(transform) = ctx
            .entity_mut()
            .and_then(|entity| entity.get_component_mut::<TransformComponent>())
        {
            transform.translate(Vec3::new(self.speed * delta_time, 0.0, 0.0));
        }
    }
}

fn falling_crate(name: &str, x: f32, height: f32) -> Entity {
    Entity::new(name)
        .with_component(TransformComponent::from_position(Vec3::new(x, height, 0.0)))
        .with_component(RigidbodyComponent::new())
        .with_component(ColliderComponent::new(CollisionShape::aabb(Vec3::new(0.5, 0.5, 0.5))))
}

fn build_scene(scene: &mut Scene, collected: &Rc<Cell<u32>>) {
    scene.instantiate(
        Entity::new("floor")
            .with_component(TransformComponent::identity())
            .with_component(
                ColliderComponent::new(CollisionShape::aabb(Vec3::new(20.0, 0.5, 20.0)))
                    .with_layers(CollisionLayers::ENVIRONMENT, CollisionLayers::ALL),
            ),
    );
    scene.instantiate(falling_crate("crate_a", -2.0, 4.0));
    scene.instantiate(falling_crate("crate_b", 2.0, 8.0));

    let counter = Rc::clone(collected);
    let player_collider = ColliderComponent::new(CollisionShape::sphere(0.5))
        .with_layers(CollisionLayers::PLAYER, CollisionLayers::PICKUP)
        .with_handler(
            |other| other.name() == "coin",
            move |ctx| {
                counter.set(counter.get() + 1);
                if let Err(e) = ctx.destroy_other() {
                    log::warn!("Coin already gone: {e}");
                }
            },
        );
    scene.instantiate(
        Entity::new("player")
            .with_component(TransformComponent::from_position(Vec3::new(-6.0, 2.5, 0.0)))
            .with_component(player_collider)
            .with_script(Walker { speed: 3.0 }),
    );

    scene.instantiate(
        Entity::new("coin")
            .with_component(TransformComponent::from_position(Vec3::new(-3.0, 2.5, 0.0)))
            .with_component(
                ColliderComponent::new(CollisionShape::sphere(0.25))
                    .with_layers(CollisionLayers::PICKUP, CollisionLayers::PLAYER),
            ),
    );
}

fn report(engine: &Engine) {
    for (_, entity) in engine.scene().live_entities() {
        if let Some(transform) = entity.get_component::<TransformComponent>() {
            let p = transform.position;
            log::info!("{:>8}: ({:6.2}, {:6.2}, {:6.2})", entity.name(), p.x, p.y, p.z);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    logging::init_with_level(logging::parse_level(&config.logging.level));

    log::info!("Starting crate drop demo");

    let mut engine = Engine::new(config)?;
    let collected = Rc::new(Cell::new(0));
    build_scene(engine.scene_mut(), &collected);

    let step = engine.config().physics.fixed_timestep;
    let mut steps = 0;
    while (steps as f32) * step < SECONDS as f32 {
        steps += engine.advance(step);
        if steps % 60 == 0 {
            log::info!("t = {:.2}s", steps as f32 * step);
            report(&engine);
        }
    }

    log::info!(
        "Finished after {} steps; coins collected: {}",
        engine.frame_count(),
        collected.get()
    );
    Ok(())
}
