//! Gravity integration and collision resolution
//!
//! The resolution loop works on positions captured once per frame. A
//! collision is resolved by running the custom handlers registered on each
//! participant's collider; a participant whose handlers did not match is
//! moved back to its captured position.

use std::collections::{HashMap, VecDeque};

use crate::core::config::PhysicsConfig;
use crate::ecs::components::{ColliderComponent, RigidbodyComponent, TransformComponent};
use crate::ecs::{Entity, EntityId};
use crate::foundation::math::{axes, Vec3};
use crate::physics::collision::Collision;
use crate::scene::{Scene, SceneError};

/// Standard gravitational acceleration
pub const STANDARD_G: f32 = 9.81;

/// What a collision response can see and change
///
/// `this` is the entity whose collider owns the running handler, `other`
/// the entity its predicate matched.
pub struct CollisionContext<'a> {
    scene: &'a mut Scene,
    this: EntityId,
    other: EntityId,
}

impl<'a> CollisionContext<'a> {
    pub(crate) fn new(scene: &'a mut Scene, this: EntityId, other: EntityId) -> Self {
        Self { scene, this, other }
    }

    /// Entity owning the handler
    pub fn this(&self) -> EntityId {
        self.this
    }

    /// Entity the handler matched
    pub fn other(&self) -> EntityId {
        self.other
    }

    /// Read access to the owning entity
    pub fn this_entity(&self) -> Option<&Entity> {
        self.scene.entity(self.this)
    }

    /// Read access to the matched entity
    pub fn other_entity(&self) -> Option<&Entity> {
        self.scene.entity(self.other)
    }

    /// Mutable access to the owning entity
    pub fn this_entity_mut(&mut self) -> Option<&mut Entity> {
        self.scene.entity_mut(self.this)
    }

    /// Mutable access to the matched entity
    pub fn other_entity_mut(&mut self) -> Option<&mut Entity> {
        self.scene.entity_mut(self.other)
    }

    /// The scene
    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// The scene, for deferred instantiate and destroy
    pub fn scene_mut(&mut self) -> &mut Scene {
        self.scene
    }

    /// Destroy the matched entity at the next flush
    pub fn destroy_other(&mut self) -> Result<(), SceneError> {
        self.scene.destroy(self.other)
    }

    /// Destroy the owning entity at the next flush
    pub fn destroy_this(&mut self) -> Result<(), SceneError> {
        self.scene.destroy(self.this)
    }
}

/// Frame physics: gather, integrate, resolve
#[derive(Debug)]
pub struct PhysicsSystem {
    gravity_scale_factor: f32,
    short_circuit_handlers: bool,
    prev_positions: HashMap<EntityId, Vec3>,
    collisions: VecDeque<Collision>,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsSystem {
    /// Standard gravity, all matching handlers fire
    pub fn new() -> Self {
        Self {
            gravity_scale_factor: 1.0,
            short_circuit_handlers: false,
            prev_positions: HashMap::new(),
            collisions: VecDeque::new(),
        }
    }

    /// Create from the physics section of the engine config
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            gravity_scale_factor: config.gravity_scale_factor,
            short_circuit_handlers: config.short_circuit_handlers,
            ..Self::new()
        }
    }

    /// Effective gravitational acceleration
    pub fn g(&self) -> f32 {
        STANDARD_G * self.gravity_scale_factor
    }

    /// Gravity multiplier
    pub fn gravity_scale_factor(&self) -> f32 {
        self.gravity_scale_factor
    }

    /// Change the gravity multiplier
    pub fn set_gravity_scale_factor(&mut self, factor: f32) {
        self.gravity_scale_factor = factor;
    }

    /// Whether handler iteration stops at the first match
    pub fn short_circuit_handlers(&self) -> bool {
        self.short_circuit_handlers
    }

    /// Stop handler iteration at the first match
    pub fn set_short_circuit_handlers(&mut self, enabled: bool) {
        self.short_circuit_handlers = enabled;
    }

    /// Capture positions of active colliders for this frame
    ///
    /// Positions from earlier frames are discarded first, so only entities
    /// seen by this gather can have collisions queued.
    pub fn gather_information(&mut self, scene: &Scene) {
        self.prev_positions.clear();
        for (id, entity) in scene.active_entities() {
            if !entity.has_component::<ColliderComponent>() {
                continue;
            }
            match entity.get_component::<TransformComponent>() {
                Some(transform) => {
                    self.prev_positions.insert(id, transform.position);
                }
                None => log::warn!("Collider on '{}' has no transform, skipping", entity.name()),
            }
        }
    }

    /// Queue a collision for resolution
    ///
    /// Returns `false` and drops the collision unless both participants
    /// were captured by the current gather.
    pub fn queue_collision(&mut self, collision: Collision) -> bool {
        let known = self.prev_positions.contains_key(&collision.entity_a())
            && self.prev_positions.contains_key(&collision.entity_b());
        if known {
            self.collisions.push_back(collision);
        } else {
            log::trace!("Dropping collision {collision:?}: participant not gathered this frame");
        }
        known
    }

    /// Integrate gravity, then resolve every queued collision
    ///
    /// The queue is always empty afterwards.
    pub fn simulate_physics(&mut self, scene: &mut Scene, delta_time: f32) {
        self.integrate(scene, delta_time);

        while let Some(collision) = self.collisions.pop_front() {
            self.resolve(scene, collision);
        }
    }

    /// Captured position for this frame
    pub fn prev_position(&self, id: EntityId) -> Option<Vec3> {
        self.prev_positions.get(&id).copied()
    }

    /// Collisions waiting for resolution, in queue order
    pub fn queued_collisions(&self) -> impl Iterator<Item = &Collision> {
        self.collisions.iter()
    }

    /// Number of collisions waiting for resolution
    pub fn queued_count(&self) -> usize {
        self.collisions.len()
    }

    fn integrate(&self, scene: &mut Scene, delta_time: f32) {
        let g = self.g();
        for id in scene.active_ids() {
            let Some(entity) = scene.entity_mut(id) else {
                continue;
            };
            if !entity.has_component::<TransformComponent>() {
                if entity.has_component::<RigidbodyComponent>() {
                    log::warn!("Rigidbody on '{}' has no transform, skipping", entity.name());
                }
                continue;
            }

            let velocity = match entity.get_component_mut::<RigidbodyComponent>() {
                Some(body) if body.gravity_applied => {
                    body.velocity += g * delta_time;
                    body.velocity
                }
                _ => continue,
            };

            if let Some(transform) = entity.get_component_mut::<TransformComponent>() {
                transform.translate(axes::down() * velocity);
            }
        }
    }

    fn resolve(&self, scene: &mut Scene, collision: Collision) {
        let (a, b) = (collision.entity_a(), collision.entity_b());
        let skip_a = self.run_handlers(scene, a, b);
        let skip_b = self.run_handlers(scene, b, a);

        if !skip_a {
            self.revert(scene, a);
        }
        if !skip_b {
            self.revert(scene, b);
        }
    }

    /// Run `this` collider's handlers against `other`; true if any matched
    fn run_handlers(&self, scene: &mut Scene, this: EntityId, other: EntityId) -> bool {
        let Some(mut handlers) = scene
            .entity_mut(this)
            .and_then(|entity| entity.get_component_mut::<ColliderComponent>())
            .map(ColliderComponent::take_handlers)
        else {
            log::warn!("Queued collision participant {this:?} lost its collider");
            return false;
        };

        let mut matched = false;
        for handler in &mut handlers {
            let hit = scene.entity(other).is_some_and(|entity| handler.matches(entity));
            if !hit {
                continue;
            }
            handler.respond(&mut CollisionContext::new(scene, this, other));
            matched = true;
            if self.short_circuit_handlers {
                break;
            }
        }

        if let Some(collider) = scene
            .entity_mut(this)
            .and_then(|entity| entity.get_component_mut::<ColliderComponent>())
        {
            collider.restore_handlers(handlers);
        }
        matched
    }

    fn revert(&self, scene: &mut Scene, id: EntityId) {
        let Some(&previous) = self.prev_positions.get(&id) else {
            return;
        };
        if let Some(transform) = scene
            .entity_mut(id)
            .and_then(|entity| entity.get_component_mut::<TransformComponent>())
        {
            log::trace!("Reverting {id:?} to {previous:?}");
            transform.position = previous;
        }
    }
}
