//! Collider component
//!
//! Marks an entity as taking part in collision detection and carries the
//! custom responses that replace the default revert resolution.

use crate::ecs::{Component, ComponentTag, Entity};
use crate::physics::{CollisionContext, CollisionLayers, CollisionShape};

/// Predicate over the other participant of a collision
pub type EntityPredicate = Box<dyn Fn(&Entity) -> bool>;

/// Response run when its predicate matches
pub type CollisionResponse = Box<dyn FnMut(&mut CollisionContext<'_>)>;

/// A predicate/response pair registered on a collider
pub struct CollisionHandler {
    predicate: EntityPredicate,
    response: CollisionResponse,
}

impl CollisionHandler {
    /// Pair a predicate with its response
    pub fn new(
        predicate: impl Fn(&Entity) -> bool + 'static,
        response: impl FnMut(&mut CollisionContext<'_>) + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            response: Box::new(response),
        }
    }

    /// Test the predicate against the other participant
    pub fn matches(&self, other: &Entity) -> bool {
        (self.predicate)(other)
    }

    /// Run the response
    pub fn respond(&mut self, ctx: &mut CollisionContext<'_>) {
        (self.response)(ctx);
    }
}

/// Collision participation and custom responses
pub struct ColliderComponent {
    /// Model-space shape
    pub shape: CollisionShape,

    /// Layers this collider lives on
    pub layer: CollisionLayers,

    /// Layers this collider collides with
    pub mask: CollisionLayers,

    handlers: Vec<CollisionHandler>,
}

impl Component for ColliderComponent {
    fn tag(&self) -> ComponentTag {
        Self::TAG
    }
}

impl ColliderComponent {
    /// Component tag
    pub const TAG: ComponentTag = ComponentTag::new("Collider");

    /// Create a collider on all layers, colliding with everything
    pub fn new(shape: CollisionShape) -> Self {
        Self {
            shape,
            layer: CollisionLayers::ALL,
            mask: CollisionLayers::ALL,
            handlers: Vec::new(),
        }
    }

    /// Builder pattern: set layer and mask
    #[must_use]
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Register a custom response for collisions with entities matching
    /// `predicate`
    ///
    /// Handlers are tested in registration order. Any match suppresses the
    /// default revert for this collider's entity.
    pub fn on_collision(
        &mut self,
        predicate: impl Fn(&Entity) -> bool + 'static,
        response: impl FnMut(&mut CollisionContext<'_>) + 'static,
    ) -> &mut Self {
        self.handlers.push(CollisionHandler::new(predicate, response));
        self
    }

    /// Builder pattern: register a custom response
    #[must_use]
    pub fn with_handler(
        mut self,
        predicate: impl Fn(&Entity) -> bool + 'static,
        response: impl FnMut(&mut CollisionContext<'_>) + 'static,
    ) -> Self {
        self.on_collision(predicate, response);
        self
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Remove all handlers
    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    pub(crate) fn take_handlers(&mut self) -> Vec<CollisionHandler> {
        std::mem::take(&mut self.handlers)
    }

    /// Put handlers back after resolution; handlers registered while they
    /// were out keep their place after the originals
    pub(crate) fn restore_handlers(&mut self, mut handlers: Vec<CollisionHandler>) {
        handlers.append(&mut self.handlers);
        self.handlers = handlers;
    }
}

impl std::fmt::Debug for ColliderComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColliderComponent")
            .field("shape", &self.shape)
            .field("layer", &self.layer)
            .field("mask", &self.mask)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_defaults_collide_with_everything() {
        let collider = ColliderComponent::new(CollisionShape::sphere(1.0));
        assert_eq!(collider.layer, CollisionLayers::ALL);
        assert_eq!(collider.mask, CollisionLayers::ALL);
        assert_eq!(collider.handler_count(), 0);
    }

    #[test]
    fn test_handler_predicate() {
        let handler = CollisionHandler::new(|other| other.name() == "coin", |_| {});
        assert!(handler.matches(&Entity::new("coin")));
        assert!(!handler.matches(&Entity::new("rock")));
    }

    #[test]
    fn test_restore_keeps_order() {
        let mut collider = ColliderComponent::new(CollisionShape::aabb(Vec3::new(1.0, 1.0, 1.0)))
            .with_handler(|other| other.name() == "first", |_| {});
        let taken = collider.take_handlers();
        assert_eq!(collider.handler_count(), 0);

        collider.on_collision(|other| other.name() == "second", |_| {});
        collider.restore_handlers(taken);

        assert_eq!(collider.handler_count(), 2);
        assert!(collider.handlers[0].matches(&Entity::new("first")));
        assert!(collider.handlers[1].matches(&Entity::new("second")));
    }
}
