//! Rigidbody component

use crate::ecs::{Component, ComponentTag};

/// Vertical velocity and gravity flag
///
/// `velocity` is a scalar along the down axis: positive means falling.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidbodyComponent {
    /// Downward speed accumulated by gravity
    pub velocity: f32,

    /// Whether gravity integrates into this body
    pub gravity_applied: bool,
}

impl Component for RigidbodyComponent {
    fn tag(&self) -> ComponentTag {
        Self::TAG
    }
}

impl Default for RigidbodyComponent {
    fn default() -> Self {
        Self {
            velocity: 0.0,
            gravity_applied: true,
        }
    }
}

impl RigidbodyComponent {
    /// Component tag
    pub const TAG: ComponentTag = ComponentTag::new("Rigidbody");

    /// Body at rest with gravity enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: enable or disable gravity
    #[must_use]
    pub fn with_gravity(mut self, gravity_applied: bool) -> Self {
        self.gravity_applied = gravity_applied;
        self
    }

    /// Builder pattern: set the starting velocity
    #[must_use]
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Current downward velocity
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Overwrite the velocity
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Whether gravity is applied
    pub fn is_gravity_applied(&self) -> bool {
        self.gravity_applied
    }

    /// Enable or disable gravity
    pub fn set_gravity_applied(&mut self, gravity_applied: bool) {
        self.gravity_applied = gravity_applied;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let body = RigidbodyComponent::new();
        assert_eq!(body.velocity(), 0.0);
        assert!(body.is_gravity_applied());
    }

    #[test]
    fn test_builders() {
        let body = RigidbodyComponent::new().with_gravity(false).with_velocity(3.0);
        assert!(!body.is_gravity_applied());
        assert_eq!(body.velocity(), 3.0);
    }
}
