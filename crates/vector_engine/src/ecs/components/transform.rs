//! Transform component
//!
//! Pure data: world-space position, rotation and scale, plus the derived
//! model matrix consumed by the renderer.

use crate::foundation::math::{Transform as MathTransform, Vec3, Mat4, Quat};
use crate::ecs::{Component, ComponentTag};

/// World-space transform (Y-up, right-handed)
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation quaternion
    pub rotation: Quat,

    /// World space scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {
    fn tag(&self) -> ComponentTag {
        Self::TAG
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Component tag
    pub const TAG: ComponentTag = ComponentTag::new("Transform");

    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Overwrite the position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Move by `delta` in world space
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Convert to foundation math Transform for calculations
    pub fn to_math_transform(&self) -> MathTransform {
        MathTransform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Model matrix (TRS order)
    pub fn model_matrix(&self) -> Mat4 {
        self.to_math_transform().to_matrix()
    }

    /// Builder pattern: Set rotation from quaternion
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set rotation from Euler angles (radians, XYZ order)
    #[must_use]
    pub fn with_rotation_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler_angles(x, y, z);
        self
    }

    /// Builder pattern: Set scale (uniform)
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_transform_identity() {
        let transform = TransformComponent::identity();

        assert_eq!(transform.position, Vec3::zeros());
        assert_relative_eq!(transform.rotation, Quat::identity(), epsilon = EPSILON);
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_translate_accumulates() {
        let mut transform = TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0));
        transform.translate(Vec3::new(0.0, -0.5, 0.0));
        transform.translate(Vec3::new(0.0, -0.5, 0.0));

        assert_relative_eq!(transform.position(), Vec3::new(1.0, 1.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_model_matrix_translation_column() {
        let transform = TransformComponent::from_position(Vec3::new(4.0, 5.0, 6.0))
            .with_uniform_scale(2.0);
        let matrix = transform.model_matrix();

        assert_relative_eq!(matrix[(0, 3)], 4.0);
        assert_relative_eq!(matrix[(1, 3)], 5.0);
        assert_relative_eq!(matrix[(2, 3)], 6.0);
        assert_relative_eq!(matrix[(0, 0)], 2.0);
    }
}
