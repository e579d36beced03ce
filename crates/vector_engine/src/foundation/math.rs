//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the TRS transform used by the scene.

use nalgebra::{Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector (texture coordinates)
pub type Vec2 = Vector2<f32>;
/// 3D vector (positions, extents, scale)
pub type Vec3 = Vector3<f32>;
/// 4D vector (normalized colours)
pub type Vec4 = Vector4<f32>;
/// Column-major 4x4 matrix
pub type Mat4 = Matrix4<f32>;
/// Unit quaternion rotation
pub type Quat = Unit<Quaternion<f32>>;

/// Engine-wide axis conventions (Y-up, right-handed)
pub mod axes {
    use super::Vec3;

    /// World up direction
    pub fn up() -> Vec3 {
        Vec3::y()
    }

    /// World down direction, the direction gravity pulls
    pub fn down() -> Vec3 {
        -Vec3::y()
    }
}

/// Position, rotation and scale, applied as scale, then rotation, then
/// translation
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Translation
    pub position: Vec3,
    /// Rotation
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// No translation, rotation or scaling
    pub fn identity() -> Self {
        Self::default()
    }

    /// Model matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Map a model-space point to world space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point.component_mul(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_matrix() {
        assert_relative_eq!(Transform::identity().to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_trs_order() {
        let transform = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };

        // Scale first, then rotate +X onto -Z, then translate
        let moved = transform.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved, Vec3::new(1.0, 0.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_axes() {
        assert_eq!(axes::up(), -axes::down());
        assert_eq!(axes::down(), Vec3::new(0.0, -1.0, 0.0));
    }
}
