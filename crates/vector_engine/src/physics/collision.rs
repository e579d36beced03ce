//! Collision values, shapes and layer filtering

use bitflags::bitflags;

use crate::ecs::EntityId;
use crate::foundation::math::Vec3;

/// A detected overlap between two entities
///
/// Produced by detection, consumed once by the resolution loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Collision {
    entity_a: EntityId,
    entity_b: EntityId,
}

impl Collision {
    /// Pair two entities; order is kept as given
    pub fn new(entity_a: EntityId, entity_b: EntityId) -> Self {
        Self { entity_a, entity_b }
    }

    /// First participant
    pub fn entity_a(&self) -> EntityId {
        self.entity_a
    }

    /// Second participant
    pub fn entity_b(&self) -> EntityId {
        self.entity_b
    }
}

bitflags! {
    /// Collision layer bits used for filtering
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;
        /// Enemy character layer
        const ENEMY = 1 << 1;
        /// Projectiles
        const PROJECTILE = 1 << 2;
        /// Static environment geometry
        const ENVIRONMENT = 1 << 3;
        /// Pickups and collectibles
        const PICKUP = 1 << 4;
        /// All layers
        const ALL = u32::MAX;
    }
}

impl CollisionLayers {
    /// Two colliders interact only if each one's mask accepts the other's layer
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        mask_a.intersects(layer_b) && mask_b.intersects(layer_a)
    }
}

/// Collision shape in model space
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    /// Axis-aligned box given by half extents, scaled by the transform
    Aabb {
        /// Half size along each axis
        half_extents: Vec3,
    },
    /// Sphere; radius is scaled by the largest transform scale component
    Sphere {
        /// Radius
        radius: f32,
    },
}

impl CollisionShape {
    /// Axis-aligned box
    pub fn aabb(half_extents: Vec3) -> Self {
        Self::Aabb { half_extents }
    }

    /// Sphere
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Place the shape in world space
    pub fn to_world(&self, position: Vec3, scale: Vec3) -> WorldShape {
        match self {
            Self::Aabb { half_extents } => {
                // min <= max must hold for the sphere clamp
                let half = half_extents.abs().component_mul(&scale.abs());
                WorldShape::Aabb {
                    min: position - half,
                    max: position + half,
                }
            }
            Self::Sphere { radius } => WorldShape::Sphere {
                center: position,
                radius: radius.abs() * scale.abs().max(),
            },
        }
    }
}

/// Collision shape in world space, built per test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    /// World-space box
    Aabb {
        /// Minimum corner
        min: Vec3,
        /// Maximum corner
        max: Vec3,
    },
    /// World-space sphere
    Sphere {
        /// Center
        center: Vec3,
        /// Radius
        radius: f32,
    },
}

impl WorldShape {
    /// Whether the shapes overlap; touching surfaces do not count
    pub fn intersects(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Aabb { min: min_a, max: max_a }, Self::Aabb { min: min_b, max: max_b }) => {
                (0..3).all(|axis| min_a[axis] < max_b[axis] && min_b[axis] < max_a[axis])
            }
            (Self::Sphere { center: ca, radius: ra }, Self::Sphere { center: cb, radius: rb }) => {
                (ca - cb).norm_squared() < (ra + rb) * (ra + rb)
            }
            (Self::Aabb { min, max }, Self::Sphere { center, radius })
            | (Self::Sphere { center, radius }, Self::Aabb { min, max }) => {
                let closest = center.zip_zip_map(&min, &max, |c, lo, hi| c.clamp(lo, hi));
                (center - closest).norm_squared() < radius * radius
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(position: Vec3) -> WorldShape {
        CollisionShape::aabb(Vec3::new(0.5, 0.5, 0.5)).to_world(position, Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_aabb_overlap() {
        let a = unit_box_at(Vec3::zeros());
        assert!(a.intersects(&unit_box_at(Vec3::new(0.9, 0.0, 0.0))));
        assert!(!a.intersects(&unit_box_at(Vec3::new(0.0, 2.0, 0.0))));
    }

    #[test]
    fn test_touching_boxes_do_not_collide() {
        let a = unit_box_at(Vec3::zeros());
        assert!(!a.intersects(&unit_box_at(Vec3::new(1.0, 0.0, 0.0))));
    }

    #[test]
    fn test_aabb_scales_with_transform() {
        let shape = CollisionShape::aabb(Vec3::new(0.5, 0.5, 0.5));
        let big = shape.to_world(Vec3::zeros(), Vec3::new(4.0, 1.0, 1.0));
        assert!(big.intersects(&unit_box_at(Vec3::new(2.0, 0.0, 0.0))));
    }

    #[test]
    fn test_sphere_sphere() {
        let scale = Vec3::new(1.0, 1.0, 1.0);
        let a = CollisionShape::sphere(1.0).to_world(Vec3::zeros(), scale);
        let b = CollisionShape::sphere(1.0).to_world(Vec3::new(1.5, 0.0, 0.0), scale);
        let c = CollisionShape::sphere(1.0).to_world(Vec3::new(3.0, 0.0, 0.0), scale);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_sphere_box_both_orders() {
        let sphere = CollisionShape::sphere(0.5).to_world(Vec3::new(0.0, 0.8, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let ground = unit_box_at(Vec3::zeros());
        assert!(sphere.intersects(&ground));
        assert!(ground.intersects(&sphere));

        let far = CollisionShape::sphere(0.5).to_world(Vec3::new(2.0, 2.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(!far.intersects(&ground));
    }

    #[test]
    fn test_negative_half_extents_are_normalized() {
        let flipped = CollisionShape::aabb(Vec3::new(-0.5, 0.5, 0.5)).to_world(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(flipped, unit_box_at(Vec3::zeros()));

        let ball = CollisionShape::sphere(0.5).to_world(Vec3::new(0.0, 0.8, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(flipped.intersects(&ball));
        assert!(ball.intersects(&flipped));
    }

    #[test]
    fn test_layer_filtering() {
        let player = CollisionLayers::PLAYER;
        let pickup = CollisionLayers::PICKUP;
        assert!(CollisionLayers::should_collide(player, CollisionLayers::ALL, pickup, player));
        assert!(!CollisionLayers::should_collide(player, CollisionLayers::ENEMY, pickup, player));
        assert!(!CollisionLayers::should_collide(player, CollisionLayers::ALL, pickup, CollisionLayers::empty()));
    }

    #[test]
    fn test_collision_keeps_order() {
        use slotmap::SlotMap;
        let mut ids: SlotMap<EntityId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());

        let collision = Collision::new(b, a);
        assert_eq!(collision.entity_a(), b);
        assert_eq!(collision.entity_b(), a);
    }
}
