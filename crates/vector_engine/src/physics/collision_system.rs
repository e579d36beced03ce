//! Pairwise collision detection over the scene
//!
//! Brute force narrow phase: every active live entity carrying both a
//! collider and a transform is tested against every later one in live
//! order. Scenes in this engine are small enough that a broad phase would
//! cost more than it saves.

use crate::ecs::components::{ColliderComponent, TransformComponent};
use crate::ecs::{Entity, EntityId};
use crate::physics::collision::{Collision, CollisionLayers, WorldShape};
use crate::scene::Scene;

/// Per-frame detection statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionStats {
    /// Colliders considered
    pub colliders: usize,
    /// Pairs that passed the layer filter and ran a shape test
    pub pair_tests: usize,
    /// Overlapping pairs reported
    pub collisions: usize,
}

struct Candidate {
    id: EntityId,
    shape: WorldShape,
    layer: CollisionLayers,
    mask: CollisionLayers,
}

/// Produces collision candidates for the resolution loop
#[derive(Debug, Default)]
pub struct CollisionDetector {
    last_stats: DetectionStats,
}

impl CollisionDetector {
    /// Create a detector
    pub fn new() -> Self {
        Self::default()
    }

    /// Find all overlapping pairs, A always earlier than B in live order
    pub fn detect(&mut self, scene: &Scene) -> Vec<Collision> {
        let candidates: Vec<Candidate> = scene
            .active_entities()
            .filter_map(|(id, entity)| candidate(id, entity))
            .collect();

        let mut stats = DetectionStats {
            colliders: candidates.len(),
            ..DetectionStats::default()
        };
        let mut collisions = Vec::new();

        for (i, a) in candidates.iter().enumerate() {
            for b in &candidates[i + 1..] {
                if !CollisionLayers::should_collide(a.layer, a.mask, b.layer, b.mask) {
                    continue;
                }
                stats.pair_tests += 1;
                if a.shape.intersects(&b.shape) {
                    collisions.push(Collision::new(a.id, b.id));
                }
            }
        }

        stats.collisions = collisions.len();
        if stats.collisions > 0 {
            log::trace!(
                "Detected {} collisions from {} pair tests",
                stats.collisions,
                stats.pair_tests
            );
        }
        self.last_stats = stats;
        collisions
    }

    /// Statistics from the most recent `detect`
    pub fn last_stats(&self) -> DetectionStats {
        self.last_stats
    }
}

fn candidate(id: EntityId, entity: &Entity) -> Option<Candidate> {
    let collider = entity.get_component::<ColliderComponent>()?;
    let transform = entity.get_component::<TransformComponent>()?;
    Some(Candidate {
        id,
        shape: collider.shape.to_world(transform.position, transform.scale),
        layer: collider.layer,
        mask: collider.mask,
    })
}
