//! Per-entity lifecycle scripts

use super::{Entity, EntityId};
use crate::scene::Scene;

/// Behaviour attached to an entity
///
/// `start` runs exactly once, at the scene flush that makes the entity
/// live. `update` runs once per frame while the entity is live and active.
pub trait Script: 'static {
    /// Called when the entity enters the live list
    fn start(&mut self, _ctx: &mut ScriptContext<'_>) {}

    /// Called every frame
    fn update(&mut self, _ctx: &mut ScriptContext<'_>, _delta_time: f32) {}
}

/// Access handed to a running script
///
/// The script is detached from its entity while it runs, so the entity
/// and the rest of the scene can be borrowed freely.
pub struct ScriptContext<'a> {
    scene: &'a mut Scene,
    entity: EntityId,
}

impl<'a> ScriptContext<'a> {
    pub(crate) fn new(scene: &'a mut Scene, entity: EntityId) -> Self {
        Self { scene, entity }
    }

    /// Id of the entity running the script
    pub fn entity_id(&self) -> EntityId {
        self.entity
    }

    /// The entity running the script
    pub fn entity(&self) -> Option<&Entity> {
        self.scene.entity(self.entity)
    }

    /// The entity running the script, mutably
    pub fn entity_mut(&mut self) -> Option<&mut Entity> {
        self.scene.entity_mut(self.entity)
    }

    /// The owning scene
    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// The owning scene, mutably (structural changes stay deferred)
    pub fn scene_mut(&mut self) -> &mut Scene {
        self.scene
    }
}
