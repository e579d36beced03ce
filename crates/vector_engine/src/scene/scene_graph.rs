//! Scene: entity storage, live list and the deferred flush point

use std::sync::atomic::{AtomicU32, Ordering};

use slotmap::SlotMap;
use thiserror::Error;

use super::{CommandBuffer, SceneCommand};
use crate::ecs::components::RendererComponent;
use crate::ecs::{Entity, EntityId, ScriptContext};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Identifier of a scene, stored on entities as their back-reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(u32);

/// Scene errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not refer to an entity owned by this scene
    #[error("Unknown entity: {0:?}")]
    UnknownEntity(EntityId),
}

/// Holds the live set of entities
///
/// Entities are stored from `instantiate` until their removal is flushed.
/// Only entities on the live list take part in updates, physics and
/// rendering; the list keeps instantiation order.
pub struct Scene {
    id: SceneId,
    name: String,
    entities: SlotMap<EntityId, Entity>,
    live: Vec<EntityId>,
    commands: CommandBuffer,
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SceneId(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
            entities: SlotMap::with_key(),
            live: Vec::new(),
            commands: CommandBuffer::new(),
        }
    }

    /// Scene identifier
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take ownership of `entity` and schedule it to go live
    ///
    /// The entity is not on the live list, and its script's `start` has
    /// not run, until the next [`Scene::flush`].
    pub fn instantiate(&mut self, mut entity: Entity) -> EntityId {
        entity.set_scene(self.id);
        let name = entity.name().to_string();
        let id = self.entities.insert(entity);
        self.commands.push(SceneCommand::Insert(id));
        log::debug!("Queued instantiate of '{}' ({:?})", name, id);
        id
    }

    /// Deactivate `id` now and schedule its removal
    ///
    /// The entity stops being simulated and drawn immediately; it leaves
    /// the live list at the next [`Scene::flush`]. Destroying an entity
    /// twice queues a single removal.
    pub fn destroy(&mut self, id: EntityId) -> Result<(), SceneError> {
        let entity = self.entities.get_mut(id).ok_or(SceneError::UnknownEntity(id))?;
        if entity.is_destroyed() {
            return Ok(());
        }

        entity.mark_destroyed();
        if let Some(renderer) = entity.get_component_mut::<RendererComponent>() {
            renderer.set_active(false);
        }
        log::debug!("Queued destroy of '{}' ({:?})", entity.name(), id);
        self.commands.push(SceneCommand::Remove(id));
        Ok(())
    }

    /// Apply every pending command in FIFO order
    ///
    /// Commands queued while flushing (for example by a `start` hook)
    /// are applied in the same flush.
    pub fn flush(&mut self) {
        while let Some(command) = self.commands.pop() {
            match command {
                SceneCommand::Insert(id) => self.apply_insert(id),
                SceneCommand::Remove(id) => self.apply_remove(id),
            }
        }
    }

    fn apply_insert(&mut self, id: EntityId) {
        if !self.entities.contains_key(id) {
            log::warn!("Skipping instantiate of {:?}: entity no longer exists", id);
            return;
        }
        if self.live.contains(&id) {
            log::warn!("Skipping instantiate of {:?}: already live", id);
            return;
        }

        self.live.push(id);
        self.run_start(id);
    }

    fn apply_remove(&mut self, id: EntityId) {
        if let Some(index) = self.live.iter().position(|&live| live == id) {
            self.live.remove(index);
        }
        match self.entities.remove(id) {
            Some(mut entity) => {
                entity.teardown_components();
                log::debug!("Removed '{}' ({:?}) from scene '{}'", entity.name(), id, self.name);
            }
            None => log::warn!("Skipping removal of {:?}: entity no longer exists", id),
        }
    }

    fn run_start(&mut self, id: EntityId) {
        let Some(mut script) = self.entities.get_mut(id).and_then(Entity::take_script) else {
            return;
        };
        script.start(&mut ScriptContext::new(self, id));
        if let Some(entity) = self.entities.get_mut(id) {
            entity.restore_script(script);
        }
    }

    /// Run `Script::update` for every active live entity
    ///
    /// Iterates over a snapshot of the live list, so scripts may
    /// instantiate or destroy freely.
    pub fn update_scripts(&mut self, delta_time: f32) {
        for id in self.active_ids() {
            // A script earlier in the pass may have destroyed this entity
            let Some(mut script) = self
                .entities
                .get_mut(id)
                .filter(|entity| entity.is_active())
                .and_then(Entity::take_script)
            else {
                continue;
            };
            script.update(&mut ScriptContext::new(self, id), delta_time);
            if let Some(entity) = self.entities.get_mut(id) {
                entity.restore_script(script);
            }
        }
    }

    /// Entity by id, live or pending
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Entity by id, live or pending, mutably
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Whether `id` is on the live list
    pub fn is_live(&self, id: EntityId) -> bool {
        self.live.contains(&id)
    }

    /// Live entity ids in instantiation order
    pub fn live_ids(&self) -> &[EntityId] {
        &self.live
    }

    /// Live entities in instantiation order
    pub fn live_entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.live
            .iter()
            .filter_map(|&id| self.entities.get(id).map(|entity| (id, entity)))
    }

    /// Live entities whose active flag is set
    pub fn active_entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.live_entities().filter(|(_, entity)| entity.is_active())
    }

    /// Snapshot of active live ids
    pub fn active_ids(&self) -> Vec<EntityId> {
        self.active_entities().map(|(id, _)| id).collect()
    }

    /// First live entity named `name`
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.live_entities()
            .find(|(_, entity)| entity.name() == name)
            .map(|(id, _)| id)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.live.len()
    }

    /// Number of commands waiting for the next flush
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Pending commands in execution order
    pub fn commands(&self) -> &CommandBuffer {
        &self.commands
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("entities", &self.entities.len())
            .field("live", &self.live.len())
            .field("pending_commands", &self.commands.len())
            .finish()
    }
}
