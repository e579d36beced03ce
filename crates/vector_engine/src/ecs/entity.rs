//! Entity implementation

use super::component::{downcast_mut, downcast_ref};
use super::{Component, ComponentTag, Script};
use crate::scene::SceneId;

slotmap::new_key_type! {
    /// Generational entity identifier handed out by a [`crate::scene::Scene`]
    pub struct EntityId;
}

/// Named container of components
///
/// Entities are built detached, then handed to
/// [`crate::scene::Scene::instantiate`] which takes ownership and assigns
/// the id and the scene back-reference.
pub struct Entity {
    name: String,
    components: Vec<Box<dyn Component>>,
    active: bool,
    destroyed: bool,
    scene: Option<SceneId>,
    script: Option<Box<dyn Script>>,
}

impl Entity {
    /// Create a detached, active entity with no components
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            active: true,
            destroyed: false,
            scene: None,
            script: None,
        }
    }

    /// Entity name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether physics and rendering should consider this entity
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set the active flag
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether `destroy` has been requested for this entity
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
        self.active = false;
    }

    /// Owning scene, once instantiated
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub(crate) fn set_scene(&mut self, scene: SceneId) {
        self.scene = Some(scene);
    }

    /// Attach a script; replaces any previous one
    pub fn set_script(&mut self, script: impl Script) {
        self.script = Some(Box::new(script));
    }

    /// Builder pattern: attach a script
    #[must_use]
    pub fn with_script(mut self, script: impl Script) -> Self {
        self.set_script(script);
        self
    }

    /// Whether a script is attached
    pub fn has_script(&self) -> bool {
        self.script.is_some()
    }

    pub(crate) fn take_script(&mut self) -> Option<Box<dyn Script>> {
        self.script.take()
    }

    /// Put a script back after it ran, unless it was replaced meanwhile
    pub(crate) fn restore_script(&mut self, script: Box<dyn Script>) {
        if self.script.is_none() {
            self.script = Some(script);
        }
    }

    /// Append a component and run its `initialize` hook
    pub fn add_component<C: Component>(&mut self, component: C) -> &mut Self {
        self.add_boxed_component(Box::new(component))
    }

    /// Append an already boxed component and run its `initialize` hook
    pub fn add_boxed_component(&mut self, mut component: Box<dyn Component>) -> &mut Self {
        component.initialize();
        log::trace!("Attached {} to '{}'", component.tag(), self.name);
        self.components.push(component);
        self
    }

    /// Append several components in order
    pub fn add_components(&mut self, components: impl IntoIterator<Item = Box<dyn Component>>) -> &mut Self {
        for component in components {
            self.add_boxed_component(component);
        }
        self
    }

    /// Builder pattern: append a component
    #[must_use]
    pub fn with_component<C: Component>(mut self, component: C) -> Self {
        self.add_component(component);
        self
    }

    /// First component of type `T`
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|component| downcast_ref::<T>(component.as_ref()))
    }

    /// First component of type `T`, mutably
    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|component| downcast_mut::<T>(component.as_mut()))
    }

    /// All components of type `T` in insertion order
    pub fn get_components<T: Component>(&self) -> Vec<&T> {
        self.components
            .iter()
            .filter_map(|component| downcast_ref::<T>(component.as_ref()))
            .collect()
    }

    /// Whether a component of type `T` is attached
    pub fn has_component<T: Component>(&self) -> bool {
        self.get_component::<T>().is_some()
    }

    /// First component carrying `tag`
    pub fn get_component_by_tag(&self, tag: ComponentTag) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|component| component.tag() == tag)
            .map(|component| &**component)
    }

    /// Tags of all attached components in insertion order
    pub fn component_tags(&self) -> Vec<ComponentTag> {
        self.components.iter().map(|component| component.tag()).collect()
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Detach the first component of type `T` immediately
    ///
    /// The component's `teardown` hook runs before it is returned.
    pub fn remove_component<T: Component>(&mut self) -> Option<T> {
        let index = self
            .components
            .iter()
            .position(|component| downcast_ref::<T>(component.as_ref()).is_some())?;
        let mut component = self.components.remove(index);
        component.teardown();
        component.into_any().downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Detach every component of type `T` immediately, returning how many
    /// were removed
    pub fn remove_components<T: Component>(&mut self) -> usize {
        let before = self.components.len();
        let mut kept = Vec::with_capacity(before);
        for mut component in self.components.drain(..) {
            if downcast_ref::<T>(component.as_ref()).is_some() {
                component.teardown();
            } else {
                kept.push(component);
            }
        }
        self.components = kept;
        before - self.components.len()
    }

    /// Run `teardown` on every component; used when the scene drops the entity
    pub(crate) fn teardown_components(&mut self) {
        for component in &mut self.components {
            component.teardown();
        }
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("components", &self.component_tags())
            .field("active", &self.active)
            .field("destroyed", &self.destroyed)
            .field("scene", &self.scene)
            .field("script", &self.script.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Marker {
        value: u32,
        initialized: Rc<Cell<u32>>,
        torn_down: Rc<Cell<u32>>,
    }

    impl Marker {
        fn new(value: u32, initialized: &Rc<Cell<u32>>, torn_down: &Rc<Cell<u32>>) -> Self {
            Self {
                value,
                initialized: Rc::clone(initialized),
                torn_down: Rc::clone(torn_down),
            }
        }
    }

    impl Component for Marker {
        fn tag(&self) -> ComponentTag {
            ComponentTag::new("Marker")
        }

        fn initialize(&mut self) {
            self.initialized.set(self.initialized.get() + 1);
        }

        fn teardown(&mut self) {
            self.torn_down.set(self.torn_down.get() + 1);
        }
    }

    struct Other;

    impl Component for Other {
        fn tag(&self) -> ComponentTag {
            ComponentTag::new("Other")
        }
    }

    fn counters() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)))
    }

    #[test]
    fn test_add_component_runs_initialize() {
        let (init, down) = counters();
        let mut entity = Entity::new("box");
        entity.add_component(Marker::new(1, &init, &down));

        assert_eq!(init.get(), 1);
        assert_eq!(entity.component_count(), 1);
        assert!(entity.has_component::<Marker>());
    }

    #[test]
    fn test_first_match_wins() {
        let (init, down) = counters();
        let entity = Entity::new("box")
            .with_component(Other)
            .with_component(Marker::new(1, &init, &down))
            .with_component(Marker::new(2, &init, &down));

        assert_eq!(entity.get_component::<Marker>().map(|m| m.value), Some(1));
        let values: Vec<u32> = entity.get_components::<Marker>().iter().map(|m| m.value).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_missing_component_is_none() {
        let entity = Entity::new("empty");
        assert!(entity.get_component::<Other>().is_none());
        assert!(entity.get_components::<Other>().is_empty());
        assert!(entity.get_component_by_tag(ComponentTag::new("Other")).is_none());
    }

    #[test]
    fn test_lookup_by_tag() {
        let entity = Entity::new("tagged").with_component(Other);
        let found = entity.get_component_by_tag(ComponentTag::new("Other"));
        assert_eq!(found.map(Component::tag), Some(ComponentTag::new("Other")));
    }

    #[test]
    fn test_remove_component_runs_teardown() {
        let (init, down) = counters();
        let mut entity = Entity::new("box")
            .with_component(Marker::new(1, &init, &down))
            .with_component(Marker::new(2, &init, &down));

        let removed = entity.remove_component::<Marker>();
        assert_eq!(removed.map(|m| m.value), Some(1));
        assert_eq!(down.get(), 1);
        assert_eq!(entity.get_component::<Marker>().map(|m| m.value), Some(2));
    }

    #[test]
    fn test_remove_components_removes_all_matches() {
        let (init, down) = counters();
        let mut entity = Entity::new("box")
            .with_component(Marker::new(1, &init, &down))
            .with_component(Other)
            .with_component(Marker::new(2, &init, &down));

        assert_eq!(entity.remove_components::<Marker>(), 2);
        assert_eq!(down.get(), 2);
        assert_eq!(entity.component_tags(), vec![ComponentTag::new("Other")]);
    }

    #[test]
    fn test_new_entity_is_active_and_detached() {
        let entity = Entity::new("fresh");
        assert!(entity.is_active());
        assert!(!entity.is_destroyed());
        assert!(entity.scene().is_none());
    }
}
