//! Component trait and type tags

use std::any::Any;

/// Stable identifier for a component type
///
/// Tags are plain names so they survive across builds and can be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentTag(&'static str);

impl ComponentTag {
    /// Create a tag from a static name
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The tag name
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Upcasting helpers for component downcasts
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;
    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Convert a boxed value into `Box<dyn Any>`
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A unit of behaviour or state attached to exactly one entity
pub trait Component: AsAny {
    /// Stable type tag used for tag lookups and logging
    fn tag(&self) -> ComponentTag;

    /// Called synchronously when the component is attached to an entity
    ///
    /// Must not fail; problems are logged by the component itself.
    fn initialize(&mut self) {}

    /// Called when the component is detached or its entity is dropped
    /// from the scene
    fn teardown(&mut self) {}
}

/// Checked downcast of a component to its concrete type
pub(crate) fn downcast_ref<T: Component>(component: &dyn Component) -> Option<&T> {
    component.as_any().downcast_ref::<T>()
}

/// Checked mutable downcast of a component to its concrete type
pub(crate) fn downcast_mut<T: Component>(component: &mut dyn Component) -> Option<&mut T> {
    component.as_any_mut().downcast_mut::<T>()
}
