//! Entity/Component model
//!
//! An entity is a named, ordered container of components. Components are
//! looked up by concrete type (checked downcast) or by their stable
//! [`ComponentTag`]; the first match in insertion order wins.

pub mod entity;
pub mod component;
pub mod script;
pub mod components;

pub use entity::{Entity, EntityId};
pub use component::{Component, ComponentTag};
pub use script::{Script, ScriptContext};
