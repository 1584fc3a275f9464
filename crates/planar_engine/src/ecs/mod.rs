//! Entity-Component container
//!
//! A deliberately small arena-backed container: entities are generational
//! keys, each component kind lives in its own secondary map, and lookups are
//! typed through the [`Component`] trait instead of reflection.

pub mod scene;
pub mod entity;
pub mod component;
pub mod components;

#[cfg(test)]
mod tests;

pub use scene::{EcsError, Scene};
pub use entity::Entity;
pub use component::{Component, ComponentKind};
