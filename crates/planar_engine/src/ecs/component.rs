//! Component trait and implementations

use slotmap::SecondaryMap;

use super::{Entity, Scene};

/// Stable identifier for each component kind the scene can store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// [`TransformComponent`](super::components::TransformComponent)
    Transform,
    /// [`ShapeComponent`](super::components::ShapeComponent)
    Shape,
    /// [`BodyComponent`](super::components::BodyComponent)
    Body,
}

/// Typed access to one column of the scene's component tables
pub trait Component: Sized + 'static {
    /// Which column this type lives in
    const KIND: ComponentKind;

    /// Read-only column
    fn storage(scene: &Scene) -> &SecondaryMap<Entity, Self>;

    /// Mutable column
    fn storage_mut(scene: &mut Scene) -> &mut SecondaryMap<Entity, Self>;
}
