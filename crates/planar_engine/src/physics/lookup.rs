//! Access to entity data needed by the physics world

use crate::ecs::components::{ShapeComponent, TransformComponent};
use crate::ecs::{Entity, Scene};

/// Read entity existence, transforms and shapes; write transforms back
///
/// The world never owns transforms. It borrows them through this trait for
/// the length of one `update` call, so any entity store can drive it.
pub trait EntityLookup {
    /// Whether the entity is alive
    fn contains(&self, entity: Entity) -> bool;

    /// The entity's transform, if it has one
    fn transform(&self, entity: Entity) -> Option<&TransformComponent>;

    /// Mutable access to the entity's transform
    fn transform_mut(&mut self, entity: Entity) -> Option<&mut TransformComponent>;

    /// The entity's shapes, if it has any
    fn shapes(&self, entity: Entity) -> Option<&ShapeComponent>;
}

impl EntityLookup for Scene {
    fn contains(&self, entity: Entity) -> bool {
        Scene::contains(self, entity)
    }

    fn transform(&self, entity: Entity) -> Option<&TransformComponent> {
        self.get_component(entity)
    }

    fn transform_mut(&mut self, entity: Entity) -> Option<&mut TransformComponent> {
        self.get_component_mut(entity)
    }

    fn shapes(&self, entity: Entity) -> Option<&ShapeComponent> {
        self.get_component(entity)
    }
}
