//! Scene: the entity/component container

use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

use super::components::{BodyComponent, ShapeComponent, TransformComponent};
use super::{Component, ComponentKind, Entity};

/// ECS errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity was never created or has been destroyed
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(Entity),
}

/// Container for all entities and their components
#[derive(Default)]
pub struct Scene {
    entities: SlotMap<Entity, ()>,
    transforms: SecondaryMap<Entity, TransformComponent>,
    shapes: SecondaryMap<Entity, ShapeComponent>,
    bodies: SecondaryMap<Entity, BodyComponent>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Destroy an entity and every component attached to it
    ///
    /// Returns `false` if the entity was already gone.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        self.transforms.remove(entity);
        self.shapes.remove(entity);
        self.bodies.remove(entity);
        true
    }

    /// Whether the entity is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over all live entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Add (or replace) a component on an entity
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        if !self.contains(entity) {
            return Err(EcsError::NoSuchEntity(entity));
        }
        T::storage_mut(self).insert(entity, component);
        Ok(())
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        T::storage(self).get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        T::storage_mut(self).get_mut(entity)
    }

    /// Detach a component, returning it
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        T::storage_mut(self).remove(entity)
    }

    /// Whether the entity carries a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        T::storage(self).contains_key(entity)
    }

    /// Component kinds currently attached to an entity
    pub fn kinds(&self, entity: Entity) -> Vec<ComponentKind> {
        let mut kinds = Vec::new();
        if self.transforms.contains_key(entity) {
            kinds.push(ComponentKind::Transform);
        }
        if self.shapes.contains_key(entity) {
            kinds.push(ComponentKind::Shape);
        }
        if self.bodies.contains_key(entity) {
            kinds.push(ComponentKind::Body);
        }
        kinds
    }
}

impl Component for TransformComponent {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn storage(scene: &Scene) -> &SecondaryMap<Entity, Self> {
        &scene.transforms
    }

    fn storage_mut(scene: &mut Scene) -> &mut SecondaryMap<Entity, Self> {
        &mut scene.transforms
    }
}

impl Component for ShapeComponent {
    const KIND: ComponentKind = ComponentKind::Shape;

    fn storage(scene: &Scene) -> &SecondaryMap<Entity, Self> {
        &scene.shapes
    }

    fn storage_mut(scene: &mut Scene) -> &mut SecondaryMap<Entity, Self> {
        &mut scene.shapes
    }
}

impl Component for BodyComponent {
    const KIND: ComponentKind = ComponentKind::Body;

    fn storage(scene: &Scene) -> &SecondaryMap<Entity, Self> {
        &scene.bodies
    }

    fn storage_mut(scene: &mut Scene) -> &mut SecondaryMap<Entity, Self> {
        &mut scene.bodies
    }
}
