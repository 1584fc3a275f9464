//! Core engine implementation
//!
//! Ties the [`Scene`] and the physics [`World`] together and owns the
//! deferred destruction queue, so gameplay code can destroy entities from
//! anywhere without invalidating bodies mid-step.

use thiserror::Error;

use crate::config::{Config, ConfigError, Deserialize, Serialize};
use crate::ecs::components::{BodyComponent, ShapeComponent, TransformComponent};
use crate::ecs::{EcsError, Entity, Scene};
use crate::physics::{Body, BodyDesc, BodyHandle, PhysicsConfig, PhysicsError, World};

/// Main engine struct
pub struct Engine {
    /// Entities and their components
    pub scene: Scene,

    /// Physics simulation
    pub physics: World,

    /// Entities to tear down at the start of the next update
    pending_destroy: Vec<Entity>,

    /// Number of updates run so far
    frame: u64,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        let physics = World::new(config.physics)?;

        Ok(Self {
            scene: Scene::new(),
            physics,
            pending_destroy: Vec::new(),
            frame: 0,
        })
    }

    /// Create an entity with a transform and shapes
    pub fn spawn(&mut self, transform: TransformComponent, shapes: impl Into<ShapeComponent>) -> Result<Entity, EngineError> {
        let entity = self.scene.create_entity();
        self.scene.add_component(entity, transform)?;
        self.scene.add_component(entity, shapes.into())?;
        Ok(entity)
    }

    /// Create a body for an existing entity and link it through a [`BodyComponent`]
    pub fn attach_body(&mut self, entity: Entity, desc: BodyDesc) -> Result<BodyHandle, EngineError> {
        let handle = self.physics.create_body(&self.scene, entity, desc)?;

        match self.scene.get_component_mut::<BodyComponent>(entity) {
            Some(component) => component.push(handle),
            None => self.scene.add_component(entity, BodyComponent::new(handle))?,
        }
        Ok(handle)
    }

    /// Spawn an entity and attach one body to it
    pub fn spawn_body(
        &mut self,
        transform: TransformComponent,
        shapes: impl Into<ShapeComponent>,
        desc: BodyDesc,
    ) -> Result<(Entity, BodyHandle), EngineError> {
        let entity = self.spawn(transform, shapes)?;
        match self.attach_body(entity, desc) {
            Ok(handle) => Ok((entity, handle)),
            Err(e) => {
                self.scene.destroy_entity(entity);
                Err(e)
            }
        }
    }

    /// Detach and destroy one body of an entity
    pub fn detach_body(&mut self, entity: Entity, handle: BodyHandle) -> Option<Body> {
        let linked = self
            .scene
            .get_component_mut::<BodyComponent>(entity)
            .is_some_and(|component| component.remove(handle));
        if !linked {
            return None;
        }
        if self
            .scene
            .get_component::<BodyComponent>(entity)
            .is_some_and(BodyComponent::is_empty)
        {
            self.scene.remove_component::<BodyComponent>(entity);
        }
        self.physics.destroy_body(handle)
    }

    /// Primary body of an entity
    pub fn body_of(&self, entity: Entity) -> Option<&Body> {
        let handle = self.scene.get_component::<BodyComponent>(entity)?.primary()?;
        self.physics.body(handle)
    }

    /// Mutable primary body of an entity
    pub fn body_of_mut(&mut self, entity: Entity) -> Option<&mut Body> {
        let handle = self.scene.get_component::<BodyComponent>(entity)?.primary()?;
        self.physics.body_mut(handle)
    }

    /// Mark an entity for destruction at the start of the next update
    ///
    /// Its bodies keep simulating until then. Queueing twice is harmless.
    pub fn queue_destroy(&mut self, entity: Entity) {
        if !self.pending_destroy.contains(&entity) {
            self.pending_destroy.push(entity);
        }
    }

    /// Whether the entity is waiting to be destroyed
    pub fn is_queued_for_destroy(&self, entity: Entity) -> bool {
        self.pending_destroy.contains(&entity)
    }

    /// Flush queued destruction, then advance physics by `delta_time`
    ///
    /// Returns the number of physics sub-steps run.
    pub fn update(&mut self, delta_time: f32) -> u32 {
        self.flush_destroyed();
        self.frame += 1;
        self.physics.update(&mut self.scene, delta_time)
    }

    /// Number of updates run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn flush_destroyed(&mut self) {
        for entity in std::mem::take(&mut self.pending_destroy) {
            let bodies = self.physics.remove_entity(entity);
            if self.scene.destroy_entity(entity) {
                log::debug!("Destroyed entity {:?} with {} bodies", entity, bodies);
            } else {
                log::warn!("Entity {:?} was already gone when its destruction ran", entity);
            }
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Physics world settings
    pub physics: PhysicsConfig,
}

impl Config for EngineConfig {}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Physics setup failed
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// Entity bookkeeping failed
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
