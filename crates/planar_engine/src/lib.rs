//! # Planar Engine
//!
//! A small 2D game engine core built around a fixed-timestep rigid-body
//! physics world.
//!
//! ## Features
//!
//! - **Convex Polygon Collision**: Separating-axis narrow phase with a
//!   bounding-circle broad phase
//! - **Impulse Resolution**: Positional correction, bounce and friction
//! - **Triggers and One-Way Platforms**: Overlap reporting and semi-solid
//!   surfaces
//! - **Arena ECS**: Generational entity keys with typed component storage
//! - **Deterministic Stepping**: Fixed sub-steps over an accumulator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use planar_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!
//!     let floor = Shape::rectangle(20.0, 1.0)?;
//!     engine.spawn_body(TransformComponent::identity(), floor, BodyDesc::fixed())?;
//!
//!     let start = TransformComponent::from_position(Vec2::new(0.0, 5.0));
//!     let (crate_box, _) = engine.spawn_body(start, Shape::quad(), BodyDesc::dynamic())?;
//!
//!     for _ in 0..120 {
//!         engine.update(1.0 / 60.0);
//!     }
//!     let _resting = engine.scene.get_component::<TransformComponent>(crate_box);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod physics;

mod engine;

pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::Config,
        ecs::{
            components::{BodyComponent, ShapeComponent, TransformComponent},
            Entity, Scene,
        },
        foundation::{logging, math::Vec2},
        physics::{
            Body, BodyDesc, BodyHandle, Collision, CollisionLayers, OneWay, PhysicsConfig, PhysicsError, Shape,
            StepStats, TriggerBody, World,
        },
        Engine, EngineConfig, EngineError,
    };
}
