//! 2D rigid-body physics
//!
//! Convex polygon [`Shape`]s attached to [`Body`]s are simulated by a
//! [`World`] in fixed sub-steps: integration, bounding-circle broad phase,
//! separating-axis narrow phase and sequential impulse resolution.
//! Triggers report overlaps without a response, and one-way bodies only
//! stop things landing on them from one side.

pub mod body;
pub mod collision;
pub mod collision_layers;
pub mod config;
pub mod error;
pub mod lookup;
pub mod resolve;
pub mod shape;
pub mod trigger;
pub mod world;

#[cfg(test)]
mod tests;

pub use body::{Body, BodyDesc, BodyHandle, OneWay};
pub use collision::{sat_test, Collision, ContactManifold, NormalOwner, ShapeRef};
pub use collision_layers::CollisionLayers;
pub use config::PhysicsConfig;
pub use error::PhysicsError;
pub use lookup::EntityLookup;
pub use resolve::{resolve, ContactBody, Resolution};
pub use shape::Shape;
pub use trigger::TriggerBody;
pub use world::{StepStats, World};
