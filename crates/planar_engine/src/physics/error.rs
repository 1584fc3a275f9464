//! Physics errors
//!
//! Every variant is a configuration mistake caught at construction or
//! registration time. Nothing here is raised mid-step.

use thiserror::Error;

use super::BodyHandle;
use crate::ecs::Entity;

/// Physics configuration and registration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be strictly positive
    #[error("zero or negative mass supplied: {0}")]
    InvalidMass(f32),

    /// Friction must be strictly positive
    #[error("zero or negative friction supplied: {0}")]
    InvalidFriction(f32),

    /// Bounce must not be negative
    #[error("negative bounce supplied: {0}")]
    InvalidBounce(f32),

    /// One-way leniency must not be negative
    #[error("negative one-way leniency supplied: {0}")]
    InvalidLeniency(f32),

    /// A polygon needs at least three points
    #[error("shape needs at least 3 points, got {points}")]
    DegenerateShape {
        /// Number of points supplied
        points: usize,
    },

    /// Two consecutive points coincide, so the edge has no normal
    #[error("shape edge {index} has zero length")]
    DegenerateEdge {
        /// Index of the edge's first point
        index: usize,
    },

    /// Rectangle extents must be positive
    #[error("invalid rectangle dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// The entity does not exist
    #[error("entity {0:?} does not exist")]
    UnknownEntity(Entity),

    /// The entity has no transform to attach a body to
    #[error("entity {0:?} has no transform component")]
    MissingTransform(Entity),

    /// The entity has no shape and the body supplied none either
    #[error("entity {0:?} has no shape component")]
    MissingShape(Entity),

    /// The handle does not refer to a body owned by this world
    #[error("body {0:?} is not owned by this world")]
    UnknownBody(BodyHandle),

    /// The fixed step must be finite and positive
    #[error("invalid fixed step length: {0}")]
    InvalidStepLength(f32),
}
