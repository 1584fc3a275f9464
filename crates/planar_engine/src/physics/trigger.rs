//! Trigger bodies: overlap detection without a physical response

use super::{BodyDesc, CollisionLayers, Shape};

/// Preset for trigger bodies
///
/// A trigger body is non-dynamic and records overlaps on both participants
/// without pushing anything. Attaching a trigger and a solid body to the
/// same entity is allowed; the two never test against each other.
pub struct TriggerBody;

impl TriggerBody {
    /// A unit-square trigger with the given tag
    pub fn desc(tag: impl Into<String>) -> BodyDesc {
        Self::with_shape(tag, Shape::quad())
    }

    /// A trigger with its own shape
    pub fn with_shape(tag: impl Into<String>, shape: Shape) -> BodyDesc {
        BodyDesc::fixed()
            .as_trigger()
            .with_tag(tag)
            .with_shape(shape)
            .with_layers(CollisionLayers::DEFAULT | CollisionLayers::TRIGGER)
    }
}
