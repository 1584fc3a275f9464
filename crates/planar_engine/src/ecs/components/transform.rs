//! Transform component for the ECS system
//!
//! Pure data component: position, non-uniform scale and a rotation angle.
//! The physics world reads scale and rotation every step and writes position.

use crate::foundation::math::{utils, Vec2};

/// ECS Transform component
///
/// World space, y-up. `rotation` is counter-clockwise in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec2,

    /// Per-axis scale factors
    pub scale: Vec2,

    /// Rotation in radians
    pub rotation: f32,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set scale
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::new(scale, scale);
        self
    }

    /// Builder pattern: Set rotation (radians)
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Apply scale then rotation to a local-space vector (no translation)
    ///
    /// Scale first, rotation second. With non-uniform scale this is not the
    /// same as rotating first; the physics projection relies on this order.
    pub fn scale_rotate(&self, local: &Vec2) -> Vec2 {
        utils::rotate(&self.scale.component_mul(local), self.rotation)
    }
}
