//! Physics world settings

use serde::{Deserialize, Serialize};

use super::PhysicsError;
use crate::config::Config;
use crate::foundation::math::Vec2;

/// Settings for a [`World`](super::World)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Acceleration applied to dynamic bodies every sub-step
    pub gravity: Vec2,
    /// Fixed sub-step length in seconds
    pub step_length: f32,
    /// Extra separation added when pushing overlapping bodies apart
    pub slop: f32,
    /// Sub-steps allowed per `update` call, 0 for no limit
    pub max_sub_steps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            step_length: 1.0 / 60.0,
            slop: 1e-5,
            max_sub_steps: 0,
        }
    }
}

impl PhysicsConfig {
    /// Builder pattern: Set gravity
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder pattern: Set step length
    pub fn with_step_length(mut self, step_length: f32) -> Self {
        self.step_length = step_length;
        self
    }

    /// Builder pattern: Set the sub-step cap
    pub fn with_max_sub_steps(mut self, max_sub_steps: u32) -> Self {
        self.max_sub_steps = max_sub_steps;
        self
    }

    /// Reject settings the stepper cannot run with
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.step_length > 0.0 && self.step_length.is_finite()) {
            return Err(PhysicsError::InvalidStepLength(self.step_length));
        }
        Ok(())
    }
}

impl Config for PhysicsConfig {}
