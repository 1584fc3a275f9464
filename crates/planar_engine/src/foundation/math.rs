//! Math utilities and types
//!
//! Provides the 2D math types used by the scene and the physics world.
//! Everything is single precision and y-up.

pub use nalgebra::{Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;
}

/// Math utility functions
pub mod utils {
    use super::{Rotation2, Vec2};

    /// Rotate a vector counter-clockwise by `angle` radians
    pub fn rotate(v: &Vec2, angle: f32) -> Vec2 {
        if angle == 0.0 {
            return *v;
        }
        Rotation2::new(angle) * v
    }

    /// Left-hand perpendicular, `(-y, x)`
    ///
    /// For a clockwise vertex loop this turns an edge into its outward normal.
    pub fn perpendicular(v: &Vec2) -> Vec2 {
        Vec2::new(-v.y, v.x)
    }

    /// Largest absolute component of a scale vector
    pub fn max_abs_component(v: &Vec2) -> f32 {
        v.x.abs().max(v.y.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate(&Vec2::new(1.0, 0.0), constants::HALF_PI);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_perpendicular_is_left_hand() {
        assert_eq!(perpendicular(&Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0));
        assert_eq!(perpendicular(&Vec2::new(0.0, -1.0)), Vec2::new(1.0, 0.0));
    }
}
