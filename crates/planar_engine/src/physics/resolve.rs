//! Contact resolution: positional correction, bounce and friction
//!
//! [`resolve`] works on copies of the two bodies' state and returns the
//! changes to apply, so the world can keep both bodies borrowed immutably
//! while it computes and then write the result back in one place.

use super::Body;
use crate::foundation::math::Vec2;

/// Tangential speeds below this are treated as zero
const TANGENT_EPSILON: f32 = 1e-6;

/// The parts of a body that contact resolution reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactBody {
    /// Velocity before resolution
    pub velocity: Vec2,
    /// `1 / mass`
    pub inverted_mass: f32,
    /// Friction coefficient
    pub friction: f32,
    /// Bounce factor
    pub bounce: f32,
    /// Only dynamic bodies are moved
    pub dynamic: bool,
}

impl From<&Body> for ContactBody {
    fn from(body: &Body) -> Self {
        Self {
            velocity: body.velocity(),
            inverted_mass: body.inverted_mass(),
            friction: body.friction(),
            bounce: body.bounce(),
            dynamic: body.is_dynamic(),
        }
    }
}

/// Changes produced by resolving one contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Translation for body A
    pub displacement_a: Vec2,
    /// Translation for body B
    pub displacement_b: Vec2,
    /// Velocity change for body A
    pub velocity_change_a: Vec2,
    /// Velocity change for body B
    pub velocity_change_b: Vec2,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            displacement_a: Vec2::zeros(),
            displacement_b: Vec2::zeros(),
            velocity_change_a: Vec2::zeros(),
            velocity_change_b: Vec2::zeros(),
        }
    }
}

/// Resolve one contact between `a` and `b`
///
/// `normal` is the unit contact normal pointing from A toward B and `depth`
/// the penetration along it.
///
/// 1. Positional correction separates the bodies by `depth + slop`, split
///    evenly when both are dynamic, otherwise all on the dynamic one.
/// 2. If A is still closing on B along the normal, a normal impulse with
///    restitution `min(bounce_a, bounce_b)` removes (or reverses) that
///    closing speed.
/// 3. Friction with coefficient `sqrt(friction_a * friction_b)` opposes the
///    tangential part of the relative velocity, capped at `μ` times the
///    normal velocity change and never more than the tangential speed.
///
/// Two non-dynamic bodies produce no change.
pub fn resolve(normal: &Vec2, depth: f32, a: &ContactBody, b: &ContactBody, slop: f32) -> Resolution {
    let mut resolution = Resolution::default();

    let (share_a, share_b) = match (a.dynamic, b.dynamic) {
        (true, true) => (0.5, 0.5),
        (true, false) => (1.0, 0.0),
        (false, true) => (0.0, 1.0),
        (false, false) => return resolution,
    };

    let push = depth + slop;
    resolution.displacement_a = -normal * (push * share_a);
    resolution.displacement_b = normal * (push * share_b);

    let relative = a.velocity - b.velocity;
    let normal_velocity = relative.dot(normal);
    // Separating, resting, or NaN
    if !(normal_velocity > 0.0) {
        return resolution;
    }

    let bounce = a.bounce.min(b.bounce);
    let closing = (1.0 + bounce) * normal_velocity;

    // Per-body share of the relative velocity change
    let (weight_a, weight_b) = if a.dynamic && b.dynamic {
        let inverse_sum = a.inverted_mass + b.inverted_mass;
        if !(inverse_sum > 0.0) {
            return resolution;
        }
        (a.inverted_mass / inverse_sum, b.inverted_mass / inverse_sum)
    } else {
        (share_a, share_b)
    };

    resolution.velocity_change_a = -normal * (closing * weight_a);
    resolution.velocity_change_b = normal * (closing * weight_b);

    let tangential = relative - normal * normal_velocity;
    let tangential_speed = tangential.norm();
    if tangential_speed < TANGENT_EPSILON {
        return resolution;
    }

    let tangent = tangential / tangential_speed;
    let coefficient = (a.friction * b.friction).sqrt();
    let friction_change = (coefficient * closing).min(tangential_speed);

    resolution.velocity_change_a -= tangent * (friction_change * share_a);
    resolution.velocity_change_b += tangent * (friction_change * share_b);

    resolution
}
