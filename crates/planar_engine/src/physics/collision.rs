//! Narrow-phase collision: separating-axis test and contact records
//!
//! [`sat_test`] produces a [`ContactManifold`] for two overlapping shapes.
//! The world turns it into a [`Collision`] once it knows which bodies are
//! involved and which side is `a`.

use super::{BodyHandle, Shape};
use crate::ecs::components::TransformComponent;
use crate::foundation::math::Vec2;

/// Which shape of a `sat_test` call produced the contact axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalOwner {
    /// The first shape argument
    A,
    /// The second shape argument
    B,
}

impl NormalOwner {
    /// The other side
    pub fn flipped(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Result of a successful separating-axis test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    /// Unit contact normal, pointing from shape A toward shape B
    pub normal: Vec2,
    /// Penetration depth along `normal`, always > 0
    pub depth: f32,
    /// Shape whose face produced `normal`
    pub normal_owner: NormalOwner,
}

impl ContactManifold {
    /// The same contact seen from the other shape
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            depth: self.depth,
            normal_owner: self.normal_owner.flipped(),
        }
    }
}

/// Separating-axis test between two convex shapes
///
/// Every face normal of both shapes, rotated into world space, is tried as
/// an axis. The first axis that shows a gap ends the test with `None`.
/// Otherwise the axis with the smallest positive overlap becomes the
/// contact normal, pointing from A toward B.
pub fn sat_test(
    shape_a: &Shape,
    transform_a: &TransformComponent,
    shape_b: &Shape,
    transform_b: &TransformComponent,
) -> Option<ContactManifold> {
    let distance = shape_b.get_center(transform_b) - shape_a.get_center(transform_a);

    let axes = shape_a
        .world_normals(transform_a)
        .map(|n| (n, NormalOwner::A))
        .chain(shape_b.world_normals(transform_b).map(|n| (n, NormalOwner::B)));

    let mut best: Option<ContactManifold> = None;

    for (axis, owner) in axes {
        let along = distance.dot(&axis);

        // Owner-relative orientation: A's faces must face B, B's faces must face A
        let (max, min) = match owner {
            NormalOwner::A => {
                let facing = if along < 0.0 { -axis } else { axis };
                (shape_a.cast_along_max(&facing, transform_a), -shape_b.cast_along_min(&facing, transform_b))
            }
            NormalOwner::B => {
                let facing = if along > 0.0 { -axis } else { axis };
                (shape_b.cast_along_max(&facing, transform_b), -shape_a.cast_along_min(&facing, transform_a))
            }
        };

        let depth = (max + min) - along.abs();
        if depth <= 0.0 {
            return None;
        }

        if best.map_or(true, |contact| depth < contact.depth) {
            best = Some(ContactManifold {
                normal: axis,
                depth,
                normal_owner: owner,
            });
        }
    }

    // Whichever shape owns it, the reported normal points from A to B
    best.map(|mut contact| {
        if contact.normal.dot(&distance) < 0.0 {
            contact.normal = -contact.normal;
        }
        contact
    })
}

/// A particular shape of a particular body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeRef {
    /// Owning body
    pub body: BodyHandle,
    /// Index into the body's shape list
    pub shape: usize,
}

/// One recorded contact between two bodies during a sub-step
///
/// Created fresh for each colliding shape pair and dropped when the
/// bodies' collision lists are cleared at the start of the next sub-step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Unit normal pointing from `body_a` toward `body_b`
    pub normal: Vec2,
    /// Penetration depth along `normal`
    pub depth: f32,
    /// Shape whose face produced `normal`
    pub normal_owner: ShapeRef,
    /// The side pushed against; the non-dynamic body when exactly one is dynamic
    pub body_a: BodyHandle,
    /// The other side
    pub body_b: BodyHandle,
    /// The body on the far side from whoever holds this record
    pub other: BodyHandle,
}

impl Collision {
    /// Build a record from a manifold whose normal points from `a` to `b`
    pub fn new(manifold: &ContactManifold, a: ShapeRef, b: ShapeRef) -> Self {
        let normal_owner = match manifold.normal_owner {
            NormalOwner::A => a,
            NormalOwner::B => b,
        };
        Self {
            normal: manifold.normal,
            depth: manifold.depth,
            normal_owner,
            body_a: a.body,
            body_b: b.body,
            other: b.body,
        }
    }

    /// Copy of this record as seen by `body`, with `other` filled in
    pub fn for_body(&self, body: BodyHandle) -> Self {
        let other = if self.body_a == body { self.body_b } else { self.body_a };
        Self { other, ..*self }
    }

    /// Contact normal pointing away from `body`, toward the other participant
    pub fn normal_from(&self, body: BodyHandle) -> Vec2 {
        if self.body_a == body {
            self.normal
        } else {
            -self.normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn at(x: f32, y: f32) -> TransformComponent {
        TransformComponent::from_position(Vec2::new(x, y))
    }

    fn diamond(half_diagonal: f32) -> Shape {
        Shape::new(vec![
            Vec2::new(0.0, half_diagonal),
            Vec2::new(half_diagonal, 0.0),
            Vec2::new(0.0, -half_diagonal),
            Vec2::new(-half_diagonal, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_separated_squares_do_not_collide() {
        let quad = Shape::quad();
        assert!(sat_test(&quad, &at(0.0, 0.0), &quad, &at(1.5, 0.0)).is_none());
    }

    #[test]
    fn test_touching_squares_do_not_collide() {
        let quad = Shape::quad();
        assert!(sat_test(&quad, &at(0.0, 0.0), &quad, &at(1.0, 0.0)).is_none());
    }

    #[test]
    fn test_overlapping_squares_collide() {
        let quad = Shape::quad();
        let contact = sat_test(&quad, &at(0.0, 0.0), &quad, &at(0.9, 0.0)).expect("squares overlap");

        assert_abs_diff_eq!(contact.depth, 0.1, epsilon = 1e-5);
        assert_abs_diff_eq!(contact.normal.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(contact.normal.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normal_points_from_a_to_b() {
        let quad = Shape::quad();
        let contact = sat_test(&quad, &at(0.0, 0.0), &quad, &at(-0.9, 0.0)).unwrap();
        assert_abs_diff_eq!(contact.normal.x, -1.0, epsilon = 1e-6);

        let contact = sat_test(&quad, &at(0.0, 0.0), &quad, &at(0.1, -0.8)).unwrap();
        assert_abs_diff_eq!(contact.depth, 0.2, epsilon = 1e-5);
        assert_abs_diff_eq!(contact.normal.y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_single_separating_axis_is_enough() {
        // A diamond off the square's corner: overlaps on both of the square's
        // axes, separated only along the diamond's first face normal
        let square = Shape::quad();
        let diamond = diamond(0.5);
        let (ta, tb) = (at(0.0, 0.0), at(0.85, 0.85));

        for axis in [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)] {
            let a_max = square.cast_along_max(&axis, &ta);
            let b_min = diamond.cast_along_min(&axis, &tb) + 0.85;
            assert!(a_max > b_min, "square axes must overlap");
        }

        assert!(sat_test(&square, &ta, &diamond, &tb).is_none());
    }

    #[test]
    fn test_normal_owner_can_be_b() {
        let diamond = diamond(0.5f32.sqrt());
        let quad = Shape::quad();
        let contact = sat_test(&diamond, &at(0.0, 0.0), &quad, &at(1.2, 0.0)).unwrap();

        assert_eq!(contact.normal_owner, NormalOwner::B);
        assert_abs_diff_eq!(contact.depth, 0.5f32.sqrt() + 0.5 - 1.2, epsilon = 1e-5);
        assert_abs_diff_eq!(contact.normal.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_equal_depths_keep_first_axis() {
        let quad = Shape::quad();
        let contact = sat_test(&quad, &at(0.0, 0.0), &quad, &at(0.0, 0.9)).unwrap();
        assert_eq!(contact.normal_owner, NormalOwner::A);
    }

    #[test]
    fn test_projection_scales_then_rotates() {
        // Scale (4, 1) then a quarter turn stands the box 4 tall. Rotating
        // first would lie it flat and miss the square above it.
        let quad = Shape::quad();
        let tall = TransformComponent::identity()
            .with_scale(Vec2::new(4.0, 1.0))
            .with_rotation(crate::foundation::math::constants::HALF_PI);

        let contact = sat_test(&quad, &tall, &quad, &at(0.0, 2.3)).expect("tall box reaches the square");
        assert_abs_diff_eq!(contact.depth, 0.2, epsilon = 1e-4);
        assert_abs_diff_eq!(contact.normal.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_shape_offset_moves_the_center() {
        let quad = Shape::quad();
        let shifted = Shape::quad().with_offset(Vec2::new(2.0, 0.0));
        assert!(sat_test(&quad, &at(0.0, 0.0), &quad, &at(2.9, 0.0)).is_none());

        let contact = sat_test(&shifted, &at(0.0, 0.0), &quad, &at(2.9, 0.0)).unwrap();
        assert_abs_diff_eq!(contact.depth, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_flipped_manifold() {
        let quad = Shape::quad();
        let contact = sat_test(&quad, &at(0.0, 0.0), &quad, &at(0.9, 0.0)).unwrap();
        let flipped = contact.flipped();
        assert_eq!(flipped.normal, -contact.normal);
        assert_eq!(flipped.normal_owner, NormalOwner::B);
        assert_eq!(flipped.depth, contact.depth);
    }
}
