//! Convex polygon shapes
//!
//! Shapes are stored in local space and evaluated against whatever
//! transform the owning body supplies. Edges, normals and the broad-phase
//! radius are computed once on construction.

use super::PhysicsError;
use crate::ecs::components::TransformComponent;
use crate::foundation::math::{utils, Vec2};

/// An immutable convex polygon
///
/// Points are joined in the order given and are expected to run clockwise,
/// so that `perpendicular(edge)` points outward. Concave loops are not
/// detected; the collision test assumes convexity.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    points: Vec<Vec2>,
    edges: Vec<Vec2>,
    normals: Vec<Vec2>,
    offset: Vec2,
    broad_phase_radius: f32,
}

impl Shape {
    /// Build a shape from a clockwise vertex loop
    pub fn new(points: Vec<Vec2>) -> Result<Self, PhysicsError> {
        if points.len() < 3 {
            return Err(PhysicsError::DegenerateShape { points: points.len() });
        }

        let count = points.len();
        let mut edges = Vec::with_capacity(count);
        let mut normals = Vec::with_capacity(count);
        let mut broad_phase_radius = 0.0f32;

        for (index, point) in points.iter().enumerate() {
            let edge = points[(index + 1) % count] - point;
            let normal = utils::perpendicular(&edge)
                .try_normalize(f32::EPSILON)
                .ok_or(PhysicsError::DegenerateEdge { index })?;

            broad_phase_radius = broad_phase_radius.max(point.norm());
            edges.push(edge);
            normals.push(normal);
        }

        Ok(Self {
            points,
            edges,
            normals,
            offset: Vec2::zeros(),
            broad_phase_radius,
        })
    }

    /// Unit square centered on the origin
    pub fn quad() -> Self {
        Self::square_unchecked(0.5, 0.5)
    }

    /// Axis-aligned rectangle centered on the origin
    pub fn rectangle(width: f32, height: f32) -> Result<Self, PhysicsError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(PhysicsError::InvalidDimensions { width, height });
        }
        Ok(Self::square_unchecked(width * 0.5, height * 0.5))
    }

    fn square_unchecked(half_width: f32, half_height: f32) -> Self {
        let points = vec![
            Vec2::new(-half_width, half_height),
            Vec2::new(half_width, half_height),
            Vec2::new(half_width, -half_height),
            Vec2::new(-half_width, -half_height),
        ];
        let edges = vec![
            Vec2::new(2.0 * half_width, 0.0),
            Vec2::new(0.0, -2.0 * half_height),
            Vec2::new(-2.0 * half_width, 0.0),
            Vec2::new(0.0, 2.0 * half_height),
        ];
        let normals = vec![
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(-1.0, 0.0),
        ];
        Self {
            points,
            edges,
            normals,
            offset: Vec2::zeros(),
            broad_phase_radius: Vec2::new(half_width, half_height).norm(),
        }
    }

    /// Builder pattern: place the shape away from the body origin
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Local vertex loop
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// `edges[i] = points[i + 1] - points[i]`, wrapping
    pub fn edges(&self) -> &[Vec2] {
        &self.edges
    }

    /// Unit outward face normals, one per edge
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Local offset from the body origin
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Largest distance from the shape origin to any point, unscaled
    pub fn broad_phase_radius(&self) -> f32 {
        self.broad_phase_radius
    }

    /// Broad-phase circle radius under `transform`'s scale
    pub fn get_bp(&self, transform: &TransformComponent) -> f32 {
        self.broad_phase_radius * utils::max_abs_component(&transform.scale)
    }

    /// Shape origin in world space
    pub fn get_center(&self, transform: &TransformComponent) -> Vec2 {
        transform.position + transform.scale_rotate(&self.offset)
    }

    /// Largest signed projection of the scaled, rotated points onto `normal`
    ///
    /// Measured from the shape origin. This is the support function used by
    /// the separating-axis test.
    pub fn cast_along_max(&self, normal: &Vec2, transform: &TransformComponent) -> f32 {
        self.points
            .iter()
            .map(|p| transform.scale_rotate(p).dot(normal))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Smallest signed projection of the scaled, rotated points onto `normal`
    pub fn cast_along_min(&self, normal: &Vec2, transform: &TransformComponent) -> f32 {
        self.points
            .iter()
            .map(|p| transform.scale_rotate(p).dot(normal))
            .fold(f32::INFINITY, f32::min)
    }

    /// Face normals rotated into world space
    ///
    /// Only rotation is applied. Under non-uniform scale the true face
    /// normals would also skew; that approximation is kept.
    pub fn world_normals(&self, transform: &TransformComponent) -> impl Iterator<Item = Vec2> + '_ {
        let rotation = transform.rotation;
        self.normals.iter().map(move |n| utils::rotate(n, rotation))
    }
}
