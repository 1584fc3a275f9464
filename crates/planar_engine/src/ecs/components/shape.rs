//! Shape component: the collision outline(s) of an entity

use crate::physics::Shape;

/// One or more convex shapes, in the entity's local space
///
/// A body attached to the entity copies these at attachment time.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeComponent {
    shapes: Vec<Shape>,
}

impl ShapeComponent {
    /// A component holding a single shape
    pub fn new(shape: Shape) -> Self {
        Self { shapes: vec![shape] }
    }

    /// Builder pattern: add another shape
    pub fn with(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Append a shape
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// All shapes, in insertion order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Whether the component holds no shapes
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl From<Shape> for ShapeComponent {
    fn from(shape: Shape) -> Self {
        Self::new(shape)
    }
}

impl FromIterator<Shape> for ShapeComponent {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        Self { shapes: iter.into_iter().collect() }
    }
}
