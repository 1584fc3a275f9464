//! ECS Components module
//!
//! Pure data components consumed by the physics world.

pub mod transform;
pub mod shape;
pub mod body;

pub use transform::TransformComponent;
pub use shape::ShapeComponent;
pub use body::BodyComponent;
