//! Whole-world scenarios driven through a [`Scene`](crate::ecs::Scene)

mod contacts;

use crate::ecs::components::{ShapeComponent, TransformComponent};
use crate::ecs::{Entity, Scene};
use crate::foundation::math::Vec2;
use crate::physics::{PhysicsConfig, Shape, World};

fn spawn(scene: &mut Scene, position: Vec2, shape: Shape) -> Entity {
    let entity = scene.create_entity();
    scene
        .add_component(entity, TransformComponent::from_position(position))
        .unwrap();
    scene.add_component(entity, ShapeComponent::new(shape)).unwrap();
    entity
}

fn position(scene: &Scene, entity: Entity) -> Vec2 {
    scene.get_component::<TransformComponent>(entity).unwrap().position
}

fn weightless_world() -> World {
    World::new(PhysicsConfig::default().with_gravity(Vec2::zeros())).unwrap()
}

fn floor() -> Shape {
    Shape::rectangle(10.0, 1.0).unwrap()
}
