//! Scene bookkeeping tests

use crate::ecs::components::{BodyComponent, ShapeComponent, TransformComponent};
use crate::ecs::{ComponentKind, EcsError, Scene};
use crate::foundation::math::Vec2;
use crate::physics::{BodyDesc, EntityLookup, Shape, World};

#[test]
fn test_create_and_destroy_entities() {
    let mut scene = Scene::new();
    let first = scene.create_entity();
    let second = scene.create_entity();
    assert_eq!(scene.entity_count(), 2);

    assert!(scene.destroy_entity(first));
    assert!(!scene.destroy_entity(first));
    assert!(!scene.contains(first));
    assert_eq!(scene.entities().collect::<Vec<_>>(), vec![second]);
}

#[test]
fn test_destroyed_keys_are_not_reused() {
    let mut scene = Scene::new();
    let stale = scene.create_entity();
    scene.destroy_entity(stale);

    let fresh = scene.create_entity();
    assert_ne!(stale, fresh);
    assert!(!scene.contains(stale));
}

#[test]
fn test_components_need_a_live_entity() {
    let mut scene = Scene::new();
    let entity = scene.create_entity();
    scene.destroy_entity(entity);

    assert_eq!(
        scene.add_component(entity, TransformComponent::identity()),
        Err(EcsError::NoSuchEntity(entity))
    );
}

#[test]
fn test_component_lifecycle() {
    let mut scene = Scene::new();
    let entity = scene.create_entity();
    scene
        .add_component(entity, TransformComponent::from_position(Vec2::new(1.0, 2.0)))
        .unwrap();
    scene.add_component(entity, ShapeComponent::new(Shape::quad())).unwrap();
    assert_eq!(scene.kinds(entity), vec![ComponentKind::Transform, ComponentKind::Shape]);

    scene
        .get_component_mut::<TransformComponent>(entity)
        .unwrap()
        .position
        .x = 4.0;
    assert_eq!(
        scene.get_component::<TransformComponent>(entity).unwrap().position,
        Vec2::new(4.0, 2.0)
    );

    assert!(scene.remove_component::<ShapeComponent>(entity).is_some());
    assert!(!scene.has_component::<ShapeComponent>(entity));
}

#[test]
fn test_destroy_drops_components() {
    let mut scene = Scene::new();
    let mut world = World::default();
    let entity = scene.create_entity();
    scene.add_component(entity, TransformComponent::identity()).unwrap();
    scene.add_component(entity, ShapeComponent::new(Shape::quad())).unwrap();
    let handle = world.create_body(&scene, entity, BodyDesc::dynamic()).unwrap();
    scene.add_component(entity, BodyComponent::new(handle)).unwrap();

    scene.destroy_entity(entity);
    let revived = scene.create_entity();
    assert!(scene.kinds(revived).is_empty());
    assert!(scene.get_component::<BodyComponent>(entity).is_none());
}

#[test]
fn test_scene_as_entity_lookup() {
    let mut scene = Scene::new();
    let entity = scene.create_entity();
    scene.add_component(entity, TransformComponent::identity()).unwrap();

    assert!(EntityLookup::contains(&scene, entity));
    assert!(scene.shapes(entity).is_none());
    scene.transform_mut(entity).unwrap().position = Vec2::new(0.0, 3.0);
    assert_eq!(scene.transform(entity).unwrap().position, Vec2::new(0.0, 3.0));
}
