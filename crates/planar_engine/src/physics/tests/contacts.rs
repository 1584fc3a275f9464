//! Contact recording, resolution and one-way surfaces

use approx::assert_abs_diff_eq;

use super::{floor, position, spawn, weightless_world};
use crate::ecs::{Entity, Scene};
use crate::foundation::math::Vec2;
use crate::physics::{BodyDesc, BodyHandle, OneWay, Shape, TriggerBody, World};

fn landing_velocity(bounce: f32) -> f32 {
    let mut scene = Scene::new();
    let mut world = weightless_world();

    let ground = spawn(&mut scene, Vec2::zeros(), floor());
    world.create_body(&scene, ground, BodyDesc::fixed()).unwrap();
    let entity = spawn(&mut scene, Vec2::new(0.0, 0.95), Shape::quad());
    let handle = world
        .create_body(
            &scene,
            entity,
            BodyDesc::dynamic().with_bounce(bounce).with_velocity(Vec2::new(0.0, -2.0)),
        )
        .unwrap();

    let step = world.step_length();
    world.update(&mut scene, step);

    assert_eq!(world.stats().resolved, 1);
    assert_abs_diff_eq!(position(&scene, entity).y, 1.0, epsilon = 1e-4);
    world.body(handle).unwrap().velocity().y
}

#[test]
fn test_zero_bounce_landing_stops() {
    assert_abs_diff_eq!(landing_velocity(0.0), 0.0, epsilon = 1e-6);
}

#[test]
fn test_full_bounce_landing_reverses() {
    assert_abs_diff_eq!(landing_velocity(1.0), 2.0, epsilon = 1e-5);
}

#[test]
fn test_trigger_records_overlap_without_response() {
    let mut scene = Scene::new();
    let mut world = weightless_world();

    let zone = spawn(&mut scene, Vec2::zeros(), Shape::quad());
    let trigger = world.create_body(&scene, zone, TriggerBody::desc("zone")).unwrap();
    let visitor = spawn(&mut scene, Vec2::new(0.5, 0.0), Shape::quad());
    let body = world.create_body(&scene, visitor, BodyDesc::dynamic()).unwrap();

    let step = world.step_length();
    world.update(&mut scene, step);

    assert_eq!(position(&scene, visitor), Vec2::new(0.5, 0.0));
    assert_eq!(world.body(body).unwrap().velocity(), Vec2::zeros());
    assert_eq!(world.stats().contacts, 1);
    assert_eq!(world.stats().resolved, 0);

    let seen_by_visitor = world.body(body).unwrap().get_collision(trigger).copied().unwrap();
    let seen_by_trigger = world.body(trigger).unwrap().get_collision(body).copied().unwrap();
    assert_eq!(seen_by_visitor.body_a, trigger);
    assert_eq!(seen_by_visitor.other, trigger);
    assert_eq!(seen_by_trigger.other, body);
    assert_abs_diff_eq!(seen_by_trigger.normal.x, 1.0, epsilon = 1e-6);
    assert_eq!(world.body(trigger).unwrap().tag(), "zone");
}

#[test]
fn test_collisions_clear_each_sub_step() {
    let mut scene = Scene::new();
    let mut world = weightless_world();

    let zone = spawn(&mut scene, Vec2::zeros(), Shape::quad());
    let trigger = world.create_body(&scene, zone, TriggerBody::desc("zone")).unwrap();
    let visitor = spawn(&mut scene, Vec2::new(0.5, 0.0), Shape::quad());
    let body = world.create_body(&scene, visitor, BodyDesc::dynamic()).unwrap();

    let step = world.step_length();
    world.update(&mut scene, step);
    assert!(world.body(trigger).unwrap().is_colliding());

    // Leaves the zone within the next sub-step
    world.body_mut(body).unwrap().set_velocity(Vec2::new(120.0, 0.0));
    world.update(&mut scene, step);
    assert!(!world.body(trigger).unwrap().is_colliding());
    assert!(!world.body(body).unwrap().is_colliding());
}

#[test]
fn test_fixed_body_is_side_a_regardless_of_order() {
    let mut scene = Scene::new();
    let mut world = weightless_world();

    let entity = spawn(&mut scene, Vec2::new(0.0, 0.95), Shape::quad());
    let falling = world
        .create_body(&scene, entity, BodyDesc::dynamic().with_velocity(Vec2::new(0.0, -2.0)))
        .unwrap();
    let ground = spawn(&mut scene, Vec2::zeros(), floor());
    let ground_body = world.create_body(&scene, ground, BodyDesc::fixed()).unwrap();

    let step = world.step_length();
    world.update(&mut scene, step);

    let collision = world.body(falling).unwrap().get_collision(ground_body).copied().unwrap();
    assert_eq!(collision.body_a, ground_body);
    assert_eq!(collision.body_b, falling);
    assert_eq!(collision.normal_owner.body, ground_body);
    assert_abs_diff_eq!(collision.normal.y, 1.0, epsilon = 1e-6);
    assert_eq!(position(&scene, ground), Vec2::zeros());

    // Each side sees the normal pointing at the other
    assert_abs_diff_eq!(collision.normal_from(falling).y, -1.0, epsilon = 1e-6);
    let seen_by_ground = world.body(ground_body).unwrap().get_collision(falling).copied().unwrap();
    assert_abs_diff_eq!(seen_by_ground.normal_from(ground_body).y, 1.0, epsilon = 1e-6);
}

#[test]
fn test_earlier_dynamic_body_is_side_a() {
    let mut scene = Scene::new();
    let mut world = weightless_world();

    let left = spawn(&mut scene, Vec2::zeros(), Shape::quad());
    let first = world.create_body(&scene, left, BodyDesc::dynamic()).unwrap();
    let right = spawn(&mut scene, Vec2::new(0.9, 0.0), Shape::quad());
    let second = world.create_body(&scene, right, BodyDesc::dynamic()).unwrap();

    let step = world.step_length();
    world.update(&mut scene, step);

    let collision = world.body(second).unwrap().get_collision(first).copied().unwrap();
    assert_eq!(collision.body_a, first);
    assert_abs_diff_eq!(collision.normal.x, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(collision.depth, 0.1, epsilon = 1e-5);

    // Split evenly, neither was approaching so velocities stay zero
    assert_abs_diff_eq!(position(&scene, left).x, -0.05, epsilon = 1e-4);
    assert_abs_diff_eq!(position(&scene, right).x, 0.95, epsilon = 1e-4);
    assert_eq!(world.body(first).unwrap().velocity(), Vec2::zeros());
}

#[test]
fn test_head_on_equal_masses_swap_velocities() {
    let mut scene = Scene::new();
    let mut world = weightless_world();

    let left = spawn(&mut scene, Vec2::zeros(), Shape::quad());
    let first = world
        .create_body(&scene, left, BodyDesc::dynamic().with_velocity(Vec2::new(1.0, 0.0)))
        .unwrap();
    let right = spawn(&mut scene, Vec2::new(0.98, 0.0), Shape::quad());
    let second = world
        .create_body(&scene, right, BodyDesc::dynamic().with_velocity(Vec2::new(-1.0, 0.0)))
        .unwrap();

    let step = world.step_length();
    world.update(&mut scene, step);

    assert_abs_diff_eq!(world.body(first).unwrap().velocity().x, -1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(world.body(second).unwrap().velocity().x, 1.0, epsilon = 1e-5);

    let total = world.body(first).unwrap().momentum() + world.body(second).unwrap().momentum();
    assert_abs_diff_eq!(total.x, 0.0, epsilon = 1e-5);
}

fn platform_scene(start: Vec2, velocity: Vec2) -> (Scene, World, Entity, BodyHandle) {
    let mut scene = Scene::new();
    let mut world = weightless_world();

    let ledge = spawn(&mut scene, Vec2::zeros(), Shape::rectangle(4.0, 0.2).unwrap());
    let one_way = OneWay::new(Vec2::new(0.0, 1.0), 0.1).unwrap();
    world
        .create_body(&scene, ledge, BodyDesc::fixed().with_one_way(one_way))
        .unwrap();

    let entity = spawn(&mut scene, start, Shape::quad());
    let handle = world
        .create_body(&scene, entity, BodyDesc::dynamic().with_bounce(0.0).with_velocity(velocity))
        .unwrap();

    (scene, world, entity, handle)
}

#[test]
fn test_one_way_platform_lets_bodies_jump_through() {
    let (mut scene, mut world, entity, handle) = platform_scene(Vec2::new(0.0, -1.0), Vec2::new(0.0, 5.0));

    let step = world.step_length();
    let mut rejected = 0;
    for _ in 0..40 {
        world.update(&mut scene, step);
        rejected += world.stats().one_way_rejections;
        assert_eq!(world.stats().resolved, 0);
    }

    assert!(rejected > 0);
    assert_eq!(world.body(handle).unwrap().velocity(), Vec2::new(0.0, 5.0));
    assert_abs_diff_eq!(position(&scene, entity).y, -1.0 + 40.0 * 5.0 * step, epsilon = 1e-3);
}

#[test]
fn test_one_way_platform_catches_bodies_from_above() {
    let (mut scene, mut world, entity, handle) = platform_scene(Vec2::new(0.0, 0.65), Vec2::new(0.0, -3.0));

    let step = world.step_length();
    for _ in 0..5 {
        world.update(&mut scene, step);
    }

    assert_abs_diff_eq!(position(&scene, entity).y, 0.6, epsilon = 1e-3);
    assert_abs_diff_eq!(world.body(handle).unwrap().velocity().y, 0.0, epsilon = 1e-6);
}

#[test]
fn test_one_way_platform_ignores_side_entry() {
    let (mut scene, mut world, entity, handle) = platform_scene(Vec2::new(-2.6, 0.0), Vec2::new(3.0, 0.0));

    let step = world.step_length();
    for _ in 0..20 {
        world.update(&mut scene, step);
    }

    assert_eq!(world.body(handle).unwrap().velocity(), Vec2::new(3.0, 0.0));
    assert_abs_diff_eq!(position(&scene, entity).x, -2.6 + 20.0 * 3.0 * step, epsilon = 1e-3);
    assert_abs_diff_eq!(position(&scene, entity).y, 0.0, epsilon = 1e-6);
}
