//! Headless drop demo
//!
//! Boxes fall onto a floor, one lands on a one-way ledge, another jumps up
//! through it, and a trigger zone reports whoever passes. Frames use a
//! jittered delta to show that the fixed sub-steps absorb uneven timing.

use std::collections::HashSet;

use planar_engine::prelude::*;
use planar_engine::foundation::logging::LevelFilter;
use rand::prelude::*;

const FRAMES: u32 = 240;
const FRAME_TIME: f32 = 1.0 / 60.0;
const JITTER: f32 = 0.004;
const RNG_SEED: u64 = 0x5eed;
/// Contacts whose normal points at least this far downward hold a box up
const RESTING_SLOPE: f32 = 0.7;

fn build_level(engine: &mut Engine) -> Result<(Vec<(Entity, BodyHandle)>, BodyHandle), EngineError> {
    engine.spawn_body(
        TransformComponent::identity(),
        Shape::rectangle(20.0, 1.0)?,
        BodyDesc::fixed().with_friction(0.6).with_layers(CollisionLayers::DEFAULT | CollisionLayers::ENVIRONMENT),
    )?;

    engine.spawn_body(
        TransformComponent::from_position(Vec2::new(4.0, 3.0)),
        Shape::rectangle(4.0, 0.2)?,
        BodyDesc::fixed().with_one_way(OneWay::new(Vec2::new(0.0, 1.0), 0.15)?),
    )?;

    let (_, zone) = engine.spawn_body(
        TransformComponent::from_position(Vec2::new(-4.0, 1.5)),
        Shape::rectangle(2.0, 2.0)?,
        TriggerBody::desc("checkpoint"),
    )?;

    let mut boxes = Vec::new();
    let drops = [
        (Vec2::new(-4.0, 6.0), Vec2::zeros(), 0.2),
        (Vec2::new(0.0, 8.0), Vec2::new(0.5, 0.0), 0.8),
        (Vec2::new(4.0, 6.0), Vec2::zeros(), 0.0),
        (Vec2::new(4.5, 1.0), Vec2::new(0.0, 9.0), 0.0),
    ];
    for (index, (position, velocity, bounce)) in drops.into_iter().enumerate() {
        let spawned = engine.spawn_body(
            TransformComponent::from_position(position).with_uniform_scale(0.8),
            Shape::quad(),
            BodyDesc::dynamic()
                .with_bounce(bounce)
                .with_friction(0.4)
                .with_velocity(velocity)
                .with_tag(format!("box-{index}")),
        )?;
        boxes.push(spawned);
    }

    Ok((boxes, zone))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(LevelFilter::Info);

    let mut engine = Engine::new(EngineConfig::default())?;
    let (boxes, zone) = build_level(&mut engine)?;
    log::info!("Level built: {} bodies", engine.physics.body_count());

    let mut rng = StdRng::seed_from_u64(RNG_SEED);
    let mut total_steps = 0;
    let mut inside: HashSet<BodyHandle> = HashSet::new();

    for frame in 0..FRAMES {
        let delta = FRAME_TIME + rng.gen_range(-JITTER..JITTER);
        total_steps += engine.update(delta);

        if let Some(trigger) = engine.physics.body(zone) {
            let now: HashSet<BodyHandle> = trigger.collisions().iter().map(|collision| collision.other).collect();
            for entered in now.difference(&inside) {
                if let Some(visitor) = engine.physics.body(*entered) {
                    log::info!("Frame {}: '{}' entered '{}'", frame, visitor.tag(), trigger.tag());
                }
            }
            for left in inside.difference(&now) {
                if let Some(visitor) = engine.physics.body(*left) {
                    log::info!("Frame {}: '{}' left '{}'", frame, visitor.tag(), trigger.tag());
                }
            }
            inside = now;
        }

        if frame % 60 == 59 {
            for (entity, handle) in &boxes {
                let (Some(transform), Some(body)) = (
                    engine.scene.get_component::<TransformComponent>(*entity),
                    engine.body_of(*entity),
                ) else {
                    continue;
                };
                let resting = body
                    .collisions()
                    .iter()
                    .any(|collision| collision.normal_from(*handle).y < -RESTING_SLOPE);
                log::info!(
                    "Frame {}: {} at ({:.3}, {:.3}) moving ({:.3}, {:.3}){}",
                    frame,
                    body.tag(),
                    transform.position.x,
                    transform.position.y,
                    body.velocity().x,
                    body.velocity().y,
                    if resting { ", resting" } else { "" }
                );
            }
            log::debug!("Last update: {:?}", engine.physics.stats());
        }
    }

    log::info!("Simulated {} frames in {} physics sub-steps", FRAMES, total_steps);
    Ok(())
}
