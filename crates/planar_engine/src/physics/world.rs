//! Physics world: body registry and fixed-timestep stepper
//!
//! Each sub-step runs in two phases:
//!
//! 1. Integration: every registered body updates its velocity (gravity and
//!    accumulated force, dynamic bodies only) and moves by it.
//! 2. Collision: every unordered pair of registered bodies is filtered, then
//!    every shape pair goes through the broad phase (bounding circles) and
//!    the separating-axis test. Surviving contacts are recorded on both
//!    bodies and, unless a trigger is involved, resolved immediately.
//!
//! Pairs are visited in registration order, `(i, j)` with `j < i`, and
//! contacts are resolved sequentially, so results are deterministic for a
//! given registration order and sequence of `update` deltas.
//!
//! All bodies of one entity move a single working copy of its transform:
//! displacements from any of them add up, and each is tested where the
//! entity currently is.

use slotmap::{SecondaryMap, SlotMap};

use super::collision::{sat_test, Collision, ShapeRef};
use super::resolve::{resolve, ContactBody};
use super::{Body, BodyDesc, BodyHandle, EntityLookup, PhysicsConfig, PhysicsError};
use crate::ecs::components::TransformComponent;
use crate::ecs::Entity;
use crate::foundation::math::Vec2;

/// Counters for the latest `update` call
///
/// Reset at the start of every `update`; summed over all of its sub-steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Sub-steps executed
    pub sub_steps: u32,
    /// Body pairs visited
    pub pairs_considered: u32,
    /// Body pairs skipped by layer, dynamic, trigger or owner filters
    pub pairs_filtered: u32,
    /// Shape pairs whose bounding circles did not overlap
    pub broad_phase_rejections: u32,
    /// Shape pairs that reached the separating-axis test
    pub narrow_phase_tests: u32,
    /// Shape pairs found overlapping
    pub contacts: u32,
    /// Contacts dropped by a one-way body
    pub one_way_rejections: u32,
    /// Contacts that received a physical response
    pub resolved: u32,
}

/// Why a body pair was skipped before any shape test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairFilter {
    NoSharedLayer,
    BothFixed,
    BothTriggers,
    SameOwner,
}

fn pair_filter(a: &Body, b: &Body) -> Option<PairFilter> {
    if !a.shares_layer(b) {
        Some(PairFilter::NoSharedLayer)
    } else if !a.is_dynamic() && !b.is_dynamic() {
        Some(PairFilter::BothFixed)
    } else if a.is_trigger() && b.is_trigger() {
        Some(PairFilter::BothTriggers)
    } else if a.entity() == b.entity() {
        Some(PairFilter::SameOwner)
    } else {
        None
    }
}

/// Working copy of one entity's transform for one `update`
struct Pose {
    entity: Entity,
    transform: TransformComponent,
}

/// A registered body and the pose it moves
struct Slot {
    handle: BodyHandle,
    pose: usize,
}

/// Per-`update` working state
///
/// Bodies sharing an entity share one pose, so every displacement applied
/// to any of them moves the whole entity.
#[derive(Default)]
struct Frame {
    poses: Vec<Pose>,
    slots: Vec<Slot>,
}

impl Frame {
    fn transform(&self, slot: usize) -> &TransformComponent {
        &self.poses[self.slots[slot].pose].transform
    }

    fn displace(&mut self, slot: usize, displacement: Vec2) {
        let pose = self.slots[slot].pose;
        self.poses[pose].transform.position += displacement;
    }
}

/// The simulation: owns bodies and advances them in fixed sub-steps
pub struct World {
    config: PhysicsConfig,
    bodies: SlotMap<BodyHandle, Body>,
    registered: Vec<BodyHandle>,
    timer: f32,
    stats: StepStats,
}

impl Default for World {
    fn default() -> Self {
        Self {
            config: PhysicsConfig::default(),
            bodies: SlotMap::with_key(),
            registered: Vec::new(),
            timer: 0.0,
            stats: StepStats::default(),
        }
    }
}

impl World {
    /// Create an empty world
    pub fn new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        log::info!(
            "Creating physics world: gravity {:?}, step {}s, max sub-steps {}",
            config.gravity,
            config.step_length,
            config.max_sub_steps
        );
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Active settings
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Gravity applied to dynamic bodies
    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    /// Change gravity
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    /// Fixed sub-step length
    pub fn step_length(&self) -> f32 {
        self.config.step_length
    }

    /// Time accumulated but not yet simulated, always `< step_length`
    /// after `update` returns
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Counters for the latest `update`
    pub fn stats(&self) -> &StepStats {
        &self.stats
    }

    /// Build a body for `entity` and register it
    ///
    /// The entity must exist and have a transform. Shapes come from the
    /// description when it carries any, otherwise from the entity's shape
    /// component.
    pub fn create_body<L: EntityLookup + ?Sized>(
        &mut self,
        lookup: &L,
        entity: Entity,
        desc: BodyDesc,
    ) -> Result<BodyHandle, PhysicsError> {
        if !lookup.contains(entity) {
            return Err(PhysicsError::UnknownEntity(entity));
        }
        if lookup.transform(entity).is_none() {
            return Err(PhysicsError::MissingTransform(entity));
        }

        let shapes = match &desc.shapes {
            Some(shapes) if !shapes.is_empty() => shapes.clone(),
            _ => lookup
                .shapes(entity)
                .filter(|component| !component.is_empty())
                .map(|component| component.shapes().to_vec())
                .ok_or(PhysicsError::MissingShape(entity))?,
        };

        let body = Body::new(entity, shapes, &desc)?;
        let handle = self.bodies.insert(body);
        self.registered.push(handle);

        log::debug!(
            "Registered body {:?} for entity {:?} (dynamic: {}, trigger: {}, tag: '{}')",
            handle,
            entity,
            desc.dynamic,
            desc.trigger,
            desc.tag
        );
        Ok(handle)
    }

    /// Put a previously removed body back into the simulation
    ///
    /// Adding an already registered body does nothing.
    pub fn add_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        if !self.bodies.contains_key(handle) {
            return Err(PhysicsError::UnknownBody(handle));
        }
        if self.registered.contains(&handle) {
            log::trace!("Body {:?} is already registered", handle);
        } else {
            self.registered.push(handle);
            log::debug!("Re-registered body {:?}", handle);
        }
        Ok(())
    }

    /// Take a body out of the simulation, keeping it for a later `add_body`
    ///
    /// Returns whether the body was registered.
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        let before = self.registered.len();
        self.registered.retain(|registered| *registered != handle);
        let removed = before != self.registered.len();
        if removed {
            log::debug!("Unregistered body {:?}", handle);
        }
        removed
    }

    /// Remove a body for good and return it
    pub fn destroy_body(&mut self, handle: BodyHandle) -> Option<Body> {
        self.remove_body(handle);
        self.bodies.remove(handle)
    }

    /// Destroy every body owned by `entity`; returns how many were removed
    pub fn remove_entity(&mut self, entity: Entity) -> usize {
        let owned: Vec<BodyHandle> = self
            .bodies
            .iter()
            .filter(|(_, body)| body.entity() == entity)
            .map(|(handle, _)| handle)
            .collect();

        for handle in &owned {
            self.destroy_body(*handle);
        }
        if !owned.is_empty() {
            log::debug!("Removed {} bodies of entity {:?}", owned.len(), entity);
        }
        owned.len()
    }

    /// Whether the body takes part in the simulation
    pub fn is_registered(&self, handle: BodyHandle) -> bool {
        self.registered.contains(&handle)
    }

    /// Whether the world owns the body, registered or not
    pub fn contains_body(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(handle)
    }

    /// Get a body
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    /// Get a mutable body
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    /// Registered bodies in registration order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.registered
            .iter()
            .filter_map(move |handle| self.bodies.get(*handle).map(|body| (*handle, body)))
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.registered.len()
    }

    /// Advance the simulation by `delta` seconds
    ///
    /// Adds `delta` to the accumulator and runs one sub-step per whole
    /// `step_length` it holds; the remainder carries over. Returns the
    /// number of sub-steps run.
    pub fn update<L: EntityLookup + ?Sized>(&mut self, lookup: &mut L, delta: f32) -> u32 {
        self.stats = StepStats::default();

        if !(delta >= 0.0 && delta.is_finite()) {
            log::warn!("Ignoring invalid physics delta {}", delta);
            return 0;
        }

        self.timer += delta;
        let step_length = self.config.step_length;
        if self.timer < step_length {
            return 0;
        }

        let mut frame = self.gather(lookup);
        let mut sub_steps = 0;

        while self.timer >= step_length {
            if self.config.max_sub_steps != 0 && sub_steps >= self.config.max_sub_steps {
                let dropped = (self.timer / step_length).floor();
                self.timer %= step_length;
                log::warn!(
                    "Physics fell behind: dropped {} sub-steps after running {}",
                    dropped,
                    sub_steps
                );
                break;
            }

            self.timer -= step_length;
            self.sub_step(&mut frame);
            sub_steps += 1;
        }

        Self::write_back(lookup, &frame);
        self.stats.sub_steps = sub_steps;

        log::trace!("Physics update: {:?}", self.stats);
        sub_steps
    }

    fn gather<L: EntityLookup + ?Sized>(&self, lookup: &L) -> Frame {
        let mut frame = Frame::default();
        let mut pose_of: SecondaryMap<Entity, usize> = SecondaryMap::new();

        for handle in &self.registered {
            let Some(body) = self.bodies.get(*handle) else {
                continue;
            };
            let entity = body.entity();

            let pose = match pose_of.get(entity) {
                Some(pose) => *pose,
                None => {
                    let Some(transform) = lookup.transform(entity) else {
                        log::warn!("Body {:?} skipped: entity {:?} has no transform", handle, entity);
                        continue;
                    };
                    frame.poses.push(Pose {
                        entity,
                        transform: *transform,
                    });
                    pose_of.insert(entity, frame.poses.len() - 1);
                    frame.poses.len() - 1
                }
            };
            frame.slots.push(Slot { handle: *handle, pose });
        }
        frame
    }

    fn write_back<L: EntityLookup + ?Sized>(lookup: &mut L, frame: &Frame) {
        for pose in &frame.poses {
            if let Some(transform) = lookup.transform_mut(pose.entity) {
                transform.position = pose.transform.position;
            }
        }
    }

    fn sub_step(&mut self, frame: &mut Frame) {
        let gravity = self.config.gravity;
        let step_length = self.config.step_length;

        for slot in 0..frame.slots.len() {
            if let Some(body) = self.bodies.get_mut(frame.slots[slot].handle) {
                let displacement = body.integrate(&gravity, step_length);
                frame.displace(slot, displacement);
            }
        }

        for i in 0..frame.slots.len() {
            for j in 0..i {
                self.collide_bodies(frame, i, j);
            }
        }
    }

    fn collide_bodies(&mut self, frame: &mut Frame, i: usize, j: usize) {
        let (handle_i, handle_j) = (frame.slots[i].handle, frame.slots[j].handle);
        let (Some(body_i), Some(body_j)) = (self.bodies.get(handle_i), self.bodies.get(handle_j)) else {
            return;
        };

        self.stats.pairs_considered += 1;
        if let Some(reason) = pair_filter(body_i, body_j) {
            self.stats.pairs_filtered += 1;
            log::trace!("Skipping pair {:?}/{:?}: {:?}", handle_i, handle_j, reason);
            return;
        }

        let (count_i, count_j) = (body_i.shapes().len(), body_j.shapes().len());
        for shape_i in 0..count_i {
            for shape_j in 0..count_j {
                self.collide_shapes(frame, (i, shape_i), (j, shape_j));
            }
        }
    }

    fn collide_shapes(&mut self, frame: &mut Frame, (i, shape_i): (usize, usize), (j, shape_j): (usize, usize)) {
        let (handle_i, handle_j) = (frame.slots[i].handle, frame.slots[j].handle);
        let (Some(body_i), Some(body_j)) = (self.bodies.get(handle_i), self.bodies.get(handle_j)) else {
            return;
        };
        let (Some(outline_i), Some(outline_j)) = (body_i.shapes().get(shape_i), body_j.shapes().get(shape_j)) else {
            return;
        };
        let (transform_i, transform_j) = (frame.transform(i), frame.transform(j));

        let reach = outline_i.get_bp(transform_i) + outline_j.get_bp(transform_j);
        let distance_squared = (outline_i.get_center(transform_i) - outline_j.get_center(transform_j)).norm_squared();
        if reach * reach <= distance_squared {
            self.stats.broad_phase_rejections += 1;
            return;
        }

        self.stats.narrow_phase_tests += 1;
        let Some(manifold) = sat_test(outline_i, transform_i, outline_j, transform_j) else {
            return;
        };
        self.stats.contacts += 1;

        // Both one-way checks see the raw contact, each from its own side
        let velocity_j = body_j.velocity() - body_i.velocity();
        if !body_i.accepts_contact(&manifold.normal, manifold.depth, &velocity_j)
            || !body_j.accepts_contact(&-manifold.normal, manifold.depth, &-velocity_j)
        {
            self.stats.one_way_rejections += 1;
            return;
        }

        // A is the side pushed against: the non-dynamic body when there is one
        let ((a, shape_a), (b, shape_b), manifold) = if body_i.is_dynamic() {
            ((j, shape_j), (i, shape_i), manifold.flipped())
        } else {
            ((i, shape_i), (j, shape_j), manifold)
        };
        let ref_a = ShapeRef {
            body: frame.slots[a].handle,
            shape: shape_a,
        };
        let ref_b = ShapeRef {
            body: frame.slots[b].handle,
            shape: shape_b,
        };
        let collision = Collision::new(&manifold, ref_a, ref_b);
        log::trace!(
            "Contact {:?} -> {:?}: normal {:?}, depth {}",
            ref_a.body,
            ref_b.body,
            collision.normal,
            collision.depth
        );

        let (Some(body_a), Some(body_b)) = (self.bodies.get(ref_a.body), self.bodies.get(ref_b.body)) else {
            return;
        };
        let resolution = if body_a.is_trigger() || body_b.is_trigger() {
            None
        } else {
            Some(resolve(
                &collision.normal,
                collision.depth,
                &ContactBody::from(body_a),
                &ContactBody::from(body_b),
                self.config.slop,
            ))
        };

        if let Some(body) = self.bodies.get_mut(ref_a.body) {
            body.record_collision(collision.for_body(ref_a.body));
            if let Some(resolution) = &resolution {
                body.add_velocity(resolution.velocity_change_a);
            }
        }
        if let Some(body) = self.bodies.get_mut(ref_b.body) {
            body.record_collision(collision.for_body(ref_b.body));
            if let Some(resolution) = &resolution {
                body.add_velocity(resolution.velocity_change_b);
            }
        }

        if let Some(resolution) = resolution {
            frame.displace(a, resolution.displacement_a);
            frame.displace(b, resolution.displacement_b);
            self.stats.resolved += 1;
        }
    }
}
