//! Rigid point-mass bodies
//!
//! A body belongs to one entity. It owns its velocity, force accumulator,
//! material coefficients and shapes; the entity owns the transform the
//! body moves. Bodies are created through [`World::create_body`] from a
//! [`BodyDesc`].
//!
//! [`World::create_body`]: super::World::create_body

use super::{Collision, CollisionLayers, PhysicsError, Shape};
use crate::ecs::Entity;
use crate::foundation::math::Vec2;

slotmap::new_key_type! {
    /// Handle to a body owned by a [`World`](super::World)
    pub struct BodyHandle;
}

/// One-way ("semi-solid") behaviour of a body
///
/// Other bodies are only stopped when they come from the `direction` side,
/// are moving toward the body and have sunk no deeper than `leniency`.
/// Anything else passes through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneWay {
    direction: Vec2,
    leniency: f32,
}

impl OneWay {
    /// One-way surface solid toward `direction`
    ///
    /// A zero `direction` falls back to straight up.
    pub fn new(direction: Vec2, leniency: f32) -> Result<Self, PhysicsError> {
        if !(leniency >= 0.0) {
            return Err(PhysicsError::InvalidLeniency(leniency));
        }
        Ok(Self {
            direction: direction.try_normalize(f32::EPSILON).unwrap_or_else(|| Vec2::new(0.0, 1.0)),
            leniency,
        })
    }

    /// Unit direction of the solid side
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Deepest penetration still treated as landing on the surface
    pub fn leniency(&self) -> f32 {
        self.leniency
    }

    /// Whether a contact should be kept
    ///
    /// `normal_to_other` points from this body toward the other one and
    /// `other_velocity` is the other body's velocity relative to this one.
    pub fn accepts(&self, normal_to_other: &Vec2, depth: f32, other_velocity: &Vec2) -> bool {
        if normal_to_other.dot(&self.direction) <= 0.0 {
            return false;
        }
        if depth > self.leniency {
            return false;
        }
        other_velocity.dot(&self.direction) <= 0.0
    }
}

/// Description of a body to create
///
/// Defaults: mass 1, friction 1, bounce 1, dynamic, solid, rotatable,
/// [`CollisionLayers::DEFAULT`], no tag, shapes taken from the entity.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    /// Mass, must be > 0
    pub mass: f32,
    /// Friction coefficient, must be > 0
    pub friction: f32,
    /// Bounce (restitution) factor, must be >= 0
    pub bounce: f32,
    /// Responds to gravity, forces and contacts
    pub dynamic: bool,
    /// Reports overlaps without a physical response
    pub trigger: bool,
    /// Reserved for rotational dynamics, not integrated yet
    pub rotatable: bool,
    /// Layers the body sits on
    pub layers: CollisionLayers,
    /// Free-form label for gameplay code
    pub tag: String,
    /// One-way behaviour
    pub one_way: Option<OneWay>,
    /// Shapes to use instead of the entity's shape component
    pub shapes: Option<Vec<Shape>>,
    /// Initial velocity
    pub velocity: Vec2,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            mass: 1.0,
            friction: 1.0,
            bounce: 1.0,
            dynamic: true,
            trigger: false,
            rotatable: true,
            layers: CollisionLayers::DEFAULT,
            tag: String::new(),
            one_way: None,
            shapes: None,
            velocity: Vec2::zeros(),
        }
    }
}

impl BodyDesc {
    /// A dynamic body with default coefficients
    pub fn dynamic() -> Self {
        Self::default()
    }

    /// A non-dynamic body: never moved by gravity, forces or contacts
    pub fn fixed() -> Self {
        Self {
            dynamic: false,
            ..Self::default()
        }
    }

    /// Builder pattern: Set mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Builder pattern: Set friction
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Builder pattern: Set bounce
    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    /// Builder pattern: Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    /// Builder pattern: Set rotatable flag
    pub fn with_rotatable(mut self, rotatable: bool) -> Self {
        self.rotatable = rotatable;
        self
    }

    /// Builder pattern: Set collision layers
    pub fn with_layers(mut self, layers: CollisionLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Builder pattern: Set tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Builder pattern: Make the body one-way
    pub fn with_one_way(mut self, one_way: OneWay) -> Self {
        self.one_way = Some(one_way);
        self
    }

    /// Builder pattern: Use this shape instead of the entity's (repeatable)
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.get_or_insert_with(Vec::new).push(shape);
        self
    }

    /// Builder pattern: Set initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }
}

fn check_mass(mass: f32) -> Result<f32, PhysicsError> {
    if mass > 0.0 && mass.is_finite() {
        Ok(mass)
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}

fn check_friction(friction: f32) -> Result<f32, PhysicsError> {
    if friction > 0.0 && friction.is_finite() {
        Ok(friction)
    } else {
        Err(PhysicsError::InvalidFriction(friction))
    }
}

fn check_bounce(bounce: f32) -> Result<f32, PhysicsError> {
    if bounce >= 0.0 && bounce.is_finite() {
        Ok(bounce)
    } else {
        Err(PhysicsError::InvalidBounce(bounce))
    }
}

/// A simulated rigid point mass
#[derive(Debug, Clone)]
pub struct Body {
    entity: Entity,
    velocity: Vec2,
    force: Vec2,
    mass: f32,
    inverted_mass: f32,
    friction: f32,
    inverted_friction: f32,
    bounce: f32,
    dynamic: bool,
    trigger: bool,
    rotatable: bool,
    layers: CollisionLayers,
    tag: String,
    one_way: Option<OneWay>,
    shapes: Vec<Shape>,
    collisions: Vec<Collision>,
}

impl Body {
    /// Build a body for `entity`
    ///
    /// Fails on non-positive mass or friction, negative bounce, or an empty
    /// shape list.
    pub fn new(entity: Entity, shapes: Vec<Shape>, desc: &BodyDesc) -> Result<Self, PhysicsError> {
        let mass = check_mass(desc.mass)?;
        let friction = check_friction(desc.friction)?;
        let bounce = check_bounce(desc.bounce)?;
        if shapes.is_empty() {
            return Err(PhysicsError::MissingShape(entity));
        }

        Ok(Self {
            entity,
            velocity: desc.velocity,
            force: Vec2::zeros(),
            mass,
            inverted_mass: 1.0 / mass,
            friction,
            inverted_friction: 1.0 / friction,
            bounce,
            dynamic: desc.dynamic,
            trigger: desc.trigger,
            rotatable: desc.rotatable,
            layers: desc.layers,
            tag: desc.tag.clone(),
            one_way: desc.one_way,
            shapes,
            collisions: Vec::new(),
        })
    }

    /// Owning entity
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Shapes in local space
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Overwrite the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Add directly to the velocity
    pub fn add_velocity(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    /// Accumulate a force, applied and cleared on the next sub-step
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Force accumulated since the last sub-step
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Velocity times mass
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    /// Mass
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// `1 / mass`
    pub fn inverted_mass(&self) -> f32 {
        self.inverted_mass
    }

    /// Change the mass, rejecting non-positive values
    pub fn set_mass(&mut self, mass: f32) -> Result<(), PhysicsError> {
        self.mass = check_mass(mass)?;
        self.inverted_mass = 1.0 / mass;
        Ok(())
    }

    /// Friction coefficient
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// `1 / friction`
    pub fn inverted_friction(&self) -> f32 {
        self.inverted_friction
    }

    /// Change the friction, rejecting non-positive values
    pub fn set_friction(&mut self, friction: f32) -> Result<(), PhysicsError> {
        self.friction = check_friction(friction)?;
        self.inverted_friction = 1.0 / friction;
        Ok(())
    }

    /// Bounce factor
    pub fn bounce(&self) -> f32 {
        self.bounce
    }

    /// Change the bounce factor, rejecting negative values
    pub fn set_bounce(&mut self, bounce: f32) -> Result<(), PhysicsError> {
        self.bounce = check_bounce(bounce)?;
        Ok(())
    }

    /// Whether the body responds to gravity, forces and contacts
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Switch between dynamic and non-dynamic
    ///
    /// A non-dynamic body still moves by its own velocity, which makes it
    /// usable as a moving platform.
    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.dynamic = dynamic;
    }

    /// Whether the body only reports overlaps
    pub fn is_trigger(&self) -> bool {
        self.trigger
    }

    /// Switch trigger behaviour
    pub fn set_trigger(&mut self, trigger: bool) {
        self.trigger = trigger;
    }

    /// Rotatable flag (not used by the integrator yet)
    pub fn is_rotatable(&self) -> bool {
        self.rotatable
    }

    /// Set the rotatable flag
    pub fn set_rotatable(&mut self, rotatable: bool) {
        self.rotatable = rotatable;
    }

    /// Collision layers
    pub fn layers(&self) -> CollisionLayers {
        self.layers
    }

    /// Replace the collision layers
    pub fn set_layers(&mut self, layers: CollisionLayers) {
        self.layers = layers;
    }

    /// Whether the two bodies have a layer in common
    pub fn shares_layer(&self, other: &Self) -> bool {
        self.layers.shares_layer(other.layers)
    }

    /// Gameplay tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Replace the tag
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// One-way settings, if any
    pub fn one_way(&self) -> Option<&OneWay> {
        self.one_way.as_ref()
    }

    /// Make the body one-way toward `direction`
    pub fn set_one_way(&mut self, direction: Vec2, leniency: f32) -> Result<(), PhysicsError> {
        self.one_way = Some(OneWay::new(direction, leniency)?);
        Ok(())
    }

    /// Set the one-way leniency, keeping the current direction (up if none)
    pub fn set_one_way_leniency(&mut self, leniency: f32) -> Result<(), PhysicsError> {
        let direction = self.one_way.map_or_else(|| Vec2::new(0.0, 1.0), |one_way| one_way.direction);
        self.set_one_way(direction, leniency)
    }

    /// Make the body solid from every side again
    pub fn clear_one_way(&mut self) {
        self.one_way = None;
    }

    /// One-way bodies ignore gravity
    pub fn is_gravity_exempt(&self) -> bool {
        self.one_way.is_some()
    }

    /// Whether this body lets a contact through to resolution
    ///
    /// Always true unless the body is one-way.
    pub fn accepts_contact(&self, normal_to_other: &Vec2, depth: f32, other_velocity: &Vec2) -> bool {
        self.one_way
            .as_ref()
            .map_or(true, |one_way| one_way.accepts(normal_to_other, depth, other_velocity))
    }

    /// Contacts recorded during the latest sub-step
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// First contact with `other` recorded during the latest sub-step
    pub fn get_collision(&self, other: BodyHandle) -> Option<&Collision> {
        self.collisions.iter().find(|collision| collision.other == other)
    }

    /// Whether anything touched this body during the latest sub-step
    pub fn is_colliding(&self) -> bool {
        !self.collisions.is_empty()
    }

    pub(crate) fn record_collision(&mut self, collision: Collision) {
        self.collisions.push(collision);
    }

    /// Advance one sub-step and return the displacement to apply
    ///
    /// Gravity and the force accumulator only act on dynamic bodies; the
    /// accumulator and the collision list are cleared for every body.
    pub(crate) fn integrate(&mut self, gravity: &Vec2, step_length: f32) -> Vec2 {
        if self.dynamic {
            if !self.is_gravity_exempt() {
                self.velocity += gravity * step_length;
            }
            self.velocity += self.force * self.inverted_mass;
        }
        self.force = Vec2::zeros();
        self.collisions.clear();
        self.velocity * step_length
    }
}
