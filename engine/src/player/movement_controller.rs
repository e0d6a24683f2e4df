//! Character Movement Controller
//!
//! Turns held directions plus gravity into hop-based motion for the park
//! character and keeps its capsule collider in step with the actor pose.
//!
//! # Motion Model
//!
//! - A hop starts when any direction is held and the character is not already
//!   mid-hop. Each held direction adds its move speed; the vertical velocity is
//!   set to the jump impulse.
//! - Gravity applies only while the character was airborne after the previous
//!   collision pass.
//! - Landing (a floor contact) zeroes horizontal velocity and ends the hop.
//!
//! All rates are scaled by a fixed timestep rather than wall-clock delta, so
//! simulation speed follows the frame rate.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bear_park_engine::player::CharacterController;
//! use bear_park_engine::physics::Octree;
//! use glam::Vec3;
//!
//! let mut controller = CharacterController::new(Vec3::new(0.0, 1.0, 0.0));
//!
//! // Each frame:
//! controller.step(&octree);
//! if controller.apply_input(input.directions()) {
//!     // hop started: play sound, start squash animation
//! }
//! ```

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use serde::Deserialize;

use crate::input::{Direction, DirectionKeys};
use crate::physics::{Capsule, CollisionResolver, CollisionWorld, Resolution};

use super::actor::Actor;
use super::heading::approach_heading;

/// Downward acceleration in units per second squared
pub const GRAVITY: f32 = 30.0;

/// Seconds simulated per tick
pub const FIXED_TIMESTEP: f32 = 0.035;

/// Radius of the character capsule
pub const CAPSULE_RADIUS: f32 = 0.35;

/// Height of the capsule's top endpoint above the foot
pub const CAPSULE_HEIGHT: f32 = 1.0;

/// Vertical velocity given to every hop
pub const JUMP_IMPULSE: f32 = 11.0;

/// Horizontal speed added per held direction
pub const MOVE_SPEED: f32 = 7.0;

/// Fraction of the remaining heading delta closed each tick
pub const TURN_FACTOR: f32 = 0.4;

/// Heading the character starts out turning towards
pub const INITIAL_HEADING: f32 = FRAC_PI_2;

/// Tunable motion parameters.
///
/// Any subset may be overridden from a JSON config file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub gravity: f32,
    pub timestep: f32,
    pub capsule_radius: f32,
    pub capsule_height: f32,
    pub jump_impulse: f32,
    pub move_speed: f32,
    pub turn_factor: f32,
    pub initial_heading: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            timestep: FIXED_TIMESTEP,
            capsule_radius: CAPSULE_RADIUS,
            capsule_height: CAPSULE_HEIGHT,
            jump_impulse: JUMP_IMPULSE,
            move_speed: MOVE_SPEED,
            turn_factor: TURN_FACTOR,
            initial_heading: INITIAL_HEADING,
        }
    }
}

/// Unit axis a held direction pushes the character along.
pub fn direction_axis(direction: Direction) -> Vec3 {
    match direction {
        Direction::Up => Vec3::Z,
        Direction::Down => Vec3::NEG_Z,
        Direction::Left => Vec3::X,
        Direction::Right => Vec3::NEG_X,
    }
}

/// Heading the character turns to face for a held direction.
pub fn direction_heading(direction: Direction) -> f32 {
    match direction {
        Direction::Up => 0.0,
        Direction::Down => PI,
        Direction::Left => FRAC_PI_2,
        Direction::Right => -FRAC_PI_2,
    }
}

/// Motion integrator for the single park character.
///
/// Owns the [`Actor`] and its capsule. The capsule is the physical shape;
/// the actor position is copied from it after every collision pass.
#[derive(Debug, Clone)]
pub struct CharacterController {
    actor: Actor,
    collider: Capsule,
    config: MotionConfig,

    /// Heading the yaw eases towards
    target_heading: f32,

    /// Floor contact from the most recent collision pass
    grounded: bool,
}

impl CharacterController {
    /// Place a character at `spawn` with default motion parameters.
    pub fn new(spawn: Vec3) -> Self {
        Self::with_config(spawn, MotionConfig::default())
    }

    pub fn with_config(spawn: Vec3, config: MotionConfig) -> Self {
        Self {
            actor: Actor::new(spawn, 0.0),
            collider: Capsule::standing_at(spawn, config.capsule_radius, config.capsule_height),
            target_heading: config.initial_heading,
            config,
            grounded: false,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn collider(&self) -> &Capsule {
        &self.collider
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.actor.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.actor.velocity
    }

    /// Overwrite the velocity (used by tests and scripted drivers).
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.actor.velocity = velocity;
    }

    pub fn yaw(&self) -> f32 {
        self.actor.yaw
    }

    pub fn target_heading(&self) -> f32 {
        self.target_heading
    }

    /// Whether the last collision pass found a floor contact.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_moving(&self) -> bool {
        self.actor.is_moving
    }

    /// Apply gravity unless the character stood on a floor last tick.
    pub fn integrate_gravity(&mut self) {
        if !self.grounded {
            self.actor.velocity.y -= self.config.gravity * self.config.timestep;
        }
    }

    /// Integrate, collide and turn for one tick.
    ///
    /// Returns the collision outcome so callers can inspect the contact.
    pub fn step<W: CollisionWorld + ?Sized>(&mut self, world: &W) -> Resolution {
        self.integrate_gravity();

        self.collider
            .translate(self.actor.velocity * self.config.timestep);

        let resolution = CollisionResolver::resolve(world, &mut self.collider);
        self.grounded = resolution.grounded;
        if self.grounded {
            self.actor.velocity.x = 0.0;
            self.actor.velocity.z = 0.0;
            self.actor.is_moving = false;
        }

        self.actor.sync_to(&self.collider);
        self.turn_towards_target();

        resolution
    }

    /// Ease the yaw towards the target heading along the shortest arc.
    pub fn turn_towards_target(&mut self) {
        self.actor.yaw = approach_heading(self.actor.yaw, self.target_heading, self.config.turn_factor);
    }

    /// Start a hop from the held directions.
    ///
    /// Directions are evaluated in [`Direction::EVALUATION_ORDER`]; opposing
    /// directions cancel in velocity and the last one wins the heading.
    /// Returns `true` if a hop started.
    pub fn apply_input(&mut self, directions: &DirectionKeys) -> bool {
        if !directions.any_pressed() || self.actor.is_moving {
            return false;
        }

        for direction in directions.pressed() {
            self.actor.velocity += direction_axis(direction) * self.config.move_speed;
            self.target_heading = direction_heading(direction);
        }
        self.actor.velocity.y = self.config.jump_impulse;
        self.actor.is_moving = true;

        log::debug!(
            "hop started: velocity {:?}, heading {:.3}",
            self.actor.velocity,
            self.target_heading
        );
        true
    }

    /// Put actor and capsule back at the spawn pose, at rest.
    pub fn respawn(&mut self) {
        let spawn = self.actor.spawn_position;
        self.actor.position = spawn;
        self.actor.velocity = Vec3::ZERO;
        self.actor.is_moving = false;
        self.collider =
            Capsule::standing_at(spawn, self.config.capsule_radius, self.config.capsule_height);
        self.grounded = false;
    }
}
