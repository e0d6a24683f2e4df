//! Player Module
//!
//! The park character: its pose, the hop-based motion integrator, heading
//! easing and the out-of-bounds respawn guard.
//!
//! # Components
//!
//! - [`CharacterController`] - Gravity, hop input and capsule collision per tick
//! - [`Actor`] - Position, yaw, velocity and spawn point
//! - [`RespawnGuard`] - Resets the character after a fall
//! - [`heading`] - Shortest-arc yaw interpolation

pub mod actor;
pub mod heading;
pub mod movement_controller;
pub mod respawn;

pub use actor::Actor;
pub use heading::{approach_heading, shortest_angle_delta};
pub use movement_controller::{
    CharacterController, MotionConfig,
    direction_axis, direction_heading,
    GRAVITY, FIXED_TIMESTEP, CAPSULE_RADIUS, CAPSULE_HEIGHT,
    JUMP_IMPULSE, MOVE_SPEED, TURN_FACTOR, INITIAL_HEADING,
};
pub use respawn::{RespawnGuard, FALL_THRESHOLD};
