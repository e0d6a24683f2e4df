//! The player-controlled actor

use glam::Vec3;

use crate::physics::Capsule;

/// Pose and motion state of the single player character.
///
/// Owned by [`super::CharacterController`]. `position` is the foot point and
/// is always re-derived from the capsule after collision resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    /// Foot position in world space
    pub position: Vec3,
    /// Rotation about +Y in radians
    pub yaw: f32,
    /// Velocity in units per second
    pub velocity: Vec3,
    /// Set when a hop starts, cleared on landing
    pub is_moving: bool,
    /// Where the character was placed in the level; respawn target
    pub spawn_position: Vec3,
}

impl Actor {
    pub fn new(spawn_position: Vec3, yaw: f32) -> Self {
        Self {
            position: spawn_position,
            yaw,
            velocity: Vec3::ZERO,
            is_moving: false,
            spawn_position,
        }
    }

    /// Take the foot position from the resolved capsule.
    pub fn sync_to(&mut self, collider: &Capsule) {
        self.position = collider.foot();
    }

    /// Speed in the XZ plane.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}
