//! Respawn guard
//!
//! Catches the character after it falls off the level and puts it back at
//! the spawn pose.

use serde::Deserialize;

use super::actor::Actor;
use super::movement_controller::CharacterController;

/// Height below which the character counts as lost
pub const FALL_THRESHOLD: f32 = -20.0;

/// Detects out-of-bounds falls.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RespawnGuard {
    pub fall_threshold: f32,
}

impl Default for RespawnGuard {
    fn default() -> Self {
        Self {
            fall_threshold: FALL_THRESHOLD,
        }
    }
}

impl RespawnGuard {
    pub fn new(fall_threshold: f32) -> Self {
        Self { fall_threshold }
    }

    /// Whether the actor has dropped below the threshold.
    pub fn is_out_of_bounds(&self, actor: &Actor) -> bool {
        actor.position.y < self.fall_threshold
    }

    /// Respawn the character if it fell out of the level.
    ///
    /// Returns `true` when a respawn happened.
    pub fn check(&self, controller: &mut CharacterController) -> bool {
        if !self.is_out_of_bounds(controller.actor()) {
            return false;
        }
        log::info!(
            "character fell to y={:.2}, respawning at {:?}",
            controller.position().y,
            controller.actor().spawn_position
        );
        controller.respawn();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Capsule, CollisionWorld, Contact};
    use glam::Vec3;

    struct Void;

    impl CollisionWorld for Void {
        fn capsule_intersect(&self, _capsule: &Capsule) -> Option<Contact> {
            None
        }
    }

    #[test]
    fn test_default_threshold() {
        assert_eq!(RespawnGuard::default().fall_threshold, -20.0);
    }

    #[test]
    fn test_in_bounds_is_untouched() {
        let guard = RespawnGuard::default();
        let mut controller = CharacterController::new(Vec3::new(0.0, -19.9, 0.0));
        assert!(!guard.check(&mut controller));
        assert_eq!(controller.position().y, -19.9);
    }

    #[test]
    fn test_exactly_at_threshold_is_in_bounds() {
        let guard = RespawnGuard::default();
        let actor = Actor::new(Vec3::new(0.0, FALL_THRESHOLD, 0.0), 0.0);
        assert!(!guard.is_out_of_bounds(&actor));
    }

    #[test]
    fn test_fall_respawns_at_spawn() {
        let spawn = Vec3::new(3.0, 1.0, -2.0);
        let guard = RespawnGuard::default();
        let mut controller = CharacterController::new(spawn);

        while controller.position().y >= FALL_THRESHOLD {
            controller.step(&Void);
        }
        assert!(guard.check(&mut controller));
        assert_eq!(controller.position(), spawn);
        assert_eq!(controller.velocity(), Vec3::ZERO);
    }
}
