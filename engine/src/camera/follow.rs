//! Follow Camera
//!
//! Fixed-angle camera that tracks the character across the park. Height is
//! constant; only the horizontal position follows the character, so hops do
//! not shake the view.

use glam::{Mat4, Vec3};
use serde::Deserialize;

/// Base offset of the camera from the character
pub const CAMERA_OFFSET: Vec3 = Vec3::new(-13.0, 39.0, -67.0);

/// Extra horizontal shift applied on top of the offset (y unused)
pub const POSITION_SHIFT: Vec3 = Vec3::new(-20.0, 0.0, 30.0);

/// Look-at point relative to the character in x/z and to the camera in y
pub const LOOK_SHIFT: Vec3 = Vec3::new(10.0, -39.0, 10.0);

/// Placement of the follow camera.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FollowCameraConfig {
    pub offset: Vec3,
    pub position_shift: Vec3,
    pub look_shift: Vec3,
}

impl Default for FollowCameraConfig {
    fn default() -> Self {
        Self {
            offset: CAMERA_OFFSET,
            position_shift: POSITION_SHIFT,
            look_shift: LOOK_SHIFT,
        }
    }
}

/// Camera pose for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    config: FollowCameraConfig,
    pub position: Vec3,
    pub target: Vec3,
}

impl FollowCamera {
    pub fn new(config: FollowCameraConfig) -> Self {
        let position = config.offset;
        Self {
            config,
            position,
            target: position + Vec3::new(0.0, config.look_shift.y, 0.0),
        }
    }

    /// Camera already placed for a character at `subject`.
    pub fn looking_at(config: FollowCameraConfig, subject: Vec3) -> Self {
        let mut camera = Self::new(config);
        camera.follow(subject);
        camera
    }

    pub fn config(&self) -> &FollowCameraConfig {
        &self.config
    }

    /// Re-place the camera for the character's foot position.
    pub fn follow(&mut self, subject: Vec3) {
        let FollowCameraConfig {
            offset,
            position_shift,
            look_shift,
        } = self.config;

        self.position = Vec3::new(
            subject.x + offset.x + position_shift.x,
            offset.y,
            subject.z + offset.z + position_shift.z,
        );
        self.target = Vec3::new(
            subject.x + look_shift.x,
            self.position.y + look_shift.y,
            subject.z + look_shift.z,
        );
    }

    /// Right-handed view matrix with +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(FollowCameraConfig::default())
    }
}
