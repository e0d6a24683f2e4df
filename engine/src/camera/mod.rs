//! Camera Module
//!
//! Follow camera for the park. Window-system agnostic; it only computes the
//! pose a renderer should use.

pub mod follow;

pub use follow::{FollowCamera, FollowCameraConfig, CAMERA_OFFSET, LOOK_SHIFT, POSITION_SHIFT};
