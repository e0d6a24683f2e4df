//! Animation Module
//!
//! Small tweening toolkit for scale and position animations driven by the
//! fixed simulation timestep.
//!
//! - [`Ease`] - Easing curves
//! - [`Track`] - Eased keyframes for one `Vec3` property
//! - [`HopAnimation`] - Character and creature hop timelines

pub mod easing;
pub mod hop;
pub mod track;

pub use easing::Ease;
pub use hop::{HopAnimation, CHARACTER_HOP_DURATION, PROP_HOP_DURATION, PROP_HOP_HEIGHT};
pub use track::{Track, Tween};
