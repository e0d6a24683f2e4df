//! Scene Module
//!
//! Level loading and the session that wires every park system together.

pub mod level;
pub mod park_session;

pub use level::{CHARACTER_NODE, ColliderShape, Level, LevelError, PropPlacement, SceneSource};
pub use park_session::{FrameReport, ParkSession, PickOutcome};
