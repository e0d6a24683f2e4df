//! Bear Park Engine Library
//!
//! Character movement core for a walkable 3D portfolio park: one capsule
//! character hopping across a static triangle mesh. Rendering, audio and UI
//! are supplied by the host through small collaborator traits.
//!
//! # Modules
//!
//! - [`input`] - Held-direction aggregation and one-shot commands
//! - [`physics`] - Capsule, triangles, octree and collision resolution
//! - [`player`] - Motion integrator, heading easing, respawn guard
//! - [`animation`] - Easing curves and hop timelines
//! - [`camera`] - Follow camera pose
//! - [`logging`] - Logger setup for the binaries
//!
//! # Example
//!
//! ```ignore
//! use bear_park_engine::game::{GameConfig, Level, LogAudio, LogModal, ParkSession};
//! use bear_park_engine::input::{InputEvent, KeyCode};
//!
//! let level = Level::load("assets/park_level.json")?;
//! let mut session = ParkSession::new(&level, GameConfig::default(), LogAudio, LogModal)?;
//!
//! session.handle_input(InputEvent::Key { key: KeyCode::W, pressed: true });
//! let report = session.tick();
//! println!("character at {:?}", report.position);
//! ```

pub mod animation;
pub mod camera;
pub mod input;
pub mod logging;
pub mod physics;
pub mod player;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used input types
pub use input::{Direction, DirectionKeys, InputEvent, InputState, KeyCode};
// Re-export physics types
pub use physics::{Capsule, Octree, Triangle};
// Re-export player types
pub use player::{CharacterController, MotionConfig, RespawnGuard};
