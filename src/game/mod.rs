//! Game Module
//!
//! Park-specific systems that build on top of the engine: level files,
//! interactive props, host collaborators and the frame session.

pub mod collaborators;
pub mod config;
pub mod props;
pub mod scenes;

pub use collaborators::{AudioSink, Cursor, LogAudio, LogModal, ModalPresenter, RecordingAudio, RecordingModal};
pub use config::{AudioConfig, ConfigError, GameConfig};
pub use props::{Prop, PropKind, PropSet, CREATURES, HEAVY_CREATURES, MODAL_PROPS};
pub use scenes::{FrameReport, Level, LevelError, ParkSession, PickOutcome, SceneSource};
