//! Config Module
//!
//! Centralized configuration for motion, camera, audio ids and level choice.

pub mod game_config;

pub use game_config::{AudioConfig, ConfigError, GameConfig};
