//! Game Configuration
//!
//! Every tunable of the park in one JSON-loadable struct. Each section
//! defaults to the shipped values, so a config file only needs the fields it
//! changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::camera::FollowCameraConfig;
use crate::physics::OctreeConfig;
use crate::player::{MotionConfig, RespawnGuard};

/// Failure to read or parse a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Sound ids handed to the audio collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Played when the character starts a hop
    pub hop_sound: String,
    /// Played when a creature is picked
    pub creature_sound: String,
    /// Played on entering the park, on modal open and close, and on the audio toggle
    pub ui_sound: String,
    /// Background music started on entry and on unmute
    pub music: String,
    pub start_muted: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            hop_sound: "jumpSFX".to_string(),
            creature_sound: "pokemonSFX".to_string(),
            ui_sound: "projectsSFX".to_string(),
            music: "backgroundMusic".to_string(),
            start_muted: false,
        }
    }
}

/// Central configuration for a park session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub motion: MotionConfig,
    pub respawn: RespawnGuard,
    pub camera: FollowCameraConfig,
    pub octree: OctreeConfig,
    pub audio: AudioConfig,
    /// Level file to load when none is given on the command line
    pub level: Option<PathBuf>,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}
