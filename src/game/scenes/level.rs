//! Level description
//!
//! A park level is a JSON document naming the character's spawn point, the
//! placement of each interactive prop, and the static collision geometry:
//!
//! ```json
//! {
//!   "spawn": [0.0, 0.5, 0.0],
//!   "props": { "Chest": { "position": [4.0, 0.0, 2.0] } },
//!   "collider": [
//!     { "box": { "min": [-20, -1, -20], "max": [20, 0, 20] } },
//!     { "triangle": [[0, 0, 0], [0, 0, 1], [1, 0, 0]] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;

use crate::physics::{Aabb, Triangle, box_triangles};

/// Node name the character spawn is published under
pub const CHARACTER_NODE: &str = "Character";

/// Failure to load a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid level json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level has no character spawn point")]
    MissingSpawn,
    #[error("level has no collision geometry")]
    EmptyCollider,
    #[error("collider box {index} has min {min:?} above max {max:?}")]
    InvertedBox { index: usize, min: Vec3, max: Vec3 },
}

/// Where loaded scene content lives.
///
/// The park core only needs named node positions and the collision soup;
/// everything visual stays with the renderer.
pub trait SceneSource {
    /// World position of a named scene node.
    fn node_position(&self, name: &str) -> Option<Vec3>;

    /// Names of every node that can be picked.
    fn node_names(&self) -> Vec<String>;

    /// Rest scale of a named node.
    fn node_scale(&self, name: &str) -> Option<Vec3>;

    /// Static collision triangles, in world space.
    fn collision_triangles(&self) -> Vec<Triangle>;
}

/// Placement of one interactive prop.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PropPlacement {
    pub position: Vec3,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

/// One piece of collision geometry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderShape {
    Triangle([Vec3; 3]),
    Box { min: Vec3, max: Vec3 },
}

/// A parsed, validated level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Level {
    #[serde(default)]
    spawn: Option<Vec3>,
    #[serde(default)]
    props: BTreeMap<String, PropPlacement>,
    #[serde(default)]
    collider: Vec<ColliderShape>,
}

impl Level {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Read, parse and validate a level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json_str(&text)?;
        log::info!(
            "loaded level {}: {} props, {} collider shapes",
            path.display(),
            level.props.len(),
            level.collider.len()
        );
        Ok(level)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.spawn.is_none() {
            return Err(LevelError::MissingSpawn);
        }
        if self.collider.is_empty() {
            return Err(LevelError::EmptyCollider);
        }
        for (index, shape) in self.collider.iter().enumerate() {
            if let ColliderShape::Box { min, max } = *shape {
                if min.cmpgt(max).any() {
                    return Err(LevelError::InvertedBox { index, min, max });
                }
            }
        }
        Ok(())
    }

    /// The character spawn point.
    pub fn spawn(&self) -> Vec3 {
        self.spawn.unwrap_or(Vec3::ZERO)
    }

    pub fn props(&self) -> &BTreeMap<String, PropPlacement> {
        &self.props
    }

    pub fn collider(&self) -> &[ColliderShape] {
        &self.collider
    }
}

impl SceneSource for Level {
    fn node_position(&self, name: &str) -> Option<Vec3> {
        if name == CHARACTER_NODE {
            return self.spawn;
        }
        self.props.get(name).map(|prop| prop.position)
    }

    fn node_names(&self) -> Vec<String> {
        self.props.keys().cloned().collect()
    }

    fn node_scale(&self, name: &str) -> Option<Vec3> {
        self.props.get(name).map(|prop| prop.scale)
    }

    fn collision_triangles(&self) -> Vec<Triangle> {
        let mut triangles = Vec::new();
        for shape in &self.collider {
            match *shape {
                ColliderShape::Triangle([a, b, c]) => triangles.push(Triangle::new(a, b, c)),
                ColliderShape::Box { min, max } => {
                    triangles.extend(box_triangles(&Aabb::new(min, max)));
                }
            }
        }
        triangles
    }
}
