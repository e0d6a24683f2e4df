//! Physics module for the park walker
//!
//! Custom collision code for exactly one capsule-shaped actor moving through
//! a static triangle mesh. No external physics library.
//!
//! # Unit System
//!
//! Scene units, Y up. The character is roughly one unit tall.
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam
//! - [`triangle`] - Static mesh triangles (plane, containment, edges)
//! - [`capsule`] - The actor's capsule collider
//! - [`collision`] - Bounding boxes, contacts, capsule-vs-triangle narrow phase
//! - [`octree`] - Static spatial index built once from level geometry
//! - [`resolver`] - Per-tick depenetration and floor classification

pub mod capsule;
pub mod collision;
pub mod octree;
pub mod resolver;
pub mod triangle;
pub mod types;

// Re-export commonly used types at the physics module level
pub use capsule::Capsule;
pub use collision::{Aabb, CollisionWorld, Contact, closest_points_on_segments, triangle_capsule_intersect};
pub use octree::{Octree, OctreeConfig};
pub use resolver::{CollisionResolver, Resolution};
pub use triangle::{Triangle, box_triangles};
pub use types::Vec3;
