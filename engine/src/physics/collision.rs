//! Collision detection module
//!
//! Narrow-phase capsule-vs-triangle tests plus the small geometric helpers the
//! octree and resolver share.
//!
//! # Capsule vs Triangle
//!
//! Both capsule endpoints are measured against the triangle plane, shrunk by
//! the radius. If the segment straddles the inflated plane, the crossing point
//! is checked against the triangle interior and the plane normal is the
//! contact normal. Otherwise the segment is tested against the three edges.
//!
//! # Example
//!
//! ```ignore
//! use bear_park_engine::physics::{Capsule, Triangle, triangle_capsule_intersect};
//! use glam::Vec3;
//!
//! let floor = Triangle::new(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(-5.0, 0.0, 5.0), Vec3::new(5.0, 0.0, 0.0));
//! let capsule = Capsule::standing_at(Vec3::new(0.0, -0.1, 0.0), 0.35, 1.0);
//!
//! if let Some(contact) = triangle_capsule_intersect(&capsule, &floor) {
//!     println!("push {:?} by {}", contact.normal, contact.depth);
//! }
//! ```

use glam::Vec3;

use super::capsule::Capsule;
use super::triangle::Triangle;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// An inverted box that any `union` replaces.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Grow the box by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Aabb {
        Aabb::new(self.min - Vec3::splat(margin), self.max + Vec3::splat(margin))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z)
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Split into eight equal octants.
    ///
    /// Octant `i` takes the upper half of X when bit 0 is set, of Y for bit 1,
    /// of Z for bit 2.
    pub fn octants(&self) -> [Aabb; 8] {
        let half = (self.max - self.min) * 0.5;
        std::array::from_fn(|i| {
            let offset = Vec3::new(
                if i & 1 != 0 { half.x } else { 0.0 },
                if i & 2 != 0 { half.y } else { 0.0 },
                if i & 4 != 0 { half.z } else { 0.0 },
            );
            let min = self.min + offset;
            Aabb::new(min, min + half)
        })
    }
}

/// Result of a capsule overlapping static geometry.
///
/// Translating the capsule by `normal * depth` separates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Push-out direction (unit length, or zero for a grazing touch)
    pub normal: Vec3,
    /// Penetration depth along `normal`
    pub depth: f32,
}

impl Contact {
    pub fn new(normal: Vec3, depth: f32) -> Self {
        Self { normal, depth }
    }

    /// Displacement that resolves this contact.
    pub fn push_out(&self) -> Vec3 {
        self.normal * self.depth
    }
}

/// Static geometry a capsule can be tested against.
///
/// Implemented by [`super::Octree`]; tests substitute simpler worlds.
pub trait CollisionWorld {
    /// Aggregate contact for the capsule against everything it overlaps.
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact>;
}

/// Closest points between segments `p1-q1` and `p2-q2`.
///
/// Returns the point on the first segment and the point on the second.
/// Handles degenerate (zero-length) segments.
pub fn closest_points_on_segments(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (Vec3, Vec3) {
    const EPS: f32 = 1e-10;

    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.dot(d1);
    let e = d2.dot(d2);
    let f = d2.dot(r);

    let (s, t) = if a <= EPS && e <= EPS {
        (0.0, 0.0)
    } else if a <= EPS {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= EPS {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;

            // Parallel segments: pick the first segment's start, then clamp
            let mut s = if denom > EPS {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t = (b * s + f) / e;

            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    (p1 + d1 * s, p2 + d2 * t)
}

/// Tests a capsule against one triangle.
///
/// Returns the contact that pushes the capsule out of the triangle, or `None`
/// if they do not overlap. Degenerate triangles never collide.
pub fn triangle_capsule_intersect(capsule: &Capsule, triangle: &Triangle) -> Option<Contact> {
    let normal = triangle.normal()?;
    let radius = capsule.radius;

    let d1 = triangle.signed_distance(capsule.start) - radius;
    let d2 = triangle.signed_distance(capsule.end) - radius;

    if (d1 > 0.0 && d2 > 0.0) || (d1 < -radius && d2 < -radius) {
        return None;
    }

    let span = d1.abs() + d2.abs();
    let delta = if span > f32::EPSILON { (d1 / span).abs() } else { 0.0 };
    let crossing = capsule.start.lerp(capsule.end, delta);

    if triangle.contains_point(crossing) {
        return Some(Contact::new(normal, d1.min(d2).abs()));
    }

    let radius_sq = radius * radius;
    for (edge_start, edge_end) in triangle.edges() {
        let (on_capsule, on_edge) =
            closest_points_on_segments(capsule.start, capsule.end, edge_start, edge_end);
        let dist_sq = on_capsule.distance_squared(on_edge);
        if dist_sq < radius_sq {
            let push = (on_capsule - on_edge).normalize_or_zero();
            return Some(Contact::new(push, radius - dist_sq.sqrt()));
        }
    }

    None
}
