//! Static mesh triangles
//!
//! Level geometry arrives as a soup of triangles. Winding is counter-clockwise
//! when seen from the side the surface faces, so the plane normal of a floor
//! triangle points up.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// A single triangle of the static collision mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

// Level files and octree leaves store triangles as nine packed floats.
static_assertions::assert_eq_size!(Triangle, [f32; 9]);

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Unit normal of the supporting plane, or `None` for a degenerate triangle.
    pub fn normal(&self) -> Option<Vec3> {
        (self.b - self.a).cross(self.c - self.a).try_normalize()
    }

    /// Signed distance from `point` to the supporting plane.
    ///
    /// Positive on the side the normal points to. Degenerate triangles report
    /// `f32::INFINITY` so every capsule is considered in front of them.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        match self.normal() {
            Some(n) => n.dot(point - self.a),
            None => f32::INFINITY,
        }
    }

    /// Whether `point`, projected onto the triangle's plane, lies inside the triangle.
    ///
    /// Uses barycentric coordinates; points on an edge count as inside.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let v0 = self.c - self.a;
        let v1 = self.b - self.a;
        let v2 = point - self.a;

        let dot00 = v0.dot(v0);
        let dot01 = v0.dot(v1);
        let dot02 = v0.dot(v2);
        let dot11 = v1.dot(v1);
        let dot12 = v1.dot(v2);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom.abs() < f32::EPSILON {
            return false;
        }

        let inv = 1.0 / denom;
        let u = (dot11 * dot02 - dot01 * dot12) * inv;
        let v = (dot00 * dot12 - dot01 * dot02) * inv;

        u >= 0.0 && v >= 0.0 && u + v <= 1.0
    }

    /// The three edges as (start, end) pairs: ab, bc, ca.
    pub fn edges(&self) -> [(Vec3, Vec3); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// Axis-aligned bounds of the three vertices.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.a.min(self.b).min(self.c),
            self.a.max(self.b).max(self.c),
        )
    }
}

/// The twelve outward-facing triangles of an axis-aligned box.
pub fn box_triangles(bounds: &Aabb) -> [Triangle; 12] {
    let (lo, hi) = (bounds.min, bounds.max);
    let corner = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);

    // Quads wound counter-clockwise seen from outside
    let faces = [
        // +Y
        [corner(lo.x, hi.y, lo.z), corner(lo.x, hi.y, hi.z), corner(hi.x, hi.y, hi.z), corner(hi.x, hi.y, lo.z)],
        // -Y
        [corner(lo.x, lo.y, lo.z), corner(hi.x, lo.y, lo.z), corner(hi.x, lo.y, hi.z), corner(lo.x, lo.y, hi.z)],
        // +X
        [corner(hi.x, lo.y, lo.z), corner(hi.x, hi.y, lo.z), corner(hi.x, hi.y, hi.z), corner(hi.x, lo.y, hi.z)],
        // -X
        [corner(lo.x, lo.y, lo.z), corner(lo.x, lo.y, hi.z), corner(lo.x, hi.y, hi.z), corner(lo.x, hi.y, lo.z)],
        // +Z
        [corner(lo.x, lo.y, hi.z), corner(hi.x, lo.y, hi.z), corner(hi.x, hi.y, hi.z), corner(lo.x, hi.y, hi.z)],
        // -Z
        [corner(lo.x, lo.y, lo.z), corner(lo.x, hi.y, lo.z), corner(hi.x, hi.y, lo.z), corner(hi.x, lo.y, lo.z)],
    ];

    let mut out = [Triangle::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO); 12];
    for (i, [q0, q1, q2, q3]) in faces.into_iter().enumerate() {
        out[i * 2] = Triangle::new(q0, q1, q2);
        out[i * 2 + 1] = Triangle::new(q0, q2, q3);
    }
    out
}
