//! Capsule collider
//!
//! The actor's collision shape: a segment from `start` (lower sphere centre)
//! to `end` (upper sphere centre) swept by `radius`. The actor's feet sit one
//! radius below `start`.

use glam::Vec3;

use super::collision::Aabb;

/// Cylinder-with-hemispherical-caps collision shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// Centre of the lower hemisphere
    pub start: Vec3,
    /// Centre of the upper hemisphere
    pub end: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Upright capsule whose lowest point touches `foot`.
    ///
    /// `height` is the height of the upper sphere centre above the foot.
    pub fn standing_at(foot: Vec3, radius: f32, height: f32) -> Self {
        Self {
            start: foot + Vec3::Y * radius,
            end: foot + Vec3::Y * height,
            radius,
        }
    }

    /// Move both endpoints by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.start += offset;
        self.end += offset;
    }

    /// Midpoint of the inner segment.
    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// The lowest point of an upright capsule.
    pub fn foot(&self) -> Vec3 {
        self.start - Vec3::Y * self.radius
    }

    /// Bounding box including the hemispherical caps.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.start.min(self.end) - Vec3::splat(self.radius),
            self.start.max(self.end) + Vec3::splat(self.radius),
        )
    }
}
