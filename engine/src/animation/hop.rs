//! Hop animations
//!
//! Squash-and-stretch timelines for the character (played on every hop) and
//! for the park creatures (played when picked).

use glam::Vec3;

use super::easing::Ease;
use super::track::Track;

/// Total length of a prop hop's rise and fall, in seconds
pub const PROP_HOP_DURATION: f32 = 0.5;

/// How high a prop jumps
pub const PROP_HOP_HEIGHT: f32 = 2.0;

/// Total length of the character's squash timeline, in seconds
pub const CHARACTER_HOP_DURATION: f32 = 0.5;

/// A running scale (and optional vertical offset) animation.
#[derive(Debug, Clone, PartialEq)]
pub struct HopAnimation {
    scale: Track,
    offset: Track,
    elapsed: f32,
    /// When the landing finishes; a new hop may start from here on
    landed_at: f32,
}

impl HopAnimation {
    /// Squash-and-stretch for the character, around unit scale.
    pub fn character() -> Self {
        let d = CHARACTER_HOP_DURATION;
        let scale = Track::new(Vec3::ONE)
            .then(d * 0.2, Vec3::new(1.08, 0.9, 1.08), Ease::Power2Out)
            .then(d * 0.3, Vec3::new(0.92, 1.1, 0.92), Ease::Power2Out)
            .then(d * 0.3, Vec3::ONE, Ease::Power1InOut)
            .hold(d * 0.2);
        let landed_at = scale.duration();
        Self {
            scale,
            offset: Track::new(Vec3::ZERO),
            elapsed: 0.0,
            landed_at,
        }
    }

    /// Jump for a park creature whose resting scale is `base`.
    ///
    /// Heavy creatures deform relative to their own scale and skip the
    /// elastic settle; light ones deform to absolute targets and finish by
    /// springing back to unit scale.
    pub fn prop(base: Vec3, heavy: bool) -> Self {
        let d = PROP_HOP_DURATION;
        let target = |factor: Vec3| if heavy { base * factor } else { factor };

        let squash_end = d * 0.2;
        let rise_end = squash_end + d * 0.5;
        let recover_end = rise_end + d * 0.3;
        let landed_at = recover_end + d * 0.5;

        let mut scale = Track::new(base)
            .at(0.0, d * 0.2, target(Vec3::new(1.2, 0.8, 1.2)), Ease::Power2Out)
            .at(squash_end, d * 0.3, target(Vec3::new(0.8, 1.3, 0.8)), Ease::Power2Out)
            // Heavy creatures come back to exactly `base`, so their rest
            // scale is the same after any number of hops.
            .at(rise_end, d * 0.3, target(Vec3::ONE), Ease::Power1InOut);
        if !heavy {
            scale = scale.at(
                landed_at,
                d * 0.2,
                Vec3::ONE,
                Ease::ElasticOut { amplitude: 1.0, period: 0.3 },
            );
        }

        let offset = Track::new(Vec3::ZERO)
            .at(squash_end, d * 0.5, Vec3::Y * PROP_HOP_HEIGHT, Ease::Power2Out)
            .at(recover_end, d * 0.5, Vec3::ZERO, Ease::BounceOut);

        Self {
            scale,
            offset,
            elapsed: 0.0,
            landed_at,
        }
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns `true` on the call during which the landing completes.
    pub fn advance(&mut self, dt: f32) -> bool {
        let was_landed = self.has_landed();
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration());
        !was_landed && self.has_landed()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.scale.duration().max(self.offset.duration())
    }

    pub fn scale(&self) -> Vec3 {
        self.scale.sample(self.elapsed)
    }

    /// Displacement from the resting position.
    pub fn offset(&self) -> Vec3 {
        self.offset.sample(self.elapsed)
    }

    pub fn has_landed(&self) -> bool {
        self.elapsed >= self.landed_at
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration()
    }
}
