//! Keyframe tracks
//!
//! A [`Track`] animates one `Vec3` property through a sequence of tweens.
//! Each tween eases from whatever value the property held when it started
//! towards its own target.

use glam::Vec3;

use super::easing::Ease;

/// One eased segment of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub start: f32,
    pub duration: f32,
    pub target: Vec3,
    pub ease: Ease,
}

impl Tween {
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }
}

/// Piecewise eased animation of a `Vec3`.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    initial: Vec3,
    tweens: Vec<Tween>,
}

impl Track {
    pub fn new(initial: Vec3) -> Self {
        Self {
            initial,
            tweens: Vec::new(),
        }
    }

    /// Append a tween starting where the track currently ends.
    pub fn then(self, duration: f32, target: Vec3, ease: Ease) -> Self {
        let start = self.duration();
        self.at(start, duration, target, ease)
    }

    /// Keep the current end value for `duration` seconds.
    pub fn hold(self, duration: f32) -> Self {
        let target = self.final_value();
        self.then(duration, target, Ease::Linear)
    }

    /// Insert a tween at an absolute start time.
    ///
    /// Tweens on one track must not overlap; later starts sort after earlier ones.
    pub fn at(mut self, start: f32, duration: f32, target: Vec3, ease: Ease) -> Self {
        self.tweens.push(Tween {
            start,
            duration: duration.max(0.0),
            target,
            ease,
        });
        self.tweens.sort_by(|a, b| a.start.total_cmp(&b.start));
        self
    }

    pub fn initial(&self) -> Vec3 {
        self.initial
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Time at which the last tween finishes.
    pub fn duration(&self) -> f32 {
        self.tweens.iter().map(Tween::end).fold(0.0, f32::max)
    }

    pub fn final_value(&self) -> Vec3 {
        self.tweens.last().map_or(self.initial, |tween| tween.target)
    }

    /// Property value `time` seconds into the track.
    pub fn sample(&self, time: f32) -> Vec3 {
        let mut value = self.initial;
        for tween in &self.tweens {
            if time >= tween.end() {
                value = tween.target;
                continue;
            }
            if time > tween.start {
                let progress = (time - tween.start) / tween.duration;
                return value.lerp(tween.target, tween.ease.apply(progress));
            }
            break;
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_empty_track_is_constant() {
        let track = Track::new(Vec3::ONE);
        assert_eq!(track.duration(), 0.0);
        assert_eq!(track.sample(5.0), Vec3::ONE);
    }

    #[test]
    fn test_sequential_tweens() {
        let track = Track::new(Vec3::ZERO)
            .then(1.0, Vec3::X, Ease::Linear)
            .then(1.0, Vec3::Y, Ease::Linear);

        assert_eq!(track.duration(), 2.0);
        assert!(close(track.sample(0.0), Vec3::ZERO));
        assert!(close(track.sample(0.5), Vec3::new(0.5, 0.0, 0.0)));
        assert!(close(track.sample(1.0), Vec3::X));
        assert!(close(track.sample(1.5), Vec3::new(0.5, 0.5, 0.0)));
        assert!(close(track.sample(3.0), Vec3::Y));
    }

    #[test]
    fn test_gap_holds_previous_value() {
        let track = Track::new(Vec3::ZERO)
            .at(0.0, 1.0, Vec3::X, Ease::Linear)
            .at(2.0, 1.0, Vec3::Y, Ease::Linear);
        assert!(close(track.sample(1.5), Vec3::X));
    }

    #[test]
    fn test_hold_extends_duration() {
        let track = Track::new(Vec3::ZERO)
            .then(0.5, Vec3::ONE, Ease::Power2Out)
            .hold(0.25);
        assert_eq!(track.duration(), 0.75);
        assert!(close(track.sample(0.6), Vec3::ONE));
    }

    #[test]
    fn test_zero_duration_tween_jumps() {
        let track = Track::new(Vec3::ZERO).then(0.0, Vec3::ONE, Ease::Linear);
        assert!(close(track.sample(0.0), Vec3::ONE));
    }
}
