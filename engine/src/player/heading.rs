//! Heading interpolation
//!
//! The character snaps its target heading per direction and eases towards it
//! every frame along the shortest arc.

use std::f32::consts::{PI, TAU};

/// Signed angle from `from` to `to`, wrapped into (-PI, PI].
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI { delta - TAU } else { delta }
}

/// Move `current` a fraction `factor` of the way to `target` along the shortest arc.
///
/// `factor` is clamped to [0, 1], so one call never turns more than PI.
pub fn approach_heading(current: f32, target: f32, factor: f32) -> f32 {
    current + shortest_angle_delta(current, target) * factor.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_delta_simple() {
        assert!((shortest_angle_delta(0.0, FRAC_PI_2) - FRAC_PI_2).abs() < EPSILON);
        assert!((shortest_angle_delta(FRAC_PI_2, 0.0) + FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn test_delta_wraps_the_short_way() {
        // From just below +PI to just above -PI is a tiny positive step
        let delta = shortest_angle_delta(PI - 0.1, -PI + 0.1);
        assert!((delta - 0.2).abs() < 1e-4, "delta {delta}");

        // Several turns of accumulated yaw collapse to the same answer
        let delta = shortest_angle_delta(10.0 * TAU + 0.3, 0.0);
        assert!((delta + 0.3).abs() < 1e-3, "delta {delta}");
    }

    #[test]
    fn test_half_turn_is_positive_pi() {
        let delta = shortest_angle_delta(0.0, PI);
        assert!((delta - PI).abs() < EPSILON);
        let delta = shortest_angle_delta(0.0, -PI);
        assert!(delta > 0.0 && delta <= PI + EPSILON);
    }

    #[test]
    fn test_approach_moves_fraction() {
        let yaw = approach_heading(0.0, FRAC_PI_2, 0.4);
        assert!((yaw - 0.4 * FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn test_approach_converges() {
        let mut yaw = FRAC_PI_2;
        for _ in 0..60 {
            yaw = approach_heading(yaw, -FRAC_PI_2 + 0.01, 0.4);
        }
        assert!(shortest_angle_delta(yaw, -FRAC_PI_2 + 0.01).abs() < 1e-3);
    }
}
