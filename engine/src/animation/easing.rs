//! Easing curves
//!
//! Each curve maps normalized progress in [0, 1] to eased progress with
//! `f(0) = 0` and `f(1) = 1`. Names follow the usual tweening vocabulary
//! (`power1` is quadratic, `power2` cubic).

use std::f32::consts::TAU;

/// An easing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    /// Quadratic ease in and out
    Power1InOut,
    /// Cubic ease out
    Power2Out,
    /// Decaying bounces towards the end value
    BounceOut,
    /// Overshooting spring towards the end value
    ElasticOut { amplitude: f32, period: f32 },
}

impl Ease {
    /// Evaluate the curve. `t` is clamped to [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1InOut => power1_in_out(t),
            Ease::Power2Out => power2_out(t),
            Ease::BounceOut => bounce_out(t),
            Ease::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

fn power1_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

fn power2_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    let amplitude = amplitude.max(1.0);
    let period = period.max(f32::EPSILON);
    // Phase shift so the curve starts at zero
    let shift = period / TAU * (1.0 / amplitude).asin();
    amplitude * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
}
