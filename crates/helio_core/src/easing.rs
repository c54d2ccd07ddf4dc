//! Easing curves for transitions.
//!
//! The set is closed on purpose: transitions dispatch on the enum rather
//! than calling through a function object, which keeps the per-frame
//! update path free of indirection.

use serde::Deserialize;

/// The easing curve applied to a transition's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionType {
    /// Straight interpolation.
    Linear,
    /// Hermite smooth step (slow start, slow end).
    #[default]
    Smooth,
    /// Sine curve, accelerating from zero.
    EaseInSine,
    /// Sine curve, decelerating to zero.
    EaseOutSine,
    /// Sine curve, slow at both ends.
    EaseInOutSine,
}

impl TransitionType {
    /// Applies the curve to a progress value.
    ///
    /// Input is clamped to `[0, 1]`; the result is exact at the endpoints.
    #[must_use]
    pub fn ease(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => t * t * (3.0 - 2.0 * t),
            Self::EaseInSine => 1.0 - ((t * core::f32::consts::FRAC_PI_2).cos()),
            Self::EaseOutSine => (t * core::f32::consts::FRAC_PI_2).sin(),
            Self::EaseInOutSine => -((core::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [TransitionType; 5] = [
        TransitionType::Linear,
        TransitionType::Smooth,
        TransitionType::EaseInSine,
        TransitionType::EaseOutSine,
        TransitionType::EaseInOutSine,
    ];

    #[test]
    fn exact_at_endpoints() {
        for curve in CURVES {
            assert_eq!(curve.ease(0.0), 0.0, "{curve:?} at 0");
            assert!((curve.ease(1.0) - 1.0).abs() < 1e-6, "{curve:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        for curve in CURVES {
            assert_eq!(curve.ease(-2.0), curve.ease(0.0), "{curve:?}");
            assert!((curve.ease(2.0) - curve.ease(1.0)).abs() < 1e-6, "{curve:?}");
        }
    }

    #[test]
    fn output_stays_in_unit_range() {
        for curve in CURVES {
            for i in 0..=100 {
                let t = i as f32 / 100.0;
                let v = curve.ease(t);
                assert!((-1e-6..=1.0 + 1e-6).contains(&v), "{curve:?} at {t}: {v}");
            }
        }
    }
}
