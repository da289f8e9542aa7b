//! Falloff curves mapping normalized brush distance to an intensity multiplier.

use std::fmt;
use std::sync::Arc;

/// A single point on a [`FalloffCurve::Keyframes`] curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Normalized distance from the brush center.
    pub time: f32,
    /// Multiplier at `time`.
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Maps normalized distance `t` in `[0, 1]` (0 = brush center, 1 = edge)
/// to an intensity multiplier.
#[derive(Clone, Default)]
pub enum FalloffCurve {
    /// Same multiplier everywhere inside the brush (hard brush).
    Constant(f32),

    /// `1 - t`.
    #[default]
    Linear,

    /// `1 - smoothstep(t)`: flat near the center and the edge.
    Smooth,

    /// Piecewise linear through sorted keyframes.
    ///
    /// Values are held constant before the first and after the last key.
    /// An empty curve, or a NaN `t`, evaluates to 0.
    Keyframes(Vec<Keyframe>),

    /// Arbitrary caller-supplied curve.
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl FalloffCurve {
    /// Build a keyframe curve from `(time, value)` pairs, sorted by time.
    ///
    /// # Example
    /// ```
    /// use bevy_vertex_painter::brush::FalloffCurve;
    ///
    /// let curve = FalloffCurve::keyframes([(1.0, 0.0), (0.0, 1.0)]);
    /// assert_eq!(curve.evaluate(0.5), 0.5);
    /// ```
    pub fn keyframes(points: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut keys: Vec<Keyframe> = points
            .into_iter()
            .filter(|(t, v)| t.is_finite() && v.is_finite())
            .map(|(t, v)| Keyframe::new(t, v))
            .collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self::Keyframes(keys)
    }

    /// Wrap a closure as a falloff curve.
    pub fn custom(f: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Evaluate the curve at normalized distance `t`.
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            FalloffCurve::Constant(v) => *v,
            FalloffCurve::Linear => 1.0 - t.clamp(0.0, 1.0),
            FalloffCurve::Smooth => {
                let t = t.clamp(0.0, 1.0);
                1.0 - t * t * (3.0 - 2.0 * t)
            }
            FalloffCurve::Keyframes(keys) => sample_keyframes(keys, t),
            FalloffCurve::Custom(f) => f(t),
        }
    }
}

fn sample_keyframes(keys: &[Keyframe], t: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 0.0;
    };
    if t.is_nan() {
        return 0.0;
    }
    if t <= first.time {
        return first.value;
    }
    if t >= last.time {
        return last.value;
    }

    // First key strictly after t; t > first.time so idx >= 1.
    let idx = keys.partition_point(|k| k.time <= t);
    let a = keys[idx - 1];
    let b = keys[idx];
    let span = b.time - a.time;
    if span <= f32::EPSILON {
        return b.value;
    }
    a.value + (b.value - a.value) * ((t - a.time) / span)
}

impl fmt::Debug for FalloffCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FalloffCurve::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            FalloffCurve::Linear => f.write_str("Linear"),
            FalloffCurve::Smooth => f.write_str("Smooth"),
            FalloffCurve::Keyframes(keys) => f.debug_tuple("Keyframes").field(keys).finish(),
            FalloffCurve::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        let curve = FalloffCurve::Linear;
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(0.25), 0.75);
        assert_eq!(curve.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_smooth_endpoints() {
        let curve = FalloffCurve::Smooth;
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(0.5), 0.5);
        assert_eq!(curve.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_empty_keyframes_evaluate_to_zero() {
        let curve = FalloffCurve::keyframes([]);
        assert_eq!(curve.evaluate(0.3), 0.0);
    }

    #[test]
    fn test_keyframes_interpolate_and_hold() {
        let curve = FalloffCurve::keyframes([(0.2, 1.0), (0.6, 0.0), (1.0, 0.5)]);
        assert_eq!(curve.evaluate(0.0), 1.0); // held before first key
        assert!((curve.evaluate(0.4) - 0.5).abs() < 1e-6);
        assert!((curve.evaluate(0.8) - 0.25).abs() < 1e-6);
        assert_eq!(curve.evaluate(2.0), 0.5); // held after last key
    }

    #[test]
    fn test_keyframes_drop_non_finite() {
        let curve = FalloffCurve::keyframes([(f32::NAN, 1.0), (0.0, 0.25)]);
        assert_eq!(curve.evaluate(0.5), 0.25);
    }

    #[test]
    fn test_keyframes_at_nan() {
        let curve = FalloffCurve::keyframes([(0.0, 1.0), (1.0, 0.0)]);
        assert_eq!(curve.evaluate(f32::NAN), 0.0);
    }

    #[test]
    fn test_custom() {
        let curve = FalloffCurve::custom(|t| 1.0 - t * t);
        assert_eq!(curve.evaluate(0.5), 0.75);
        assert_eq!(format!("{curve:?}"), "Custom(..)");
    }
}
