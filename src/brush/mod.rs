//! Brush parameters for vertex color painting.
//!
//! The [`Brush`] resource holds everything a stroke needs: radius, signed
//! intensity, falloff curve and the color channel it writes into.

use std::ops::RangeInclusive;

use bevy::prelude::*;

mod apply;
mod falloff;

pub use apply::{apply_brush, paint_vertices};
pub use falloff::{FalloffCurve, Keyframe};

/// Valid brush radius, in world units.
pub const RADIUS_RANGE: RangeInclusive<f32> = 0.0..=10.0;

/// Valid brush intensity. Negative values remove color.
pub const INTENSITY_RANGE: RangeInclusive<f32> = -0.1..=0.1;

/// Color channel a brush paints into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum ColorChannel {
    #[default]
    Red,
    Green,
    Blue,
    Alpha,
}

impl ColorChannel {
    /// All channels in RGBA order.
    pub const ALL: [ColorChannel; 4] = [
        ColorChannel::Red,
        ColorChannel::Green,
        ColorChannel::Blue,
        ColorChannel::Alpha,
    ];

    /// Index of this channel within an `[r, g, b, a]` color.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ColorChannel::Red => 0,
            ColorChannel::Green => 1,
            ColorChannel::Blue => 2,
            ColorChannel::Alpha => 3,
        }
    }

    /// Channel at `index` in RGBA order, if any.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(ColorChannel::Red),
            1 => Some(ColorChannel::Green),
            2 => Some(ColorChannel::Blue),
            3 => Some(ColorChannel::Alpha),
            _ => None,
        }
    }

    /// Display label used by channel selectors.
    pub const fn label(self) -> &'static str {
        match self {
            ColorChannel::Red => "Red",
            ColorChannel::Green => "Green",
            ColorChannel::Blue => "Blue",
            ColorChannel::Alpha => "Alpha",
        }
    }

    /// Next channel, wrapping from alpha back to red.
    pub const fn next(self) -> Self {
        match self {
            ColorChannel::Red => ColorChannel::Green,
            ColorChannel::Green => ColorChannel::Blue,
            ColorChannel::Blue => ColorChannel::Alpha,
            ColorChannel::Alpha => ColorChannel::Red,
        }
    }
}

/// Brush used for painting vertex colors.
///
/// Radius and intensity are kept inside [`RADIUS_RANGE`] and
/// [`INTENSITY_RANGE`] by the setters and builders.
///
/// # Example
/// ```
/// use bevy_vertex_painter::brush::{Brush, ColorChannel, FalloffCurve};
///
/// let brush = Brush::default()
///     .with_radius(2.5)
///     .with_intensity(0.05)
///     .with_channel(ColorChannel::Green)
///     .with_falloff(FalloffCurve::Smooth);
///
/// assert_eq!(brush.radius, 2.5);
/// assert_eq!(brush.channel, ColorChannel::Green);
/// ```
#[derive(Resource, Clone, Debug)]
pub struct Brush {
    /// Radius of the brush, in world units.
    ///
    /// Default: 1.0
    pub radius: f32,

    /// Amount added to the channel at the brush center, per application.
    ///
    /// Default: 0.05
    pub intensity: f32,

    /// Multiplier applied to the intensity over normalized distance.
    ///
    /// Default: [`FalloffCurve::Linear`]
    pub falloff: FalloffCurve,

    /// Channel the brush writes into.
    pub channel: ColorChannel,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            radius: 1.0,
            intensity: 0.05,
            falloff: FalloffCurve::default(),
            channel: ColorChannel::default(),
        }
    }
}

impl Brush {
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.set_radius(radius);
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.set_intensity(intensity);
        self
    }

    pub fn with_falloff(mut self, falloff: FalloffCurve) -> Self {
        self.falloff = falloff;
        self
    }

    pub fn with_channel(mut self, channel: ColorChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Set the radius, clamped to [`RADIUS_RANGE`].
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = clamp_to(radius, &RADIUS_RANGE);
    }

    /// Set the intensity, clamped to [`INTENSITY_RANGE`].
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = clamp_to(intensity, &INTENSITY_RANGE);
    }

    /// Evaluate the falloff-scaled intensity at `distance` from the center.
    ///
    /// Returns 0 outside the brush.
    pub fn strength_at(&self, distance: f32) -> f32 {
        if self.radius <= 0.0 || distance >= self.radius {
            return 0.0;
        }
        self.falloff.evaluate(distance / self.radius) * self.intensity
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_index_roundtrip() {
        for channel in ColorChannel::ALL {
            assert_eq!(ColorChannel::from_index(channel.index()), Some(channel));
        }
        assert_eq!(ColorChannel::from_index(4), None);
    }

    #[test]
    fn test_channel_next_wraps() {
        assert_eq!(ColorChannel::Alpha.next(), ColorChannel::Red);
        assert_eq!(ColorChannel::Red.next().label(), "Green");
    }

    #[test]
    fn test_setters_clamp() {
        let mut brush = Brush::default();
        brush.set_radius(42.0);
        assert_eq!(brush.radius, 10.0);
        brush.set_radius(-1.0);
        assert_eq!(brush.radius, 0.0);

        brush.set_intensity(0.5);
        assert_eq!(brush.intensity, 0.1);
        brush.set_intensity(-0.5);
        assert_eq!(brush.intensity, -0.1);
    }

    #[test]
    fn test_nan_clamps_to_range_start() {
        let brush = Brush::default().with_radius(f32::NAN);
        assert_eq!(brush.radius, 0.0);
    }

    #[test]
    fn test_strength_at() {
        let brush = Brush::default().with_radius(2.0).with_intensity(0.1);
        assert!((brush.strength_at(0.0) - 0.1).abs() < 1e-6);
        assert!((brush.strength_at(1.0) - 0.05).abs() < 1e-6);
        assert_eq!(brush.strength_at(2.0), 0.0);
        assert_eq!(brush.strength_at(3.0), 0.0);
    }
}
