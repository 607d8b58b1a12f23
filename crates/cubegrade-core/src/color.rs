//! RGB sample type and perceptual helpers.

use serde::{Deserialize, Serialize};

/// Rec. 601 luma weights (R, G, B).
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// RGB triple with 64-bit float components.
///
/// Used both for color samples in [0, 1] and for per-channel grading
/// controls in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Create a new triple.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Same value on all three channels.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Create a sample from 8-bit channel values.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Convert to 8-bit channel values, clamping first.
    #[inline]
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Apply `f` to every channel.
    #[inline]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }

    /// Clamp every channel to [0, 1].
    #[inline]
    pub fn clamp01(self) -> Self {
        self.map(|v| v.clamp(0.0, 1.0))
    }

    /// Perceptual luma using [`LUMA_WEIGHTS`].
    #[inline]
    pub fn luma(self) -> f64 {
        LUMA_WEIGHTS[0] * self.r + LUMA_WEIGHTS[1] * self.g + LUMA_WEIGHTS[2] * self.b
    }

    #[inline]
    pub fn max_channel(self) -> f64 {
        self.r.max(self.g).max(self.b)
    }

    #[inline]
    pub fn min_channel(self) -> f64 {
        self.r.min(self.g).min(self.b)
    }

    /// HSL saturation. Achromatic samples return 0.
    pub fn hsl_saturation(self) -> f64 {
        let max = self.max_channel();
        let min = self.min_channel();
        if max == min {
            return 0.0;
        }
        let delta = max - min;
        let lightness = (max + min) / 2.0;
        if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        }
    }

    /// True when every channel is within `eps` of `other`.
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.r - other.r).abs() <= eps
            && (self.g - other.g).abs() <= eps
            && (self.b - other.b).abs() <= eps
    }

    pub const BLACK: Self = Self::splat(0.0);
    pub const WHITE: Self = Self::splat(1.0);
    pub const MID_GRAY: Self = Self::splat(0.5);
    pub const ZERO: Self = Self::splat(0.0);
}

impl From<[f64; 3]> for Rgb {
    fn from(v: [f64; 3]) -> Self {
        Self::from_array(v)
    }
}
