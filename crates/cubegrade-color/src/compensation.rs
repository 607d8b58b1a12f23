//! Limited-range delivery compensation.
//!
//! Some delivery codecs store picture data in the 16–235 legal range with an
//! effective 1.96 gamma. A LUT graded for full-range 2.2 footage looks washed
//! out there, so the compensator expands the legal range and re-encodes the
//! curve before grading, then undoes both afterwards.

use crate::error::ColorError;
use crate::pipeline::ColorTransform;
use crate::transfer::GammaCurve;
use cubegrade_core::Rgb;
use serde::{Deserialize, Serialize};

/// Which transform a baked LUT targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputProfile {
    /// Full-range footage, no compensation.
    #[default]
    Standard,
    /// Limited-range 1.96-gamma footage; wraps the pipeline in
    /// [`CodecRangeCompensator`].
    LegalRange,
}

impl OutputProfile {
    pub fn is_compensated(self) -> bool {
        matches!(self, Self::LegalRange)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::LegalRange => "legal-range",
        }
    }
}

impl From<bool> for OutputProfile {
    fn from(compensate: bool) -> Self {
        if compensate {
            Self::LegalRange
        } else {
            Self::Standard
        }
    }
}

impl std::str::FromStr for OutputProfile {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "full" => Ok(Self::Standard),
            "legal-range" | "legal" | "limited" => Ok(Self::LegalRange),
            other => Err(ColorError::Parse(format!("output profile '{other}'"))),
        }
    }
}

/// Normalized signal bounds of a narrow-range encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegalRange {
    pub min: f64,
    pub max: f64,
}

impl LegalRange {
    /// 8-bit 16–235, as normalized fractions.
    pub const VIDEO_8BIT: Self = Self {
        min: 0.0627,
        max: 0.9216,
    };

    /// Stretch a legal-range value to [0, 1].
    #[inline]
    pub fn expand(self, v: f64) -> f64 {
        ((v - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Squeeze a [0, 1] value back into the legal range.
    #[inline]
    pub fn compress(self, v: f64) -> f64 {
        self.min + v.clamp(0.0, 1.0) * (self.max - self.min)
    }
}

/// Wraps a transform with a legal-range/gamma pre-pass and its inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecRangeCompensator<T> {
    inner: T,
    range: LegalRange,
    codec: GammaCurve,
    display: GammaCurve,
}

impl<T: ColorTransform> CodecRangeCompensator<T> {
    /// Compensator for 8-bit legal range with 1.96 → 2.2 gamma.
    pub fn new(inner: T) -> Self {
        Self::with_curves(
            inner,
            LegalRange::VIDEO_8BIT,
            GammaCurve::CODEC_1_96,
            GammaCurve::DISPLAY_2_2,
        )
    }

    pub fn with_curves(
        inner: T,
        range: LegalRange,
        codec: GammaCurve,
        display: GammaCurve,
    ) -> Self {
        Self {
            inner,
            range,
            codec,
            display,
        }
    }

    /// Legal-range codec signal → full-range display signal.
    pub fn pre(&self, rgb: Rgb) -> Rgb {
        rgb.map(|v| self.codec.reencode(self.range.expand(v), self.display))
    }

    /// Full-range display signal → legal-range codec signal.
    pub fn post(&self, rgb: Rgb) -> Rgb {
        rgb.map(|v| self.range.compress(self.display.reencode(v, self.codec)))
    }
}

impl<T: ColorTransform> ColorTransform for CodecRangeCompensator<T> {
    fn transform(&self, rgb: Rgb) -> Rgb {
        self.post(self.inner.transform(self.pre(rgb)))
    }
}
