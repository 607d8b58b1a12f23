//! Grading parameters and partial updates.
//!
//! `GradingParameters` is the single value threaded through the pipeline.
//! It is `Copy` and never mutated in place: every update derives a new
//! value, so the same instance can be shared across sampling workers.

use crate::color::Rgb;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// The six scalar grading controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarControl {
    Contrast,
    Saturation,
    Temperature,
    Tint,
    Shadows,
    Highlights,
}

impl ScalarControl {
    pub const ALL: [Self; 6] = [
        Self::Contrast,
        Self::Saturation,
        Self::Temperature,
        Self::Tint,
        Self::Shadows,
        Self::Highlights,
    ];

    /// Field name as it appears in JSON and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Temperature => "temperature",
            Self::Tint => "tint",
            Self::Shadows => "shadows",
            Self::Highlights => "highlights",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// The three per-channel tonal controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneTriple {
    Lift,
    Gamma,
    Gain,
}

impl ToneTriple {
    pub const ALL: [Self; 3] = [Self::Lift, Self::Gamma, Self::Gain];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Lift => "lift",
            Self::Gamma => "gamma",
            Self::Gain => "gain",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Complete grading parameter set. Every field lives in [-1, 1];
/// all-zero is the identity transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingParameters {
    pub contrast: f64,
    pub saturation: f64,
    pub temperature: f64,
    pub tint: f64,
    pub shadows: f64,
    pub highlights: f64,
    /// Shadow offset per channel.
    pub lift: Rgb,
    /// Midtone power per channel.
    pub gamma: Rgb,
    /// Highlight multiplier per channel.
    pub gain: Rgb,
}

impl Default for GradingParameters {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl GradingParameters {
    /// The identity grade.
    pub const NEUTRAL: Self = Self {
        contrast: 0.0,
        saturation: 0.0,
        temperature: 0.0,
        tint: 0.0,
        shadows: 0.0,
        highlights: 0.0,
        lift: Rgb::ZERO,
        gamma: Rgb::ZERO,
        gain: Rgb::ZERO,
    };

    pub fn scalar(&self, control: ScalarControl) -> f64 {
        match control {
            ScalarControl::Contrast => self.contrast,
            ScalarControl::Saturation => self.saturation,
            ScalarControl::Temperature => self.temperature,
            ScalarControl::Tint => self.tint,
            ScalarControl::Shadows => self.shadows,
            ScalarControl::Highlights => self.highlights,
        }
    }

    pub fn triple(&self, triple: ToneTriple) -> Rgb {
        match triple {
            ToneTriple::Lift => self.lift,
            ToneTriple::Gamma => self.gamma,
            ToneTriple::Gain => self.gain,
        }
    }

    /// Derive a copy with one scalar control replaced (clamped).
    #[must_use]
    pub fn with_scalar(self, control: ScalarControl, value: f64) -> Self {
        let value = sanitize(value);
        let mut next = self;
        match control {
            ScalarControl::Contrast => next.contrast = value,
            ScalarControl::Saturation => next.saturation = value,
            ScalarControl::Temperature => next.temperature = value,
            ScalarControl::Tint => next.tint = value,
            ScalarControl::Shadows => next.shadows = value,
            ScalarControl::Highlights => next.highlights = value,
        }
        next
    }

    /// Derive a copy with one tonal triple replaced (clamped).
    #[must_use]
    pub fn with_triple(self, triple: ToneTriple, value: Rgb) -> Self {
        let value = value.map(sanitize);
        let mut next = self;
        match triple {
            ToneTriple::Lift => next.lift = value,
            ToneTriple::Gamma => next.gamma = value,
            ToneTriple::Gain => next.gain = value,
        }
        next
    }

    /// Derive a new parameter set with every field of `patch` applied.
    #[must_use]
    pub fn merged(&self, patch: &ParameterPatch) -> Self {
        let mut next = *self;
        for control in ScalarControl::ALL {
            if let Some(v) = patch.scalar(control) {
                next = next.with_scalar(control, v);
            }
        }
        for triple in ToneTriple::ALL {
            if let Some(v) = patch.triple(triple) {
                next = next.with_triple(triple, v);
            }
        }
        next
    }

    /// Neutral parameters with `patch` applied.
    pub fn from_patch(patch: &ParameterPatch) -> Self {
        Self::NEUTRAL.merged(patch)
    }

    /// Clamp every field to [-1, 1]; NaN becomes 0.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut next = *self;
        for control in ScalarControl::ALL {
            next = next.with_scalar(control, self.scalar(control));
        }
        for triple in ToneTriple::ALL {
            next = next.with_triple(triple, self.triple(triple));
        }
        next
    }

    /// Strict boundary check: rejects non-finite and out-of-range fields.
    pub fn validate(&self) -> Result<()> {
        let check = |field: &'static str, value: f64| -> Result<()> {
            if !value.is_finite() {
                return Err(CoreError::NonFinite { field });
            }
            if !(-1.0..=1.0).contains(&value) {
                return Err(CoreError::OutOfRange { field, value });
            }
            Ok(())
        };
        for control in ScalarControl::ALL {
            check(control.name(), self.scalar(control))?;
        }
        for triple in ToneTriple::ALL {
            let v = self.triple(triple);
            check(triple.name(), v.r)?;
            check(triple.name(), v.g)?;
            check(triple.name(), v.b)?;
        }
        Ok(())
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

/// Partial parameter set. Absent fields leave the base value untouched
/// when merged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tint: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadows: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lift: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain: Option<Rgb>,
}

impl ParameterPatch {
    pub fn scalar(&self, control: ScalarControl) -> Option<f64> {
        match control {
            ScalarControl::Contrast => self.contrast,
            ScalarControl::Saturation => self.saturation,
            ScalarControl::Temperature => self.temperature,
            ScalarControl::Tint => self.tint,
            ScalarControl::Shadows => self.shadows,
            ScalarControl::Highlights => self.highlights,
        }
    }

    pub fn triple(&self, triple: ToneTriple) -> Option<Rgb> {
        match triple {
            ToneTriple::Lift => self.lift,
            ToneTriple::Gamma => self.gamma,
            ToneTriple::Gain => self.gain,
        }
    }

    pub fn set_scalar(&mut self, control: ScalarControl, value: f64) {
        let slot = match control {
            ScalarControl::Contrast => &mut self.contrast,
            ScalarControl::Saturation => &mut self.saturation,
            ScalarControl::Temperature => &mut self.temperature,
            ScalarControl::Tint => &mut self.tint,
            ScalarControl::Shadows => &mut self.shadows,
            ScalarControl::Highlights => &mut self.highlights,
        };
        *slot = Some(value);
    }

    pub fn set_triple(&mut self, triple: ToneTriple, value: Rgb) {
        let slot = match triple {
            ToneTriple::Lift => &mut self.lift,
            ToneTriple::Gamma => &mut self.gamma,
            ToneTriple::Gain => &mut self.gain,
        };
        *slot = Some(value);
    }

    /// Names of the fields present in this patch, in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let scalars = ScalarControl::ALL
            .into_iter()
            .filter(|c| self.scalar(*c).is_some())
            .map(ScalarControl::name);
        let triples = ToneTriple::ALL
            .into_iter()
            .filter(|t| self.triple(*t).is_some())
            .map(ToneTriple::name);
        scalars.chain(triples).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }
}

impl From<GradingParameters> for ParameterPatch {
    fn from(p: GradingParameters) -> Self {
        Self {
            contrast: Some(p.contrast),
            saturation: Some(p.saturation),
            temperature: Some(p.temperature),
            tint: Some(p.tint),
            shadows: Some(p.shadows),
            highlights: Some(p.highlights),
            lift: Some(p.lift),
            gamma: Some(p.gamma),
            gain: Some(p.gain),
        }
    }
}

#[inline]
fn sanitize(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, 1.0)
    }
}
