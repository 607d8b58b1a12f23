//! Grading transform pipeline: five fixed stages applied per sample.
//!
//! Stage order is part of the look: [`GradeStage::ORDER`] is the only place
//! it is defined and [`GradePipeline::process_pixel`] walks it verbatim.
//! Every stage clamps its output to [0, 1].

use cubegrade_core::{GradingParameters, RasterImage, Rgb};
use tracing::warn;

const LIFT_SCALE: f64 = 0.1;
const GAMMA_SCALE: f64 = 0.2;
const GAIN_SCALE: f64 = 0.2;
const ZONE_SCALE: f64 = 0.15;
const TEMPERATURE_SCALE: f64 = 0.1;
const TINT_SCALE: f64 = 0.05;
const CONTRAST_PIVOT: f64 = 0.5;
/// Keeps the contrast denominator positive at contrast = 1.
const CONTRAST_DAMPING: f64 = 0.99;

/// Anything that maps one RGB sample to another.
///
/// Implementations must be pure so grid cells can be sampled in parallel.
pub trait ColorTransform: Send + Sync {
    fn transform(&self, rgb: Rgb) -> Rgb;
}

/// A single stage of the grading pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeStage {
    LiftGammaGain,
    ShadowsHighlights,
    WhiteBalance,
    Contrast,
    Saturation,
}

impl GradeStage {
    /// Application order.
    pub const ORDER: [Self; 5] = [
        Self::LiftGammaGain,
        Self::ShadowsHighlights,
        Self::WhiteBalance,
        Self::Contrast,
        Self::Saturation,
    ];

    pub fn apply(self, rgb: Rgb, params: &GradingParameters) -> Rgb {
        match self {
            Self::LiftGammaGain => lift_gamma_gain(rgb, params),
            Self::ShadowsHighlights => shadows_highlights(rgb, params),
            Self::WhiteBalance => white_balance(rgb, params),
            Self::Contrast => contrast(rgb, params),
            Self::Saturation => saturation(rgb, params),
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::LiftGammaGain => "Lift/Gamma/Gain",
            Self::ShadowsHighlights => "Shadows/Highlights",
            Self::WhiteBalance => "Temperature/Tint",
            Self::Contrast => "Contrast",
            Self::Saturation => "Saturation",
        }
    }
}

/// Lift adds a shadow-weighted offset, gamma re-exponentiates the
/// non-negative part, gain multiplies.
pub fn lift_gamma_gain(rgb: Rgb, params: &GradingParameters) -> Rgb {
    let channel = |v: f64, lift: f64, gamma: f64, gain: f64| {
        let lifted = v + LIFT_SCALE * lift * (1.0 - v);
        let curved = lifted.max(0.0).powf(1.0 / (1.0 + GAMMA_SCALE * gamma));
        (curved * (1.0 + GAIN_SCALE * gain)).clamp(0.0, 1.0)
    };
    let (l, g, k) = (params.lift, params.gamma, params.gain);
    Rgb::new(
        channel(rgb.r, l.r, g.r, k.r),
        channel(rgb.g, l.g, g.g, k.g),
        channel(rgb.b, l.b, g.b, k.b),
    )
}

/// Shadows push values below the midpoint, highlights values above it.
/// The mask is 1 at the extremes and 0 at 0.5.
pub fn shadows_highlights(rgb: Rgb, params: &GradingParameters) -> Rgb {
    let (shadows, highlights) = (params.shadows, params.highlights);
    if shadows == 0.0 && highlights == 0.0 {
        return rgb;
    }
    rgb.map(|v| {
        let mut out = v;
        if shadows != 0.0 && v < CONTRAST_PIVOT {
            let mask = 1.0 - v / CONTRAST_PIVOT;
            out += shadows * ZONE_SCALE * mask;
        }
        if highlights != 0.0 && v > CONTRAST_PIVOT {
            let mask = (v - CONTRAST_PIVOT) / (1.0 - CONTRAST_PIVOT);
            out += highlights * ZONE_SCALE * mask;
        }
        out.clamp(0.0, 1.0)
    })
}

/// Temperature trades red against blue; tint only pulls green.
pub fn white_balance(rgb: Rgb, params: &GradingParameters) -> Rgb {
    let warm = params.temperature * TEMPERATURE_SCALE;
    Rgb::new(
        rgb.r + warm,
        rgb.g - params.tint * TINT_SCALE,
        rgb.b - warm,
    )
    .clamp01()
}

/// Pivot around mid gray.
pub fn contrast(rgb: Rgb, params: &GradingParameters) -> Rgb {
    let factor = contrast_factor(params.contrast);
    rgb.map(|v| ((v - CONTRAST_PIVOT) * factor + CONTRAST_PIVOT).clamp(0.0, 1.0))
}

#[inline]
fn contrast_factor(contrast: f64) -> f64 {
    (1.0 + contrast) / (1.0 - contrast * CONTRAST_DAMPING)
}

/// Scale chroma around Rec. 601 luma; -1 fully desaturates.
pub fn saturation(rgb: Rgb, params: &GradingParameters) -> Rgb {
    let luma = rgb.luma();
    let factor = 1.0 + params.saturation;
    rgb.map(|v| (luma + (v - luma) * factor).clamp(0.0, 1.0))
}

/// The five-stage grading pipeline bound to one parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradePipeline {
    params: GradingParameters,
}

impl GradePipeline {
    /// Bind a parameter set. Out-of-range or NaN fields are clamped.
    pub fn new(params: GradingParameters) -> Self {
        if let Err(e) = params.validate() {
            warn!(error = %e, "clamping grading parameters");
        }
        Self {
            params: params.sanitized(),
        }
    }

    pub fn params(&self) -> &GradingParameters {
        &self.params
    }

    /// Process a single sample through every stage in order.
    pub fn process_pixel(&self, rgb: Rgb) -> Rgb {
        GradeStage::ORDER
            .iter()
            .fold(rgb, |acc, stage| stage.apply(acc, &self.params))
    }

    /// Process a batch of samples.
    pub fn process_buffer(&self, data: &mut [Rgb]) {
        for pixel in data.iter_mut() {
            *pixel = self.process_pixel(*pixel);
        }
    }

    /// Grade an 8-bit image in place (alpha untouched).
    pub fn process_image(&self, image: &mut RasterImage) {
        image.map_rgb(|rgb| self.process_pixel(rgb));
    }
}

impl Default for GradePipeline {
    fn default() -> Self {
        Self::new(GradingParameters::NEUTRAL)
    }
}

impl ColorTransform for GradePipeline {
    fn transform(&self, rgb: Rgb) -> Rgb {
        self.process_pixel(rgb)
    }
}

/// Map one RGB sample through the full pipeline.
pub fn transform(r: f64, g: f64, b: f64, params: &GradingParameters) -> (f64, f64, f64) {
    let out = GradePipeline::new(*params).process_pixel(Rgb::new(r, g, b));
    (out.r, out.g, out.b)
}
