//! Reference analysis → grading parameters.
//!
//! Expresses how far the reference sits from neutral gray, so that applying
//! the result to neutral footage pulls it toward the reference look.

use crate::analyzer::ImageAnalysis;
use cubegrade_core::{GradingParameters, Rgb};

const LIFT_COEFF: f64 = 0.3;
const GAMMA_COEFF: f64 = 0.5;
const GAIN_COEFF: f64 = 0.3;
/// Luma above which pixels count as highlights for the gain weighting.
const HIGHLIGHT_THRESHOLD: f64 = 0.75;
const TINT_COEFF: f64 = 2.0;
/// Brightness band in which shadows/highlights stay at zero.
const NEUTRAL_BAND_LOW: f64 = 0.4;
const NEUTRAL_BAND_HIGH: f64 = 0.6;

/// Map image statistics onto a full parameter set, every field in [-1, 1].
pub fn map_analysis(analysis: &ImageAnalysis) -> GradingParameters {
    let offset = analysis.average_color.map(|v| v - 0.5);
    let highlight_ratio = analysis.histogram.highlight_ratio(HIGHLIGHT_THRESHOLD);
    let avg = analysis.average_color;

    let params = GradingParameters {
        // Contrast and saturation estimates live in [0, 1] with 0.5 as "normal".
        contrast: unit_to_signed(analysis.contrast),
        saturation: unit_to_signed(analysis.saturation),
        temperature: analysis.temperature,
        // Positive tint pulls green down, so a green-heavy reference maps negative.
        tint: -(avg.g - (avg.r + avg.b) / 2.0) * TINT_COEFF,
        shadows: shadows_for(analysis.brightness),
        highlights: highlights_for(analysis.brightness),
        lift: scale(offset, LIFT_COEFF),
        gamma: scale(offset, GAMMA_COEFF),
        gain: scale(offset, GAIN_COEFF * (1.0 + highlight_ratio)),
    };
    params.sanitized()
}

#[inline]
fn unit_to_signed(v: f64) -> f64 {
    (v - 0.5) * 2.0
}

#[inline]
fn scale(rgb: Rgb, k: f64) -> Rgb {
    rgb.map(|v| v * k)
}

fn shadows_for(brightness: f64) -> f64 {
    if brightness < NEUTRAL_BAND_LOW {
        (brightness - NEUTRAL_BAND_LOW) / NEUTRAL_BAND_LOW
    } else {
        0.0
    }
}

fn highlights_for(brightness: f64) -> f64 {
    if brightness > NEUTRAL_BAND_HIGH {
        (brightness - NEUTRAL_BAND_HIGH) / (1.0 - NEUTRAL_BAND_HIGH)
    } else {
        0.0
    }
}
