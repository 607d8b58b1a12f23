//! Built-in look presets.
//!
//! Static configuration data: immutable constants, looked up by name and
//! merged with user edits by deriving new values.

use crate::color::Rgb;
use crate::params::GradingParameters;

/// A named, immutable grading preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub params: GradingParameters,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "neutral",
        description: "Identity transform",
        params: GradingParameters::NEUTRAL,
    },
    Preset {
        name: "teal-orange",
        description: "Warm skin tones against teal shadows",
        params: GradingParameters {
            contrast: 0.2,
            saturation: 0.15,
            temperature: 0.1,
            tint: 0.0,
            shadows: -0.1,
            highlights: 0.05,
            lift: Rgb::new(-0.2, 0.05, 0.25),
            gamma: Rgb::new(0.05, 0.0, -0.05),
            gain: Rgb::new(0.2, 0.05, -0.15),
        },
    },
    Preset {
        name: "vintage-film",
        description: "Lifted blacks, faded color, warm cast",
        params: GradingParameters {
            contrast: -0.15,
            saturation: -0.25,
            temperature: 0.2,
            tint: 0.05,
            shadows: 0.2,
            highlights: -0.15,
            lift: Rgb::new(0.3, 0.25, 0.15),
            gamma: Rgb::new(0.05, 0.0, -0.1),
            gain: Rgb::new(0.0, -0.05, -0.1),
        },
    },
    Preset {
        name: "bleach-bypass",
        description: "High contrast, low saturation",
        params: GradingParameters {
            contrast: 0.4,
            saturation: -0.5,
            temperature: 0.0,
            tint: 0.0,
            shadows: -0.2,
            highlights: 0.1,
            lift: Rgb::ZERO,
            gamma: Rgb::splat(-0.05),
            gain: Rgb::splat(0.1),
        },
    },
    Preset {
        name: "cool-night",
        description: "Blue moonlight with crushed shadows",
        params: GradingParameters {
            contrast: 0.15,
            saturation: -0.1,
            temperature: -0.4,
            tint: 0.0,
            shadows: -0.3,
            highlights: -0.1,
            lift: Rgb::new(-0.1, -0.05, 0.15),
            gamma: Rgb::new(-0.1, -0.05, 0.05),
            gain: Rgb::new(-0.1, 0.0, 0.1),
        },
    },
    Preset {
        name: "noir",
        description: "Monochrome with deep contrast",
        params: GradingParameters {
            contrast: 0.5,
            saturation: -1.0,
            temperature: 0.0,
            tint: 0.0,
            shadows: -0.25,
            highlights: 0.15,
            lift: Rgb::ZERO,
            gamma: Rgb::ZERO,
            gain: Rgb::ZERO,
        },
    },
];

/// Look up a preset by case-insensitive name.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let name = name.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
