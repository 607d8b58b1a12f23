//! Best-effort parameter extraction from generated text.
//!
//! The generation service is asked for JSON, but replies are free text often
//! enough that a regex fallback is kept. Nothing here fails: unmatched fields
//! are simply absent from the returned patch, and the caller merges the patch
//! onto its defaults.
//!
//! Magnitudes above 1 are read as percentages (`30` → `0.3`), since the
//! generator emits both scales interchangeably.

use cubegrade_core::{ParameterPatch, Rgb, ScalarControl, ToneTriple};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// A signed decimal: `30`, `-0.25`, `+.5`.
const NUMBER: &str = r"([+-]?(?:\d+(?:\.\d+)?|\.\d+))";
/// Between a label and its first number: separators and a few filler words.
/// Other words are not skipped, so a bare label never borrows a neighbour's
/// number.
const LABEL_GAP: &str = concat!(
    r#"(?:[\s:=(\[{"']"#,
    r"|\b(?:of|by|at|to|is|around|about|approx|roughly|[rgb])\b",
    r"){0,12}?",
);
/// Between the numbers of a triple: punctuation or JSON-style r/g/b keys.
const TRIPLE_SEP: &str = r#"[\s,;/()\[\]{}:"'rgbRGB]{1,12}?"#;

static SCALAR_PATTERNS: OnceLock<Vec<(ScalarControl, Regex)>> = OnceLock::new();
static TRIPLE_PATTERNS: OnceLock<Vec<(ToneTriple, Regex)>> = OnceLock::new();

fn scalar_label(control: ScalarControl) -> &'static str {
    match control {
        ScalarControl::Contrast => "contrast",
        ScalarControl::Saturation => "saturation",
        ScalarControl::Temperature => "temperature|temp|warmth",
        ScalarControl::Tint => "tint",
        ScalarControl::Shadows => "shadows?",
        ScalarControl::Highlights => "highlights?",
    }
}

fn scalar_patterns() -> &'static [(ScalarControl, Regex)] {
    SCALAR_PATTERNS.get_or_init(|| {
        ScalarControl::ALL
            .into_iter()
            .filter_map(|control| {
                let pattern = format!(
                    r"(?i)\b(?:{})\b{}{}",
                    scalar_label(control),
                    LABEL_GAP,
                    NUMBER
                );
                Regex::new(&pattern).ok().map(|re| (control, re))
            })
            .collect()
    })
}

fn triple_patterns() -> &'static [(ToneTriple, Regex)] {
    TRIPLE_PATTERNS.get_or_init(|| {
        ToneTriple::ALL
            .into_iter()
            .filter_map(|triple| {
                let pattern = format!(
                    r"(?i)\b{}\b{}{}{}{}{}{}",
                    triple.name(),
                    LABEL_GAP,
                    NUMBER,
                    TRIPLE_SEP,
                    NUMBER,
                    TRIPLE_SEP,
                    NUMBER
                );
                Regex::new(&pattern).ok().map(|re| (triple, re))
            })
            .collect()
    })
}

/// Read a matched magnitude as a parameter value: |v| > 1 is a percentage.
/// Returns `None` for non-finite input.
pub fn normalize_magnitude(v: f64) -> Option<f64> {
    if !v.is_finite() {
        return None;
    }
    let v = if v.abs() > 1.0 { v / 100.0 } else { v };
    Some(v.clamp(-1.0, 1.0))
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().and_then(normalize_magnitude)
}

/// Regex extraction of labeled numbers. The first match per field wins.
pub fn extract_parameters(text: &str) -> ParameterPatch {
    let mut patch = ParameterPatch::default();

    for (control, re) in scalar_patterns() {
        let value = re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_number(m.as_str()));
        if let Some(v) = value {
            patch.set_scalar(*control, v);
        }
    }

    for (triple, re) in triple_patterns() {
        let value = re.captures(text).and_then(|caps| {
            let r = parse_number(caps.get(1)?.as_str())?;
            let g = parse_number(caps.get(2)?.as_str())?;
            let b = parse_number(caps.get(3)?.as_str())?;
            Some(Rgb::new(r, g, b))
        });
        if let Some(v) = value {
            patch.set_triple(*triple, v);
        }
    }

    debug!(fields = ?patch.field_names(), "extracted parameters from text");
    patch
}

/// Parse a generation-service reply: an embedded JSON object first, regex
/// extraction if that yields nothing.
pub fn parse_generated_text(text: &str) -> ParameterPatch {
    if let Some(patch) = embedded_json(text) {
        debug!(fields = ?patch.field_names(), "parsed structured reply");
        return patch;
    }
    extract_parameters(text)
}

fn embedded_json(text: &str) -> Option<ParameterPatch> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    let raw: ParameterPatch = serde_json::from_str(&text[start..=end]).ok()?;
    let patch = normalize_patch(&raw);
    (!patch.is_empty()).then_some(patch)
}

fn normalize_patch(raw: &ParameterPatch) -> ParameterPatch {
    let mut patch = ParameterPatch::default();
    for control in ScalarControl::ALL {
        if let Some(v) = raw.scalar(control).and_then(normalize_magnitude) {
            patch.set_scalar(control, v);
        }
    }
    for triple in ToneTriple::ALL {
        let value = raw.triple(triple).and_then(|rgb| {
            Some(Rgb::new(
                normalize_magnitude(rgb.r)?,
                normalize_magnitude(rgb.g)?,
                normalize_magnitude(rgb.b)?,
            ))
        });
        if let Some(v) = value {
            patch.set_triple(triple, v);
        }
    }
    patch
}
