//! Integration tests for .cube baking and parsing.

use cubegrade_analysis::parse_generated_text;
use cubegrade_color::{serialize, ColorError, CubeLut, OutputProfile, DEFAULT_GRID_SIZE};
use cubegrade_core::{find_preset, GradingParameters, Rgb, ScalarControl};

// ── Helpers ────────────────────────────────────────────────────

fn data_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|l| l.starts_with(|c: char| c.is_ascii_digit()))
        .collect()
}

fn parse_line(line: &str) -> [f64; 3] {
    let v: Vec<f64> = line.split(' ').map(|t| t.parse().unwrap()).collect();
    [v[0], v[1], v[2]]
}

// ── Format ─────────────────────────────────────────────────────

#[test]
fn default_grid_emits_35937_lines() {
    let teal = find_preset("teal-orange").unwrap().params;
    let text = serialize(&teal, "Teal", DEFAULT_GRID_SIZE, OutputProfile::Standard).unwrap();
    assert_eq!(data_lines(&text).len(), 35_937);
    assert_eq!(text.lines().count(), 4 + 35_937);
}

#[test]
fn header_is_exact() {
    let text = serialize(&GradingParameters::NEUTRAL, "Custom Grade", 2, OutputProfile::Standard)
        .unwrap();
    let header: Vec<&str> = text.lines().take(4).collect();
    assert_eq!(
        header,
        [
            "TITLE \"Custom Grade\"",
            "LUT_3D_SIZE 2",
            "DOMAIN_MIN 0.0 0.0 0.0",
            "DOMAIN_MAX 1.0 1.0 1.0",
        ]
    );
    assert!(text.ends_with("1.000000 1.000000 1.000000\n"));
}

#[test]
fn every_line_has_six_decimals_in_unit_range() {
    let noir = find_preset("noir").unwrap().params;
    let text = serialize(&noir, "Noir", 9, OutputProfile::LegalRange).unwrap();
    for line in data_lines(&text) {
        for token in line.split(' ') {
            let (_, frac) = token.split_once('.').unwrap();
            assert_eq!(frac.len(), 6, "{line}");
            let v: f64 = token.parse().unwrap();
            assert!((0.0..=1.0).contains(&v));
        }
    }
}

#[test]
fn serialization_is_deterministic() {
    let vintage = find_preset("vintage-film").unwrap().params;
    let a = serialize(&vintage, "Vintage", 17, OutputProfile::LegalRange).unwrap();
    let b = serialize(&vintage, "Vintage", 17, OutputProfile::LegalRange).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_grid_sizes_are_rejected() {
    for size in [0, 1, 257] {
        let err = serialize(&GradingParameters::NEUTRAL, "x", size, OutputProfile::Standard)
            .unwrap_err();
        assert!(matches!(err, ColorError::InvalidGridSize(s) if s == size));
    }
}

// ── Grid enumeration ───────────────────────────────────────────

#[test]
fn grid_corners_map_to_domain_corners() {
    let text = serialize(&GradingParameters::NEUTRAL, "Id", 33, OutputProfile::Standard).unwrap();
    let lines = data_lines(&text);
    assert_eq!(lines[0], "0.000000 0.000000 0.000000");
    assert_eq!(lines[lines.len() - 1], "1.000000 1.000000 1.000000");
}

#[test]
fn red_varies_fastest() {
    let size = 33;
    let text = serialize(&GradingParameters::NEUTRAL, "Id", size, OutputProfile::Standard)
        .unwrap();
    let lines = data_lines(&text);

    let first_row: Vec<[f64; 3]> = lines[..size].iter().map(|l| parse_line(l)).collect();
    assert_eq!(first_row[0][0], 0.0);
    assert_eq!(first_row[size - 1][0], 1.0);
    for pair in first_row.windows(2) {
        assert!(pair[1][0] > pair[0][0]);
        assert_eq!((pair[1][1], pair[1][2]), (0.0, 0.0));
    }
    // Next line starts the second green row
    let next = parse_line(lines[size]);
    assert_eq!(next[0], 0.0);
    assert!(next[1] > 0.0);
    assert_eq!(next[2], 0.0);
}

// ── Profiles ───────────────────────────────────────────────────

#[test]
fn neutral_legal_range_lut_is_identity_inside_legal_range() {
    let size = 33;
    let neutral = GradingParameters::NEUTRAL;
    let lut = CubeLut::generate(&neutral, "Legal", size, OutputProfile::LegalRange).unwrap();
    let (lo, hi) = (0.0627, 0.9216);
    let n = (size - 1) as f64;
    for i in 0..size {
        let v = i as f64 / n;
        let out = lut.sample(i, i, i);
        if (lo..=hi).contains(&v) {
            assert!(out.approx_eq(Rgb::splat(v), 1e-9), "{v} -> {out:?}");
        } else {
            let bound = if v < lo { lo } else { hi };
            assert!(out.approx_eq(Rgb::splat(bound), 1e-9), "{v} -> {out:?}");
        }
    }
}

#[test]
fn profiles_differ_for_the_same_grade() {
    let params = GradingParameters::NEUTRAL.with_scalar(ScalarControl::Contrast, 0.3);
    let standard = serialize(&params, "t", 5, OutputProfile::Standard).unwrap();
    let legal = serialize(&params, "t", 5, OutputProfile::LegalRange).unwrap();
    assert_ne!(standard, legal);
}

// ── Parsing & application ──────────────────────────────────────

#[test]
fn parsed_lut_matches_baked_lut() {
    let bleach = find_preset("bleach-bypass").unwrap().params;
    let baked = CubeLut::generate(&bleach, "Bleach", 17, OutputProfile::Standard)
        .unwrap()
        .with_comment("integration");
    let parsed = CubeLut::from_cube(&baked.to_cube_string()).unwrap();

    assert_eq!(parsed.title(), "Bleach");
    assert_eq!(parsed.size(), 17);
    assert_eq!(parsed.comments(), ["integration"]);
    for (a, b) in parsed.data().iter().zip(baked.data()) {
        assert!(a.approx_eq(*b, 1e-6));
    }
    // Serializing the parsed LUT reproduces the text exactly
    assert_eq!(parsed.to_cube_string(), baked.to_cube_string());
}

#[test]
fn lut_apply_matches_pipeline_at_grid_nodes() {
    let cool = find_preset("cool-night").unwrap().params;
    let lut = CubeLut::generate(&cool, "Cool", 9, OutputProfile::Standard).unwrap();
    let pipeline = cubegrade_color::GradePipeline::new(cool);
    for (r, g, b) in [(0, 0, 0), (8, 0, 0), (4, 2, 7), (8, 8, 8)] {
        let input = Rgb::new(r as f64 / 8.0, g as f64 / 8.0, b as f64 / 8.0);
        assert!(lut.apply(input).approx_eq(pipeline.process_pixel(input), 1e-9));
    }
}

#[test]
fn truncated_cube_is_rejected() {
    let text = serialize(&GradingParameters::NEUTRAL, "t", 3, OutputProfile::Standard).unwrap();
    let truncated: String = text.lines().take(20).map(|l| format!("{l}\n")).collect();
    assert!(matches!(
        CubeLut::from_cube(&truncated),
        Err(ColorError::DimensionMismatch { expected: 27, got: 16 })
    ));
}

// ── Text → LUT ─────────────────────────────────────────────────

#[test]
fn generated_text_bakes_into_a_lut() {
    let reply = "For a gritty look try contrast: 30, saturation: -20 and a touch of warmth +0.1.";
    let patch = parse_generated_text(reply);
    assert_eq!(patch.field_names(), ["contrast", "saturation", "temperature"]);

    let params = GradingParameters::from_patch(&patch);
    let text = serialize(&params, "Gritty", 5, OutputProfile::Standard).unwrap();
    assert_eq!(data_lines(&text).len(), 125);
    assert_ne!(
        text,
        serialize(&GradingParameters::NEUTRAL, "Gritty", 5, OutputProfile::Standard).unwrap()
    );
}
