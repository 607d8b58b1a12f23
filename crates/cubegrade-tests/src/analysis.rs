//! Integration tests for reference analysis, mapping and extraction.

use cubegrade_analysis::{analyze, extract_parameters, map_analysis, ImageAnalysis};
use cubegrade_color::{CubeLut, OutputProfile};
use cubegrade_core::{RasterImage, Rgb};

// ── Helpers ────────────────────────────────────────────────────

fn solid(rgba: [u8; 4]) -> RasterImage {
    RasterImage::filled(16, 16, rgba).unwrap()
}

fn stripes(a: [u8; 4], b: [u8; 4]) -> RasterImage {
    let data: Vec<u8> = (0..8).flat_map(|i| if i % 2 == 0 { a } else { b }).collect();
    RasterImage::new(8, 1, data).unwrap()
}

// ── Analyzer ───────────────────────────────────────────────────

#[test]
fn solid_red_reference() {
    let a = analyze(&solid([255, 0, 0, 255]));
    assert_eq!(a.average_color, Rgb::new(1.0, 0.0, 0.0));
    assert!((a.saturation - 1.0).abs() < 1e-12);
    assert!(a.temperature > 0.0);
    assert!((a.brightness - 0.299).abs() < 1e-12);
    assert_eq!(a.contrast, 0.0);
    assert_eq!(a.dominant_colors.len(), 1);
    assert_eq!(a.dominant_colors[0].color, Rgb::new(1.0, 0.0, 0.0));
    assert_eq!(a.dominant_colors[0].percentage, 100.0);
}

#[test]
fn black_reference_has_no_temperature() {
    let a = analyze(&solid([0, 0, 0, 255]));
    assert_eq!(a.temperature, 0.0);
    assert_eq!(a.saturation, 0.0);
}

#[test]
fn two_color_reference_splits_dominance() {
    let a = analyze(&stripes([255, 0, 0, 255], [0, 0, 255, 255]));
    assert_eq!(a.dominant_colors.len(), 2);
    for dc in &a.dominant_colors {
        assert_eq!(dc.percentage, 50.0);
    }
    let colors: Vec<Rgb> = a.dominant_colors.iter().map(|d| d.color).collect();
    assert!(colors.contains(&Rgb::new(1.0, 0.0, 0.0)));
    assert!(colors.contains(&Rgb::new(0.0, 0.0, 1.0)));
    assert_eq!(a.temperature, 0.0);
}

#[test]
fn histograms_are_normalized_by_their_peak() {
    let a = analyze(&stripes([255, 0, 0, 255], [0, 0, 255, 255]));
    for hist in [&a.histogram.red, &a.histogram.green, &a.histogram.blue, &a.histogram.luminance] {
        assert_eq!(hist.len(), 256);
        let peak = hist.iter().cloned().fold(0.0, f64::max);
        assert_eq!(peak, 1.0);
    }
}

#[test]
fn analysis_serializes_to_json() {
    let a = analyze(&solid([30, 60, 90, 255]));
    let json = serde_json::to_string(&a).unwrap();
    let back: ImageAnalysis = serde_json::from_str(&json).unwrap();
    assert_eq!(back.dominant_colors.len(), a.dominant_colors.len());
    for (x, y) in back.dominant_colors.iter().zip(&a.dominant_colors) {
        assert!(x.color.approx_eq(y.color, 1e-12));
        assert_eq!(x.percentage, y.percentage);
    }
    assert!(back.average_color.approx_eq(a.average_color, 1e-12));
}

// ── Reference → LUT ────────────────────────────────────────────

#[test]
fn warm_reference_warms_mid_gray() {
    let params = map_analysis(&analyze(&solid([200, 128, 60, 255])));
    assert!(params.validate().is_ok());
    assert!(params.temperature > 0.0);

    let lut = CubeLut::generate(&params, "Reference", 17, OutputProfile::Standard).unwrap();
    let gray = lut.apply(Rgb::MID_GRAY);
    assert!(gray.r > gray.b, "{gray:?}");
}

#[test]
fn gray_reference_maps_near_neutral() {
    let params = map_analysis(&analyze(&solid([128, 128, 128, 255])));
    assert!(params.temperature.abs() < 1e-12);
    assert!(params.tint.abs() < 1e-12);
    assert_eq!((params.shadows, params.highlights), (0.0, 0.0));
    // Flat image: minimum contrast, no saturation
    assert_eq!(params.contrast, -1.0);
    assert_eq!(params.saturation, -1.0);
}

// ── Extractor ──────────────────────────────────────────────────

#[test]
fn extractor_reads_percent_pairs() {
    let patch = extract_parameters("contrast: 30, saturation: -20");
    assert_eq!(patch.field_names(), ["contrast", "saturation"]);
    assert_eq!(patch.contrast, Some(0.3));
    assert_eq!(patch.saturation, Some(-0.2));
}

#[test]
fn extractor_never_inserts_zeros() {
    let patch = extract_parameters("Make it look like a summer evening in Lisbon.");
    assert!(patch.is_empty());
    assert!(patch.contrast.is_none());
}
