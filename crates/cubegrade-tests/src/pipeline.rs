//! Integration tests for the grading pipeline.
//!
//! Exercises cubegrade-color transforms against cubegrade-core parameter
//! sets, presets and raster buffers.

use cubegrade_color::{
    transform, CodecRangeCompensator, ColorTransform, GradePipeline, GradeStage, LegalRange,
};
use cubegrade_core::{GradingParameters, RasterImage, Rgb, ScalarControl, ToneTriple, PRESETS};

const EPS: f64 = 1e-9;

// ── Helpers ────────────────────────────────────────────────────

fn grid(steps: usize) -> impl Iterator<Item = Rgb> {
    let n = (steps - 1) as f64;
    (0..steps * steps * steps).map(move |i| {
        let r = i % steps;
        let g = (i / steps) % steps;
        let b = i / (steps * steps);
        Rgb::new(r as f64 / n, g as f64 / n, b as f64 / n)
    })
}

fn in_unit(rgb: Rgb) -> bool {
    rgb.to_array().iter().all(|v| (0.0..=1.0).contains(v))
}

// ── Identity & closure ─────────────────────────────────────────

#[test]
fn neutral_parameters_are_identity() {
    for rgb in grid(11) {
        let (r, g, b) = transform(rgb.r, rgb.g, rgb.b, &GradingParameters::NEUTRAL);
        assert!(Rgb::new(r, g, b).approx_eq(rgb, 1e-12), "{rgb:?}");
    }
}

#[test]
fn every_preset_stays_in_unit_cube() {
    for preset in PRESETS {
        let pipeline = GradePipeline::new(preset.params);
        for rgb in grid(9) {
            let out = pipeline.process_pixel(rgb);
            assert!(in_unit(out), "{} produced {out:?} for {rgb:?}", preset.name);
        }
    }
}

#[test]
fn extreme_parameters_stay_in_unit_cube() {
    let mut params = GradingParameters::NEUTRAL;
    for control in ScalarControl::ALL {
        params = params.with_scalar(control, 1.0);
    }
    for triple in ToneTriple::ALL {
        params = params.with_triple(triple, Rgb::new(1.0, -1.0, 1.0));
    }
    for rgb in grid(9) {
        let (r, g, b) = transform(rgb.r, rgb.g, rgb.b, &params);
        assert!(in_unit(Rgb::new(r, g, b)));
    }
}

#[test]
fn out_of_range_parameters_are_clamped_not_propagated() {
    let params = GradingParameters {
        contrast: f64::NAN,
        saturation: 7.0,
        ..GradingParameters::NEUTRAL
    };
    let pipeline = GradePipeline::new(params);
    assert_eq!(pipeline.params().contrast, 0.0);
    assert_eq!(pipeline.params().saturation, 1.0);
    assert!(in_unit(pipeline.process_pixel(Rgb::new(0.9, 0.2, 0.4))));
}

// ── Worked examples ────────────────────────────────────────────

#[test]
fn full_desaturation_of_red_gives_luma_gray() {
    let params = GradingParameters::NEUTRAL.with_scalar(ScalarControl::Saturation, -1.0);
    let (r, g, b) = transform(1.0, 0.0, 0.0, &params);
    for v in [r, g, b] {
        assert!((v - 0.299).abs() < EPS, "{v}");
    }
}

#[test]
fn warm_temperature_shifts_red_over_blue() {
    let params = GradingParameters::NEUTRAL.with_scalar(ScalarControl::Temperature, 0.5);
    let (r, g, b) = transform(0.5, 0.5, 0.5, &params);
    assert!((r - 0.55).abs() < EPS);
    assert!((g - 0.5).abs() < EPS);
    assert!((b - 0.45).abs() < EPS);
}

#[test]
fn stage_order_is_fixed() {
    let names: Vec<_> = GradeStage::ORDER.iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        ["Lift/Gamma/Gain", "Shadows/Highlights", "Temperature/Tint", "Contrast", "Saturation"]
    );
}

#[test]
fn pipeline_is_the_fold_of_its_stages() {
    let params = PRESETS
        .iter()
        .find(|p| p.name == "teal-orange")
        .map(|p| p.params)
        .unwrap();
    let pipeline = GradePipeline::new(params);
    let input = Rgb::new(0.3, 0.6, 0.8);
    let manual = GradeStage::ORDER
        .iter()
        .fold(input, |acc, stage| stage.apply(acc, &params));
    assert_eq!(pipeline.process_pixel(input), manual);
}

// ── Codec range compensation ───────────────────────────────────

#[test]
fn compensation_round_trip_at_neutral() {
    let range = LegalRange::VIDEO_8BIT;
    let comp = CodecRangeCompensator::new(GradePipeline::default());
    for i in 0..=50 {
        let v = range.min + (range.max - range.min) * i as f64 / 50.0;
        let rgb = Rgb::splat(v);
        assert!(comp.post(comp.pre(rgb)).approx_eq(rgb, EPS), "pre/post at {v}");
        assert!(comp.transform(rgb).approx_eq(rgb, EPS), "wrapped pipeline at {v}");
    }
}

#[test]
fn compensated_output_lands_in_legal_range() {
    let range = LegalRange::VIDEO_8BIT;
    let noir = PRESETS.iter().find(|p| p.name == "noir").unwrap().params;
    let comp = CodecRangeCompensator::new(GradePipeline::new(noir));
    for rgb in grid(7) {
        let out = comp.transform(rgb);
        for v in out.to_array() {
            assert!(v >= range.min - EPS && v <= range.max + EPS, "{v}");
        }
    }
}

// ── Raster buffers ─────────────────────────────────────────────

#[test]
fn image_grading_matches_per_sample_transform() {
    let params = GradingParameters::NEUTRAL
        .with_scalar(ScalarControl::Contrast, 0.4)
        .with_triple(ToneTriple::Gain, Rgb::new(0.2, 0.0, -0.2));
    let mut image = RasterImage::new(
        2,
        1,
        vec![10, 120, 240, 255, 200, 80, 40, 0],
    )
    .unwrap();

    GradePipeline::new(params).process_image(&mut image);

    let expected: Vec<[u8; 4]> = [[10u8, 120, 240, 255], [200, 80, 40, 0]]
        .iter()
        .map(|px| {
            let rgb = Rgb::from_rgb8(px[0], px[1], px[2]);
            let (r, g, b) = transform(rgb.r, rgb.g, rgb.b, &params);
            let [r, g, b] = Rgb::new(r, g, b).to_rgb8();
            [r, g, b, px[3]]
        })
        .collect();
    assert_eq!(image.pixels().collect::<Vec<_>>(), expected);
}

#[test]
fn process_buffer_matches_process_pixel() {
    let pipeline = GradePipeline::new(PRESETS[2].params);
    let mut samples: Vec<Rgb> = grid(5).collect();
    let expected: Vec<Rgb> = samples.iter().map(|s| pipeline.process_pixel(*s)).collect();
    pipeline.process_buffer(&mut samples);
    assert_eq!(samples, expected);
}
