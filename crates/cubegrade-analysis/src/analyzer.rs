//! Reference image statistics.
//!
//! Reduces an RGBA raster to the descriptors the parameter mapper needs:
//! average color, mean luma and HSL saturation, a percentile contrast
//! estimate, a warm/cool estimate, normalized histograms, and the most
//! populated coarse color buckets.
//!
//! Inputs are expected to be downsampled by the caller; the percentile
//! pass sorts one luma sample per pixel.

use cubegrade_core::{RasterImage, Rgb};
use rayon::slice::ParallelSliceMut;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const HISTOGRAM_BINS: usize = 256;
/// Quantization levels per channel for dominant-color buckets.
pub const QUANT_LEVELS: usize = 8;
pub const MAX_DOMINANT_COLORS: usize = 5;

const QUANT_SHIFT: u32 = 5;
const LOW_PERCENTILE: f64 = 0.05;
const HIGH_PERCENTILE: f64 = 0.95;
/// Keeps the temperature estimate finite on black images.
const TEMPERATURE_FLOOR: f64 = 0.01;

/// A populated coarse color bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantColor {
    /// Bucket color, each channel one of `k / (QUANT_LEVELS - 1)`.
    pub color: Rgb,
    /// Share of pixels in this bucket, 0–100.
    pub percentage: f64,
}

/// Per-channel and luminance histograms, each scaled so its tallest bin is 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histograms {
    pub red: Vec<f64>,
    pub green: Vec<f64>,
    pub blue: Vec<f64>,
    pub luminance: Vec<f64>,
}

impl Histograms {
    fn empty() -> Self {
        Self {
            red: vec![0.0; HISTOGRAM_BINS],
            green: vec![0.0; HISTOGRAM_BINS],
            blue: vec![0.0; HISTOGRAM_BINS],
            luminance: vec![0.0; HISTOGRAM_BINS],
        }
    }

    /// Fraction of luminance mass at or above `threshold` (in [0, 1]).
    ///
    /// Max-normalization scales every bin equally, so the ratio is the
    /// same as for raw counts.
    pub fn highlight_ratio(&self, threshold: f64) -> f64 {
        let total: f64 = self.luminance.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let start = luma_bin(threshold);
        self.luminance[start..].iter().sum::<f64>() / total
    }
}

/// Statistical snapshot of one reference image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub average_color: Rgb,
    pub dominant_colors: Vec<DominantColor>,
    /// Mean luma.
    pub brightness: f64,
    /// 95th minus 5th percentile luma.
    pub contrast: f64,
    /// Mean HSL saturation.
    pub saturation: f64,
    /// Warm (positive) / cool (negative) estimate in [-1, 1].
    pub temperature: f64,
    pub histogram: Histograms,
}

impl ImageAnalysis {
    fn empty() -> Self {
        Self {
            average_color: Rgb::BLACK,
            dominant_colors: Vec::new(),
            brightness: 0.0,
            contrast: 0.0,
            saturation: 0.0,
            temperature: 0.0,
            histogram: Histograms::empty(),
        }
    }
}

/// Analyze an RGBA image. Alpha is ignored.
pub fn analyze(image: &RasterImage) -> ImageAnalysis {
    let total = image.pixel_count();
    if total == 0 {
        return ImageAnalysis::empty();
    }

    let mut sum = [0u64; 3];
    let mut saturation_sum = 0.0f64;
    let mut luma_sum = 0.0f64;
    let mut hist_r = [0u32; HISTOGRAM_BINS];
    let mut hist_g = [0u32; HISTOGRAM_BINS];
    let mut hist_b = [0u32; HISTOGRAM_BINS];
    let mut hist_l = [0u32; HISTOGRAM_BINS];
    let mut buckets = [0u32; QUANT_LEVELS * QUANT_LEVELS * QUANT_LEVELS];
    let mut lumas = Vec::with_capacity(total);

    for [r, g, b, _] in image.pixels() {
        sum[0] += r as u64;
        sum[1] += g as u64;
        sum[2] += b as u64;

        let rgb = Rgb::from_rgb8(r, g, b);
        saturation_sum += rgb.hsl_saturation();
        let luma = rgb.luma();
        luma_sum += luma;
        lumas.push(luma);

        hist_r[r as usize] += 1;
        hist_g[g as usize] += 1;
        hist_b[b as usize] += 1;
        hist_l[luma_bin(luma)] += 1;
        buckets[bucket_key(r, g, b)] += 1;
    }

    let n = total as f64;
    let average_color = Rgb::new(
        sum[0] as f64 / n / 255.0,
        sum[1] as f64 / n / 255.0,
        sum[2] as f64 / n / 255.0,
    );

    lumas.par_sort_unstable_by(f64::total_cmp);
    let contrast = percentile(&lumas, HIGH_PERCENTILE) - percentile(&lumas, LOW_PERCENTILE);

    let temperature = (average_color.r - average_color.b)
        / average_color.r.max(average_color.b).max(TEMPERATURE_FLOOR);

    let analysis = ImageAnalysis {
        average_color,
        dominant_colors: dominant_colors(&buckets, total),
        brightness: luma_sum / n,
        contrast,
        saturation: saturation_sum / n,
        temperature,
        histogram: Histograms {
            red: normalize(&hist_r),
            green: normalize(&hist_g),
            blue: normalize(&hist_b),
            luminance: normalize(&hist_l),
        },
    };
    debug!(
        pixels = total,
        brightness = analysis.brightness,
        contrast = analysis.contrast,
        temperature = analysis.temperature,
        "analyzed reference image"
    );
    analysis
}

#[inline]
fn luma_bin(luma: f64) -> usize {
    ((luma.clamp(0.0, 1.0) * 255.0).round() as usize).min(HISTOGRAM_BINS - 1)
}

#[inline]
fn bucket_key(r: u8, g: u8, b: u8) -> usize {
    let q = |v: u8| (v >> QUANT_SHIFT) as usize;
    (q(r) * QUANT_LEVELS + q(g)) * QUANT_LEVELS + q(b)
}

fn bucket_color(key: usize) -> Rgb {
    let top = (QUANT_LEVELS - 1) as f64;
    let r = key / (QUANT_LEVELS * QUANT_LEVELS);
    let g = (key / QUANT_LEVELS) % QUANT_LEVELS;
    let b = key % QUANT_LEVELS;
    Rgb::new(r as f64 / top, g as f64 / top, b as f64 / top)
}

/// Most populated buckets, ties broken by bucket index.
fn dominant_colors(buckets: &[u32], total: usize) -> Vec<DominantColor> {
    let mut populated: Vec<(usize, u32)> = buckets
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(key, &count)| (key, count))
        .collect();
    populated.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    populated
        .into_iter()
        .take(MAX_DOMINANT_COLORS)
        .map(|(key, count)| DominantColor {
            color: bucket_color(key),
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect()
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = ((sorted.len() as f64 * p).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

fn normalize(hist: &[u32; HISTOGRAM_BINS]) -> Vec<f64> {
    let max = hist.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; HISTOGRAM_BINS];
    }
    hist.iter().map(|&c| c as f64 / max as f64).collect()
}
