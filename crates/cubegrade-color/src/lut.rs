//! .cube 3D LUT baking, serialization, parsing, and application.
//!
//! Samples are stored red-major: red varies fastest, then green, then blue.
//! Grid index `i` on an axis maps to input `i / (size - 1)`, so the first and
//! last samples sit exactly on 0.0 and 1.0.

use crate::compensation::{CodecRangeCompensator, OutputProfile};
use crate::error::{ColorError, Result};
use crate::pipeline::{ColorTransform, GradePipeline};
use cubegrade_core::{GradingParameters, Rgb};
use rayon::prelude::*;
use std::fmt;
use tracing::debug;

/// Default samples per axis (33³ = 35,937 entries).
pub const DEFAULT_GRID_SIZE: usize = 33;
pub const MIN_GRID_SIZE: usize = 2;
pub const MAX_GRID_SIZE: usize = 256;

/// A 3D LUT over the unit domain.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeLut {
    title: String,
    size: usize,
    comments: Vec<String>,
    data: Vec<Rgb>,
}

impl CubeLut {
    /// Sample `transform` on a `size`³ grid.
    pub fn bake<T: ColorTransform>(
        transform: &T,
        title: impl Into<String>,
        size: usize,
    ) -> Result<Self> {
        check_grid_size(size)?;
        let total = size * size * size;
        let data: Vec<Rgb> = (0..total)
            .into_par_iter()
            .map(|i| transform.transform(grid_input(size, i)))
            .collect();
        debug!(size, samples = data.len(), "baked 3D LUT");
        Ok(Self {
            title: sanitize_title(&title.into()),
            size,
            comments: Vec::new(),
            data,
        })
    }

    /// Bake the grading pipeline for `params`, wrapped in the codec
    /// compensator when `profile` asks for it.
    pub fn generate(
        params: &GradingParameters,
        title: impl Into<String>,
        size: usize,
        profile: OutputProfile,
    ) -> Result<Self> {
        let pipeline = GradePipeline::new(*params);
        debug!(size, profile = profile.name(), "generating LUT");
        match profile {
            OutputProfile::Standard => Self::bake(&pipeline, title, size),
            OutputProfile::LegalRange => {
                Self::bake(&CodecRangeCompensator::new(pipeline), title, size)
            }
        }
    }

    /// Attach a `#` comment line to the header.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment: String = comment.into();
        self.comments
            .extend(comment.lines().map(|l| l.trim_end().to_string()));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Output samples in red-major order.
    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    /// Output sample at grid coordinates.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is `>= self.size()`.
    pub fn sample(&self, r: usize, g: usize, b: usize) -> Rgb {
        assert!(
            r < self.size && g < self.size && b < self.size,
            "grid coordinate ({r}, {g}, {b}) outside {0}x{0}x{0} LUT",
            self.size
        );
        self.at(r, g, b)
    }

    fn at(&self, r: usize, g: usize, b: usize) -> Rgb {
        self.data[r + g * self.size + b * self.size * self.size]
    }

    /// Serialize to .cube text.
    pub fn to_cube_string(&self) -> String {
        self.to_string()
    }

    /// Write .cube text to `writer` and flush it.
    pub fn write_cube<W: std::io::Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()?;
        Ok(())
    }

    /// Parse .cube text containing a 3D LUT over the unit domain.
    pub fn from_cube(content: &str) -> Result<Self> {
        let mut title = String::new();
        let mut comments = Vec::new();
        let mut size = 0usize;
        let mut data = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix('#') {
                comments.push(rest.trim().to_string());
                continue;
            }
            if let Some(rest) = line.strip_prefix("TITLE") {
                title = rest.trim().trim_matches('"').to_string();
                continue;
            }
            if let Some(rest) = line.strip_prefix("LUT_3D_SIZE") {
                size = rest
                    .trim()
                    .parse()
                    .map_err(|e| ColorError::Parse(format!("LUT_3D_SIZE ({e})")))?;
                continue;
            }
            if let Some(rest) = line.strip_prefix("DOMAIN_MIN") {
                check_domain(rest, 0.0, "DOMAIN_MIN")?;
                continue;
            }
            if let Some(rest) = line.strip_prefix("DOMAIN_MAX") {
                check_domain(rest, 1.0, "DOMAIN_MAX")?;
                continue;
            }
            if line.starts_with("LUT_1D_SIZE") {
                return Err(ColorError::InvalidLut("expected 3D LUT, got 1D".into()));
            }

            let vals = parse_triple(line)
                .ok_or_else(|| ColorError::Parse(format!("data line '{line}'")))?;
            data.push(Rgb::from_array(vals));
        }

        if size == 0 {
            return Err(ColorError::InvalidLut("missing LUT_3D_SIZE".into()));
        }
        check_grid_size(size)?;
        let expected = size * size * size;
        if data.len() != expected {
            return Err(ColorError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }

        Ok(Self {
            title,
            size,
            comments,
            data,
        })
    }

    /// Apply the LUT to an RGB sample using trilinear interpolation.
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        let s = self.size;
        let n = (s - 1) as f64;
        let coords = rgb.clamp01().map(|v| v * n);

        let r0 = (coords.r as usize).min(s - 2);
        let g0 = (coords.g as usize).min(s - 2);
        let b0 = (coords.b as usize).min(s - 2);
        let (r1, g1, b1) = (r0 + 1, g0 + 1, b0 + 1);
        let fr = coords.r - r0 as f64;
        let fg = coords.g - g0 as f64;
        let fb = coords.b - b0 as f64;

        let c000 = self.at(r0, g0, b0).to_array();
        let c100 = self.at(r1, g0, b0).to_array();
        let c010 = self.at(r0, g1, b0).to_array();
        let c110 = self.at(r1, g1, b0).to_array();
        let c001 = self.at(r0, g0, b1).to_array();
        let c101 = self.at(r1, g0, b1).to_array();
        let c011 = self.at(r0, g1, b1).to_array();
        let c111 = self.at(r1, g1, b1).to_array();

        let mut out = [0.0f64; 3];
        for c in 0..3 {
            let c00 = c000[c] * (1.0 - fr) + c100[c] * fr;
            let c10 = c010[c] * (1.0 - fr) + c110[c] * fr;
            let c01 = c001[c] * (1.0 - fr) + c101[c] * fr;
            let c11 = c011[c] * (1.0 - fr) + c111[c] * fr;
            let c0 = c00 * (1.0 - fg) + c10 * fg;
            let c1 = c01 * (1.0 - fg) + c11 * fg;
            out[c] = c0 * (1.0 - fb) + c1 * fb;
        }
        Rgb::from_array(out)
    }
}

impl ColorTransform for CubeLut {
    fn transform(&self, rgb: Rgb) -> Rgb {
        self.apply(rgb)
    }
}

impl fmt::Display for CubeLut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TITLE \"{}\"", self.title)?;
        writeln!(f, "LUT_3D_SIZE {}", self.size)?;
        writeln!(f, "DOMAIN_MIN 0.0 0.0 0.0")?;
        writeln!(f, "DOMAIN_MAX 1.0 1.0 1.0")?;
        for comment in &self.comments {
            writeln!(f, "# {}", comment)?;
        }
        for rgb in &self.data {
            writeln!(
                f,
                "{:.6} {:.6} {:.6}",
                unit(rgb.r),
                unit(rgb.g),
                unit(rgb.b)
            )?;
        }
        Ok(())
    }
}

/// Bake and serialize in one step.
pub fn serialize(
    params: &GradingParameters,
    title: &str,
    grid_size: usize,
    profile: OutputProfile,
) -> Result<String> {
    Ok(CubeLut::generate(params, title, grid_size, profile)?.to_cube_string())
}

/// Input sample for flat red-major grid index `index`.
#[inline]
pub fn grid_input(size: usize, index: usize) -> Rgb {
    let n = (size - 1) as f64;
    let r = index % size;
    let g = (index / size) % size;
    let b = index / (size * size);
    Rgb::new(r as f64 / n, g as f64 / n, b as f64 / n)
}

fn check_grid_size(size: usize) -> Result<()> {
    if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(ColorError::InvalidGridSize(size))
    }
}

/// Clamp to [0, 1] and fold -0.0 into 0.0 so it never prints as "-0.000000".
#[inline]
fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0) + 0.0
    }
}

fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '"' => '\'',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Three finite numbers separated by whitespace.
fn parse_triple(s: &str) -> Option<[f64; 3]> {
    let mut it = s
        .split_whitespace()
        .map(|t| t.parse::<f64>().ok().filter(|v| v.is_finite()));
    let r = it.next()??;
    let g = it.next()??;
    let b = it.next()??;
    if it.next().is_some() {
        return None;
    }
    Some([r, g, b])
}

fn check_domain(rest: &str, expected: f64, key: &str) -> Result<()> {
    let vals = parse_triple(rest).ok_or_else(|| ColorError::Parse(format!("{key} values")))?;
    if vals.iter().any(|v| (v - expected).abs() > 1e-9) {
        return Err(ColorError::InvalidLut(format!(
            "{} must be {:.1} on every axis",
            key, expected
        )));
    }
    Ok(())
}
