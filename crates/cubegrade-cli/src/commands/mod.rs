//! CLI command implementations

pub mod analyze;
pub mod apply;
pub mod extract;
pub mod generate;
pub mod presets;

use anyhow::{anyhow, Context, Result};
use cubegrade_core::RasterImage;
use image::DynamicImage;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Decode an image to RGBA, shrinking it so neither edge exceeds `max_dimension`.
pub fn load_image(path: &Path, max_dimension: Option<u32>) -> Result<RasterImage> {
    let mut img = image::open(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?;
    if let Some(max) = max_dimension.filter(|m| *m > 0) {
        if img.width() > max || img.height() > max {
            img = img.thumbnail(max, max);
            debug!(width = img.width(), height = img.height(), "downsampled for analysis");
        }
    }
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RasterImage::new(width, height, rgba.into_raw())?)
}

/// Encode by file extension. Formats without alpha get RGB.
pub fn save_image(path: &Path, image: RasterImage) -> Result<()> {
    let (width, height) = (image.width(), image.height());
    let buffer = image::RgbaImage::from_raw(width, height, image.into_bytes())
        .ok_or_else(|| anyhow!("pixel buffer does not match {width}x{height}"))?;
    let dynamic = DynamicImage::ImageRgba8(buffer);
    let dynamic = if drops_alpha(path) {
        DynamicImage::ImageRgb8(dynamic.into_rgb8())
    } else {
        dynamic
    };
    dynamic
        .save(path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

fn drops_alpha(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "bmp"))
        .unwrap_or(false)
}

/// Read a text file, or stdin for `-`.
pub fn read_text(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))
}

/// Write to `path`, or stdout when absent.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
