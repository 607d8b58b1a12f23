//! CubeGrade Core - Foundation types for LUT generation
//!
//! This crate provides the value types threaded through every CubeGrade stage:
//! - RGB samples and perceptual helpers (luma, HSL saturation)
//! - Grading parameters, partial patches, and immutable presets
//! - Validated RGBA raster buffers

pub mod color;
pub mod error;
pub mod frame;
pub mod params;
pub mod presets;

pub use color::{Rgb, LUMA_WEIGHTS};
pub use error::{CoreError, Result};
pub use frame::RasterImage;
pub use params::{GradingParameters, ParameterPatch, ScalarControl, ToneTriple};
pub use presets::{find_preset, Preset, PRESETS};
