//! CubeGrade Analysis - deriving grading parameters from outside sources
//!
//! Provides:
//! - Reference image statistics (average color, histograms, dominant colors)
//! - Mapping of image statistics onto grading parameters
//! - Best-effort extraction of parameters from generated free text

pub mod analyzer;
pub mod extract;
pub mod mapper;

pub use analyzer::{analyze, DominantColor, Histograms, ImageAnalysis};
pub use extract::{extract_parameters, normalize_magnitude, parse_generated_text};
pub use mapper::map_analysis;
