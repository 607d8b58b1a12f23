//! Error types for CubeGrade.

use thiserror::Error;

/// Boundary validation errors.
///
/// The numeric core never fails; these are raised only when a caller asks
/// for strict validation instead of clamping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("parameter `{field}` is not finite")]
    NonFinite { field: &'static str },

    #[error("parameter `{field}` = {value} is outside [-1, 1]")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("RGBA buffer length mismatch: expected {expected} bytes, got {got}")]
    BufferSize { expected: usize, got: usize },

    #[error("image dimensions overflow: {width}x{height}")]
    Dimensions { width: u32, height: u32 },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
