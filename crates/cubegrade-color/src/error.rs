//! Errors raised at the LUT boundary. The grading math itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColorError {
    /// Structurally wrong `.cube` content (missing size, 1D table, bad domain).
    #[error("malformed .cube: {0}")]
    InvalidLut(String),
    #[error("grid size {0} outside supported range 2..=256")]
    InvalidGridSize(usize),
    /// Data row count does not match `LUT_3D_SIZE`³.
    #[error("expected {expected} data rows, found {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("cannot parse {0}")]
    Parse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ColorError>;
