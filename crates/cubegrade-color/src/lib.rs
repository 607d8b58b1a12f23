//! CubeGrade Color - grading pipeline, codec range compensation, and .cube LUTs

pub mod compensation;
pub mod error;
pub mod lut;
pub mod pipeline;
pub mod transfer;

pub use compensation::{CodecRangeCompensator, LegalRange, OutputProfile};
pub use error::{ColorError, Result};
pub use lut::{serialize, CubeLut, DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use pipeline::{transform, ColorTransform, GradePipeline, GradeStage};
pub use transfer::GammaCurve;
