//! Integration test crate for CubeGrade.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on every cubegrade library crate to verify they work together.

#[cfg(test)]
mod pipeline;

#[cfg(test)]
mod lut;

#[cfg(test)]
mod analysis;
