//! Scalar type alias for the engine.
//!
//! The transfer solve is a one-shot batch least-squares with no GPU
//! path, so double precision is the canonical configuration.

/// The floating-point type used throughout the engine.
pub type Scalar = f64;
