//! # shapeflow-math
//!
//! Linear algebra primitives for the Shapeflow transfer engine.
//!
//! Provides:
//! - Re-exports of `glam` double-precision types (`DVec3`, `DMat3`, etc.)
//! - Sparse matrix representation (CSR) and the solver interface
//! - Sparse Cholesky solver backed by `faer`

pub mod faer_solver;
pub mod sparse;

// Re-export glam's f64 types as the canonical math types for Shapeflow.
pub use glam::{DMat3, DMat4, DQuat, DVec2, DVec3, DVec4};
