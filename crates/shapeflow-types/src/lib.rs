//! # shapeflow-types
//!
//! Shared types, identifiers, error types, and numeric constants
//! for the Shapeflow deformation-transfer engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Shapeflow crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{TransferError, TransferResult};
pub use ids::{TriangleId, VertexId};
pub use scalar::Scalar;
