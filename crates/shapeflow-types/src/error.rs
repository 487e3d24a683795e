//! Error types for the Shapeflow engine.
//!
//! All crates return `TransferResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Shapeflow engine.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A triangle has numerically zero area, so its local frame
    /// cannot be inverted.
    #[error("Degenerate triangle {triangle}: zero area, frame is not invertible")]
    DegenerateGeometry { triangle: usize },

    /// Meshes bound to the same transfer session disagree on topology
    /// (triangle count, vertex count, or connectivity).
    #[error("Topology mismatch: {0}")]
    TopologyMismatch(String),

    /// The constraint set and topology leave the least-squares system
    /// under-determined (e.g. a disconnected component with no
    /// stationary vertex pinning it).
    #[error("Singular system: {0}")]
    SingularSystem(String),

    /// A transfer was requested before the required meshes were bound.
    #[error("Solver not bound: {0}")]
    Unbound(String),
}

/// Convenience alias for `Result<T, TransferError>`.
pub type TransferResult<T> = Result<T, TransferError>;
