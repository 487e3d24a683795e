//! # shapeflow-transfer
//!
//! Deformation-gradient transfer: given a source rest/deformed mesh pair
//! and a topology-identical target rest mesh, solve for target vertex
//! positions whose per-triangle deformation best matches the source's,
//! in a least-squares sense, subject to stationary (pinned) vertices.
//!
//! ## Key Types
//!
//! - [`DeformationTransferSolver`] — the engine. Bind rest meshes once,
//!   then call [`transfer`](DeformationTransferSolver::transfer) per
//!   source blendshape.
//! - [`GradientField`] — per-triangle 3×3 deformation gradients, for
//!   gradient-driven transfer.
//! - [`frame`] — per-triangle local frame construction.

pub mod assembly;
pub mod frame;
pub mod gradient;
pub mod solver;

pub use gradient::GradientField;
pub use solver::DeformationTransferSolver;
