//! # shapeflow-mesh
//!
//! Triangle mesh representation with Structure-of-Arrays (SoA) layout.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`] — The core mesh type. Stores positions and topology
//!   in contiguous SoA buffers.
//! - [`Topology`] — Adjacency queries (vertex-to-triangle, edges,
//!   connected components).
//! - Procedural generators for test meshes (quad grids, UV spheres).

pub mod generators;
pub mod mesh;
pub mod topology;

pub use mesh::TriangleMesh;
pub use topology::Topology;
