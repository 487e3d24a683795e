//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! which lines up with the transfer solve, where the three coordinate
//! axes decouple into independent right-hand sides over one shared
//! system matrix.

use serde::{Deserialize, Serialize};
use shapeflow_types::{Scalar, TransferError, TransferResult};

/// A triangle mesh stored in Structure-of-Arrays layout.
///
/// Positions live in separate per-channel contiguous arrays; triangle
/// indices reference into them. The index buffer is immutable for the
/// lifetime of a transfer session — only positions differ between the
/// meshes participating in one transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    // --- Vertex data (SoA) ---
    /// X coordinates of all vertices.
    pub pos_x: Vec<Scalar>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<Scalar>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<Scalar>,

    // --- Triangle data ---
    /// Triangle indices — each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [Scalar; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [
            self.indices[base],
            self.indices[base + 1],
            self.indices[base + 2],
        ]
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, x: Scalar, y: Scalar, z: Scalar) {
        self.pos_x[i] = x;
        self.pos_y[i] = y;
        self.pos_z[i] = z;
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Triangle indices are within bounds
    /// - No combinatorially degenerate triangles (repeated vertex indices)
    pub fn validate(&self) -> TransferResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(TransferError::InvalidMesh(
                "position arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(TransferError::InvalidMesh(
                "index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(TransferError::InvalidMesh(format!(
                    "index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(TransferError::InvalidMesh(format!(
                    "triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }

    /// Returns whether `other` shares this mesh's triangle topology:
    /// same vertex count, same triangle count, same index triples in
    /// the same order.
    pub fn same_topology(&self, other: &TriangleMesh) -> bool {
        self.vertex_count() == other.vertex_count() && self.indices == other.indices
    }

    /// Constructs a mesh from interleaved AoS position data
    /// `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn from_interleaved(positions: &[Scalar], indices: &[u32]) -> TransferResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(TransferError::InvalidMesh(
                "interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);

        for i in 0..n {
            mesh.pos_x.push(positions[i * 3]);
            mesh.pos_y.push(positions[i * 3 + 1]);
            mesh.pos_z.push(positions[i * 3 + 2]);
        }

        mesh.indices = indices.to_vec();

        mesh.validate()?;
        Ok(mesh)
    }
}
