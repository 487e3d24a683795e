//! Per-triangle deformation gradients.
//!
//! A gradient field holds one 3×3 matrix per triangle, describing how a
//! reference mesh's triangles map to a deformed mesh's triangles:
//! G = V(deformed) · V(rest)⁻¹.

use shapeflow_math::DMat3;
use shapeflow_mesh::TriangleMesh;
use shapeflow_types::{TransferError, TransferResult};

use crate::frame::{triangle_frame, triangle_frame_inverse};

/// Ordered collection of per-triangle deformation gradients.
///
/// Computed fresh per transfer call or supplied directly by the caller;
/// never mutated in place.
#[derive(Debug, Clone)]
pub struct GradientField {
    /// One gradient per triangle, in triangle order.
    pub gradients: Vec<DMat3>,
}

impl GradientField {
    /// A field of identity gradients (no deformation) for `triangle_count`
    /// triangles.
    pub fn identity(triangle_count: usize) -> Self {
        Self {
            gradients: vec![DMat3::IDENTITY; triangle_count],
        }
    }

    /// Computes the gradient field mapping `rest` onto `deformed`.
    ///
    /// Both meshes must share topology. Fails with
    /// [`TransferError::DegenerateGeometry`] if either mesh contains a
    /// zero-area triangle.
    pub fn from_pair(rest: &TriangleMesh, deformed: &TriangleMesh) -> TransferResult<Self> {
        if !rest.same_topology(deformed) {
            return Err(TransferError::TopologyMismatch(
                "rest and deformed meshes disagree on topology".into(),
            ));
        }

        let tri_count = rest.triangle_count();
        let mut gradients = Vec::with_capacity(tri_count);
        for t in 0..tri_count {
            let inv = triangle_frame_inverse(rest, t)?;
            let v1 = triangle_frame(deformed, t)?;
            gradients.push(v1 * inv);
        }
        Ok(Self { gradients })
    }

    /// Returns the number of per-triangle gradients.
    pub fn len(&self) -> usize {
        self.gradients.len()
    }

    /// Returns true if the field holds no gradients.
    pub fn is_empty(&self) -> bool {
        self.gradients.is_empty()
    }
}
