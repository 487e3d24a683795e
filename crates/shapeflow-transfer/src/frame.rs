//! Per-triangle local frame construction.
//!
//! Three points alone cannot fix a full-rank affine map, so each
//! triangle's frame is augmented with a synthetic fourth point one unit
//! along the triangle normal. The frame matrix V = [e1 | e2 | n]
//! (columns) is then invertible for any non-degenerate triangle, since
//! n is orthogonal to the plane spanned by e1 and e2.

use shapeflow_math::{DMat3, DVec3};
use shapeflow_mesh::TriangleMesh;
use shapeflow_types::constants::DEGENERATE_AREA_THRESHOLD;
use shapeflow_types::{TransferError, TransferResult};

/// Returns the position of vertex `i` as a `DVec3`.
#[inline]
pub fn vertex(mesh: &TriangleMesh, i: usize) -> DVec3 {
    DVec3::new(mesh.pos_x[i], mesh.pos_y[i], mesh.pos_z[i])
}

/// Builds the local frame matrix V = [e1 | e2 | n] for triangle `t`.
///
/// e1 = v1 − v0, e2 = v2 − v0, n = normalize(e1 × e2). Fails with
/// [`TransferError::DegenerateGeometry`] when the triangle has
/// numerically zero area, since the normal is then undefined.
pub fn triangle_frame(mesh: &TriangleMesh, t: usize) -> TransferResult<DMat3> {
    let [a, b, c] = mesh.triangle(t);

    let v0 = vertex(mesh, a as usize);
    let v1 = vertex(mesh, b as usize);
    let v2 = vertex(mesh, c as usize);

    let e1 = v1 - v0;
    let e2 = v2 - v0;

    let cross = e1.cross(e2);
    let cross_len = cross.length();
    if cross_len < DEGENERATE_AREA_THRESHOLD {
        return Err(TransferError::DegenerateGeometry { triangle: t });
    }

    let n = cross / cross_len;
    Ok(DMat3::from_cols(e1, e2, n))
}

/// Builds the inverse frame V⁻¹ for triangle `t`.
///
/// Cached per rest mesh by the solver, so the per-triangle inversion is
/// paid once per binding rather than once per transfer.
pub fn triangle_frame_inverse(mesh: &TriangleMesh, t: usize) -> TransferResult<DMat3> {
    Ok(triangle_frame(mesh, t)?.inverse())
}
