//! Least-squares system assembly for the transfer solve.
//!
//! Each triangle contributes three rows per coordinate axis to the
//! overdetermined system A·x = b, with unknowns for every target vertex
//! plus one synthetic per-triangle unknown (column `vertex_count + t`
//! for triangle `t`). Row pattern for triangle (v0, v1, v2):
//!
//! ```text
//! x[v1]  − x[v0] = M[axis][0]
//! x[v2]  − x[v0] = M[axis][1]
//! x[syn] − x[v0] = M[axis][2]
//! ```
//!
//! where M = G · V(T0) is the transferred target frame. A carries only
//! ±1 entries and depends solely on topology and the stationary set, so
//! the normal-equations matrix AᵗA (and its factorization) is shared by
//! all three axes and by every transfer of a session; only b changes.
//!
//! Stationary vertices are eliminated: their columns are dropped and
//! their known rest positions folded into the right-hand side, making
//! the constraint exact in the output.

use shapeflow_math::sparse::CsrMatrix;
use shapeflow_math::DMat3;
use shapeflow_mesh::TriangleMesh;
use shapeflow_types::Scalar;

/// Classification of one column of A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free unknown, with its index into the compacted free-unknown vector.
    Free(usize),
    /// Pinned to the target rest position; only real vertex columns can
    /// be pinned.
    Pinned,
}

/// Column layout of the least-squares system.
///
/// Columns `0..vertex_count` are the target vertices; columns
/// `vertex_count..vertex_count + triangle_count` are the synthetic
/// per-triangle unknowns (always free, never shared across triangles,
/// discarded after solving).
#[derive(Debug, Clone)]
pub struct SystemLayout {
    /// Per-column classification, length `vertex_count + triangle_count`.
    pub column: Vec<ColumnKind>,
    /// Number of free unknowns.
    pub free_count: usize,
    /// Number of real vertices.
    pub vertex_count: usize,
    /// Number of triangles.
    pub triangle_count: usize,
}

impl SystemLayout {
    /// Builds the layout from per-vertex pinned flags.
    pub fn build(vertex_count: usize, triangle_count: usize, pinned: &[bool]) -> Self {
        let mut column = Vec::with_capacity(vertex_count + triangle_count);
        let mut free_count = 0;

        for &is_pinned in pinned.iter().take(vertex_count) {
            if is_pinned {
                column.push(ColumnKind::Pinned);
            } else {
                column.push(ColumnKind::Free(free_count));
                free_count += 1;
            }
        }
        for _ in 0..triangle_count {
            column.push(ColumnKind::Free(free_count));
            free_count += 1;
        }

        Self {
            column,
            free_count,
            vertex_count,
            triangle_count,
        }
    }

    /// Returns the column index of triangle `t`'s synthetic unknown.
    #[inline]
    pub fn synthetic_column(&self, t: usize) -> usize {
        self.vertex_count + t
    }
}

/// Iterates the rows of A for one triangle: `(positive_col, negative_col)`.
///
/// Row j has coefficient +1 on `positive_col` and −1 on `negative_col`;
/// its right-hand side is column j of that triangle's target frame M.
fn triangle_rows(mesh: &TriangleMesh, layout: &SystemLayout, t: usize) -> [(usize, usize); 3] {
    let [a, b, c] = mesh.triangle(t);
    let v0 = a as usize;
    [
        (b as usize, v0),
        (c as usize, v0),
        (layout.synthetic_column(t), v0),
    ]
}

/// Assembles the normal-equations matrix AᵗA over the free unknowns.
///
/// Each row contributes a 2×2 block: +1 on both diagonal pairings and
/// −1 on the cross pairings, restricted to free columns.
pub fn assemble_normal_matrix(mesh: &TriangleMesh, layout: &SystemLayout) -> CsrMatrix {
    let tri_count = layout.triangle_count;

    // 4 entries per row, 3 rows per triangle
    let mut triplets: Vec<(usize, usize, f64)> = Vec::with_capacity(tri_count * 12);

    for t in 0..tri_count {
        for (pos, neg) in triangle_rows(mesh, layout, t) {
            let pos_free = match layout.column[pos] {
                ColumnKind::Free(f) => Some(f),
                ColumnKind::Pinned => None,
            };
            let neg_free = match layout.column[neg] {
                ColumnKind::Free(f) => Some(f),
                ColumnKind::Pinned => None,
            };

            if let Some(p) = pos_free {
                triplets.push((p, p, 1.0));
            }
            if let Some(n) = neg_free {
                triplets.push((n, n, 1.0));
            }
            if let (Some(p), Some(n)) = (pos_free, neg_free) {
                triplets.push((p, n, -1.0));
                triplets.push((n, p, -1.0));
            }
        }
    }

    CsrMatrix::from_triplets(layout.free_count, layout.free_count, &triplets)
}

/// Assembles the right-hand side Aᵗb for one coordinate axis.
///
/// `targets[t]` is the transferred frame M = G · V(T0) for triangle `t`;
/// row j of the triangle reads column j of M. Pinned columns contribute
/// their rest position (from `rest`) to b instead of appearing as
/// unknowns.
///
/// # Arguments
/// * `axis` — Which coordinate axis (0=X, 1=Y, 2=Z)
/// * `rest` — The target rest mesh (source of pinned values)
/// * `layout` — Column layout with stationary classification
/// * `targets` — Per-triangle transferred frames
pub fn assemble_rhs(
    axis: usize,
    rest: &TriangleMesh,
    layout: &SystemLayout,
    targets: &[DMat3],
) -> Vec<Scalar> {
    let mut rhs = vec![0.0; layout.free_count];

    for (t, target) in targets.iter().enumerate() {
        for (j, (pos, neg)) in triangle_rows(rest, layout, t).into_iter().enumerate() {
            let col = target.col(j);
            let mut beta = match axis {
                0 => col.x,
                1 => col.y,
                _ => col.z,
            };

            // Fold pinned columns into b: beta -= coeff * pinned_value.
            // Only real vertex columns can be pinned, so the rest mesh
            // lookup is always in range.
            if layout.column[pos] == ColumnKind::Pinned {
                beta -= pinned_value(rest, pos, axis);
            }
            if layout.column[neg] == ColumnKind::Pinned {
                beta += pinned_value(rest, neg, axis);
            }

            if let ColumnKind::Free(f) = layout.column[pos] {
                rhs[f] += beta;
            }
            if let ColumnKind::Free(f) = layout.column[neg] {
                rhs[f] -= beta;
            }
        }
    }

    rhs
}

#[inline]
fn pinned_value(rest: &TriangleMesh, vertex: usize, axis: usize) -> Scalar {
    match axis {
        0 => rest.pos_x[vertex],
        1 => rest.pos_y[vertex],
        _ => rest.pos_z[vertex],
    }
}
