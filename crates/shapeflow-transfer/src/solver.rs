//! The deformation-transfer engine.
//!
//! Bind a source rest mesh S0 and target rest mesh T0 once, then call
//! [`DeformationTransferSolver::transfer`] per deformed source S1 (or
//! [`transfer_field`](DeformationTransferSolver::transfer_field) per
//! precomputed gradient field) to produce one target blendshape each.
//! Rest-frame inverses and the normal-equations factorization are cached
//! lazily and reused across every transfer of a session; any rebind
//! invalidates them.

use std::time::Instant;

use tracing::{debug, info};

use shapeflow_math::faer_solver::FaerSolver;
use shapeflow_math::sparse::SparseSolver;
use shapeflow_math::DMat3;
use shapeflow_mesh::{Topology, TriangleMesh};
use shapeflow_types::{TransferError, TransferResult, VertexId};

use crate::assembly::{self, ColumnKind, SystemLayout};
use crate::frame::{triangle_frame, triangle_frame_inverse};
use crate::gradient::GradientField;

/// A bound source rest mesh with lazily cached frame inverses.
struct SourceBinding {
    mesh: TriangleMesh,
    /// V(S0)⁻¹ per triangle, computed on first transfer.
    inv_frames: Option<Vec<DMat3>>,
}

/// A bound target rest mesh with lazily cached frames.
struct TargetBinding {
    mesh: TriangleMesh,
    /// V(T0) per triangle, computed on first transfer.
    frames: Option<Vec<DMat3>>,
}

/// Cached least-squares system: column layout plus the factorized
/// normal-equations matrix. Valid for the current target topology and
/// stationary set; only the right-hand side is rebuilt per transfer.
struct CachedSystem {
    layout: SystemLayout,
    solver: FaerSolver,
}

/// Deformation-gradient transfer solver.
///
/// All cached state is owned by the instance with an explicit
/// invalidation rule (any rebind clears the affected caches), so
/// multiple solver instances are fully independent.
pub struct DeformationTransferSolver {
    source: Option<SourceBinding>,
    target: Option<TargetBinding>,
    /// Sorted, deduplicated stationary vertex indices.
    stationary: Vec<u32>,
    system: Option<CachedSystem>,
}

impl DeformationTransferSolver {
    /// Creates a solver with nothing bound.
    pub fn new() -> Self {
        Self {
            source: None,
            target: None,
            stationary: Vec::new(),
            system: None,
        }
    }

    /// Binds the source rest mesh S0.
    ///
    /// Invalidates cached source frames; they are recomputed on the next
    /// transfer. Binding an identical mesh is a no-op beyond
    /// re-validation. Fails with [`TransferError::TopologyMismatch`] if
    /// a previously bound target disagrees on topology.
    pub fn set_source(&mut self, mesh: &TriangleMesh) -> TransferResult<()> {
        mesh.validate()?;
        if let Some(target) = &self.target {
            check_session_topology(mesh, &target.mesh, "source", "target")?;
        }

        if let Some(source) = &self.source {
            if source.mesh == *mesh {
                return Ok(());
            }
        }

        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "binding source rest mesh"
        );
        self.source = Some(SourceBinding {
            mesh: mesh.clone(),
            inv_frames: None,
        });
        self.system = None;
        Ok(())
    }

    /// Binds the target rest mesh T0.
    ///
    /// Invalidates cached target frames and the system factorization.
    /// Fails with [`TransferError::TopologyMismatch`] if a previously
    /// bound source disagrees on topology.
    pub fn set_target(&mut self, mesh: &TriangleMesh) -> TransferResult<()> {
        mesh.validate()?;
        if let Some(source) = &self.source {
            check_session_topology(&source.mesh, mesh, "source", "target")?;
        }

        if let Some(target) = &self.target {
            if target.mesh == *mesh {
                return Ok(());
            }
        }

        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "binding target rest mesh"
        );
        self.target = Some(TargetBinding {
            mesh: mesh.clone(),
            frames: None,
        });
        self.system = None;
        Ok(())
    }

    /// Replaces the stationary vertex set.
    ///
    /// Indices are sorted and deduplicated; they are validated against
    /// the bound target on the next transfer. Invalidates the cached
    /// factorization unless the set is unchanged.
    pub fn set_stationary_vertices(&mut self, indices: &[VertexId]) {
        let mut sorted: Vec<u32> = indices.iter().map(|id| id.0).collect();
        sorted.sort_unstable();
        sorted.dedup();

        if sorted == self.stationary {
            return;
        }

        debug!(count = sorted.len(), "replacing stationary vertex set");
        self.stationary = sorted;
        self.system = None;
    }

    /// Transfers the deformation S0 → `deformed_source` onto the target.
    ///
    /// Computes per-triangle gradients G = V(S1) · V(S0)⁻¹ and delegates
    /// to [`transfer_field`](Self::transfer_field).
    pub fn transfer(&mut self, deformed_source: &TriangleMesh) -> TransferResult<TriangleMesh> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| TransferError::Unbound("call set_source before transfer".into()))?;
        if !source.mesh.same_topology(deformed_source) {
            return Err(TransferError::TopologyMismatch(
                "deformed source disagrees with the bound source rest mesh".into(),
            ));
        }

        self.ensure_source_frames()?;
        let source = self.source.as_ref().unwrap();
        let inv_frames = source.inv_frames.as_ref().unwrap();

        let tri_count = deformed_source.triangle_count();
        let mut gradients = Vec::with_capacity(tri_count);
        for t in 0..tri_count {
            let v1 = triangle_frame(deformed_source, t)?;
            gradients.push(v1 * inv_frames[t]);
        }

        self.transfer_field(&GradientField { gradients })
    }

    /// Transfers a precomputed gradient field onto the target.
    ///
    /// Finds target vertex positions minimizing
    /// Σ ‖V(T1) − G·V(T0)‖²_F with stationary vertices held exactly at
    /// their rest positions. Returns a new mesh sharing T0's topology.
    pub fn transfer_field(&mut self, field: &GradientField) -> TransferResult<TriangleMesh> {
        let start = Instant::now();

        let target = self
            .target
            .as_ref()
            .ok_or_else(|| TransferError::Unbound("call set_target before transfer".into()))?;
        if field.len() != target.mesh.triangle_count() {
            return Err(TransferError::TopologyMismatch(format!(
                "gradient field has {} entries for {} target triangles",
                field.len(),
                target.mesh.triangle_count()
            )));
        }

        self.ensure_target_frames()?;
        self.ensure_system()?;

        let target = self.target.as_ref().unwrap();
        let frames = target.frames.as_ref().unwrap();
        let system = self.system.as_ref().unwrap();
        let vertex_count = target.mesh.vertex_count();

        // Transferred frames M = G · V(T0), one per triangle; the three
        // axis solves read columns of M as their right-hand sides.
        let targets: Vec<DMat3> = field
            .gradients
            .iter()
            .zip(frames.iter())
            .map(|(g, v0)| *g * *v0)
            .collect();

        let mut result = target.mesh.clone();
        let mut solution = vec![0.0; system.layout.free_count];

        // The three coordinate axes decouple completely and share the
        // factorization; only b differs.
        for axis in 0..3 {
            let rhs = assembly::assemble_rhs(axis, &target.mesh, &system.layout, &targets);
            system.solver.solve(&rhs, &mut solution)?;

            // Scatter free vertex unknowns; pinned vertices keep their
            // rest positions (already present in the clone); synthetic
            // unknowns are discarded.
            for v in 0..vertex_count {
                if let ColumnKind::Free(f) = system.layout.column[v] {
                    match axis {
                        0 => result.pos_x[v] = solution[f],
                        1 => result.pos_y[v] = solution[f],
                        _ => result.pos_z[v] = solution[f],
                    }
                }
            }
        }

        info!(
            triangles = field.len(),
            wall_time = start.elapsed().as_secs_f64(),
            "transfer complete"
        );
        Ok(result)
    }

    /// Computes and caches V(S0)⁻¹ per triangle (first use after a
    /// source rebind).
    fn ensure_source_frames(&mut self) -> TransferResult<()> {
        let source = self
            .source
            .as_mut()
            .ok_or_else(|| TransferError::Unbound("call set_source before transfer".into()))?;
        if source.inv_frames.is_some() {
            return Ok(());
        }

        let start = Instant::now();
        let tri_count = source.mesh.triangle_count();
        let mut inv_frames = Vec::with_capacity(tri_count);
        for t in 0..tri_count {
            inv_frames.push(triangle_frame_inverse(&source.mesh, t)?);
        }
        debug!(
            triangles = tri_count,
            wall_time = start.elapsed().as_secs_f64(),
            "cached source rest-frame inverses"
        );
        source.inv_frames = Some(inv_frames);
        Ok(())
    }

    /// Computes and caches V(T0) per triangle (first use after a target
    /// rebind).
    fn ensure_target_frames(&mut self) -> TransferResult<()> {
        let target = self
            .target
            .as_mut()
            .ok_or_else(|| TransferError::Unbound("call set_target before transfer".into()))?;
        if target.frames.is_some() {
            return Ok(());
        }

        let start = Instant::now();
        let tri_count = target.mesh.triangle_count();
        let mut frames = Vec::with_capacity(tri_count);
        for t in 0..tri_count {
            frames.push(triangle_frame(&target.mesh, t)?);
        }
        debug!(
            triangles = tri_count,
            wall_time = start.elapsed().as_secs_f64(),
            "cached target rest frames"
        );
        target.frames = Some(frames);
        Ok(())
    }

    /// Builds and factorizes the normal-equations system for the current
    /// target topology and stationary set (first use after invalidation).
    fn ensure_system(&mut self) -> TransferResult<()> {
        if self.system.is_some() {
            return Ok(());
        }
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| TransferError::Unbound("call set_target before transfer".into()))?;

        let start = Instant::now();
        let vertex_count = target.mesh.vertex_count();
        let tri_count = target.mesh.triangle_count();
        let pinned = self.resolve_pinned(&target.mesh)?;

        let layout = SystemLayout::build(vertex_count, tri_count, &pinned);
        let matrix = assembly::assemble_normal_matrix(&target.mesh, &layout);

        let mut solver = FaerSolver::new();
        solver.factorize(&matrix)?;

        info!(
            unknowns = layout.free_count,
            nnz = matrix.nnz(),
            wall_time = start.elapsed().as_secs_f64(),
            "factorized transfer system"
        );
        self.system = Some(CachedSystem { layout, solver });
        Ok(())
    }

    /// Resolves the per-vertex pinned flags.
    ///
    /// With an empty stationary set, the lowest-indexed vertex of every
    /// connected component is pinned to fix the translation gauge.
    /// With a user-supplied set, every component must contain at least
    /// one stationary vertex or the system is singular.
    fn resolve_pinned(&self, mesh: &TriangleMesh) -> TransferResult<Vec<bool>> {
        let vertex_count = mesh.vertex_count();
        let mut pinned = vec![false; vertex_count];
        let topology = Topology::build(mesh);

        if self.stationary.is_empty() {
            let reps = topology.component_representatives();
            debug!(
                components = reps.len(),
                "no stationary vertices supplied; pinning component representatives"
            );
            for rep in reps {
                pinned[rep as usize] = true;
            }
            return Ok(pinned);
        }

        for &v in &self.stationary {
            if v as usize >= vertex_count {
                return Err(TransferError::InvalidMesh(format!(
                    "stationary vertex {} out of range (vertex count: {})",
                    v, vertex_count
                )));
            }
            pinned[v as usize] = true;
        }

        // A component with no stationary vertex leaves its translation
        // unconstrained after elimination.
        let mut covered = vec![false; topology.component_count];
        for &v in &self.stationary {
            covered[topology.component_of(v) as usize] = true;
        }
        if let Some(label) = covered.iter().position(|&c| !c) {
            let rep = topology.component_representatives()[label];
            return Err(TransferError::SingularSystem(format!(
                "connected component {} (containing vertex {}) has no stationary vertex",
                label, rep
            )));
        }

        Ok(pinned)
    }
}

impl Default for DeformationTransferSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Topology cross-check for meshes bound to the same session.
fn check_session_topology(
    a: &TriangleMesh,
    b: &TriangleMesh,
    a_name: &str,
    b_name: &str,
) -> TransferResult<()> {
    if !a.same_topology(b) {
        return Err(TransferError::TopologyMismatch(format!(
            "{} mesh ({} vertices, {} triangles) and {} mesh ({} vertices, {} triangles) \
             must share identical triangle topology",
            a_name,
            a.vertex_count(),
            a.triangle_count(),
            b_name,
            b.vertex_count(),
            b.triangle_count(),
        )));
    }
    Ok(())
}
