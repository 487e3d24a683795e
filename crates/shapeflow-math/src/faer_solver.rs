//! Sparse Cholesky solver backed by `faer`.
//!
//! Implements the [`SparseSolver`] trait using faer's supernodal LLᵀ
//! factorization.
//!
//! ## Workflow
//! 1. `factorize(matrix)` — converts CSR→CSC, computes symbolic + numeric LLᵀ
//! 2. `solve(rhs, solution)` — forward/backward substitution (cached factorization)
//! 3. Repeat `solve()` with different RHS without re-factorizing

use faer::Side;
use faer::linalg::solvers::Solve;
use faer::sparse::SparseColMat;
use faer::sparse::Triplet;
use faer::sparse::linalg::solvers::{Llt, SymbolicLlt};

use shapeflow_types::{TransferError, TransferResult};

use crate::sparse::{CsrMatrix, SparseSolver};

/// Sparse Cholesky (LLᵀ) solver using `faer`.
///
/// Stores the factorization for reuse across multiple solves. The
/// normal-equations matrix of a transfer session is constant (it depends
/// only on topology and the stationary set), so one factorization serves
/// every transfer against the same bound rest pair.
pub struct FaerSolver {
    /// Cached LLᵀ factorization.
    factorization: Option<Llt<usize, f64>>,
    /// Matrix dimension (N×N).
    dimension: usize,
}

impl FaerSolver {
    /// Creates a new solver (unfactorized).
    pub fn new() -> Self {
        Self {
            factorization: None,
            dimension: 0,
        }
    }

    /// Convert our CSR matrix to faer's CSC matrix.
    ///
    /// Builds from faer `Triplet`s, which faer assembles into CSC format.
    fn csr_to_csc(matrix: &CsrMatrix) -> TransferResult<SparseColMat<usize, f64>> {
        let mut triplets: Vec<Triplet<usize, usize, f64>> = Vec::with_capacity(matrix.values.len());
        for row in 0..matrix.rows {
            for idx in matrix.row_ptr[row]..matrix.row_ptr[row + 1] {
                let col = matrix.col_idx[idx];
                let val = matrix.values[idx];
                triplets.push(Triplet { row, col, val });
            }
        }

        SparseColMat::try_new_from_triplets(matrix.rows, matrix.cols, &triplets).map_err(|e| {
            TransferError::SingularSystem(format!("failed to construct CSC matrix: {e:?}"))
        })
    }
}

impl Default for FaerSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseSolver for FaerSolver {
    fn factorize(&mut self, matrix: &CsrMatrix) -> TransferResult<()> {
        if matrix.rows != matrix.cols {
            return Err(TransferError::SingularSystem(format!(
                "matrix must be square, got {}×{}",
                matrix.rows, matrix.cols
            )));
        }
        if matrix.rows == 0 {
            return Err(TransferError::SingularSystem(
                "cannot factorize empty matrix".into(),
            ));
        }

        self.dimension = matrix.rows;

        // Convert CSR → faer CSC
        let csc = Self::csr_to_csc(matrix)?;

        // Step 1: Symbolic analysis (ordering, fill-in prediction)
        let symbolic = SymbolicLlt::try_new(csc.symbolic().as_ref(), Side::Upper)
            .map_err(|e| TransferError::SingularSystem(format!("symbolic analysis failed: {e:?}")))?;

        // Step 2: Numeric factorization (using the symbolic structure)
        let llt = Llt::try_new_with_symbolic(symbolic, csc.as_ref(), Side::Upper).map_err(|e| {
            TransferError::SingularSystem(format!(
                "matrix is not positive definite, Cholesky factorization failed: {e:?}"
            ))
        })?;

        self.factorization = Some(llt);
        Ok(())
    }

    fn solve(&self, rhs: &[f64], solution: &mut [f64]) -> TransferResult<()> {
        let llt = self.factorization.as_ref().ok_or_else(|| {
            TransferError::SingularSystem("solver not factorized, call factorize() first".into())
        })?;

        if rhs.len() != self.dimension {
            return Err(TransferError::SingularSystem(format!(
                "RHS length ({}) != matrix dimension ({})",
                rhs.len(),
                self.dimension
            )));
        }
        if solution.len() != self.dimension {
            return Err(TransferError::SingularSystem(format!(
                "solution length ({}) != matrix dimension ({})",
                solution.len(),
                self.dimension
            )));
        }

        // RHS as a dense column vector
        let rhs_mat: faer::Mat<f64> = faer::Mat::from_fn(self.dimension, 1, |i, _| rhs[i]);

        // Solve using cached factorization: L Lᵀ x = b
        let sol = llt.solve(&rhs_mat);

        for i in 0..self.dimension {
            solution[i] = sol[(i, 0)];
        }

        Ok(())
    }

    fn is_factorized(&self) -> bool {
        self.factorization.is_some()
    }
}
