//! Integration tests for shapeflow-math.

use shapeflow_math::faer_solver::FaerSolver;
use shapeflow_math::sparse::{CsrMatrix, SparseSolver};
use shapeflow_types::TransferError;

// ─── Sparse Matrix Tests ─────────────────────────────────────

#[test]
fn empty_csr() {
    let m = CsrMatrix::new(3, 3);
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.rows, 3);
    assert_eq!(m.cols, 3);
    assert_eq!(m.row_ptr.len(), 4);
}

#[test]
fn csr_from_triplets() {
    let triplets = vec![(0, 0, 1.0), (1, 1, 1.0), (2, 2, 1.0)];
    let m = CsrMatrix::from_triplets(3, 3, &triplets);
    assert_eq!(m.nnz(), 3);
    assert_eq!(m.row_ptr, vec![0, 1, 2, 3]);
    assert_eq!(m.col_idx, vec![0, 1, 2]);
    assert_eq!(m.values, vec![1.0, 1.0, 1.0]);
}

#[test]
fn csr_from_triplets_unordered() {
    let triplets = vec![(0, 2, 3.0), (0, 0, 1.0), (0, 1, 2.0)];
    let m = CsrMatrix::from_triplets(1, 3, &triplets);
    assert_eq!(m.col_idx, vec![0, 1, 2]);
    assert_eq!(m.values, vec![1.0, 2.0, 3.0]);
}

#[test]
fn csr_sums_duplicates() {
    let triplets = vec![(0, 0, 1.0), (0, 0, 2.0), (1, 0, -1.0), (1, 0, -1.0)];
    let m = CsrMatrix::from_triplets(2, 2, &triplets);
    assert_eq!(m.nnz(), 2);
    assert_eq!(m.values, vec![3.0, -2.0]);
    assert_eq!(m.row_ptr, vec![0, 1, 2]);
}

// ─── FaerSolver Tests ────────────────────────────────────────

#[test]
fn faer_identity_solve() {
    // Solve I * x = b → expect x = b
    let triplets = vec![(0, 0, 1.0), (1, 1, 1.0), (2, 2, 1.0)];
    let matrix = CsrMatrix::from_triplets(3, 3, &triplets);

    let mut solver = FaerSolver::new();
    solver.factorize(&matrix).unwrap();
    assert!(solver.is_factorized());

    let rhs = [2.0, -1.0, 4.0];
    let mut sol = [0.0; 3];
    solver.solve(&rhs, &mut sol).unwrap();
    assert!((sol[0] - 2.0).abs() < 1e-12);
    assert!((sol[1] + 1.0).abs() < 1e-12);
    assert!((sol[2] - 4.0).abs() < 1e-12);
}

#[test]
fn faer_diagonal_reuses_factorization() {
    // Solve diag(0.5, 3, 5) * x = b twice with different b
    let triplets = vec![(0, 0, 0.5), (1, 1, 3.0), (2, 2, 5.0)];
    let matrix = CsrMatrix::from_triplets(3, 3, &triplets);

    let mut solver = FaerSolver::new();
    solver.factorize(&matrix).unwrap();

    let rhs1 = [1.0, 9.0, 25.0];
    let mut sol1 = [0.0; 3];
    solver.solve(&rhs1, &mut sol1).unwrap();
    assert!((sol1[0] - 2.0).abs() < 1e-12);
    assert!((sol1[1] - 3.0).abs() < 1e-12);
    assert!((sol1[2] - 5.0).abs() < 1e-12);

    // Second solve with a different RHS (same factorization)
    let rhs2 = [1.0, 1.0, 1.0];
    let mut sol2 = [0.0; 3];
    solver.solve(&rhs2, &mut sol2).unwrap();
    assert!((sol2[0] - 2.0).abs() < 1e-12);
    assert!((sol2[1] - 1.0 / 3.0).abs() < 1e-12);
    assert!((sol2[2] - 0.2).abs() < 1e-12);
}

#[test]
fn faer_large_laplacian() {
    // A 100×100 tridiagonal Laplacian with a small diagonal shift
    // for strict positive-definiteness.
    let n = 100;
    let mut triplets = Vec::new();

    for i in 0..n {
        triplets.push((i, i, 2.1));
        if i > 0 {
            triplets.push((i, i - 1, -1.0));
        }
        if i < n - 1 {
            triplets.push((i, i + 1, -1.0));
        }
    }

    let matrix = CsrMatrix::from_triplets(n, n, &triplets);
    let mut solver = FaerSolver::new();
    solver.factorize(&matrix).unwrap();

    let rhs = vec![1.0; n];
    let mut sol = vec![0.0; n];
    solver.solve(&rhs, &mut sol).unwrap();

    // Verify residual: ||A*x - b|| < tolerance
    let mut max_residual: f64 = 0.0;
    for i in 0..n {
        let mut ax_i = 2.1 * sol[i];
        if i > 0 {
            ax_i -= sol[i - 1];
        }
        if i < n - 1 {
            ax_i -= sol[i + 1];
        }
        max_residual = max_residual.max((ax_i - rhs[i]).abs());
    }
    assert!(
        max_residual < 1e-9,
        "Max residual = {max_residual}, expected < 1e-9"
    );
}

#[test]
fn faer_indefinite_matrix_fails() {
    // [[1, 2], [2, 1]] has eigenvalues 3 and -1 — not positive definite.
    let triplets = vec![(0, 0, 1.0), (0, 1, 2.0), (1, 0, 2.0), (1, 1, 1.0)];
    let matrix = CsrMatrix::from_triplets(2, 2, &triplets);
    let mut solver = FaerSolver::new();
    let err = solver.factorize(&matrix).unwrap_err();
    assert!(matches!(err, TransferError::SingularSystem(_)));
}

#[test]
fn faer_solve_before_factorize_fails() {
    let solver = FaerSolver::new();
    let rhs = [1.0; 3];
    let mut sol = [0.0; 3];
    assert!(solver.solve(&rhs, &mut sol).is_err());
}

#[test]
fn faer_non_square_fails() {
    let triplets = vec![(0, 0, 1.0)];
    let matrix = CsrMatrix::from_triplets(2, 3, &triplets);
    let mut solver = FaerSolver::new();
    assert!(solver.factorize(&matrix).is_err());
}

#[test]
fn faer_empty_matrix_fails() {
    let matrix = CsrMatrix::new(0, 0);
    let mut solver = FaerSolver::new();
    assert!(solver.factorize(&matrix).is_err());
}
