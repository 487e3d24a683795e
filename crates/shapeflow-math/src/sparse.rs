//! Sparse matrix representation and solver interface.
//!
//! Provides a CSR (Compressed Sparse Row) matrix and a trait for
//! sparse Cholesky solvers over symmetric positive-definite systems.

use serde::{Deserialize, Serialize};
use shapeflow_types::TransferResult;

/// Compressed Sparse Row (CSR) matrix.
///
/// Stores a sparse matrix in row-major order. This is the standard
/// interchange format for sparse linear algebra backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row pointer array (length = rows + 1).
    /// `row_ptr[i]..row_ptr[i+1]` are the indices into `col_idx` and `values`
    /// for non-zeros in row `i`.
    pub row_ptr: Vec<usize>,
    /// Column indices of non-zero entries.
    pub col_idx: Vec<usize>,
    /// Non-zero values.
    pub values: Vec<f64>,
}

impl CsrMatrix {
    /// Creates an empty CSR matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Creates a CSR matrix from triplets (row, col, value).
    ///
    /// Duplicate entries are summed.
    pub fn from_triplets(rows: usize, cols: usize, triplets: &[(usize, usize, f64)]) -> Self {
        // Count entries per row
        let mut row_counts = vec![0usize; rows];
        for &(r, _, _) in triplets {
            row_counts[r] += 1;
        }

        // Build row_ptr
        let mut row_ptr = vec![0usize; rows + 1];
        for i in 0..rows {
            row_ptr[i + 1] = row_ptr[i] + row_counts[i];
        }

        let nnz = row_ptr[rows];
        let mut col_idx = vec![0usize; nnz];
        let mut values = vec![0.0f64; nnz];

        // Fill in — use a cursor per row
        let mut cursor = row_ptr[..rows].to_vec();
        for &(r, c, v) in triplets {
            let pos = cursor[r];
            col_idx[pos] = c;
            values[pos] = v;
            cursor[r] += 1;
        }

        // Sort each row by column index, summing duplicates
        let mut out_col_idx: Vec<usize> = Vec::with_capacity(nnz);
        let mut out_values: Vec<f64> = Vec::with_capacity(nnz);
        let mut out_row_ptr = vec![0usize; rows + 1];

        for i in 0..rows {
            let start = row_ptr[i];
            let end = row_ptr[i + 1];
            let slice = &mut col_idx[start..end];
            let val_slice = &mut values[start..end];

            // Simple insertion sort (rows are typically small)
            for j in 1..slice.len() {
                let mut k = j;
                while k > 0 && slice[k - 1] > slice[k] {
                    slice.swap(k - 1, k);
                    val_slice.swap(k - 1, k);
                    k -= 1;
                }
            }

            // Merge duplicates within the row
            let mut j = 0;
            while j < slice.len() {
                let c = slice[j];
                let mut v = val_slice[j];
                let mut k = j + 1;
                while k < slice.len() && slice[k] == c {
                    v += val_slice[k];
                    k += 1;
                }
                out_col_idx.push(c);
                out_values.push(v);
                j = k;
            }
            out_row_ptr[i + 1] = out_col_idx.len();
        }

        Self {
            rows,
            cols,
            row_ptr: out_row_ptr,
            col_idx: out_col_idx,
            values: out_values,
        }
    }
}

/// Trait for sparse symmetric positive-definite solvers.
///
/// The factorization is computed once and reused for every right-hand
/// side, which is what makes repeated transfers against one bound rest
/// pair cheap.
pub trait SparseSolver {
    /// Factorize the matrix. Call once (or after the sparsity pattern changes).
    fn factorize(&mut self, matrix: &CsrMatrix) -> TransferResult<()>;

    /// Solve Ax = b using the pre-computed factorization.
    /// Returns x in the provided output buffer.
    fn solve(&self, rhs: &[f64], solution: &mut [f64]) -> TransferResult<()>;

    /// Returns true if the solver holds a valid factorization.
    fn is_factorized(&self) -> bool;
}
