//! Multi-threaded naive matrix-vector product.

use rayon::prelude::*;

use crate::matrix::Matrix;
use crate::matrix::sequential::row_dot;

/// Row-parallel matrix-vector product on the rayon pool.
///
/// Each output element is one task: a single worker computes the whole dot
/// product for that row and writes only `result[i]`. The matrix and vector
/// are shared read-only, and the pool decides how many workers run.
///
/// # Panics
///
/// Panics if `vector.len() != cols` or `result.len() != rows`.
pub fn mxv_naive_mt(matrix: &Matrix, vector: &[f64], result: &mut [f64]) {
    assert_eq!(vector.len(), matrix.cols(), "vector: expected {} elements", matrix.cols());
    assert_eq!(result.len(), matrix.rows(), "result: expected {} elements", matrix.rows());

    result
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, out)| *out = row_dot(matrix.row(i), vector));
}
