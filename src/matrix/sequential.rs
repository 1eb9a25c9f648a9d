use super::storage::Matrix;

/// Dot product of one matrix row with the input vector, accumulated left to
/// right over j.
#[inline]
pub fn row_dot(row: &[f64], vector: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (a, x) in row.iter().zip(vector) {
        sum += a * x;
    }
    sum
}

/// Reference matrix-vector product: result[i] = Σ_j matrix[i][j] · vector[j].
///
/// Plain row-major loop, one row at a time. Every other kernel is checked
/// against this one.
///
/// # Panics
///
/// Panics if `vector.len() != cols` or `result.len() != rows`.
pub fn mxv_sequential(matrix: &Matrix, vector: &[f64], result: &mut [f64]) {
    assert_eq!(vector.len(), matrix.cols(), "vector: expected {} elements", matrix.cols());
    assert_eq!(result.len(), matrix.rows(), "result: expected {} elements", matrix.rows());

    mxv_rows(matrix, vector, result, 0, matrix.rows());
}

/// Naive product restricted to rows [start, end), writing `result[i]` for
/// each of those rows and nothing else.
pub fn mxv_rows(matrix: &Matrix, vector: &[f64], result: &mut [f64], start: usize, end: usize) {
    for i in start..end {
        result[i] = row_dot(matrix.row(i), vector);
    }
}
