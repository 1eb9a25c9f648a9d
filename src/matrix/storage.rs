//! Dense row-major storage for one benchmark run.

use crate::error::{MxvError, Result};

/// A rows × cols matrix of `f64` stored in one flat row-major buffer.
///
/// Element (i, j) lives at `data[i * cols + j]`. One allocation means rows
/// can be handed to worker threads as plain slices with no per-row
/// indirection.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Zero-filled matrix.
    ///
    /// # Errors
    /// `InvalidDimensions` if either side is zero, `Allocation` if the
    /// buffer cannot be reserved.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MxvError::InvalidDimensions { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(MxvError::Allocation { rows, cols })?;
        let data = try_zeroed(len).ok_or(MxvError::Allocation { rows, cols })?;
        Ok(Self { rows, cols, data })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "expected {}x{}={} elements",
            rows,
            cols,
            rows * cols
        );
        Self { rows, cols, data }
    }

    /// Identity matrix, mostly useful for tests.
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row `i` as a slice of length `cols`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// Zero-filled vector of length `len`, or `Allocation` if it can't be reserved.
pub fn zeroed_vector(len: usize) -> Result<Vec<f64>> {
    if len == 0 {
        return Err(MxvError::InvalidDimensions { rows: len, cols: 1 });
    }
    try_zeroed(len).ok_or(MxvError::Allocation { rows: len, cols: 1 })
}

fn try_zeroed(len: usize) -> Option<Vec<f64>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).ok()?;
    v.resize(len, 0.0);
    Some(v)
}

/// Everything one run at size N owns: the matrix, the input vector and the
/// result vector.
///
/// Either all three buffers are acquired or none is; a failure part way
/// through drops whatever was already reserved before the error returns.
#[derive(Debug)]
pub struct RunStorage {
    pub matrix: Matrix,
    pub vector: Vec<f64>,
    pub result: Vec<f64>,
}

impl RunStorage {
    /// Storage for a rows × cols matrix, a `cols` input and a `rows` result.
    pub fn allocate(rows: usize, cols: usize) -> Result<Self> {
        let matrix = Matrix::zeros(rows, cols)?;
        let vector = zeroed_vector(cols).map_err(|_| MxvError::Allocation { rows, cols })?;
        let result = zeroed_vector(rows).map_err(|_| MxvError::Allocation { rows, cols })?;
        Ok(Self {
            matrix,
            vector,
            result,
        })
    }

    /// Square storage for the benchmark sweep.
    pub fn square(n: usize) -> Result<Self> {
        Self::allocate(n, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let m = Matrix::zeros(3, 4).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            Matrix::zeros(0, 4),
            Err(MxvError::InvalidDimensions { rows: 0, cols: 4 })
        ));
        assert!(RunStorage::allocate(4, 0).is_err());
    }

    #[test]
    fn test_overflowing_request_is_allocation_failure() {
        assert!(matches!(
            Matrix::zeros(usize::MAX, 2),
            Err(MxvError::Allocation { .. })
        ));
    }

    #[test]
    fn test_huge_request_is_allocation_failure() {
        // Fits in usize but no allocator will hand this out.
        let n = 1usize << 31;
        assert!(matches!(
            RunStorage::square(n),
            Err(MxvError::Allocation { .. })
        ));
    }

    #[test]
    fn test_row_slices() {
        let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_identity() {
        let m = Matrix::identity(3).unwrap();
        assert_eq!(m.row(1), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_fresh_storage_is_not_aliased() {
        let mut first = RunStorage::square(8).unwrap();
        first.result.fill(7.0);
        let second = RunStorage::square(8).unwrap();
        assert!(second.result.iter().all(|&x| x == 0.0));
        assert_ne!(first.result.as_ptr(), second.result.as_ptr());
    }
}
