//! Square-tile matrix-vector product over a row range.

use crate::matrix::Matrix;
use crate::matrix::sequential::mxv_rows;

/// Side of the square (row, column) blocks.
pub const TILE_SIZE: usize = 16;

/// True when rows [start, end) and all `cols` columns split into whole
/// `tile` × `tile` blocks.
pub fn is_tile_aligned(start: usize, end: usize, cols: usize, tile: usize) -> bool {
    tile > 0 && start % tile == 0 && (end - start) % tile == 0 && cols % tile == 0
}

/// Add the contribution of one tile to `out`.
///
/// The tile covers rows [row0, row0 + tile) and columns [col0, col0 + tile);
/// `out` is indexed by absolute row.
#[inline]
pub fn accumulate_tile(
    matrix: &Matrix,
    vector: &[f64],
    out: &mut [f64],
    row0: usize,
    col0: usize,
    tile: usize,
) {
    let x = &vector[col0..col0 + tile];
    for ii in row0..row0 + tile {
        let a = &matrix.row(ii)[col0..col0 + tile];
        let mut acc = out[ii];
        for (a, x) in a.iter().zip(x) {
            acc += a * x;
        }
        out[ii] = acc;
    }
}

/// Blocked product for rows [start, end), sweeping column tiles inside each
/// row tile so the row block stays hot in cache.
///
/// Only `result[start..end]` is written. When the range or `cols` is not a
/// whole number of tiles this falls back to the naive row loop over the same
/// range instead of padding.
pub fn mxv_tiled_rows(
    matrix: &Matrix,
    vector: &[f64],
    result: &mut [f64],
    start: usize,
    end: usize,
    tile: usize,
) {
    let cols = matrix.cols();
    if !is_tile_aligned(start, end, cols, tile) {
        mxv_rows(matrix, vector, result, start, end);
        return;
    }

    result[start..end].fill(0.0);
    for i in (start..end).step_by(tile) {
        for j in (0..cols).step_by(tile) {
            accumulate_tile(matrix, vector, result, i, j, tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment() {
        assert!(is_tile_aligned(0, 64, 64, 16));
        assert!(is_tile_aligned(16, 48, 32, 16));
        assert!(!is_tile_aligned(0, 20, 64, 16));
        assert!(!is_tile_aligned(4, 20, 64, 16));
        assert!(!is_tile_aligned(0, 16, 17, 16));
    }

    #[test]
    fn test_only_range_written() {
        let n = 32;
        let m = Matrix::from_vec(n, n, vec![1.0; n * n]);
        let v = vec![1.0; n];
        let mut r = vec![-1.0; n];
        mxv_tiled_rows(&m, &v, &mut r, 16, 32, 16);
        assert!(r[..16].iter().all(|&x| x == -1.0));
        assert!(r[16..].iter().all(|&x| x == n as f64));
    }
}
