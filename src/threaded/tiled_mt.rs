//! Multi-threaded tiled matrix-vector product.

use rayon::prelude::*;

use crate::blocked::{accumulate_tile, is_tile_aligned};
use crate::matrix::Matrix;
use crate::threaded::naive_mt::mxv_naive_mt;

/// Tiled matrix-vector product parallelised over row and column blocks at
/// once.
///
/// The grid of `tile` × `tile` blocks is flattened into one index range so
/// rayon can hand any block to any worker. Blocks in the same block-row
/// touch the same output rows, so workers fold their blocks into private
/// partial vectors which are then summed; no result element has two
/// writers.
///
/// Falls back to [`mxv_naive_mt`] when either dimension isn't a multiple of
/// `tile`.
///
/// # Panics
///
/// Panics if `vector.len() != cols` or `result.len() != rows`.
pub fn mxv_tiled_mt(matrix: &Matrix, vector: &[f64], result: &mut [f64], tile: usize) {
    let (rows, cols) = (matrix.rows(), matrix.cols());
    assert_eq!(vector.len(), cols, "vector: expected {} elements", cols);
    assert_eq!(result.len(), rows, "result: expected {} elements", rows);

    if !is_tile_aligned(0, rows, cols, tile) {
        mxv_naive_mt(matrix, vector, result);
        return;
    }

    let col_blocks = cols / tile;
    let blocks = (rows / tile) * col_blocks;

    let sums = (0..blocks)
        .into_par_iter()
        .fold(
            || vec![0.0; rows],
            |mut partial, b| {
                let row0 = (b / col_blocks) * tile;
                let col0 = (b % col_blocks) * tile;
                accumulate_tile(matrix, vector, &mut partial, row0, col0, tile);
                partial
            },
        )
        .reduce(
            || vec![0.0; rows],
            |mut acc, partial| {
                for (a, p) in acc.iter_mut().zip(&partial) {
                    *a += p;
                }
                acc
            },
        );

    result.copy_from_slice(&sums);
}
