//! Row-partitioned matrix-vector products across a process group.

use crate::blocked::mxv_tiled_rows;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::matrix::sequential::mxv_rows;
use crate::partition::{Partition, row_partition};

use super::group::Communicator;

/// Distributed naive product.
///
/// This rank computes the rows of its own partition, then all ranks
/// all-gather their slices so every rank ends up holding the full result.
/// Rows outside the local partition are overwritten by the exchange.
///
/// Must be called by every rank of `comm` with the same dimensions.
///
/// # Errors
///
/// `GroupTooLarge` if the group has more ranks than the matrix has rows,
/// `PeerDisconnected` if a peer leaves mid-exchange.
pub fn mxv_distributed<C: Communicator + ?Sized>(
    comm: &C,
    matrix: &Matrix,
    vector: &[f64],
    result: &mut [f64],
) -> Result<()> {
    let part = local_partition(comm, matrix, vector, result)?;
    mxv_rows(matrix, vector, result, part.start, part.end);
    exchange(comm, result, part)
}

/// Distributed tiled product: same partitioning and exchange as
/// [`mxv_distributed`], with the local rows computed tile by tile.
///
/// A partition that isn't a whole number of tiles is computed with the
/// naive row loop instead.
pub fn mxv_distributed_tiled<C: Communicator + ?Sized>(
    comm: &C,
    matrix: &Matrix,
    vector: &[f64],
    result: &mut [f64],
    tile: usize,
) -> Result<()> {
    let part = local_partition(comm, matrix, vector, result)?;
    mxv_tiled_rows(matrix, vector, result, part.start, part.end, tile);
    exchange(comm, result, part)
}

fn local_partition<C: Communicator + ?Sized>(
    comm: &C,
    matrix: &Matrix,
    vector: &[f64],
    result: &[f64],
) -> Result<Partition> {
    assert_eq!(vector.len(), matrix.cols(), "vector: expected {} elements", matrix.cols());
    assert_eq!(result.len(), matrix.rows(), "result: expected {} elements", matrix.rows());

    row_partition(matrix.rows(), comm.size(), comm.rank())
}

/// Replace `result` with the concatenation of every rank's partition.
fn exchange<C: Communicator + ?Sized>(comm: &C, result: &mut [f64], part: Partition) -> Result<()> {
    let gathered = comm.all_gather(&result[part.start..part.end])?;
    // Partitions tile [0, rows), so the gathered length is exactly rows.
    result.copy_from_slice(&gathered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributed::group::{LocalGroup, SingleProcess};

    #[test]
    fn test_two_ranks_2x2() {
        let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        let v = vec![1.0, 1.0];
        let out = LocalGroup::run(2, |comm| {
            let mut r = vec![0.0; 2];
            mxv_distributed(&comm, &m, &v, &mut r).unwrap();
            r
        });
        assert_eq!(out, vec![vec![3.0, 7.0], vec![3.0, 7.0]]);
    }

    #[test]
    fn test_group_larger_than_rows() {
        let m = Matrix::from_vec(2, 2, vec![1.0; 4]);
        let v = vec![1.0; 2];
        let out = LocalGroup::run(3, |comm| {
            let mut r = vec![0.0; 2];
            mxv_distributed(&comm, &m, &v, &mut r).is_err()
        });
        assert!(out.into_iter().all(|failed| failed));
    }

    #[test]
    fn test_single_rank_tiled() {
        let n = 32;
        let m = Matrix::from_vec(n, n, (0..n * n).map(|i| (i % 7) as f64).collect());
        let v: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mut expected = vec![0.0; n];
        mxv_rows(&m, &v, &mut expected, 0, n);
        let mut r = vec![0.0; n];
        mxv_distributed_tiled(&SingleProcess, &m, &v, &mut r, 16).unwrap();
        assert_eq!(r, expected);
    }
}
