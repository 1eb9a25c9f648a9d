//! Drives a strategy across the size sweep.

use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::blocked::TILE_SIZE;
use crate::distributed::{Communicator, mxv_distributed, mxv_distributed_tiled};
use crate::error::{MxvError, Result};
use crate::matrix::fill::fill_random;
use crate::matrix::sequential::mxv_sequential;
use crate::matrix::{Matrix, RunStorage};
use crate::partition::row_partition;
use crate::threaded::{mxv_naive_mt, mxv_tiled_mt};

use super::record::{RecordSink, RunRecord};
use super::strategy::Strategy;
use super::sweep::Sweep;

/// Everything a sweep needs, decided once before any rank starts.
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    pub strategy: Strategy,
    pub sweep: Sweep,
    /// Base seed for the fill data; each size draws from `seed + n`.
    pub seed: u64,
}

/// Run one kernel of `strategy` into `result`.
///
/// Shared-memory and sequential strategies ignore `comm`; distributed ones
/// must be entered by every rank of it.
pub fn run_strategy<C: Communicator + ?Sized>(
    strategy: Strategy,
    comm: &C,
    matrix: &Matrix,
    vector: &[f64],
    result: &mut [f64],
) -> Result<()> {
    match strategy {
        Strategy::Sequential => mxv_sequential(matrix, vector, result),
        Strategy::SharedNaive => mxv_naive_mt(matrix, vector, result),
        Strategy::SharedTiled => mxv_tiled_mt(matrix, vector, result, TILE_SIZE),
        Strategy::DistributedNaive => mxv_distributed(comm, matrix, vector, result)?,
        Strategy::DistributedTiled => {
            mxv_distributed_tiled(comm, matrix, vector, result, TILE_SIZE)?
        }
    }
    Ok(())
}

/// Time one kernel run with a monotonic clock.
///
/// Distributed runs are bracketed by barriers so every rank measures the
/// same window, exchange included.
pub fn time_run<C: Communicator + ?Sized>(
    strategy: Strategy,
    comm: &C,
    storage: &mut RunStorage,
) -> Result<Duration> {
    let RunStorage {
        matrix,
        vector,
        result,
    } = storage;

    if !strategy.is_distributed() {
        let start = Instant::now();
        run_strategy(strategy, comm, matrix, vector, result)?;
        return Ok(start.elapsed());
    }

    // Same answer on every rank, so either all ranks bail here or none do.
    row_partition(matrix.rows(), comm.size(), comm.rank())?;

    comm.barrier();
    let start = Instant::now();
    run_strategy(strategy, comm, matrix, vector, result)?;
    comm.barrier();
    Ok(start.elapsed())
}

/// Multiply `matrix` by `vector` with `strategy` and return the result.
pub fn multiply<C: Communicator + ?Sized>(
    strategy: Strategy,
    comm: &C,
    matrix: &Matrix,
    vector: &[f64],
) -> Result<Vec<f64>> {
    let mut result = crate::matrix::storage::zeroed_vector(matrix.rows())?;
    run_strategy(strategy, comm, matrix, vector, &mut result)?;
    Ok(result)
}

/// True on every rank iff `ok` is true on every rank.
fn all_ranks_agree<C: Communicator + ?Sized>(comm: &C, ok: bool) -> Result<bool> {
    let votes = comm.all_gather(&[if ok { 1.0 } else { 0.0 }])?;
    Ok(votes.iter().all(|&v| v == 1.0))
}

/// Run the whole sweep for `config.strategy` on this rank.
///
/// Each size gets fresh storage, seeded random data, one timed run and,
/// on rank 0, one record in `sink`. Storage is dropped before the next
/// size. A size is skipped on every rank when any rank fails to allocate
/// or the group is too large for it.
///
/// Returns the number of sizes that ran.
///
/// # Errors
///
/// Collective failures abort the sweep. A sink failure on rank 0 stops
/// further emission but the rank keeps taking part in collectives until
/// the sweep ends, then reports the error.
pub fn run_sweep<C, S>(config: &SweepConfig, comm: &C, sink: &mut S) -> Result<usize>
where
    C: Communicator + ?Sized,
    S: RecordSink + ?Sized,
{
    let emits = comm.rank() == 0;
    if emits {
        info!(
            "running {} over sizes {}..={} on {} rank(s)",
            config.strategy,
            config.sweep.min(),
            config.sweep.max(),
            comm.size()
        );
    }

    let mut completed = 0;
    let mut sink_error = None;

    for n in config.sweep.sizes() {
        let storage = RunStorage::square(n);
        let agreed = all_ranks_agree(comm, storage.is_ok())?;
        let mut storage = match storage {
            Ok(s) if agreed => s,
            Ok(_) => {
                warn!("N={}: skipped, a peer could not allocate", n);
                continue;
            }
            Err(e) => {
                warn!("N={}: skipped: {}", n, e);
                continue;
            }
        };

        let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(n as u64));
        fill_random(&mut storage.matrix, &mut storage.vector, &mut rng);

        let elapsed = match time_run(config.strategy, comm, &mut storage) {
            Ok(elapsed) => elapsed,
            Err(e @ MxvError::GroupTooLarge { .. }) => {
                warn!("N={}: skipped: {}", n, e);
                continue;
            }
            Err(e) => return Err(e),
        };
        drop(storage);
        completed += 1;

        if emits && sink_error.is_none() {
            let record = RunRecord {
                strategy: config.strategy,
                n,
                elapsed,
            };
            debug!("{}", record.to_line());
            if let Err(e) = sink.emit(&record) {
                error!("could not write record for N={}: {}", n, e);
                sink_error = Some(e);
            }
        }
    }

    if emits {
        info!("{} finished: {} size(s) run", config.strategy, completed);
    }
    match sink_error {
        Some(e) => Err(e),
        None => Ok(completed),
    }
}
