//! Benchmark runner for the matrix-vector kernels.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, bail};
use clap::Parser;
use log::info;

use mxv::distributed::{Communicator, LocalGroup, SingleProcess};
use mxv::harness::{CsvSink, RunRecord, Sweep, SweepConfig, resolve_strategy, run_sweep};

#[derive(Parser)]
#[command(name = "mxv")]
#[command(about = "Time dense matrix-vector multiply across five strategies")]
#[command(version)]
struct Cli {
    /// Strategy 1-5 (Sequential, OpenMP, MPI, OpenMP Tiled, MPI Tiled).
    /// Prompts on stdin when omitted or invalid.
    #[arg(short, long)]
    strategy: Option<String>,

    /// Number of ranks in the process group for the distributed strategies.
    #[arg(short, long, default_value_t = 4)]
    processes: usize,

    /// Results file.
    #[arg(short, long, default_value = "results.csv")]
    output: PathBuf,

    /// Seed for the fill data. Derived from the clock when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.processes == 0 {
        bail!("--processes must be at least 1");
    }

    // Chosen once, here, and handed to every rank unchanged.
    let strategy = resolve_strategy(cli.strategy.as_deref(), io::stdin().lock(), io::stdout())?;
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let config = SweepConfig {
        strategy,
        sweep: Sweep::default(),
        seed,
    };

    let file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    let mut sink = CsvSink::new(BufWriter::new(file))?;

    let completed = if strategy.is_distributed() {
        let shared = Mutex::new(sink);
        let per_rank = LocalGroup::run(cli.processes, |comm| {
            if comm.rank() == 0 {
                let mut sink = shared.lock().unwrap_or_else(PoisonError::into_inner);
                run_sweep(&config, &comm, &mut *sink)
            } else {
                run_sweep(&config, &comm, &mut Vec::<RunRecord>::new())
            }
        });
        let mut completed = 0;
        for (rank, outcome) in per_rank.into_iter().enumerate() {
            let n = outcome.with_context(|| format!("rank {rank}"))?;
            if rank == 0 {
                completed = n;
            }
        }
        sink = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
        completed
    } else {
        run_sweep(&config, &SingleProcess, &mut sink)?
    };

    sink.finish()?;
    info!("wrote {} record(s) to {}", completed, cli.output.display());
    println!("{} run(s) recorded in {}", completed, cli.output.display());
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
