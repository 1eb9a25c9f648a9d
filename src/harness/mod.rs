//! Benchmark harness: strategy selection, size sweep, timing and records.

pub mod record;
pub mod runner;
pub mod strategy;
pub mod sweep;

pub use record::{CsvSink, RecordSink, RunRecord};
pub use runner::{SweepConfig, multiply, run_strategy, run_sweep, time_run};
pub use strategy::{Strategy, prompt_strategy, resolve_strategy};
pub use sweep::{MAX_SIZE, MIN_SIZE, Sweep};
