//! Distributed-memory kernels and the process group they run on.
//!
//! Rows are split into one contiguous partition per rank (the last rank
//! absorbs the remainder). Each rank computes its own rows, then an
//! all-gather leaves the complete result on every rank.

pub mod group;
pub mod kernels;

pub use group::{Communicator, LocalComm, LocalGroup, SingleProcess};
pub use kernels::{mxv_distributed, mxv_distributed_tiled};
