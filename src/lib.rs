//! Dense matrix-vector multiplication, five ways, with a benchmark harness.
//!
//! I wanted to see how much a plain `y = A·x` gains from threads, from
//! tiling, and from splitting rows across cooperating processes that have
//! to swap their results at the end. This crate has one kernel per
//! approach plus the harness that times them over N = 64, 128, …, 32768.
//!
//! ## Usage
//!
//! ```
//! use mxv::distributed::SingleProcess;
//! use mxv::harness::{Strategy, multiply};
//! use mxv::matrix::Matrix;
//!
//! let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
//! let x = vec![1.0, 1.0];
//!
//! let y = multiply(Strategy::SharedTiled, &SingleProcess, &a, &x).unwrap();
//! assert_eq!(y, vec![3.0, 7.0]);
//! ```
//!
//! Distributed kernels run on a process group. Every rank calls the same
//! kernel and ends up with the full result:
//!
//! ```
//! use mxv::distributed::{LocalGroup, mxv_distributed};
//! use mxv::matrix::Matrix;
//!
//! let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
//! let x = vec![1.0, 1.0];
//!
//! let per_rank = LocalGroup::run(2, |comm| {
//!     let mut y = vec![0.0; 2];
//!     mxv_distributed(&comm, &a, &x, &mut y).unwrap();
//!     y
//! });
//! assert_eq!(per_rank, vec![vec![3.0, 7.0], vec![3.0, 7.0]]);
//! ```
//!
//! ## What's inside
//!
//! - Sequential reference kernel
//! - Row-parallel and 2D-tiled kernels on rayon
//! - Row-partitioned distributed kernels with an all-gather exchange
//! - Size sweep, timing and CSV results

pub mod blocked;
pub mod distributed;
pub mod error;
pub mod harness;
pub mod matrix;
pub mod partition;
pub mod threaded;

pub use error::{MxvError, Result};
pub use matrix::sequential::mxv_sequential;
