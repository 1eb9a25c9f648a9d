//! Matrix storage, random fill and the sequential reference kernel.
//!
//! The sequential kernel is the correctness baseline for the parallel and
//! distributed ones.

pub mod fill;
pub mod sequential;
pub mod storage;

pub use storage::{Matrix, RunStorage};
