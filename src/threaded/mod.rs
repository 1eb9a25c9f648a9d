//! Shared-memory kernels.
//!
//! Both run inside one process on rayon's fork-join pool; the calling
//! thread blocks only at the join. The pool size is rayon's choice.
//!
//! Available implementations:
//! - `naive_mt`: one task per output row
//! - `tiled_mt`: one task per (row block, column block) tile

pub mod naive_mt;
pub mod tiled_mt;

pub use naive_mt::mxv_naive_mt;
pub use tiled_mt::mxv_tiled_mt;
