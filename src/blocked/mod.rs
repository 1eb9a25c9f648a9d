//! Cache-blocked iteration shared by the tiled kernels.
//!
//! The (row, column) index space is cut into `TILE_SIZE` × `TILE_SIZE`
//! blocks. Both the shared-memory and the distributed tiled kernels are
//! built from `accumulate_tile`; they differ only in how blocks are handed
//! out.

pub mod tiled;

pub use tiled::{TILE_SIZE, accumulate_tile, is_tile_aligned, mxv_tiled_rows};
