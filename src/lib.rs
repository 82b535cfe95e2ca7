//! grid_reduce: dimensional reduction of 3D grid datasets
//!
//! A Rust library for reducing live 3D grid datasets (two coordinate axes plus
//! a scalar field) to 2D views. One axis is collapsed over a scalar coordinate
//! range using one of five operators — slice, minimum, maximum, mean or
//! integral — incrementally and lazily, with invalidation propagation to
//! downstream consumers such as chart renderers.
//!
//! ## Key Features
//!
//! - **Five Reduction Operators**: Slice, min, max, mean and integral over any
//!   coordinate range of either axis
//! - **Incremental Recomputation**: Range changes and source invalidations
//!   only mark the output stale; repeated mutations coalesce into a single
//!   pass at the next read
//! - **NaN-aware Kernels**: Non-finite values are skipped or propagated per
//!   documented per-kernel policy, never a crash
//! - **Parallel Mean Kernel**: Per-lane parallel computation using Rayon
//! - **Non-fatal Diagnostics**: Malformed input grids are reported through a
//!   warnings list instead of errors, so interactive consumers can keep
//!   running
//!
//! ## Module Organization
//!
//! The library is organized into logical modules:
//!
//! - [`source`]: Read-only grid source abstraction and axis selection
//! - [`grid`]: In-memory grid container and builder
//! - [`reduction`]: Reduction operators and kernels
//! - [`reducer`]: The incremental reduction view over a grid source
//! - [`cache`]: Reusable scratch-buffer arena
//! - [`parallel`]: Parallel processing configuration
//! - [`errors`]: Centralized error handling
//!
//! ## Usage Example
//!
//! ```rust
//! use grid_reduce::prelude::*;
//! use std::rc::Rc;
//!
//! let grid = Rc::new(
//!     GridBuilder::new("beam profile")
//!         .x_values(vec![1.0, 2.0, 3.0])
//!         .y_values(vec![6.0, 7.0, 8.0])
//!         .field_rows(vec![
//!             vec![1.0, 2.0, 3.0],
//!             vec![6.0, 5.0, 4.0],
//!             vec![9.0, 8.0, 7.0],
//!         ])
//!         .build()
//!         .unwrap(),
//! );
//!
//! // Collapse the x-axis over its full coordinate range
//! let reducer = GridReducer::new(grid, GridAxis::X, ReductionOp::Integral);
//! assert_eq!(reducer.values(), vec![16.0, 15.0, 14.0]);
//! ```

// Core modules
pub mod cache;
pub mod errors;
pub mod grid;
pub mod parallel;
pub mod reducer;
pub mod reduction;
pub mod source;

// Direct re-exports for the public API
pub use cache::*;
pub use errors::*;
pub use grid::*;
pub use parallel::*;
pub use reducer::*;
pub use reduction::*;
pub use source::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::cache::DoubleArrayCache;
    pub use crate::errors::{GridReduceError, Result};
    pub use crate::grid::{DoubleGrid, GridBuilder};
    pub use crate::parallel::ParallelConfig;
    pub use crate::reducer::GridReducer;
    pub use crate::reduction::{RangeReduction, ReductionOp};
    pub use crate::source::{GridAxis, GridSource};
}
