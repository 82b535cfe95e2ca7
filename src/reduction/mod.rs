//! Reduction operators and kernels
//!
//! This module provides the reduction operators that collapse one axis of a
//! 2D scalar field into a single value per surviving-axis index.
//!
//! # Organization
//!
//! - [`operations`]: Operator enum, dispatch and the [`RangeReduction`] trait
//! - [`kernels`]: Kernel implementations over `ndarray` views

pub mod kernels;
pub mod operations;

// Re-export the main types and functions for convenience
pub use operations::{RangeReduction, ReductionOp};
