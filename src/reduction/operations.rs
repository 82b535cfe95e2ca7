//! Core reduction operations and traits
//!
//! This module defines the operator enum and the dispatch from an operator plus
//! an inclusive index range to the kernel implementations.

use crate::source::GridAxis;
use ndarray::Array2;

/// Supported reduction operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionOp {
    /// Single row/column at the lower range index
    Slice,
    /// Minimum of finite values
    Min,
    /// Maximum of finite values
    Max,
    /// Sum of finite values divided by the full range length
    Mean,
    /// Plain running sum over the range
    Integral,
}

impl ReductionOp {
    /// Get the string representation of the operation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slice => "slice",
            Self::Min => "minimum",
            Self::Max => "maximum",
            Self::Mean => "mean",
            Self::Integral => "integral",
        }
    }
}

/// Trait for fields that can collapse an index range along one axis
pub trait RangeReduction {
    /// Reduce the inclusive index range `[min_index, max_index]` along
    /// `axis`, writing one value per surviving-axis index into `out`.
    ///
    /// `out` is cleared first. A degenerate range (`min_index > max_index`,
    /// or indices beyond the reduction-axis length) leaves `out` empty; the
    /// kernels never index out of bounds.
    fn reduce_range_into(
        &self,
        axis: GridAxis,
        op: ReductionOp,
        min_index: usize,
        max_index: usize,
        out: &mut Vec<f64>,
    );
}

impl RangeReduction for Array2<f64> {
    fn reduce_range_into(
        &self,
        axis: GridAxis,
        op: ReductionOp,
        min_index: usize,
        max_index: usize,
        out: &mut Vec<f64>,
    ) {
        out.clear();
        let len = self.shape()[axis.index()];

        // Slice only needs a valid lower index; the aggregating kernels need
        // the whole range to be inside the axis.
        let valid = match op {
            ReductionOp::Slice => min_index < len,
            _ => min_index <= max_index && max_index < len,
        };
        if !valid {
            return;
        }

        match op {
            ReductionOp::Slice => super::kernels::slice_into(self, axis, min_index, out),
            ReductionOp::Min => super::kernels::min_into(self, axis, min_index, max_index, out),
            ReductionOp::Max => super::kernels::max_into(self, axis, min_index, max_index, out),
            ReductionOp::Mean => super::kernels::mean_into(self, axis, min_index, max_index, out),
            ReductionOp::Integral => {
                super::kernels::integral_into(self, axis, min_index, max_index, out);
            }
        }
    }
}
