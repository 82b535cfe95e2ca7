//! Kernel implementations for range reductions
//!
//! Each kernel consumes a fixed inclusive index range along the reduction axis
//! and produces one scalar per surviving-axis index. Callers are responsible
//! for validating the range first (see
//! [`RangeReduction`](super::operations::RangeReduction)); kernels assume the
//! indices are inside the field.
//!
//! NaN policy per kernel:
//!
//! - `min`/`max`: non-finite values are skipped; a lane with no finite value
//!   yields NaN.
//! - `mean`: non-finite values contribute 0 to the sum, while the divisor
//!   stays the full range length. This is deliberate: the mean of a partially
//!   NaN lane is the sum of its finite values over the number of selected
//!   indices, not over the finite count.
//! - `integral`: plain summation, so a NaN in the range propagates to the
//!   output lane.

use crate::source::GridAxis;
use ndarray::{s, Array2, ArrayView2, Axis};
use rayon::prelude::*;

fn range_view(field: &Array2<f64>, axis: GridAxis, lo: usize, hi: usize) -> ArrayView2<'_, f64> {
    match axis {
        GridAxis::X => field.slice(s![lo..=hi, ..]),
        GridAxis::Y => field.slice(s![.., lo..=hi]),
    }
}

/// Copies the single row/column at `index` along the reduction axis
pub fn slice_into(field: &Array2<f64>, axis: GridAxis, index: usize, out: &mut Vec<f64>) {
    let lane = match axis {
        GridAxis::X => field.row(index),
        GridAxis::Y => field.column(index),
    };
    out.extend(lane.iter());
}

/// Minimum of finite values per surviving-axis index
pub fn min_into(field: &Array2<f64>, axis: GridAxis, lo: usize, hi: usize, out: &mut Vec<f64>) {
    let view = range_view(field, axis, lo, hi);
    let result = view.fold_axis(Axis(axis.index()), f64::INFINITY, |&acc, &x| {
        if x.is_finite() {
            acc.min(x)
        } else {
            acc // Skip NaN and infinite values
        }
    });
    // Untouched INFINITY seeds mark lanes with no valid values
    out.extend(
        result
            .iter()
            .map(|&x| if x == f64::INFINITY { f64::NAN } else { x }),
    );
}

/// Maximum of finite values per surviving-axis index
pub fn max_into(field: &Array2<f64>, axis: GridAxis, lo: usize, hi: usize, out: &mut Vec<f64>) {
    let view = range_view(field, axis, lo, hi);
    let result = view.fold_axis(Axis(axis.index()), f64::NEG_INFINITY, |&acc, &x| {
        if x.is_finite() {
            acc.max(x)
        } else {
            acc // Skip NaN and infinite values
        }
    });
    out.extend(
        result
            .iter()
            .map(|&x| if x == f64::NEG_INFINITY { f64::NAN } else { x }),
    );
}

/// Sum of finite values divided by the full range length, computed in
/// parallel over the surviving-axis lanes
pub fn mean_into(field: &Array2<f64>, axis: GridAxis, lo: usize, hi: usize, out: &mut Vec<f64>) {
    let view = range_view(field, axis, lo, hi);
    let surviving = view.shape()[axis.other().index()];
    // Fixed divisor: number of selected indices, not the finite-value count
    let count = (hi - lo + 1) as f64;

    out.par_extend((0..surviving).into_par_iter().map(|j| {
        let lane = match axis {
            GridAxis::X => view.column(j),
            GridAxis::Y => view.row(j),
        };
        let sum: f64 = lane.iter().copied().filter(|v| v.is_finite()).sum();
        sum / count
    }));
}

/// Plain running sum over the range per surviving-axis index
pub fn integral_into(field: &Array2<f64>, axis: GridAxis, lo: usize, hi: usize, out: &mut Vec<f64>) {
    let view = range_view(field, axis, lo, hi);
    let result = view.fold_axis(Axis(axis.index()), 0.0, |&acc, &x| acc + x);
    out.extend(result.iter());
}
