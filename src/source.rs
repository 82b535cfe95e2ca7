//! Read-only grid data source abstraction
//!
//! This module provides the trait-based abstraction that decouples the reduction
//! engine from any concrete data container. A source is a rectangular 2D grid:
//! two ordered coordinate axes plus a scalar field sampled at every index pair.

use ndarray::Array2;

/// The two coordinate axes of a grid source.
///
/// `X` is axis-0 (the row index of the scalar field), `Y` is axis-1
/// (the column index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Axis-0, indexing rows of the scalar field
    X,
    /// Axis-1, indexing columns of the scalar field
    Y,
}

impl GridAxis {
    /// The `ndarray` axis index corresponding to this grid axis
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }

    /// The other axis, i.e. the one surviving a reduction over `self`
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Get the string representation of the axis
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// Read access to a rectangular 2D grid with a scalar field.
///
/// Implementations must be rectangular: every `(i0, i1)` index pair within
/// `axis_len(X) x axis_len(Y)` has a defined scalar value. Non-finite (NaN)
/// scalar values are permitted; reduction kernels treat them per their
/// documented policy.
///
/// Accessors returning owned data (`axis_values`, `field`) hand out
/// copy-on-read snapshots, so callers can run reductions without holding any
/// borrow into the source's internal storage.
pub trait GridSource {
    /// Human-readable label of the source, used in diagnostics
    fn label(&self) -> String;

    /// Number of coordinate values along the given axis
    fn axis_len(&self, axis: GridAxis) -> usize;

    /// Snapshot of the ordered coordinate values along the given axis.
    ///
    /// Coordinates are generally monotonic but not required to be strictly
    /// increasing; index lookup over non-monotonic coordinates is undefined.
    fn axis_values(&self, axis: GridAxis) -> Vec<f64>;

    /// Scalar field value at `(i0, i1)`, `i0` along [`GridAxis::X`]
    fn value(&self, i0: usize, i1: usize) -> f64;

    /// Snapshot of the full scalar field, shape `(axis_len(X), axis_len(Y))`
    fn field(&self) -> Array2<f64>;

    /// Monotonically increasing change counter.
    ///
    /// Every mutation or explicit invalidation of the source bumps this
    /// counter. Downstream consumers compare it against the last value they
    /// observed to detect staleness; redundant bumps between two reads
    /// coalesce into a single recomputation.
    fn generation(&self) -> u64;
}
