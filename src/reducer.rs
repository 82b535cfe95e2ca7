//! Dimensional-reduction view over a grid source
//!
//! [`GridReducer`] binds to one [`GridSource`] and collapses one of its axes
//! over a scalar coordinate range, exposing the result as a 2D dataset: the
//! surviving axis's coordinates plus one reduced value per coordinate.
//!
//! Range setters and source invalidations only mark the cached output stale;
//! the actual recomputation runs lazily on the next read, so repeated
//! mutations between two reads coalesce into a single pass over the grid.
//! After each recomputation the reducer notifies its own listeners exactly
//! once.

use crate::cache::DoubleArrayCache;
use crate::reduction::{RangeReduction, ReductionOp};
use crate::source::{GridAxis, GridSource};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// Scratch-buffer purposes
const OUTPUT: usize = 0;
const AXIS_COORDS: usize = 1;

/// First index `i` with `coords[i] >= value`, or the last index if none.
///
/// Assumes monotonically non-decreasing coordinates; lookup over
/// non-monotonic coordinates is undefined.
fn find_min_index(coords: &[f64], value: f64) -> usize {
    let i = coords.partition_point(|&a| a < value);
    if i < coords.len() {
        i
    } else {
        coords.len().saturating_sub(1)
    }
}

/// Last index `i` with `coords[i] <= value`, or 0 if none
fn find_max_index(coords: &[f64], value: f64) -> usize {
    coords.partition_point(|&a| a <= value).saturating_sub(1)
}

/// Reduces a 3D grid dataset to a 2D view along one axis.
///
/// The reduction axis and operator are fixed for the reducer's lifetime; the
/// scalar range along the reduction axis is mutable. The source is shared and
/// never mutated by the reducer.
///
/// Boundary coordinates count as inside the range. A transiently inverted
/// range (`min > max`) is accepted and resolves to an empty output until the
/// other bound is corrected.
pub struct GridReducer<S: GridSource> {
    source: Rc<S>,
    axis: GridAxis,
    op: ReductionOp,
    range_min: Cell<f64>,
    range_max: Cell<f64>,
    min_index: Cell<usize>,
    max_index: Cell<usize>,
    stale: Cell<bool>,
    seen_generation: Cell<u64>,
    buffers: RefCell<DoubleArrayCache>,
    listeners: RefCell<Vec<Box<dyn FnMut()>>>,
    warnings: RefCell<Vec<String>>,
}

impl<S: GridSource> GridReducer<S> {
    /// Create a reducer that collapses `axis` of `source` with `op`.
    ///
    /// The initial range is unbounded, selecting the full axis. A source that
    /// is not a valid rectangular grid (an empty axis) is not an error:
    /// a diagnostic message is recorded in [`warnings`](Self::warnings) and
    /// the output stays empty until the source becomes valid.
    pub fn new(source: Rc<S>, axis: GridAxis, op: ReductionOp) -> Self {
        let generation = source.generation();
        let reducer = Self {
            source,
            axis,
            op,
            range_min: Cell::new(f64::NEG_INFINITY),
            range_max: Cell::new(f64::INFINITY),
            min_index: Cell::new(0),
            max_index: Cell::new(0),
            stale: Cell::new(true),
            seen_generation: Cell::new(generation),
            buffers: RefCell::new(DoubleArrayCache::new(2)),
            listeners: RefCell::new(Vec::new()),
            warnings: RefCell::new(Vec::new()),
        };
        if !reducer.source_is_valid() {
            reducer.warn_invalid_source();
        }
        reducer.update_indices();
        reducer
    }

    fn source_is_valid(&self) -> bool {
        self.source.axis_len(GridAxis::X) >= 1 && self.source.axis_len(GridAxis::Y) >= 1
    }

    fn warn_invalid_source(&self) {
        self.warn(format!(
            "input data set '{}' is not a 3-dim grid data set",
            self.source.label()
        ));
    }

    fn warn(&self, message: String) {
        let mut warnings = self.warnings.borrow_mut();
        if warnings.last() != Some(&message) {
            warnings.push(message);
        }
    }

    /// Re-derive the inclusive index range from the current scalar bounds
    fn update_indices(&self) {
        let coords = self.source.axis_values(self.axis);
        self.min_index.set(find_min_index(&coords, self.range_min.get()));
        self.max_index.set(find_max_index(&coords, self.range_max.get()));
    }

    /// Set the lower scalar bound along the reduction axis
    pub fn set_min_value(&self, value: f64) {
        self.range_min.set(value);
        self.update_indices();
        self.stale.set(true);
    }

    /// Set the upper scalar bound along the reduction axis
    pub fn set_max_value(&self, value: f64) {
        self.range_max.set(value);
        self.update_indices();
        self.stale.set(true);
    }

    /// Set both scalar bounds along the reduction axis
    pub fn set_range(&self, min: f64, max: f64) {
        self.range_min.set(min);
        self.range_max.set(max);
        self.update_indices();
        self.stale.set(true);
    }

    /// Lower scalar bound
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.range_min.get()
    }

    /// Upper scalar bound
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.range_max.get()
    }

    /// Lower inclusive index along the reduction axis
    #[must_use]
    pub fn min_index(&self) -> usize {
        self.min_index.get()
    }

    /// Upper inclusive index along the reduction axis
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.max_index.get()
    }

    /// The reduction operator, fixed at construction
    #[must_use]
    pub fn reduction_op(&self) -> ReductionOp {
        self.op
    }

    /// The collapsed axis, fixed at construction
    #[must_use]
    pub fn reduction_axis(&self) -> GridAxis {
        self.axis
    }

    /// The shared source dataset
    #[must_use]
    pub fn source(&self) -> &Rc<S> {
        &self.source
    }

    /// Diagnostics for non-fatal input problems, in occurrence order
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    /// Register a listener invoked after every recomputation of the output
    pub fn on_invalidated(&self, listener: impl FnMut() + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Recompute now if stale, instead of waiting for the next read
    pub fn refresh(&self) {
        self.ensure_fresh();
    }

    /// Release scratch capacity beyond what the last recomputation needed
    pub fn trim_cache(&self) {
        self.buffers.borrow_mut().trim();
    }

    /// Number of points in the reduced output (the surviving axis's length,
    /// or 0 for an empty selected range)
    #[must_use]
    pub fn len(&self) -> usize {
        self.ensure_fresh();
        self.buffers.borrow().peek(OUTPUT).len()
    }

    /// Whether the reduced output is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the reduced values, one per surviving-axis index.
    ///
    /// Triggers lazy recomputation if the output is stale.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.ensure_fresh();
        self.buffers.borrow().peek(OUTPUT).to_vec()
    }

    /// Snapshot of the surviving axis's coordinate values
    #[must_use]
    pub fn axis_values(&self) -> Vec<f64> {
        self.ensure_fresh();
        self.buffers.borrow().peek(AXIS_COORDS).to_vec()
    }

    /// Reduced value at `index`, or NaN when out of bounds
    #[must_use]
    pub fn reduced_value(&self, index: usize) -> f64 {
        self.ensure_fresh();
        self.buffers
            .borrow()
            .peek(OUTPUT)
            .get(index)
            .copied()
            .unwrap_or(f64::NAN)
    }

    /// Surviving-axis coordinate at `index`, or NaN when out of bounds
    #[must_use]
    pub fn axis_value(&self, index: usize) -> f64 {
        self.ensure_fresh();
        self.buffers
            .borrow()
            .peek(AXIS_COORDS)
            .get(index)
            .copied()
            .unwrap_or(f64::NAN)
    }

    fn ensure_fresh(&self) {
        let generation = self.source.generation();
        if !self.stale.get() && self.seen_generation.get() == generation {
            return;
        }
        self.recompute();
        self.stale.set(false);
        self.seen_generation.set(generation);
        self.notify();
    }

    fn recompute(&self) {
        let mut buffers = self.buffers.borrow_mut();
        if !self.source_is_valid() {
            self.warn_invalid_source();
            buffers.array(OUTPUT, 0);
            buffers.array(AXIS_COORDS, 0);
            return;
        }

        // The scalar bounds are kept; the index range is re-derived against
        // the current axis data before every pass.
        self.update_indices();

        let surviving = self.axis.other();
        let surviving_len = self.source.axis_len(surviving);

        let coords = buffers.array(AXIS_COORDS, surviving_len);
        coords.extend(self.source.axis_values(surviving));

        let field = self.source.field();
        let out = buffers.array(OUTPUT, surviving_len);
        field.reduce_range_into(
            self.axis,
            self.op,
            self.min_index.get(),
            self.max_index.get(),
            out,
        );
    }

    fn notify(&self) {
        for listener in self.listeners.borrow_mut().iter_mut() {
            listener();
        }
    }
}
