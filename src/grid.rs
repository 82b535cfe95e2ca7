//! In-memory rectangular grid dataset
//!
//! This module provides [`DoubleGrid`], a concrete [`GridSource`] backed by two
//! coordinate vectors and an `ndarray` scalar field, plus [`GridBuilder`] for
//! constructing grids from per-row value lists.
//!
//! Mutation goes through `&self` methods with interior mutability so that a
//! grid shared behind an `Rc` can be updated while reducers hold references to
//! it. Every mutation bumps the generation counter that downstream consumers
//! poll for staleness.

use crate::errors::{GridReduceError, Result};
use crate::source::{GridAxis, GridSource};
use ndarray::Array2;
use std::cell::{Cell, RefCell};

#[derive(Debug)]
struct GridData {
    x: Vec<f64>,
    y: Vec<f64>,
    field: Array2<f64>,
}

/// A rectangular grid of `f64` scalar values over two coordinate axes.
///
/// The field has shape `(x.len(), y.len())`; rows follow axis-0 (`X`).
/// All mutating methods take `&self` and bump the generation counter.
#[derive(Debug)]
pub struct DoubleGrid {
    label: String,
    data: RefCell<GridData>,
    generation: Cell<u64>,
}

impl DoubleGrid {
    /// Create a new grid from coordinate vectors and a scalar field.
    ///
    /// # Errors
    ///
    /// Returns [`GridReduceError::InvalidGrid`] if the field shape does not
    /// match the axis lengths.
    pub fn new(label: &str, x: Vec<f64>, y: Vec<f64>, field: Array2<f64>) -> Result<Self> {
        if field.dim() != (x.len(), y.len()) {
            return Err(GridReduceError::InvalidGrid {
                message: format!(
                    "field shape {:?} does not match axis lengths ({}, {})",
                    field.dim(),
                    x.len(),
                    y.len()
                ),
            });
        }
        Ok(Self {
            label: label.to_string(),
            data: RefCell::new(GridData { x, y, field }),
            generation: Cell::new(0),
        })
    }

    /// Grid shape as `(axis_len(X), axis_len(Y))`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.data.borrow().field.dim()
    }

    /// Set a single scalar value and signal the change.
    ///
    /// # Errors
    ///
    /// Returns [`GridReduceError::IndexOutOfBounds`] if either index is
    /// outside the grid.
    pub fn set_value(&self, i0: usize, i1: usize, value: f64) -> Result<()> {
        {
            let mut data = self.data.borrow_mut();
            let (n0, n1) = data.field.dim();
            if i0 >= n0 {
                return Err(GridReduceError::IndexOutOfBounds { index: i0, len: n0 });
            }
            if i1 >= n1 {
                return Err(GridReduceError::IndexOutOfBounds { index: i1, len: n1 });
            }
            data.field[[i0, i1]] = value;
        }
        self.fire_invalidated();
        Ok(())
    }

    /// Replace the whole scalar field and signal the change.
    ///
    /// # Errors
    ///
    /// Returns [`GridReduceError::InvalidGrid`] if the new field shape does
    /// not match the current axis lengths.
    pub fn set_field(&self, field: Array2<f64>) -> Result<()> {
        {
            let mut data = self.data.borrow_mut();
            if field.dim() != (data.x.len(), data.y.len()) {
                return Err(GridReduceError::InvalidGrid {
                    message: format!(
                        "field shape {:?} does not match axis lengths ({}, {})",
                        field.dim(),
                        data.x.len(),
                        data.y.len()
                    ),
                });
            }
            data.field = field;
        }
        self.fire_invalidated();
        Ok(())
    }

    /// Replace the coordinate values of one axis and signal the change.
    ///
    /// # Errors
    ///
    /// Returns [`GridReduceError::InvalidGrid`] if the new axis length does
    /// not match the field.
    pub fn set_axis_values(&self, axis: GridAxis, values: Vec<f64>) -> Result<()> {
        {
            let mut data = self.data.borrow_mut();
            let expected = data.field.dim();
            let expected = match axis {
                GridAxis::X => expected.0,
                GridAxis::Y => expected.1,
            };
            if values.len() != expected {
                return Err(GridReduceError::InvalidGrid {
                    message: format!(
                        "{}-axis length {} does not match field length {}",
                        axis.as_str(),
                        values.len(),
                        expected
                    ),
                });
            }
            match axis {
                GridAxis::X => data.x = values,
                GridAxis::Y => data.y = values,
            }
        }
        self.fire_invalidated();
        Ok(())
    }

    /// Bump the generation counter without changing any data.
    ///
    /// Redundant calls between two downstream reads coalesce into a single
    /// recomputation on the consumer side.
    pub fn fire_invalidated(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}

impl GridSource for DoubleGrid {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn axis_len(&self, axis: GridAxis) -> usize {
        let data = self.data.borrow();
        match axis {
            GridAxis::X => data.x.len(),
            GridAxis::Y => data.y.len(),
        }
    }

    fn axis_values(&self, axis: GridAxis) -> Vec<f64> {
        let data = self.data.borrow();
        match axis {
            GridAxis::X => data.x.clone(),
            GridAxis::Y => data.y.clone(),
        }
    }

    fn value(&self, i0: usize, i1: usize) -> f64 {
        self.data.borrow().field[[i0, i1]]
    }

    fn field(&self) -> Array2<f64> {
        self.data.borrow().field.clone()
    }

    fn generation(&self) -> u64 {
        self.generation.get()
    }
}

/// Fluent builder for [`DoubleGrid`] instances.
///
/// Field values are supplied row by row along axis-0; every row must have
/// one value per axis-1 coordinate.
#[derive(Debug, Default)]
pub struct GridBuilder {
    label: String,
    x: Option<Vec<f64>>,
    y: Option<Vec<f64>>,
    rows: Option<Vec<Vec<f64>>>,
}

impl GridBuilder {
    /// Start a builder for a grid with the given label
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }

    /// Coordinate values along axis-0
    #[must_use]
    pub fn x_values(mut self, values: Vec<f64>) -> Self {
        self.x = Some(values);
        self
    }

    /// Coordinate values along axis-1
    #[must_use]
    pub fn y_values(mut self, values: Vec<f64>) -> Self {
        self.y = Some(values);
        self
    }

    /// Scalar field values, one row per axis-0 coordinate
    #[must_use]
    pub fn field_rows(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Build the grid, validating rectangularity.
    ///
    /// # Errors
    ///
    /// Returns [`GridReduceError::InvalidGrid`] if an axis is missing, the
    /// number of rows does not match the x-axis, or any row length does not
    /// match the y-axis.
    pub fn build(self) -> Result<DoubleGrid> {
        let x = self.x.ok_or_else(|| GridReduceError::InvalidGrid {
            message: "missing x-axis values".to_string(),
        })?;
        let y = self.y.ok_or_else(|| GridReduceError::InvalidGrid {
            message: "missing y-axis values".to_string(),
        })?;
        let rows = self.rows.unwrap_or_default();

        if rows.len() != x.len() {
            return Err(GridReduceError::InvalidGrid {
                message: format!("expected {} field rows, got {}", x.len(), rows.len()),
            });
        }
        let mut flat = Vec::with_capacity(x.len() * y.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != y.len() {
                return Err(GridReduceError::InvalidGrid {
                    message: format!(
                        "field row {} has {} values, expected {}",
                        i,
                        row.len(),
                        y.len()
                    ),
                });
            }
            flat.extend_from_slice(row);
        }
        let field = Array2::from_shape_vec((x.len(), y.len()), flat)?;
        DoubleGrid::new(&self.label, x, y, field)
    }
}
