//! Comprehensive unit tests for grid_reduce modules
//!
//! These tests provide coverage of the building blocks around the reduction
//! view: errors, the grid container and builder, the scratch-buffer cache,
//! the kernel trait and the parallel configuration.

use grid_reduce::{
    cache::DoubleArrayCache,
    errors::GridReduceError,
    grid::{DoubleGrid, GridBuilder},
    parallel::{get_parallel_info, ParallelConfig},
    reduction::{RangeReduction, ReductionOp},
    source::{GridAxis, GridSource},
};
use ndarray::{arr2, Array2};

#[test]
fn test_error_types() {
    let grid_err = GridReduceError::InvalidGrid {
        message: "ragged row".to_string(),
    };
    assert!(format!("{}", grid_err).contains("Invalid grid: ragged row"));

    let bounds_err = GridReduceError::IndexOutOfBounds { index: 5, len: 3 };
    assert!(format!("{}", bounds_err).contains("Index 5 out of bounds for length 3"));

    let pool_err = GridReduceError::ThreadPoolError("busy".to_string());
    assert!(format!("{}", pool_err).contains("Thread pool error"));

    // Test generic error and conversions
    let generic_err: GridReduceError = "Test error".into();
    assert_eq!(format!("{}", generic_err), "Test error");
    let generic_err: GridReduceError = String::from("owned").into();
    assert_eq!(format!("{}", generic_err), "owned");
}

#[test]
fn test_grid_axis() {
    assert_eq!(0, GridAxis::X.index());
    assert_eq!(1, GridAxis::Y.index());
    assert_eq!(GridAxis::Y, GridAxis::X.other());
    assert_eq!(GridAxis::X, GridAxis::Y.other());
    assert_eq!("x", GridAxis::X.as_str());
    assert_eq!("y", GridAxis::Y.as_str());
}

#[test]
fn test_reduction_op() {
    assert_eq!(ReductionOp::Mean, ReductionOp::Mean);
    assert_ne!(ReductionOp::Mean, ReductionOp::Integral);
    assert_eq!("slice", ReductionOp::Slice.as_str());
    assert_eq!("minimum", ReductionOp::Min.as_str());
    assert_eq!("maximum", ReductionOp::Max.as_str());
    assert_eq!("mean", ReductionOp::Mean.as_str());
    assert_eq!("integral", ReductionOp::Integral.as_str());
}

#[test]
fn test_grid_builder_validation() {
    let missing_axis = GridBuilder::new("test")
        .y_values(vec![1.0])
        .field_rows(vec![vec![1.0]])
        .build();
    assert!(matches!(
        missing_axis,
        Err(GridReduceError::InvalidGrid { .. })
    ));

    let wrong_row_count = GridBuilder::new("test")
        .x_values(vec![1.0, 2.0])
        .y_values(vec![6.0])
        .field_rows(vec![vec![1.0]])
        .build();
    assert!(matches!(
        wrong_row_count,
        Err(GridReduceError::InvalidGrid { .. })
    ));

    let ragged = GridBuilder::new("test")
        .x_values(vec![1.0, 2.0])
        .y_values(vec![6.0, 7.0])
        .field_rows(vec![vec![1.0, 2.0], vec![3.0]])
        .build();
    assert!(matches!(ragged, Err(GridReduceError::InvalidGrid { .. })));

    let ok = GridBuilder::new("test")
        .x_values(vec![1.0, 2.0])
        .y_values(vec![6.0, 7.0])
        .field_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
        .build();
    assert!(ok.is_ok());
}

#[test]
fn test_double_grid_accessors() {
    let grid = GridBuilder::new("accessors")
        .x_values(vec![1.0, 2.0])
        .y_values(vec![6.0, 7.0, 8.0])
        .field_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
        .build()
        .expect("valid grid");

    assert_eq!("accessors", grid.label());
    assert_eq!((2, 3), grid.shape());
    assert_eq!(2, grid.axis_len(GridAxis::X));
    assert_eq!(3, grid.axis_len(GridAxis::Y));
    assert_eq!(vec![1.0, 2.0], grid.axis_values(GridAxis::X));
    assert_eq!(vec![6.0, 7.0, 8.0], grid.axis_values(GridAxis::Y));
    assert_eq!(5.0, grid.value(1, 1));
    assert_eq!(arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]), grid.field());
}

#[test]
fn test_double_grid_mutation_and_generation() {
    let grid = GridBuilder::new("mutable")
        .x_values(vec![1.0, 2.0])
        .y_values(vec![6.0, 7.0])
        .field_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
        .build()
        .expect("valid grid");

    let initial = grid.generation();
    grid.set_value(0, 1, 20.0).expect("in-bounds write");
    assert_eq!(20.0, grid.value(0, 1));
    assert!(grid.generation() > initial);

    assert!(matches!(
        grid.set_value(2, 0, 0.0),
        Err(GridReduceError::IndexOutOfBounds { index: 2, len: 2 })
    ));

    let before = grid.generation();
    grid.fire_invalidated();
    grid.fire_invalidated();
    assert_eq!(before + 2, grid.generation());

    grid.set_field(arr2(&[[9.0, 9.0], [9.0, 9.0]]))
        .expect("matching shape");
    assert_eq!(9.0, grid.value(1, 1));
    assert!(matches!(
        grid.set_field(Array2::zeros((3, 2))),
        Err(GridReduceError::InvalidGrid { .. })
    ));

    grid.set_axis_values(GridAxis::Y, vec![10.0, 11.0])
        .expect("matching length");
    assert_eq!(vec![10.0, 11.0], grid.axis_values(GridAxis::Y));
    assert!(matches!(
        grid.set_axis_values(GridAxis::Y, vec![1.0]),
        Err(GridReduceError::InvalidGrid { .. })
    ));
}

#[test]
fn test_double_grid_shape_mismatch() {
    let result = DoubleGrid::new("bad", vec![1.0, 2.0], vec![6.0], Array2::zeros((2, 2)));
    assert!(matches!(result, Err(GridReduceError::InvalidGrid { .. })));
}

#[test]
fn test_range_reduction_trait() {
    let field = arr2(&[[1.0, 2.0, 3.0], [6.0, 5.0, 4.0], [9.0, 8.0, 7.0]]);
    let mut out = Vec::new();

    field.reduce_range_into(GridAxis::X, ReductionOp::Integral, 0, 2, &mut out);
    assert_eq!(vec![16.0, 15.0, 14.0], out);

    field.reduce_range_into(GridAxis::Y, ReductionOp::Max, 0, 1, &mut out);
    assert_eq!(vec![2.0, 6.0, 9.0], out);

    field.reduce_range_into(GridAxis::X, ReductionOp::Min, 1, 2, &mut out);
    assert_eq!(vec![6.0, 5.0, 4.0], out);

    field.reduce_range_into(GridAxis::Y, ReductionOp::Slice, 2, 2, &mut out);
    assert_eq!(vec![3.0, 4.0, 7.0], out);

    // Degenerate ranges leave the output empty instead of indexing out of
    // bounds
    field.reduce_range_into(GridAxis::X, ReductionOp::Integral, 2, 0, &mut out);
    assert!(out.is_empty());
    field.reduce_range_into(GridAxis::X, ReductionOp::Mean, 0, 3, &mut out);
    assert!(out.is_empty());
    field.reduce_range_into(GridAxis::Y, ReductionOp::Slice, 3, 3, &mut out);
    assert!(out.is_empty());
}

#[test]
fn test_double_array_cache() {
    let mut cache = DoubleArrayCache::new(2);
    assert_eq!(2, cache.purposes());

    {
        let buf = cache.array(0, 4);
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 4);
        buf.extend_from_slice(&[1.0, 2.0, 3.0, 4.0]);
    }
    assert_eq!(&[1.0, 2.0, 3.0, 4.0], cache.peek(0));
    assert!(cache.peek(1).is_empty());

    // A new request for the same purpose starts from a cleared buffer
    {
        let buf = cache.array(0, 2);
        assert!(buf.is_empty());
        buf.extend_from_slice(&[5.0, 6.0]);
    }
    assert_eq!(&[5.0, 6.0], cache.peek(0));

    cache.trim();
    assert_eq!(&[5.0, 6.0], cache.peek(0));
    assert!(cache.peek(0).len() <= 2);
}

#[test]
fn test_parallel_config() {
    // Test default configuration
    let default_config = ParallelConfig::new_default();
    assert!(default_config.num_threads.is_none());

    // Test with specific threads
    let config_4 = ParallelConfig::with_threads(4);
    assert_eq!(config_4.num_threads, Some(4));

    // Test all cores configuration
    let all_cores_config = ParallelConfig::all_cores();
    assert!(all_cores_config.num_threads.is_some());
    assert!(all_cores_config.num_threads.unwrap() > 0);

    let explicit = ParallelConfig::new(Some(2));
    assert_eq!(explicit.num_threads, Some(2));

    // Test current threads
    let current = default_config.current_threads();
    assert!(current > 0);

    // Default configuration leaves the global pool untouched
    assert!(default_config.setup_global_pool().is_ok());
}

#[test]
fn test_parallel_info() {
    let info = get_parallel_info();
    assert!(info.current_threads > 0);
    assert!(info.available_cores > 0);
    assert!(info.available_parallelism > 0);

    // Test info printing (doesn't panic)
    info.print_info();
}
