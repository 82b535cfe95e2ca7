//! Centralized error handling for grid_reduce
//!
//! This module provides structured error types to replace the generic `Box<dyn Error>`
//! pattern, enabling better error context and type safety.

use std::fmt;

/// Main error type for grid_reduce operations
#[derive(Debug)]
pub enum GridReduceError {
    /// Grid shape or construction errors
    InvalidGrid { message: String },

    /// Index outside the valid range of an axis or field
    IndexOutOfBounds { index: usize, len: usize },

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Generic error for ad-hoc failures
    Generic(String),
}

impl fmt::Display for GridReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridReduceError::InvalidGrid { message } => write!(f, "Invalid grid: {}", message),
            GridReduceError::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} out of bounds for length {}", index, len)
            }
            GridReduceError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            GridReduceError::ArrayError(e) => write!(f, "Array error: {}", e),
            GridReduceError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for GridReduceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridReduceError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ndarray::ShapeError> for GridReduceError {
    fn from(error: ndarray::ShapeError) -> Self {
        GridReduceError::ArrayError(error)
    }
}

impl From<String> for GridReduceError {
    fn from(error: String) -> Self {
        GridReduceError::Generic(error)
    }
}

impl From<&str> for GridReduceError {
    fn from(error: &str) -> Self {
        GridReduceError::Generic(error.to_string())
    }
}

/// Result type alias for grid_reduce operations
pub type Result<T> = std::result::Result<T, GridReduceError>;
