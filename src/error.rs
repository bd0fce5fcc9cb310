use thiserror::Error;

use crate::solver::Rect;

pub type SolverResult<T> = Result<T, SolverError>;

/// Configuration errors raised before any field is touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("invalid grid dimension {width}x{height}: both must be positive")]
    InvalidGridDimension { width: usize, height: usize },

    #[error("field {name} has {actual} cells, expected {expected}")]
    FieldSizeMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid rectangle {rect}: {reason}")]
    InvalidRectangle { rect: Rect, reason: &'static str },

    #[error("rectangle {rect} needs a neighbour outside the grid: {reason}")]
    OutOfRangeAccess { rect: Rect, reason: &'static str },
}
