//! Error types for canvas operations.

use crate::layout::Region;
use std::fmt;
use thiserror::Error;

/// Errors reported by [`Canvas`](super::Canvas) operations.
///
/// Every error leaves the canvas exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// A cell position lies outside the canvas.
    #[error("{at} is outside a {num_rows}x{num_cols} canvas")]
    OutOfBounds {
        /// The attempted position.
        at: Position,
        /// Canvas row count.
        num_rows: usize,
        /// Canvas column count.
        num_cols: usize,
    },

    /// A region has a corner outside the canvas.
    #[error("region {region:?} does not fit in a {num_rows}x{num_cols} canvas")]
    InvalidRegion {
        /// The rejected region.
        region: Region,
        /// Canvas row count.
        num_rows: usize,
        /// Canvas column count.
        num_cols: usize,
    },

    /// Fewer bytes than cells were supplied to deserialize.
    #[error("truncated input: expected {expected} bytes, got {actual}")]
    TruncatedInput {
        /// Bytes required (`num_rows * num_cols`).
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

impl CanvasError {
    /// Whether this is a coordinate or index bounds failure.
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

/// How an out-of-bounds cell was addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// A `(row, col)` coordinate.
    Cell {
        /// The attempted row.
        row: usize,
        /// The attempted column.
        col: usize,
    },
    /// A row-major flattened index.
    Index(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell { row, col } => write!(f, "cell ({row}, {col})"),
            Self::Index(index) => write!(f, "index {index}"),
        }
    }
}

/// Result type alias for canvas operations.
pub type Result<T> = std::result::Result<T, CanvasError>;
