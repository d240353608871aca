//! Error handling for texgrid
//!
//! This module provides a unified error type and result type for grid
//! mutations, value validation and table document loading.

use std::fmt;

/// Grid axis, used to report which dimension an operation refused to shrink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Table error type
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// Coordinate outside the current grid bounds
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Attempted to shrink the grid below 1x1
    MinimumSize { axis: Axis },
    /// Colour value that xcolor would not understand
    InvalidColor { value: String },
    /// Column width that is neither a TeX dimension nor a ratio
    InvalidDimension { value: String },
    /// Malformed table document
    InvalidDocument { message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "Cell ({}, {}) is outside the {}x{} grid",
                row, col, rows, cols
            ),
            TableError::MinimumSize { axis } => {
                write!(f, "Cannot delete the last remaining {}", axis)
            }
            TableError::InvalidColor { value } => write!(f, "Invalid color: '{}'", value),
            TableError::InvalidDimension { value } => {
                write!(f, "Invalid column width: '{}'", value)
            }
            TableError::InvalidDocument { message } => {
                write!(f, "Invalid table document: {}", message)
            }
            TableError::IoError { message } => write!(f, "IO error: {}", message),
        }
    }
}

impl std::error::Error for TableError {}

impl From<std::io::Error> for TableError {
    fn from(err: std::io::Error) -> Self {
        TableError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

// Convenience constructors for errors
impl TableError {
    pub fn out_of_bounds(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        TableError::IndexOutOfBounds {
            row,
            col,
            rows,
            cols,
        }
    }

    pub fn minimum_size(axis: Axis) -> Self {
        TableError::MinimumSize { axis }
    }

    pub fn invalid_color(value: impl Into<String>) -> Self {
        TableError::InvalidColor {
            value: value.into(),
        }
    }

    pub fn invalid_dimension(value: impl Into<String>) -> Self {
        TableError::InvalidDimension {
            value: value.into(),
        }
    }

    pub fn invalid_document(message: impl Into<String>) -> Self {
        TableError::InvalidDocument {
            message: message.into(),
        }
    }

    /// Whether the error is a refused destructive operation rather than a
    /// contract violation by the caller
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TableError::IndexOutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_display() {
        let err = TableError::out_of_bounds(5, 1, 4, 4);
        let msg = err.to_string();
        assert!(msg.contains("(5, 1)"));
        assert!(msg.contains("4x4"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_minimum_size_display() {
        let err = TableError::minimum_size(Axis::Column);
        assert_eq!(err.to_string(), "Cannot delete the last remaining column");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let err: TableError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
