//! Error types for shape and dimension contract violations.

use thiserror::Error;

/// Errors produced when an operation's shape contract is violated.
///
/// Every variant describes a *caller* mistake: incompatible dimensions, a square-only operation
/// applied to a rectangular matrix, or degenerate construction input. Numerical degeneracy (a
/// singular matrix) is deliberately *not* represented here — it is an expected outcome, reported
/// as `None` by [`MatBuf::invert`][crate::MatBuf::invert].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ShapeError {
    /// A constructor received no rows, no columns, or an empty diagonal.
    #[error("matrix must have at least 1 row and 1 column")]
    Empty,

    /// Row (or column) arrays of differing lengths were supplied at construction.
    #[error("array {index} has length {len}, expected {expected}")]
    Ragged {
        /// Index of the offending row/column array.
        index: usize,
        /// Its length.
        len: usize,
        /// The length established by the first array.
        expected: usize,
    },

    /// A flat buffer cannot hold the requested matrix.
    #[error("buffer of length {len} cannot hold {rows}x{cols} components at offset {offset}")]
    Buffer {
        rows: usize,
        cols: usize,
        offset: usize,
        len: usize,
    },

    /// Binary operation on matrices of incompatible dimensions.
    #[error("operand dimensions {lhs_rows}x{lhs_cols} and {rhs_rows}x{rhs_cols} are incompatible")]
    Mismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    /// Square-only operation applied to a non-square matrix.
    #[error("operation requires a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}
