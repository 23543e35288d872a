//! Error types for container operations

use thiserror::Error;

use crate::array::ArrayMode;
use crate::value::Value;

/// Main error type for array and value operations.
///
/// Invalid arguments always surface as one of these variants; the VM layer
/// turns them into script-level error messages. Violations of the engine's
/// own structural invariants panic instead, since they indicate a bug in
/// this crate rather than bad input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// A key or value had the wrong type for the operation
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// What the operation required
        expected: &'static str,
        /// Tag of the value actually supplied
        got: String,
    },

    /// An integer index fell outside the valid range
    #[error("Index {index} out of bounds (length {len})")]
    IndexOutOfBounds {
        /// The offending index
        index: i64,
        /// Container length at the time of the call
        len: usize,
    },

    /// A packed range was inverted or fell entirely outside the container
    #[error("Invalid range {start}..={end}")]
    InvalidRange {
        /// Requested start index
        start: i64,
        /// Requested end index (inclusive)
        end: i64,
    },

    /// The operation only applies to the other storage mode
    #[error("Operation requires a {expected} array")]
    ModeMismatch {
        /// Storage mode the operation requires
        expected: ArrayMode,
    },
}

impl ArrayError {
    pub(crate) fn type_error(expected: &'static str, got: &Value) -> Self {
        ArrayError::TypeError {
            expected,
            got: got.tag().to_string(),
        }
    }
}

/// Result type alias for container operations
pub type Result<T> = std::result::Result<T, ArrayError>;
