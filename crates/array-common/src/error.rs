//! Error types for primitive-array operations.

use thiserror::Error;

use crate::ElementKind;

/// Result type alias using ArrayError.
pub type ArrayResult<T> = Result<T, ArrayError>;

/// Primary error type for array operations.
///
/// Values that fall outside a kind's range are not errors: they are stored as
/// the kind's missing-value sentinel. Every error below aborts the operation
/// and leaves the array as it was before the call.
#[derive(Debug, Error)]
pub enum ArrayError {
    // === Bounds Errors ===
    /// Read or write at an index at or past the current size.
    #[error("{kind} array index {index} is out of bounds (size = {size})")]
    IndexOutOfBounds {
        kind: ElementKind,
        index: usize,
        size: usize,
    },

    /// Insert position past the end of the array.
    #[error("{kind} array insert index {index} is out of bounds (size = {size})")]
    InsertOutOfBounds {
        kind: ElementKind,
        index: usize,
        size: usize,
    },

    // === Argument Errors ===
    /// A caller-supplied argument is out of its allowed range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation needs two arrays of the same kind.
    #[error("Kind mismatch: expected {expected}, got {actual}")]
    KindMismatch {
        expected: ElementKind,
        actual: ElementKind,
    },

    // === Capacity Errors ===
    /// Requested capacity is above the maximum array size.
    #[error("{kind} array capacity {requested} exceeds the maximum array size {max}")]
    CapacityExceeded {
        kind: ElementKind,
        requested: u64,
        max: usize,
    },

    /// The allocator refused the backing storage.
    #[error("Not enough memory to allocate {bytes} bytes for a {kind} array")]
    OutOfMemory { kind: ElementKind, bytes: u64 },

    // === Codec Errors ===
    /// Truncated or malformed stream, DAP or text input.
    #[error("Invalid encoded data: {0}")]
    InvalidData(String),

    /// Underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse grouping of [`ArrayError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Bounds,
    Argument,
    Capacity,
    Codec,
}

impl ArrayError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an InvalidData error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create an IndexOutOfBounds error.
    pub fn out_of_bounds(kind: ElementKind, index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { kind, index, size }
    }

    /// Get the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ArrayError::IndexOutOfBounds { .. } | ArrayError::InsertOutOfBounds { .. } => {
                ErrorCategory::Bounds
            }

            ArrayError::InvalidArgument(_) | ArrayError::KindMismatch { .. } => {
                ErrorCategory::Argument
            }

            ArrayError::CapacityExceeded { .. } | ArrayError::OutOfMemory { .. } => {
                ErrorCategory::Capacity
            }

            ArrayError::InvalidData(_) | ArrayError::Io(_) => ErrorCategory::Codec,
        }
    }
}

impl From<serde_json::Error> for ArrayError {
    fn from(err: serde_json::Error) -> Self {
        ArrayError::InvalidData(format!("JSON error: {}", err))
    }
}
