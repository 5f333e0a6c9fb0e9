//! Error types for store operations.

use thiserror::Error;

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// A required field is missing or has an unusable value.
    #[error("{0}")]
    Validation(String),

    /// No todo exists with the given id.
    #[error("Todo not found")]
    NotFound(u64),
}
