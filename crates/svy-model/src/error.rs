//! Error types for dataset construction.

use thiserror::Error;

/// Errors raised while assembling a [`Dataset`](crate::Dataset).
#[derive(Debug, Error)]
pub enum ModelError {
    /// A column does not have the same number of rows as the first column.
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Two columns share the same name.
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// A column name is empty or whitespace only.
    #[error("empty column name at position {0}")]
    EmptyColumnName(usize),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
