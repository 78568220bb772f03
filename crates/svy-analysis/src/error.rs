//! Error types for analysis operations.
//!
//! Analysis over a loaded dataset does not fail on its own; every variant here
//! describes a selection that cannot be evaluated (unknown column, wrong
//! column type, a grouping that does not fit the requested test).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("column '{0}' is numeric; choose a categorical column to group by")]
    NotCategorical(String),

    /// The two-group comparison is not applicable to this grouping column.
    #[error("column '{column}' has {found} distinct values; exactly 2 are required")]
    NotTwoGroups { column: String, found: usize },

    #[error("group '{group}' has {count} value(s); at least 2 are required")]
    InsufficientData { group: String, count: usize },

    #[error("values of '{column}' are constant within both groups")]
    ZeroVariance { column: String },

    #[error("threshold must lie strictly between 0 and 1, got {0}")]
    InvalidThreshold(f64),

    #[error("significance level must lie strictly between 0 and 1, got {0}")]
    InvalidAlpha(f64),

    #[error("histogram needs at least one bin")]
    InvalidBinCount,

    #[error("t distribution: {0}")]
    Distribution(String),
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
