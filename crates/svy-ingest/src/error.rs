//! Error types for dataset ingestion.

use std::path::PathBuf;

use svy_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading a dataset.
///
/// Every variant is a hard failure: no partial dataset is ever returned.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// The input holds no header and no data.
    #[error("input is empty: {name}")]
    EmptyInput { name: String },

    /// Failed to parse CSV with polars.
    #[error("failed to parse CSV {name}: {message}")]
    CsvParse { name: String, message: String },

    /// Failed to open or read a spreadsheet workbook.
    #[error("failed to read spreadsheet {name}: {message}")]
    Spreadsheet { name: String, message: String },

    /// Workbook has no worksheet to read.
    #[error("spreadsheet has no worksheets: {name}")]
    NoWorksheet { name: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// Parsed columns could not form a valid dataset.
    #[error("invalid dataset: {0}")]
    Model(#[from] ModelError),
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/survey.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /data/survey.csv");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("Q1".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }

    #[test]
    fn test_error_from_model() {
        let err: IngestError = ModelError::DuplicateColumn("Q1".to_string()).into();
        assert_eq!(err.to_string(), "invalid dataset: duplicate column name 'Q1'");
    }
}
