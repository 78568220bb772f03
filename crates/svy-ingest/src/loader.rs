//! Entry points that turn a file or byte buffer into a [`Dataset`].

use std::path::Path;

use svy_model::Dataset;
use tracing::{debug, info, warn};

use crate::csv::read_csv;
use crate::error::{IngestError, Result};
use crate::format::SourceFormat;
use crate::spreadsheet::read_spreadsheet;

/// Column count above which loading logs a width warning.
const WIDE_DATASET_COLUMNS: usize = 500;

/// Reads and parses a file from disk.
pub fn load_path(path: &Path) -> Result<Dataset> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    load_bytes(&bytes, &path.to_string_lossy())
}

/// Parses an uploaded byte buffer, dispatching on `file_name`'s extension.
pub fn load_bytes(bytes: &[u8], file_name: &str) -> Result<Dataset> {
    let format = SourceFormat::from_file_name(file_name);
    debug!(file = %file_name, %format, bytes = bytes.len(), "parsing input");

    let columns = match format {
        SourceFormat::Csv => read_csv(bytes, file_name)?,
        SourceFormat::Spreadsheet => read_spreadsheet(bytes, file_name)?,
    };
    if columns.is_empty() {
        return Err(IngestError::EmptyInput {
            name: file_name.to_string(),
        });
    }

    let dataset = Dataset::new(columns)?;
    if dataset.width() > WIDE_DATASET_COLUMNS {
        warn!(
            file = %file_name,
            columns = dataset.width(),
            "dataset has more than {WIDE_DATASET_COLUMNS} columns"
        );
    }
    info!(
        file = %file_name,
        %format,
        rows = dataset.height(),
        columns = dataset.width(),
        "dataset loaded"
    );
    Ok(dataset)
}
