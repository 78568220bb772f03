//! CSV reading through polars.

use std::io::Cursor;

use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, SerReader};
use svy_model::Column;

use crate::error::{IngestError, Result};
use crate::infer::{RawCell, build_column, header_names};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Parses CSV bytes into typed columns.
///
/// Polars reads every column as a string (schema inference disabled) so that
/// numeric detection and missing-value tokens follow one rule for both CSV
/// and spreadsheet input. The header is read as the first data row so that
/// repeated names reach [`header_names`] untouched.
pub(crate) fn read_csv(bytes: &[u8], name: &str) -> Result<Vec<Column>> {
    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyInput {
            name: name.to_string(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    frame_columns(&df)
}

fn frame_columns(df: &DataFrame) -> Result<Vec<Column>> {
    let mut header = Vec::with_capacity(df.width());
    let mut raw_columns = Vec::with_capacity(df.width());
    for series in df.get_columns() {
        let mut cells = Vec::with_capacity(df.height().saturating_sub(1));
        for row in 1..df.height() {
            cells.push(raw_cell(series.get(row)?));
        }
        header.push(match series.get(0)? {
            AnyValue::String(s) => s.to_string(),
            AnyValue::StringOwned(s) => s.to_string(),
            _ => String::new(),
        });
        raw_columns.push(cells);
    }

    Ok(header_names(header)
        .into_iter()
        .zip(raw_columns)
        .map(|(name, cells)| build_column(name, cells))
        .collect())
}

fn raw_cell(value: AnyValue<'_>) -> RawCell {
    match value {
        AnyValue::Null => RawCell::Empty,
        AnyValue::String(s) => RawCell::Text(s.to_string()),
        AnyValue::StringOwned(s) => RawCell::Text(s.to_string()),
        AnyValue::Boolean(b) => RawCell::Text(if b { "True" } else { "False" }.to_string()),
        AnyValue::Int32(v) => RawCell::Number(f64::from(v)),
        AnyValue::Int64(v) => RawCell::Number(v as f64),
        AnyValue::Float32(v) => RawCell::Number(f64::from(v)),
        AnyValue::Float64(v) => RawCell::Number(v),
        other => RawCell::Text(other.to_string()),
    }
}
