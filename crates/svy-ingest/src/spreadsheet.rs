//! Spreadsheet reading through calamine.
//!
//! Only the first worksheet is read and its first row is the header.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use svy_model::Column;

use crate::error::{IngestError, Result};
use crate::infer::{RawCell, build_column, header_names};

pub(crate) fn read_spreadsheet(bytes: &[u8], name: &str) -> Result<Vec<Column>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| spreadsheet_error(name, &e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            name: name.to_string(),
        })?
        .map_err(|e| spreadsheet_error(name, &e))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(IngestError::EmptyInput {
            name: name.to_string(),
        });
    };
    let names = header_names(header.iter().map(ToString::to_string));

    let mut cells: Vec<Vec<RawCell>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(row.get(idx).map_or(RawCell::Empty, raw_cell));
        }
    }

    Ok(names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| build_column(name, cells))
        .collect())
}

fn raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::Int(v) => RawCell::Number(*v as f64),
        Data::Float(v) => RawCell::Number(*v),
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Bool(b) => RawCell::Text(if *b { "True" } else { "False" }.to_string()),
        other => RawCell::Text(other.to_string()),
    }
}

fn spreadsheet_error(name: &str, err: &calamine::Error) -> IngestError {
    IngestError::Spreadsheet {
        name: name.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_not_a_workbook() {
        let result = read_spreadsheet(b"definitely not a workbook", "survey.xlsx");
        assert!(matches!(result, Err(IngestError::Spreadsheet { .. })));
    }

    #[test]
    fn calamine_cells_map_to_raw_cells() {
        assert_eq!(raw_cell(&Data::Empty), RawCell::Empty);
        assert_eq!(raw_cell(&Data::Int(3)), RawCell::Number(3.0));
        assert_eq!(
            raw_cell(&Data::String("Yes".to_string())),
            RawCell::Text("Yes".to_string())
        );
        assert_eq!(
            raw_cell(&Data::Bool(true)),
            RawCell::Text("True".to_string())
        );
    }
}
