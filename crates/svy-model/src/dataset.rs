//! The rectangular, immutable dataset.

use std::collections::HashSet;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::column::{Cell, Column, ColumnKind};
use crate::error::{ModelError, Result};

/// An in-memory table of rows x named columns.
///
/// All columns have the same length and names are unique. A dataset is never
/// edited in place; reloading a file produces a fresh dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    height: usize,
}

impl Dataset {
    /// Builds a dataset, validating shape and column names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map_or(0, Column::len);
        let mut seen = HashSet::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            if column.name().trim().is_empty() {
                return Err(ModelError::EmptyColumnName(idx));
            }
            if !seen.insert(column.name()) {
                return Err(ModelError::DuplicateColumn(column.name().to_string()));
            }
            if column.len() != height {
                return Err(ModelError::LengthMismatch {
                    column: column.name().to_string(),
                    expected: height,
                    actual: column.len(),
                });
            }
        }
        Ok(Self { columns, height })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    /// Names of numeric columns, in column order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns_of_kind(ColumnKind::Numeric)
    }

    /// Names of non-numeric (categorical/text) columns, in column order.
    pub fn text_columns(&self) -> Vec<&str> {
        self.columns_of_kind(ColumnKind::Text)
    }

    fn columns_of_kind(&self, kind: ColumnKind) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|column| column.kind() == kind)
            .map(Column::name)
            .collect()
    }

    /// Cells of one row, in column order.
    pub fn row(&self, idx: usize) -> Vec<Cell<'_>> {
        self.columns.iter().map(|column| column.cell(idx)).collect()
    }

    /// A new dataset holding the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.iter().map(|column| column.head(n)).collect(),
            height: self.height.min(n),
        }
    }
}

/// Serializes as `{"columns": [...], "rows": [[...], ...]}` with plain JSON
/// cell values.
impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let rows: Vec<Vec<Cell<'_>>> = (0..self.height).map(|idx| self.row(idx)).collect();
        let mut state = serializer.serialize_struct("Dataset", 2)?;
        state.serialize_field("columns", &self.column_names())?;
        state.serialize_field("rows", &rows)?;
        state.end()
    }
}
