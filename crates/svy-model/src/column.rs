//! Columns and cell values.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Value-level type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every non-missing value is a number.
    Numeric,
    /// Categorical or free text values.
    Text,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
        }
    }
}

/// Borrowed view of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
}

impl Cell<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// String label used when the cell acts as a grouping key.
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Number(value) => Some(format_number(*value)),
            Self::Text(value) => Some((*value).to_string()),
        }
    }
}

/// Owned storage for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// A named column of a [`Dataset`](crate::Dataset).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Builds a numeric column. NaN values are stored as missing.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect();
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Text(_) => ColumnKind::Text,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == ColumnKind::Numeric
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cell at `row`, or [`Cell::Missing`] when out of range.
    pub fn cell(&self, row: usize) -> Cell<'_> {
        match &self.data {
            ColumnData::Numeric(values) => match values.get(row) {
                Some(Some(value)) => Cell::Number(*value),
                _ => Cell::Missing,
            },
            ColumnData::Text(values) => match values.get(row) {
                Some(Some(value)) => Cell::Text(value.as_str()),
                _ => Cell::Missing,
            },
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> + '_ {
        (0..self.len()).map(|row| self.cell(row))
    }

    pub fn non_missing_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.iter().filter(|v| v.is_some()).count(),
            ColumnData::Text(values) => values.iter().filter(|v| v.is_some()).count(),
        }
    }

    /// Number of distinct non-missing values.
    pub fn distinct_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values
                .iter()
                .flatten()
                // -0.0 and 0.0 are the same value
                .map(|value| (value + 0.0).to_bits())
                .collect::<HashSet<_>>()
                .len(),
            ColumnData::Text(values) => values
                .iter()
                .flatten()
                .map(String::as_str)
                .collect::<HashSet<_>>()
                .len(),
        }
    }

    /// Non-missing values of a numeric column, in row order.
    ///
    /// Returns `None` for text columns.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values.iter().flatten().copied().collect()),
            ColumnData::Text(_) => None,
        }
    }

    /// Copy of the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let data = match &self.data {
            ColumnData::Numeric(values) => {
                ColumnData::Numeric(values.iter().take(n).copied().collect())
            }
            ColumnData::Text(values) => ColumnData::Text(values.iter().take(n).cloned().collect()),
        };
        Self {
            name: self.name.clone(),
            data,
        }
    }
}

/// Formats a number without trailing zeros after the decimal point.
///
/// ```
/// use svy_model::format_number;
///
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(2.50), "2.5");
/// assert_eq!(format_number(40.0), "40");
/// ```
pub fn format_number(value: f64) -> String {
    let s = format!("{value}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_stored_as_missing() {
        let column = Column::numeric("Score", vec![Some(1.0), Some(f64::NAN), None]);
        assert_eq!(column.non_missing_count(), 1);
        assert!(column.cell(1).is_missing());
    }

    #[test]
    fn distinct_count_ignores_missing() {
        let column = Column::text(
            "Q1",
            vec![
                Some("Yes".to_string()),
                None,
                Some("Yes".to_string()),
                Some("No".to_string()),
            ],
        );
        assert_eq!(column.distinct_count(), 2);
    }

    #[test]
    fn distinct_count_treats_signed_zero_as_equal() {
        let column = Column::numeric("x", vec![Some(0.0), Some(-0.0), Some(1.0)]);
        assert_eq!(column.distinct_count(), 2);
    }

    #[test]
    fn cell_out_of_range_is_missing() {
        let column = Column::numeric("x", vec![Some(1.0)]);
        assert_eq!(column.cell(5), Cell::Missing);
    }

    #[test]
    fn numeric_labels_drop_trailing_zeros() {
        assert_eq!(Cell::Number(3.0).label().as_deref(), Some("3"));
        assert_eq!(Cell::Number(0.25).label().as_deref(), Some("0.25"));
        assert_eq!(Cell::Missing.label(), None);
    }

    #[test]
    fn text_column_has_no_numeric_values() {
        let column = Column::text("Segment", vec![Some("A".to_string())]);
        assert!(column.numeric_values().is_none());
        assert_eq!(column.kind(), ColumnKind::Text);
    }
}
