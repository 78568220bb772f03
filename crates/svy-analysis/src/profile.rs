//! Per-column descriptors computed once per loaded dataset.

use serde::Serialize;
use svy_model::{Column, ColumnKind, Dataset};

/// Fill and cardinality statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub kind: ColumnKind,
    /// Total number of rows in the dataset.
    pub rows: usize,
    /// Rows with a non-missing value.
    pub non_missing: usize,
    /// Distinct non-missing values.
    pub distinct: usize,
    /// `non_missing / rows`, or 0 for an empty dataset.
    pub fill_ratio: f64,
}

impl ColumnDescriptor {
    pub fn from_column(column: &Column) -> Self {
        let rows = column.len();
        let non_missing = column.non_missing_count();
        let fill_ratio = if rows == 0 {
            0.0
        } else {
            non_missing as f64 / rows as f64
        };
        Self {
            name: column.name().to_string(),
            kind: column.kind(),
            rows,
            non_missing,
            distinct: column.distinct_count(),
            fill_ratio,
        }
    }

    pub fn missing(&self) -> usize {
        self.rows - self.non_missing
    }
}

/// Descriptors for every column of a dataset, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetProfile {
    rows: usize,
    columns: Vec<ColumnDescriptor>,
}

impl DatasetProfile {
    pub fn build(dataset: &Dataset) -> Self {
        Self {
            rows: dataset.height(),
            columns: dataset
                .columns()
                .iter()
                .map(ColumnDescriptor::from_column)
                .collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|descriptor| descriptor.name == name)
    }
}

#[cfg(test)]
mod tests {
    use svy_model::Column;

    use super::*;

    #[test]
    fn descriptor_counts_fill_and_distinct_values() {
        let column = Column::text(
            "Q1",
            vec![Some("Yes".to_string()), None, Some("Yes".to_string()), None],
        );
        let descriptor = ColumnDescriptor::from_column(&column);
        assert_eq!(descriptor.rows, 4);
        assert_eq!(descriptor.non_missing, 2);
        assert_eq!(descriptor.missing(), 2);
        assert_eq!(descriptor.distinct, 1);
        assert!((descriptor.fill_ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_column_has_zero_fill_ratio() {
        let descriptor = ColumnDescriptor::from_column(&Column::numeric("x", Vec::new()));
        assert_eq!(descriptor.fill_ratio, 0.0);
    }
}
