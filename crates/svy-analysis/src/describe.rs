//! Per-column summary statistics for the summary table.

use std::collections::HashMap;

use serde::Serialize;
use svy_model::{Cell, Column, Dataset};

/// Statistics of a numeric column.
///
/// Every field except `count` is `None` for an all-missing column; `std`
/// is also `None` when fewer than two values are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    pub fn new(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = (count > 0)
            .then(|| sorted.iter().sum::<f64>() / count as f64)
            .filter(|mean| mean.is_finite());
        let std = mean.filter(|_| count > 1).map(|mean| {
            let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });
        // Interpolating between opposite infinities gives NaN.
        let defined_quantile = |q| quantile(&sorted, q).filter(|v: &f64| !v.is_nan());

        Self {
            count,
            mean,
            std: std.filter(|std| std.is_finite()),
            min: sorted.first().copied(),
            q25: defined_quantile(0.25),
            median: defined_quantile(0.5),
            q75: defined_quantile(0.75),
            max: sorted.last().copied(),
        }
    }
}

/// Statistics of a text column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSummary {
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first.
    pub top: Option<String>,
    pub freq: Option<usize>,
}

impl TextSummary {
    pub fn new<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for value in values {
            match index.get(value) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(value, counts.len());
                    counts.push((value, 1));
                }
            }
        }

        let mut top: Option<(&str, usize)> = None;
        for &(value, freq) in &counts {
            if top.is_none_or(|(_, best)| freq > best) {
                top = Some((value, freq));
            }
        }

        Self {
            count: counts.iter().map(|(_, freq)| freq).sum(),
            unique: counts.len(),
            top: top.map(|(value, _)| value.to_string()),
            freq: top.map(|(_, freq)| freq),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Text(TextSummary),
}

impl ColumnSummary {
    pub fn of(column: &Column) -> Self {
        match column.numeric_values() {
            Some(values) => Self::Numeric(NumericSummary::new(&values)),
            None => Self::Text(TextSummary::new(column.cells().filter_map(|cell| {
                match cell {
                    Cell::Text(value) => Some(value),
                    _ => None,
                }
            }))),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::Numeric(summary) => summary.count,
            Self::Text(summary) => summary.count,
        }
    }
}

/// Named summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescription {
    pub column: String,
    #[serde(flatten)]
    pub summary: ColumnSummary,
}

/// The summary table of a dataset, one entry per column in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Describe {
    columns: Vec<ColumnDescription>,
}

impl Describe {
    pub fn columns(&self) -> &[ColumnDescription] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns
            .iter()
            .find(|description| description.column == name)
            .map(|description| &description.summary)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

pub fn describe(dataset: &Dataset) -> Describe {
    Describe {
        columns: dataset
            .columns()
            .iter()
            .map(|column| ColumnDescription {
                column: column.name().to_string(),
                summary: ColumnSummary::of(column),
            })
            .collect(),
    }
}

/// Quantile with linear interpolation between closest ranks.
///
/// `sorted` must be in ascending order.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
