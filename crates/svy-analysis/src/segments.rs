//! Segment aggregation: numeric means and multiple-choice selection rates.

use serde::Serialize;
use svy_model::Dataset;
use tracing::debug;

use crate::aggregate::Aggregate;
use crate::error::Result;
use crate::grouping::{
    FillPercentage, Mean, Reducer, group_reduce, lookup, numeric_column, segment_labels,
};

/// Mean of `value_col` per segment, largest mean first.
///
/// A segment whose values are all missing has an undefined mean (`None`)
/// and is listed after every defined mean.
pub fn numeric_means_by_segment(
    dataset: &Dataset,
    segment_col: &str,
    value_col: &str,
) -> Result<Aggregate> {
    numeric_column(dataset, value_col)?;
    let means = group_reduce(dataset, segment_col, value_col, &Mean)?.sorted_descending();
    debug!(
        segment = segment_col,
        value = value_col,
        segments = means.len(),
        "segment means"
    );
    Ok(means)
}

/// Share of all respondents that selected each option, largest first.
///
/// The denominator is the full row count, so shares of a multi-select
/// question do not add up to 100.
pub fn selection_percentages<S: AsRef<str>>(
    dataset: &Dataset,
    option_cols: &[S],
) -> Result<Aggregate> {
    let rows = dataset.height();
    let mut pairs = Vec::with_capacity(option_cols.len());
    for name in option_cols {
        let name = name.as_ref();
        let column = lookup(dataset, name)?;
        let share = (rows > 0).then(|| 100.0 * column.non_missing_count() as f64 / rows as f64);
        pairs.push((name, share));
    }
    Ok(Aggregate::from_pairs(pairs).sorted_descending())
}

/// Share of each segment's rows that selected `option_col`.
///
/// Segments come out in ascending label order.
pub fn segment_selection_percentages(
    dataset: &Dataset,
    segment_col: &str,
    option_col: &str,
) -> Result<Aggregate> {
    group_reduce(dataset, segment_col, option_col, &FillPercentage)
}

/// Selection rates of one option, indexed by [`SegmentComparison::segments`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSeries {
    pub option: String,
    pub values: Vec<f64>,
}

/// Every selected option's per-segment rates on one shared segment axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentComparison {
    pub segment_column: String,
    pub segments: Vec<String>,
    pub series: Vec<SegmentSeries>,
}

impl SegmentComparison {
    pub fn series(&self, option: &str) -> Option<&SegmentSeries> {
        self.series.iter().find(|series| series.option == option)
    }
}

/// Runs [`segment_selection_percentages`] for each option and aligns the
/// results on the segment labels, filling absent segments with 0.
pub fn segment_comparison<S: AsRef<str>>(
    dataset: &Dataset,
    segment_col: &str,
    option_cols: &[S],
) -> Result<SegmentComparison> {
    let segments = segment_labels(dataset, segment_col)?;
    let mut series = Vec::with_capacity(option_cols.len());
    for option in option_cols {
        let option = option.as_ref();
        let rates = segment_selection_percentages(dataset, segment_col, option)?;
        series.push(SegmentSeries {
            option: option.to_string(),
            values: rates.aligned(&segments, 0.0),
        });
    }
    Ok(SegmentComparison {
        segment_column: segment_col.to_string(),
        segments,
        series,
    })
}

/// Mean of every numeric column, in column order.
pub fn column_means(dataset: &Dataset) -> Aggregate {
    let means = dataset
        .columns()
        .iter()
        .filter(|column| column.is_numeric())
        .map(|column| {
            let mut state: <Mean as Reducer>::State = Default::default();
            for cell in column.cells() {
                Mean.accumulate(&mut state, cell);
            }
            (column.name(), Mean.finish(state))
        });
    Aggregate::from_pairs(means)
}
