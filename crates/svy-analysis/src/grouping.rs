//! Group-by-segment reduction shared by the aggregation modes.

use std::collections::{BTreeMap, BTreeSet};

use svy_model::{Cell, Column, Dataset};

use crate::aggregate::Aggregate;
use crate::error::{AnalysisError, Result};

/// Folds the target cells of one segment into a scalar.
pub trait Reducer {
    type State: Default;

    fn accumulate(&self, state: &mut Self::State, cell: Cell<'_>);

    /// `None` when the statistic is undefined for the segment.
    fn finish(&self, state: Self::State) -> Option<f64>;
}

/// Arithmetic mean of the non-missing numeric values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl Reducer for Mean {
    type State = (f64, usize);

    fn accumulate(&self, state: &mut Self::State, cell: Cell<'_>) {
        if let Some(value) = cell.as_f64() {
            state.0 += value;
            state.1 += 1;
        }
    }

    /// Infinite inputs can make the mean non-finite; that counts as undefined.
    fn finish(&self, (sum, count): Self::State) -> Option<f64> {
        (count > 0)
            .then(|| sum / count as f64)
            .filter(|mean| mean.is_finite())
    }
}

/// Share of rows in the segment with a non-missing value, in percent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillPercentage;

impl Reducer for FillPercentage {
    /// (filled, rows)
    type State = (usize, usize);

    fn accumulate(&self, state: &mut Self::State, cell: Cell<'_>) {
        if !cell.is_missing() {
            state.0 += 1;
        }
        state.1 += 1;
    }

    fn finish(&self, (filled, rows): Self::State) -> Option<f64> {
        (rows > 0).then(|| 100.0 * filled as f64 / rows as f64)
    }
}

/// Groups rows by the segment column and reduces the target column per group.
///
/// Rows with a missing segment are dropped first. Groups come out in
/// ascending label order.
pub fn group_reduce<R: Reducer>(
    dataset: &Dataset,
    segment_col: &str,
    target_col: &str,
    reducer: &R,
) -> Result<Aggregate> {
    let segments = categorical_column(dataset, segment_col)?;
    let target = lookup(dataset, target_col)?;

    let mut groups: BTreeMap<String, R::State> = BTreeMap::new();
    for row in 0..dataset.height() {
        let Some(label) = segments.cell(row).label() else {
            continue;
        };
        reducer.accumulate(groups.entry(label).or_default(), target.cell(row));
    }

    Ok(Aggregate::from_pairs(
        groups
            .into_iter()
            .map(|(label, state)| (label, reducer.finish(state))),
    ))
}

/// Distinct non-missing labels of a grouping column, in ascending order.
pub fn segment_labels(dataset: &Dataset, segment_col: &str) -> Result<Vec<String>> {
    let segments = categorical_column(dataset, segment_col)?;
    let labels: BTreeSet<String> = segments.cells().filter_map(|cell| cell.label()).collect();
    Ok(labels.into_iter().collect())
}

pub(crate) fn lookup<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column> {
    dataset
        .column(name)
        .ok_or_else(|| AnalysisError::ColumnNotFound(name.to_string()))
}

pub(crate) fn numeric_column<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column> {
    let column = lookup(dataset, name)?;
    if column.is_numeric() {
        Ok(column)
    } else {
        Err(AnalysisError::NotNumeric(name.to_string()))
    }
}

pub(crate) fn categorical_column<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column> {
    let column = lookup(dataset, name)?;
    if column.is_numeric() {
        Err(AnalysisError::NotCategorical(name.to_string()))
    } else {
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use svy_model::Column;

    use super::*;

    fn text(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Column::text("Segment", text(&[Some("B"), Some("A"), None, Some("B")])),
            Column::numeric("Score", vec![Some(1.0), Some(2.0), Some(100.0), None]),
        ])
        .unwrap()
    }

    #[test]
    fn groups_in_label_order_and_drops_missing_segments() {
        let aggregate = group_reduce(&dataset(), "Segment", "Score", &Mean).unwrap();
        assert_eq!(aggregate.keys(), vec!["A", "B"]);
        assert_eq!(aggregate.value("A"), Some(2.0));
        assert_eq!(aggregate.value("B"), Some(1.0));
    }

    #[test]
    fn fill_percentage_uses_group_size() {
        let aggregate = group_reduce(&dataset(), "Segment", "Score", &FillPercentage).unwrap();
        assert_eq!(aggregate.value("A"), Some(100.0));
        assert_eq!(aggregate.value("B"), Some(50.0));
    }

    #[test]
    fn numeric_grouping_column_is_rejected() {
        let result = group_reduce(&dataset(), "Score", "Segment", &FillPercentage);
        assert_eq!(
            result,
            Err(AnalysisError::NotCategorical("Score".to_string()))
        );
    }

    #[test]
    fn infinite_values_leave_the_mean_undefined() {
        let dataset = Dataset::new(vec![
            Column::text("Segment", text(&[Some("A"), Some("A"), Some("B"), Some("C")])),
            Column::numeric(
                "Score",
                vec![
                    Some(f64::INFINITY),
                    Some(f64::NEG_INFINITY),
                    Some(3.0),
                    Some(f64::INFINITY),
                ],
            ),
        ])
        .unwrap();
        let aggregate = group_reduce(&dataset, "Segment", "Score", &Mean).unwrap();
        assert_eq!(aggregate.value("A"), None);
        assert_eq!(aggregate.value("C"), None);
        assert_eq!(aggregate.sorted_descending().keys(), vec!["B", "A", "C"]);
    }

    #[test]
    fn labels_are_sorted_and_unique() {
        assert_eq!(segment_labels(&dataset(), "Segment").unwrap(), vec!["A", "B"]);
    }
}
