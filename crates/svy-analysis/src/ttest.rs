//! Independent two-sample t-test between the two groups of a column.

use std::collections::HashMap;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use svy_model::Dataset;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::grouping::{categorical_column, numeric_column};

/// Significance level used when none is configured.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Observed values of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSample {
    pub label: String,
    pub count: usize,
    pub mean: f64,
}

/// Result of Student's two-sample t-test (pooled variance, two-sided).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TTest {
    pub group_column: String,
    pub value_column: String,
    pub groups: [GroupSample; 2],
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
}

impl TTest {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Compares the mean of `value_col` between the two groups of `group_col`.
///
/// Groups are taken in order of first appearance. Any number of distinct
/// non-missing group values other than two yields
/// [`AnalysisError::NotTwoGroups`].
pub fn compare_two_groups(dataset: &Dataset, group_col: &str, value_col: &str) -> Result<TTest> {
    let groups = categorical_column(dataset, group_col)?;
    let values = numeric_column(dataset, value_col)?;

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut labels: Vec<String> = Vec::new();
    let mut samples: Vec<Vec<f64>> = Vec::new();
    for row in 0..dataset.height() {
        let Some(label) = groups.cell(row).label() else {
            continue;
        };
        let slot = *index.entry(label).or_insert_with_key(|label| {
            labels.push(label.clone());
            samples.push(Vec::new());
            labels.len() - 1
        });
        if let Some(value) = values.cell(row).as_f64() {
            samples[slot].push(value);
        }
    }

    let found = labels.len();
    let Ok([first_label, second_label]) = <[String; 2]>::try_from(labels) else {
        return Err(AnalysisError::NotTwoGroups {
            column: group_col.to_string(),
            found,
        });
    };
    for (label, sample) in [&first_label, &second_label].into_iter().zip(&samples) {
        if sample.len() < 2 {
            return Err(AnalysisError::InsufficientData {
                group: label.clone(),
                count: sample.len(),
            });
        }
    }

    let (first, second) = (&samples[0], &samples[1]);
    let (n1, n2) = (first.len() as f64, second.len() as f64);
    let (m1, m2) = (mean(first), mean(second));
    let degrees_of_freedom = n1 + n2 - 2.0;
    let pooled_variance =
        (sum_of_squares(first, m1) + sum_of_squares(second, m2)) / degrees_of_freedom;
    if pooled_variance == 0.0 {
        return Err(AnalysisError::ZeroVariance {
            column: value_col.to_string(),
        });
    }

    let standard_error = (pooled_variance * (1.0 / n1 + 1.0 / n2)).sqrt();
    let t_statistic = (m1 - m2) / standard_error;
    let distribution = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_err(|e| AnalysisError::Distribution(e.to_string()))?;
    let p_value = (2.0 * distribution.sf(t_statistic.abs())).min(1.0);
    debug!(
        group = group_col,
        value = value_col,
        t_statistic,
        p_value,
        "two-group comparison"
    );

    Ok(TTest {
        group_column: group_col.to_string(),
        value_column: value_col.to_string(),
        groups: [
            GroupSample {
                label: first_label,
                count: first.len(),
                mean: m1,
            },
            GroupSample {
                label: second_label,
                count: second.len(),
                mean: m2,
            },
        ],
        t_statistic,
        degrees_of_freedom,
        p_value,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sum_of_squares(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|value| (value - mean).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use svy_model::Column;

    use super::*;

    fn dataset(groups: &[Option<&str>], values: &[Option<f64>]) -> Dataset {
        Dataset::new(vec![
            Column::text(
                "Group",
                groups.iter().map(|v| v.map(str::to_string)).collect(),
            ),
            Column::numeric("Value", values.to_vec()),
        ])
        .unwrap()
    }

    #[test]
    fn matches_reference_student_t() {
        let groups = ["a", "a", "a", "a", "a", "b", "b", "b", "b", "b"];
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let dataset = dataset(&groups.map(Some), &values.map(Some));
        let result = compare_two_groups(&dataset, "Group", "Value").unwrap();
        assert!((result.t_statistic + 1.0).abs() < 1e-12);
        assert_eq!(result.degrees_of_freedom, 8.0);
        assert!((result.p_value - 0.346_593_507).abs() < 1e-6);
        assert_eq!(result.groups[0].label, "a");
        assert_eq!(result.groups[1].mean, 4.0);
        assert!(!result.is_significant(DEFAULT_ALPHA));
    }

    #[test]
    fn missing_values_are_ignored_per_group() {
        let dataset = dataset(
            &[Some("x"), Some("x"), Some("x"), Some("y"), Some("y"), None],
            &[Some(1.0), Some(2.0), None, Some(10.0), Some(12.0), Some(99.0)],
        );
        let result = compare_two_groups(&dataset, "Group", "Value").unwrap();
        assert_eq!(result.groups[0].count, 2);
        assert_eq!(result.groups[1].count, 2);
        assert!(result.is_significant(DEFAULT_ALPHA));
    }

    #[test]
    fn single_group_is_not_applicable() {
        let dataset = dataset(&[Some("x"), Some("x")], &[Some(1.0), Some(2.0)]);
        assert_eq!(
            compare_two_groups(&dataset, "Group", "Value"),
            Err(AnalysisError::NotTwoGroups {
                column: "Group".to_string(),
                found: 1,
            })
        );
    }

    #[test]
    fn three_groups_are_not_applicable() {
        let dataset = dataset(
            &[Some("x"), Some("y"), Some("z")],
            &[Some(1.0), Some(2.0), Some(3.0)],
        );
        assert!(matches!(
            compare_two_groups(&dataset, "Group", "Value"),
            Err(AnalysisError::NotTwoGroups { found: 3, .. })
        ));
    }

    #[test]
    fn tiny_groups_are_rejected() {
        let dataset = dataset(
            &[Some("x"), Some("y"), Some("y")],
            &[Some(1.0), Some(2.0), Some(3.0)],
        );
        assert!(matches!(
            compare_two_groups(&dataset, "Group", "Value"),
            Err(AnalysisError::InsufficientData { count: 1, .. })
        ));
    }

    #[test]
    fn constant_values_are_rejected() {
        let dataset = dataset(
            &[Some("x"), Some("x"), Some("y"), Some("y")],
            &[Some(5.0), Some(5.0), Some(5.0), Some(5.0)],
        );
        assert!(matches!(
            compare_two_groups(&dataset, "Group", "Value"),
            Err(AnalysisError::ZeroVariance { .. })
        ));
    }
}
