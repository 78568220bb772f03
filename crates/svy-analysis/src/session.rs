//! One loaded dataset plus everything derived from it.
//!
//! A [`Session`] computes the column profile, the summary table and the
//! detected multiple-choice options once, then answers panel queries against
//! them. [`Session::report`] runs the whole dashboard in order and turns
//! selections that cannot be evaluated into [`Notice`]s instead of errors.

use serde::Serialize;
use svy_model::Dataset;
use tracing::{debug, info, warn};

use crate::aggregate::Aggregate;
use crate::classify::{ChoiceGroup, classify};
use crate::config::AnalysisConfig;
use crate::describe::{Describe, describe};
use crate::error::{AnalysisError, Result};
use crate::grouping::numeric_column;
use crate::histogram::Histogram;
use crate::profile::DatasetProfile;
use crate::segments::{
    SegmentComparison, column_means, numeric_means_by_segment, segment_comparison,
    selection_percentages,
};
use crate::ttest::{TTest, compare_two_groups};

/// Shown when no column looks like a multiple-choice option.
pub const NO_CHOICES_MESSAGE: &str =
    "No multiple choice columns detected (optional columns with non-empty values).";

/// Multiple-choice panel: detected options, the user's selection, overall
/// selection rates and the optional per-segment breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceSummary {
    pub detected: ChoiceGroup,
    pub selected: Vec<String>,
    pub percentages: Aggregate,
    pub comparison: Option<SegmentComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramPanel {
    pub column: String,
    pub histogram: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TTestPanel {
    #[serde(flatten)]
    pub test: TTest,
    pub alpha: f64,
    pub significant: bool,
}

impl TTestPanel {
    pub fn new(test: TTest, alpha: f64) -> Self {
        let significant = test.is_significant(alpha);
        Self {
            test,
            alpha,
            significant,
        }
    }

    pub fn message(&self) -> &'static str {
        if self.significant {
            "Significant difference between groups."
        } else {
            "No significant difference found."
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A panel that was skipped or could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub panel: &'static str,
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(panel: &'static str, message: impl Into<String>) -> Self {
        Self {
            panel,
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn warning(panel: &'static str, message: impl Into<String>) -> Self {
        Self {
            panel,
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Panel selections for [`Session::report`]. `None` picks the dashboard
/// default for that selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportRequest {
    pub histogram_column: Option<String>,
    pub group_column: Option<String>,
    pub value_column: Option<String>,
    pub options: Option<Vec<String>>,
    pub segment_column: Option<String>,
}

/// Every dashboard panel for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: usize,
    pub columns: usize,
    pub preview: Dataset,
    pub summary: Describe,
    pub column_means: Aggregate,
    pub histogram: Option<HistogramPanel>,
    pub ttest: Option<TTestPanel>,
    pub choices: Option<ChoiceSummary>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    config: AnalysisConfig,
    profile: DatasetProfile,
    summary: Describe,
    choices: ChoiceGroup,
}

impl Session {
    pub fn new(dataset: Dataset, config: AnalysisConfig) -> Self {
        let profile = DatasetProfile::build(&dataset);
        let summary = describe(&dataset);
        let choices = classify(&profile, &config.classifier);
        info!(
            rows = dataset.height(),
            columns = dataset.width(),
            choice_columns = choices.len(),
            "session ready"
        );
        Self {
            dataset,
            config,
            profile,
            summary,
            choices,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn profile(&self) -> &DatasetProfile {
        &self.profile
    }

    /// The first `n` rows.
    pub fn preview(&self, n: usize) -> Dataset {
        self.dataset.head(n)
    }

    pub fn describe(&self) -> &Describe {
        &self.summary
    }

    pub fn numeric_columns(&self) -> Vec<&str> {
        self.dataset.numeric_columns()
    }

    pub fn categorical_columns(&self) -> Vec<&str> {
        self.dataset.text_columns()
    }

    pub fn column_means(&self) -> Aggregate {
        column_means(&self.dataset)
    }

    pub fn histogram(&self, column: &str) -> Result<Histogram> {
        let column = numeric_column(&self.dataset, column)?;
        let values = column.numeric_values().unwrap_or_default();
        Histogram::new(values, self.config.histogram_bins)
    }

    pub fn compare_two_groups(&self, group_col: &str, value_col: &str) -> Result<TTest> {
        compare_two_groups(&self.dataset, group_col, value_col)
    }

    /// Runs the two-group comparison and judges it at the configured alpha.
    pub fn ttest_panel(&self, group_col: &str, value_col: &str) -> Result<TTestPanel> {
        let test = self.compare_two_groups(group_col, value_col)?;
        Ok(TTestPanel::new(test, self.config.alpha()))
    }

    pub fn detected_choices(&self) -> &ChoiceGroup {
        &self.choices
    }

    /// Selection rates for `options` (every detected option when `None`),
    /// broken down by `segment` when one is given.
    pub fn choice_summary(
        &self,
        options: Option<&[String]>,
        segment: Option<&str>,
    ) -> Result<ChoiceSummary> {
        let selected = options.unwrap_or(self.choices.columns()).to_vec();
        let percentages = selection_percentages(&self.dataset, &selected)?;
        let comparison = match segment {
            Some(segment) if !selected.is_empty() => {
                Some(segment_comparison(&self.dataset, segment, &selected)?)
            }
            _ => None,
        };
        debug!(
            selected = selected.len(),
            segmented = comparison.is_some(),
            "choice summary"
        );
        Ok(ChoiceSummary {
            detected: self.choices.clone(),
            selected,
            percentages,
            comparison,
        })
    }

    pub fn numeric_by_segment(&self, segment_col: &str, value_col: &str) -> Result<Aggregate> {
        numeric_means_by_segment(&self.dataset, segment_col, value_col)
    }

    /// Builds every panel. Missing selections fall back to the first
    /// numeric or categorical column.
    pub fn report(&self, request: &ReportRequest) -> Report {
        let mut notices = Vec::new();
        let numeric = self.numeric_columns();
        let categorical = self.categorical_columns();

        let mut histogram = None;
        let mut ttest = None;
        if numeric.is_empty() {
            notices.push(Notice::info(
                "histogram",
                "No numeric columns; histogram and t-test skipped.",
            ));
        } else {
            let column = pick(request.histogram_column.as_deref(), &numeric);
            match self.histogram(column) {
                Ok(result) => {
                    histogram = Some(HistogramPanel {
                        column: column.to_string(),
                        histogram: result,
                    });
                }
                Err(err) => notices.push(Notice::warning("histogram", err.to_string())),
            }

            match request.group_column.as_deref().or(categorical.first().copied()) {
                None => notices.push(Notice::info(
                    "ttest",
                    "No categorical column to group by; t-test skipped.",
                )),
                Some(group) => {
                    let value = pick(request.value_column.as_deref(), &numeric);
                    match self.ttest_panel(group, value) {
                        Ok(panel) => ttest = Some(panel),
                        Err(err) => notices.push(ttest_notice(&err)),
                    }
                }
            }
        }

        let choices = if self.choices.is_empty() && request.options.is_none() {
            notices.push(Notice::info("choices", NO_CHOICES_MESSAGE));
            None
        } else {
            let segment = request
                .segment_column
                .as_deref()
                .or(categorical.first().copied());
            match self.choice_summary(request.options.as_deref(), segment) {
                Ok(summary) => Some(summary),
                Err(err) => {
                    notices.push(Notice::warning("choices", err.to_string()));
                    None
                }
            }
        };

        for notice in &notices {
            if notice.level == NoticeLevel::Warning {
                warn!(panel = notice.panel, message = %notice.message, "panel skipped");
            }
        }

        Report {
            rows: self.dataset.height(),
            columns: self.dataset.width(),
            preview: self.preview(self.config.preview_rows),
            summary: self.summary.clone(),
            column_means: self.column_means(),
            histogram,
            ttest,
            choices,
            notices,
        }
    }
}

fn pick<'a>(requested: Option<&'a str>, available: &[&'a str]) -> &'a str {
    requested
        .or_else(|| available.first().copied())
        .unwrap_or_default()
}

fn ttest_notice(err: &AnalysisError) -> Notice {
    match err {
        AnalysisError::NotTwoGroups { .. } => Notice::warning(
            "ttest",
            "Please select a grouping column with exactly 2 unique values.",
        ),
        other => Notice::warning("ttest", other.to_string()),
    }
}
