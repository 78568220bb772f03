//! Survey analysis over a loaded [`Dataset`](svy_model::Dataset).
//!
//! - [`classify`](mod@classify) flags columns that look like the options of a
//!   multiple-choice question (partially filled, few distinct values).
//! - [`segments`] aggregates per segment: numeric means (Mode A), overall
//!   selection rates (Mode B) and selection rates per segment (Mode C).
//! - [`ttest`] compares a numeric column between exactly two groups.
//! - [`describe`](mod@describe) and [`histogram`] back the summary and distribution panels.
//! - [`Session`] ties them together for one dataset.
//!
//! Every operation is a pure function of the dataset and its arguments.
//! Selections that cannot be evaluated are reported as [`AnalysisError`].

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod describe;
pub mod error;
pub mod grouping;
pub mod histogram;
pub mod profile;
pub mod segments;
pub mod session;
pub mod ttest;

pub use aggregate::{Aggregate, AggregateEntry};
pub use classify::{
    ChoiceGroup, ClassifierConfig, DEFAULT_MAX_DISTINCT, DEFAULT_THRESHOLD, classify,
};
pub use config::{AnalysisConfig, DEFAULT_PREVIEW_ROWS};
pub use describe::{
    ColumnDescription, ColumnSummary, Describe, NumericSummary, TextSummary, describe,
};
pub use error::{AnalysisError, Result};
pub use grouping::{FillPercentage, Mean, Reducer, group_reduce, segment_labels};
pub use histogram::{DEFAULT_BINS, Histogram, HistogramBin};
pub use profile::{ColumnDescriptor, DatasetProfile};
pub use segments::{
    SegmentComparison, SegmentSeries, column_means, numeric_means_by_segment,
    segment_comparison, segment_selection_percentages, selection_percentages,
};
pub use session::{
    ChoiceSummary, HistogramPanel, NO_CHOICES_MESSAGE, Notice, NoticeLevel, Report,
    ReportRequest, Session, TTestPanel,
};
pub use ttest::{DEFAULT_ALPHA, GroupSample, TTest, compare_two_groups};
