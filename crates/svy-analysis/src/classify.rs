//! Multiple-choice option detection.
//!
//! Survey exports usually encode a multi-select question as one column per
//! option: the cell holds a marker (often the option label itself) when the
//! respondent ticked it and is empty otherwise. Such columns are partially
//! filled and carry very few distinct values, which is all this heuristic
//! looks at. Results are a hypothesis for the user to confirm, not a fact
//! about the data.

use serde::Serialize;
use svy_model::ColumnKind;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::profile::{ColumnDescriptor, DatasetProfile};

/// Fill ratio below which a column is still eligible.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Distinct-value count below which a column is still eligible.
pub const DEFAULT_MAX_DISTINCT: usize = 10;

/// Classifier tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifierConfig {
    threshold: f64,
    max_distinct: usize,
    categorical_only: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_distinct: DEFAULT_MAX_DISTINCT,
            categorical_only: false,
        }
    }
}

impl ClassifierConfig {
    /// Creates a config with the given fill-ratio threshold.
    ///
    /// The threshold must lie strictly between 0 and 1.
    pub fn new(threshold: f64) -> Result<Self> {
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(AnalysisError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_max_distinct(mut self, max_distinct: usize) -> Self {
        self.max_distinct = max_distinct;
        self
    }

    /// Restrict candidates to non-numeric columns.
    ///
    /// Off by default: numeric columns such as `1`/empty option encodings
    /// are flagged too.
    #[must_use]
    pub fn with_categorical_only(mut self, enable: bool) -> Self {
        self.categorical_only = enable;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn max_distinct(&self) -> usize {
        self.max_distinct
    }

    pub fn categorical_only(&self) -> bool {
        self.categorical_only
    }

    /// Whether a single column qualifies as a multiple-choice option.
    pub fn matches(&self, descriptor: &ColumnDescriptor) -> bool {
        if self.categorical_only && descriptor.kind == ColumnKind::Numeric {
            return false;
        }
        descriptor.fill_ratio > 0.0
            && descriptor.fill_ratio < self.threshold
            && descriptor.distinct < self.max_distinct
    }
}

/// Columns presumed to be the options of one multiple-choice question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChoiceGroup {
    columns: Vec<String>,
}

impl ChoiceGroup {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }
}

/// Flags every column that looks like a multiple-choice option.
///
/// The result keeps dataset column order. There is no ranking and no
/// confidence score.
pub fn classify(profile: &DatasetProfile, config: &ClassifierConfig) -> ChoiceGroup {
    let columns: Vec<String> = profile
        .columns()
        .iter()
        .filter(|descriptor| config.matches(descriptor))
        .map(|descriptor| descriptor.name.clone())
        .collect();
    debug!(
        threshold = config.threshold,
        candidates = columns.len(),
        examined = profile.columns().len(),
        "multiple-choice detection"
    );
    ChoiceGroup::new(columns)
}
