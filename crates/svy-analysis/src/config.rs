//! Analysis tunables gathered in one place.

use serde::Serialize;

use crate::classify::ClassifierConfig;
use crate::error::{AnalysisError, Result};
use crate::histogram::DEFAULT_BINS;
use crate::ttest::DEFAULT_ALPHA;

/// Rows shown in the data preview when none is configured.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Settings for one analysis session.
///
/// Defaults match the dashboard: threshold 0.8, 20 histogram bins, alpha
/// 0.05 and a five-row preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisConfig {
    pub classifier: ClassifierConfig,
    pub histogram_bins: usize,
    alpha: f64,
    pub preview_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            histogram_bins: DEFAULT_BINS,
            alpha: DEFAULT_ALPHA,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    /// Sets the number of histogram bins. Zero is rejected when a histogram
    /// is built.
    #[must_use]
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Sets the significance level; must lie strictly between 0 and 1.
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(AnalysisError::InvalidAlpha(alpha));
        }
        self.alpha = alpha;
        Ok(self)
    }

    #[must_use]
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard() {
        let config = AnalysisConfig::default();
        assert_eq!(config.classifier.threshold(), 0.8);
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.alpha(), 0.05);
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn alpha_must_be_a_probability() {
        assert_eq!(
            AnalysisConfig::new().with_alpha(1.0),
            Err(AnalysisError::InvalidAlpha(1.0))
        );
        assert!(AnalysisConfig::new().with_alpha(f64::NAN).is_err());
        let config = AnalysisConfig::new().with_alpha(0.01).unwrap();
        assert_eq!(config.alpha(), 0.01);
    }
}
