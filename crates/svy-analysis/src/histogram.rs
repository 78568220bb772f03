//! Equal-width histograms of numeric columns.

use std::ops::Range;

use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Number of bins used when none is configured.
pub const DEFAULT_BINS: usize = 20;

/// One bin; `range` is half-open except for the last bin of a histogram,
/// which also contains its end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub range: Range<f64>,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Splits `[min, max]` of `values` into `num_bins` equal-width bins.
    ///
    /// Non-finite values are ignored. When every value is equal the range is
    /// widened to `[v - 0.5, v + 0.5]`. Empty input produces no bins.
    pub fn new<I>(values: I, num_bins: usize) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        if num_bins == 0 {
            return Err(AnalysisError::InvalidBinCount);
        }
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        let Some((min, max)) = bounds(&values) else {
            return Ok(Self::default());
        };
        let (min, max) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let width = (max - min) / num_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..num_bins)
            .map(|i| {
                let start = min + width * i as f64;
                let end = if i + 1 == num_bins {
                    max
                } else {
                    min + width * (i + 1) as f64
                };
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect();

        for value in values {
            let idx = (((value - min) / width) as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }
        Ok(Self { bins })
    }

    /// Number of values counted across all bins.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}
