//! Keyed scalar results ready for display.

use std::cmp::Ordering;

use serde::Serialize;

/// One `key -> value` pair of an [`Aggregate`].
///
/// `value` is `None` when the statistic is undefined (a mean over no values,
/// a percentage of zero rows). Undefined values are never represented as NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateEntry {
    pub key: String,
    pub value: Option<f64>,
}

/// Ordered mapping from a segment or column name to a scalar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Aggregate {
    entries: Vec<AggregateEntry>,
}

impl Aggregate {
    pub fn new(entries: Vec<AggregateEntry>) -> Self {
        Self { entries }
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<f64>)>,
        K: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| AggregateEntry {
                    key: key.into(),
                    value,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[AggregateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.key.as_str()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&AggregateEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// The value for `key`, or `None` when the key is absent or undefined.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|entry| entry.value)
    }

    /// Sorts by value, largest first. Ties keep their current order and
    /// undefined values go last.
    #[must_use]
    pub fn sorted_descending(mut self) -> Self {
        self.entries
            .sort_by(|a, b| descending_nulls_last(a.value, b.value));
        self
    }

    /// Re-indexes the values against `axis`, using `fill` for any key that
    /// is absent or undefined.
    pub fn aligned(&self, axis: &[String], fill: f64) -> Vec<f64> {
        axis.iter()
            .map(|key| self.value(key).unwrap_or(fill))
            .collect()
    }
}

fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
