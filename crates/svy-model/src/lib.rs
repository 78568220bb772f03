//! Typed in-memory dataset model.
//!
//! A [`Dataset`] is a rectangular table of named [`Column`]s. Each column is
//! either numeric or text at the value level, and every cell may be missing.
//! Datasets are immutable once built; loaders in `svy-ingest` produce them and
//! everything in `svy-analysis` reads them by reference.

pub mod column;
pub mod dataset;
pub mod error;

pub use column::{Cell, Column, ColumnData, ColumnKind, format_number};
pub use dataset::Dataset;
pub use error::{ModelError, Result};
