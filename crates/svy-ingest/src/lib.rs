//! Dataset ingestion.
//!
//! Turns an uploaded file (or a byte buffer plus its file name) into a typed
//! [`Dataset`](svy_model::Dataset). The parser is chosen solely by file
//! extension: `.csv` goes through the polars CSV reader, anything else is
//! opened as a spreadsheet workbook.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use svy_ingest::load_path;
//!
//! let dataset = load_path(Path::new("survey.csv"))?;
//! println!("{} rows x {} columns", dataset.height(), dataset.width());
//! ```

mod csv;
mod error;
mod format;
mod infer;
mod loader;
mod spreadsheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === Format Dispatch ===
pub use format::SourceFormat;

// === Type Inference ===
pub use infer::{NA_TOKENS, is_na_token};

// === Loading ===
pub use loader::{load_bytes, load_path};
