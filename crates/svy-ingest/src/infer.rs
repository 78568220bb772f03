//! Column type inference shared by the CSV and spreadsheet readers.
//!
//! A column is numeric if every non-missing value parses as a number. A
//! column with no values at all is also numeric (an all-missing float
//! column). Anything else is text, with numbers rendered back to strings.
//!
//! Unlike pandas, text cells are trimmed and whitespace-only cells count as
//! missing. A column of `" "` padding is therefore empty here, which lowers
//! its fill ratio and distinct count compared with a pandas load.
//!
//! Header names go through [`header_names`]: blanks get positional names and
//! repeats are suffixed `.1`, `.2`, ... as pandas does.

use std::collections::{HashMap, HashSet};

use svy_model::{Column, format_number};

/// Cell tokens that are read as missing values.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true when `value` (after trimming) marks a missing cell.
pub fn is_na_token(value: &str) -> bool {
    NA_TOKENS.contains(&value.trim())
}

/// A cell as it comes out of a parser, before type inference.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    Empty,
    Number(f64),
    Text(String),
}

impl RawCell {
    fn normalized(self) -> Self {
        match self {
            Self::Text(value) if is_na_token(&value) => Self::Empty,
            Self::Text(value) => Self::Text(value.trim().to_string()),
            Self::Number(value) if value.is_nan() => Self::Empty,
            other => other,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.parse::<f64>().ok(),
            Self::Empty => None,
        }
    }
}

/// Builds a typed column from raw parser output.
pub(crate) fn build_column(name: String, cells: Vec<RawCell>) -> Column {
    let cells: Vec<RawCell> = cells.into_iter().map(RawCell::normalized).collect();
    let numeric = cells
        .iter()
        .all(|cell| matches!(cell, RawCell::Empty) || cell.as_number().is_some());

    if numeric {
        let values = cells.iter().map(RawCell::as_number).collect();
        Column::numeric(name, values)
    } else {
        let values = cells
            .into_iter()
            .map(|cell| match cell {
                RawCell::Empty => None,
                RawCell::Number(value) => Some(format_number(value)),
                RawCell::Text(value) => Some(value),
            })
            .collect();
        Column::text(name, values)
    }
}

/// Normalizes a header row into unique column names.
///
/// A repeated name `Q1` becomes `Q1.1`, then `Q1.2`; a suffix that collides
/// with an existing name is bumped until it is free.
pub(crate) fn header_names<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut used: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();
    for (idx, raw) in raw.into_iter().enumerate() {
        let base = header_name(raw.as_ref(), idx);
        let mut name = base.clone();
        if used.contains(&name) {
            let next = suffixes.entry(base.clone()).or_insert(1);
            loop {
                name = format!("{base}.{next}");
                *next += 1;
                if !used.contains(&name) {
                    break;
                }
            }
        }
        used.insert(name.clone());
        names.push(name);
    }
    names
}

/// Replaces blank header names the way spreadsheet tools label them.
fn header_name(raw: &str, idx: usize) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        format!("Unnamed: {idx}")
    } else {
        trimmed.to_string()
    }
}
