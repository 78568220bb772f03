//! Parser selection by file extension.

use std::fmt;
use std::path::Path;

/// Tabular source formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated text.
    Csv,
    /// Spreadsheet workbook (xlsx, xlsm, xls, xlsb, ods).
    Spreadsheet,
}

impl SourceFormat {
    /// Picks the parser for a file name.
    ///
    /// Only a `.csv` extension (any case) selects CSV; every other name is
    /// treated as a spreadsheet.
    pub fn from_file_name(name: &str) -> Self {
        let is_csv = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv { Self::Csv } else { Self::Spreadsheet }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension_selects_csv() {
        assert_eq!(SourceFormat::from_file_name("survey.csv"), SourceFormat::Csv);
        assert_eq!(SourceFormat::from_file_name("SURVEY.CSV"), SourceFormat::Csv);
        assert_eq!(
            SourceFormat::from_file_name("/tmp/data/wave2.Csv"),
            SourceFormat::Csv
        );
    }

    #[test]
    fn everything_else_is_a_spreadsheet() {
        assert_eq!(
            SourceFormat::from_file_name("survey.xlsx"),
            SourceFormat::Spreadsheet
        );
        assert_eq!(
            SourceFormat::from_file_name("survey"),
            SourceFormat::Spreadsheet
        );
        assert_eq!(
            SourceFormat::from_file_name("survey.csv.bak"),
            SourceFormat::Spreadsheet
        );
    }
}
