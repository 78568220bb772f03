//! Integration tests for dataset loading.

use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::Workbook;
use svy_ingest::{IngestError, load_bytes, load_path};
use svy_model::{Cell, ColumnKind};
use tempfile::{Builder, NamedTempFile};

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{content}").unwrap();
    file
}

/// Builds an xlsx workbook; numeric strings are written as number cells and
/// empty strings are left unwritten.
fn workbook(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row, values) in rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            let (row, col) = (row as u32, col as u16);
            if value.is_empty() {
                continue;
            }
            match value.parse::<f64>() {
                Ok(number) => worksheet.write_number(row, col, number).unwrap(),
                Err(_) => worksheet.write_string(row, col, *value).unwrap(),
            };
        }
    }
    workbook.save_to_buffer().unwrap()
}

const SURVEY_ROWS: &[&[&str]] = &[
    &["Respondent", "Score", "Segment", "Q1", "Q1"],
    &["1", "10", "Student", "Yes", ""],
    &["2", "", "Employed", "", "Yes"],
    &["3", "30", "Student"],
];

const SURVEY_CSV: &[u8] = b"\
Respondent,Score,Segment,Q1,Q1
1,10,Student,Yes,
2,,Employed,,Yes
3,30,Student,,
";

#[test]
fn loads_csv_from_disk() {
    let file = temp_file(
        ".csv",
        "Respondent,Age,Segment,Q1_A\n1,34,Student,Yes\n2,41,Employed,\n3,NA,Student,Yes\n",
    );
    let dataset = load_path(file.path()).unwrap();

    assert_eq!(dataset.height(), 3);
    assert_eq!(
        dataset.column_names(),
        vec!["Respondent", "Age", "Segment", "Q1_A"]
    );
    assert_eq!(dataset.numeric_columns(), vec!["Respondent", "Age"]);
    assert_eq!(dataset.text_columns(), vec!["Segment", "Q1_A"]);

    let age = dataset.column("Age").unwrap();
    assert_eq!(age.cell(0), Cell::Number(34.0));
    assert!(age.cell(2).is_missing());

    let option = dataset.column("Q1_A").unwrap();
    assert_eq!(option.non_missing_count(), 2);
}

#[test]
fn uppercase_extension_uses_csv_parser() {
    let file = temp_file(".CSV", "Score\n1\n2\n");
    let dataset = load_path(file.path()).unwrap();
    assert_eq!(
        dataset.column("Score").map(|c| c.kind()),
        Some(ColumnKind::Numeric)
    );
}

#[test]
fn missing_file_is_reported() {
    let result = load_path(Path::new("/definitely/not/here/survey.csv"));
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn loads_uploaded_bytes() {
    let dataset = load_bytes(b"Segment,Score\nX,10\nX,20\nY,30\nY,40\n", "upload.csv").unwrap();
    assert_eq!(dataset.height(), 4);
    assert_eq!(dataset.numeric_columns(), vec!["Score"]);
}

#[test]
fn header_only_csv_has_zero_rows() {
    let dataset = load_bytes(b"Q1,Q2\n", "empty_rows.csv").unwrap();
    assert_eq!(dataset.height(), 0);
    assert_eq!(dataset.width(), 2);
}

#[test]
fn non_csv_name_goes_to_spreadsheet_reader() {
    let result = load_bytes(b"Q1,Q2\nYes,\n", "survey.xlsx");
    assert!(matches!(result, Err(IngestError::Spreadsheet { .. })));
}

#[test]
fn empty_upload_fails_without_partial_dataset() {
    let result = load_bytes(b"", "survey.csv");
    assert!(matches!(result, Err(IngestError::EmptyInput { .. })));
}

#[test]
fn loads_xlsx_workbook() {
    let dataset = load_bytes(&workbook(SURVEY_ROWS), "survey.xlsx").unwrap();

    assert_eq!(dataset.height(), 3);
    assert_eq!(
        dataset.column_names(),
        vec!["Respondent", "Score", "Segment", "Q1", "Q1.1"]
    );
    assert_eq!(dataset.numeric_columns(), vec!["Respondent", "Score"]);
    assert_eq!(dataset.text_columns(), vec!["Segment", "Q1", "Q1.1"]);

    let score = dataset.column("Score").unwrap();
    assert_eq!(score.cell(0), Cell::Number(10.0));
    assert!(score.cell(1).is_missing());

    let first = dataset.column("Q1").unwrap();
    assert_eq!(first.non_missing_count(), 1);
    let second = dataset.column("Q1.1").unwrap();
    assert_eq!(second.cell(1), Cell::Text("Yes"));
    assert!(second.cell(2).is_missing());
}

#[test]
fn loads_xlsx_from_disk() {
    let mut file = Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(&workbook(SURVEY_ROWS)).unwrap();
    let dataset = load_path(file.path()).unwrap();
    assert_eq!(dataset.width(), 5);
    assert_eq!(dataset.height(), 3);
}

#[test]
fn repeated_headers_match_across_formats() {
    let csv = load_bytes(SURVEY_CSV, "survey.csv").unwrap();
    let xlsx = load_bytes(&workbook(SURVEY_ROWS), "survey.xlsx").unwrap();
    assert_eq!(csv.column_names(), xlsx.column_names());
    assert_eq!(csv.numeric_columns(), xlsx.numeric_columns());
}
