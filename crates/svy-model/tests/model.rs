use svy_model::{Cell, Column, ColumnKind, Dataset, ModelError};

fn text(values: &[Option<&str>]) -> Vec<Option<String>> {
    values.iter().map(|v| v.map(str::to_string)).collect()
}

#[test]
fn dataset_reports_shape_and_kinds() {
    let dataset = Dataset::new(vec![
        Column::numeric("Score", vec![Some(10.0), Some(20.0), None]),
        Column::text("Segment", text(&[Some("X"), None, Some("Y")])),
    ])
    .unwrap();

    assert_eq!(dataset.height(), 3);
    assert_eq!(dataset.width(), 2);
    assert_eq!(dataset.numeric_columns(), vec!["Score"]);
    assert_eq!(dataset.text_columns(), vec!["Segment"]);
    assert_eq!(
        dataset.column("Score").map(Column::kind),
        Some(ColumnKind::Numeric)
    );
}

#[test]
fn dataset_rejects_ragged_columns() {
    let result = Dataset::new(vec![
        Column::numeric("a", vec![Some(1.0), Some(2.0)]),
        Column::numeric("b", vec![Some(1.0)]),
    ]);
    assert!(matches!(
        result,
        Err(ModelError::LengthMismatch {
            expected: 2,
            actual: 1,
            ..
        })
    ));
}

#[test]
fn dataset_rejects_duplicate_names() {
    let result = Dataset::new(vec![
        Column::numeric("a", vec![Some(1.0)]),
        Column::text("a", text(&[Some("x")])),
    ]);
    assert!(matches!(result, Err(ModelError::DuplicateColumn(name)) if name == "a"));
}

#[test]
fn dataset_rejects_blank_names() {
    let result = Dataset::new(vec![Column::numeric("  ", vec![Some(1.0)])]);
    assert!(matches!(result, Err(ModelError::EmptyColumnName(0))));
}

#[test]
fn empty_dataset_has_no_rows() {
    let dataset = Dataset::new(Vec::new()).unwrap();
    assert_eq!(dataset.height(), 0);
    assert_eq!(dataset.width(), 0);
    assert!(dataset.column_names().is_empty());
}

#[test]
fn head_truncates_every_column() {
    let dataset = Dataset::new(vec![
        Column::numeric("n", vec![Some(1.0), Some(2.0), Some(3.0)]),
        Column::text("t", text(&[Some("a"), Some("b"), None])),
    ])
    .unwrap();

    let head = dataset.head(2);
    assert_eq!(head.height(), 2);
    assert_eq!(head.row(1), vec![Cell::Number(2.0), Cell::Text("b")]);

    let longer = dataset.head(10);
    assert_eq!(longer.height(), 3);
}

#[test]
fn dataset_serializes_row_major() {
    let dataset = Dataset::new(vec![
        Column::numeric("n", vec![Some(1.0), None]),
        Column::text("t", text(&[Some("a"), Some("b")])),
    ])
    .unwrap();
    let json = serde_json::to_string(&dataset).unwrap();
    assert_eq!(json, r#"{"columns":["n","t"],"rows":[[1.0,"a"],[null,"b"]]}"#);
}

#[test]
fn cells_serialize_as_plain_json_values() {
    let row = vec![Cell::Number(1.5), Cell::Text("Yes"), Cell::Missing];
    let json = serde_json::to_string(&row).unwrap();
    assert_eq!(json, r#"[1.5,"Yes",null]"#);
}
