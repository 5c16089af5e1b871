//! End-to-end tests for the read + normalize stages against real `.xlsx`
//! files built with `rust_xlsxwriter` in a temp directory.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use mongodb::bson::Bson;
use rust_xlsxwriter::{Format, Workbook};
use xlsx2mongo::{normalize_dates, read_table, row_to_document, Cell};

fn joined(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

/// Builds a workbook with a header row and three data rows:
///
/// | id | name  | joined              | active |
/// |----|-------|---------------------|--------|
/// | 1  | alice | 2024-01-15 10:30:00 | true   |
/// | 2  | bob   | (blank)             | false  |
/// | 3  | carol | 2024-01-20 10:30:00 | true   |
fn write_fixture(path: &Path) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Cells formatted with a date number format are what the reader's type
    // inference keys off
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    worksheet.write_string(0, 0, "id").unwrap();
    worksheet.write_string(0, 1, "name").unwrap();
    worksheet.write_string(0, 2, "joined").unwrap();
    worksheet.write_string(0, 3, "active").unwrap();

    worksheet.write_number(1, 0, 1.0).unwrap();
    worksheet.write_string(1, 1, "alice").unwrap();
    worksheet
        .write_datetime_with_format(1, 2, &joined(15), &date_format)
        .unwrap();
    worksheet.write_boolean(1, 3, true).unwrap();

    worksheet.write_number(2, 0, 2.0).unwrap();
    worksheet.write_string(2, 1, "bob").unwrap();
    // joined left blank
    worksheet.write_boolean(2, 3, false).unwrap();

    worksheet.write_number(3, 0, 3.0).unwrap();
    worksheet.write_string(3, 1, "carol").unwrap();
    worksheet
        .write_datetime_with_format(3, 2, &joined(20), &date_format)
        .unwrap();
    worksheet.write_boolean(3, 3, true).unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn test_read_table_header_and_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.xlsx");
    write_fixture(&path);

    let table = read_table(&path).expect("Should read fixture");

    assert_eq!(table.columns, vec!["id", "name", "joined", "active"]);
    assert_eq!(table.len(), 3);
}

#[test]
fn test_read_table_cell_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.xlsx");
    write_fixture(&path);

    let table = read_table(&path).expect("Should read fixture");

    // Spreadsheet numbers come back as floats
    assert_eq!(table.rows[0][0], Cell::Float(1.0));
    assert_eq!(table.rows[0][1], Cell::Text("alice".into()));
    assert_eq!(table.rows[0][2], Cell::DateTime(joined(15)));
    assert_eq!(table.rows[0][3], Cell::Bool(true));
    assert_eq!(table.rows[1][2], Cell::Null);
}

#[test]
fn test_normalize_turns_dates_into_text_and_blanks_into_null() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.xlsx");
    write_fixture(&path);

    let mut table = read_table(&path).expect("Should read fixture");
    normalize_dates(&mut table);

    assert_eq!(table.rows[0][2], Cell::Text("2024-01-15 10:30:00".into()));
    assert_eq!(table.rows[1][2], Cell::Null);
    assert_eq!(table.rows[2][2], Cell::Text("2024-01-20 10:30:00".into()));

    // Non-date columns untouched
    assert_eq!(table.rows[0][1], Cell::Text("alice".into()));
    assert_eq!(table.rows[1][3], Cell::Bool(false));
}

#[test]
fn test_normalized_rows_serialize_to_expected_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.xlsx");
    write_fixture(&path);

    let mut table = read_table(&path).expect("Should read fixture");
    normalize_dates(&mut table);

    let doc = row_to_document(&table.columns, &table.rows[1]);
    assert_eq!(doc.get("id"), Some(&Bson::Double(2.0)));
    assert_eq!(doc.get("name"), Some(&Bson::String("bob".into())));
    // A missing temporal is stored as an explicit null, not the sentinel text
    assert_eq!(doc.get("joined"), Some(&Bson::Null));
    assert_eq!(doc.get("active"), Some(&Bson::Boolean(false)));

    let doc = row_to_document(&table.columns, &table.rows[0]);
    assert_eq!(
        doc.get("joined"),
        Some(&Bson::String("2024-01-15 10:30:00".into())),
        "A valid date is stored as text, not as a native date type"
    );
}

#[test]
fn test_read_table_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.xlsx");

    let result = read_table(&path);
    assert!(result.is_err(), "Missing file should be a read error");
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to read workbook"));
}

#[test]
fn test_read_table_corrupt_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.xlsx");
    fs::write(&path, b"this is not a zip archive").unwrap();

    let result = read_table(&path);
    assert!(result.is_err(), "Corrupt file should be a read error");
}

#[test]
fn test_read_table_header_only_sheet_gives_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("header_only.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "id").unwrap();
    worksheet.write_string(0, 1, "name").unwrap();
    workbook.save(&path).unwrap();

    let table = read_table(&path).expect("Header-only sheet should read");
    assert_eq!(table.columns, vec!["id", "name"]);
    assert!(table.is_empty());
}

#[test]
fn test_read_table_blank_sheet_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.xlsx");

    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    workbook.save(&path).unwrap();

    let result = read_table(&path);
    assert!(result.is_err(), "Sheet with no header row should error");
    assert!(result.unwrap_err().to_string().contains("no header row"));
}
