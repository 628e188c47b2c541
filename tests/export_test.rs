mod common;

use calamine::{open_workbook_from_rs, DataType, Reader, Xlsx};
use chrono::NaiveDate;
use std::io::Cursor;
use common::{record, sample_records};
use innovation_explorer::export::{export, ExportError, ExportFormat, EXPORT_HEADERS};
use innovation_explorer::InnovationRecord;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

#[test]
fn test_csv_round_trips_through_a_reader() {
    let mut tricky = record("Drip, \"low cost\"", "Technical", "Farm", "Kenya; Tanzania", "IWMI");
    tricky.description = "Challenge: Water\nSite: Machakos".to_string();
    let records = vec![tricky, record("Plain", "Digital", "Plot", "Ghana", "IITA")];

    let file = export(&records, ExportFormat::Csv, date()).unwrap();
    let mut reader = csv::Reader::from_reader(file.bytes.as_slice());

    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, EXPORT_HEADERS);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "Drip, \"low cost\"");
    assert_eq!(&rows[0][4], "N/A");
    assert_eq!(&rows[0][5], "Kenya; Tanzania");
    assert_eq!(&rows[0][6], "Challenge: Water\nSite: Machakos");
    assert_eq!(&rows[1][1], "IITA");
}

#[test]
fn test_csv_has_no_trailing_newline() {
    let records = vec![record("Plain", "Digital", "Plot", "Ghana", "IITA")];
    let file = export(&records, ExportFormat::Csv, date()).unwrap();

    assert_eq!(file.file_name, "innovations_2025-01-31.csv");
    assert!(!file.bytes.ends_with(b"\n"));
}

#[test]
fn test_xlsx_export_names_and_zips() {
    let records = sample_records();
    let file = export(&records, ExportFormat::Xlsx, date()).unwrap();

    assert_eq!(file.file_name, "innovations_2025-01-31.xlsx");
    assert_eq!(
        file.mime_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert!(file.bytes.starts_with(b"PK"));
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[test]
fn test_xlsx_round_trips_through_a_reader() {
    let mut with_climate = record("Zai pits", "Technical", "Plot", "Burkina Faso", "CIFOR-ICRAF");
    with_climate.climate_classification = "Semi-arid".to_string();
    let records = vec![
        record("Drip, \"low cost\"", "Technical", "Farm", "Kenya; Tanzania", "IWMI"),
        with_climate,
    ];

    let file = export(&records, ExportFormat::Xlsx, date()).unwrap();
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(file.bytes)).unwrap();

    assert_eq!(workbook.sheet_names(), vec!["Innovations".to_string()]);
    let range = workbook.worksheet_range("Innovations").unwrap().unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    assert_eq!(rows.len(), 1 + records.len());
    assert_eq!(rows[0], EXPORT_HEADERS);
    assert_eq!(
        rows[1],
        [
            "Drip, \"low cost\"",
            "IWMI",
            "Technical",
            "Farm",
            "N/A",
            "Kenya; Tanzania",
            "About Drip, \"low cost\"",
        ]
    );
    assert_eq!(rows[2][0], "Zai pits");
    assert_eq!(rows[2][4], "Semi-arid");
    assert_eq!(rows[2][5], "Burkina Faso");
}

#[test]
fn test_csv_quotes_carriage_returns() {
    let mut entry = record("Plain", "Digital", "Plot", "Ghana", "IITA");
    entry.description = "line one\rline two".to_string();

    let file = export(&[entry], ExportFormat::Csv, date()).unwrap();
    let text = String::from_utf8(file.bytes).unwrap();

    assert!(text.ends_with(",\"line one\rline two\""));
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[6], "line one\rline two");
}

#[test]
fn test_empty_selection_is_refused() {
    let records: Vec<InnovationRecord> = Vec::new();

    for format in [ExportFormat::Csv, ExportFormat::Xlsx] {
        let result = export(&records, format, date());
        assert!(matches!(result, Err(ExportError::NothingToExport)));
    }
}
