// * Exporter
// * Projects the filtered records onto the fixed 7-column download table
// * and serializes it as CSV or a single-sheet workbook.

pub mod csv;
pub mod xlsx;

use crate::config::constants::CLIMATE_FALLBACK;
use crate::ingest::record::InnovationRecord;
use crate::ops::telemetry;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::borrow::Borrow;
use thiserror::Error;

pub use self::csv::to_csv;
pub use self::xlsx::to_xlsx;

/// Column headers, in output order
pub const EXPORT_HEADERS: [&str; 7] = [
    "Innovation",
    "Centre (s) involved",
    "Type of Innovation / Technology/ Tool",
    "Scale",
    "Climate Classification",
    "Country",
    "Description",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No data to download")]
    NothingToExport,

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Export buffer error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet serialization failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

/// Download formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// `innovations_<YYYY-MM-DD>.<ext>`
    pub fn file_name(self, date: NaiveDate) -> String {
        format!("innovations_{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

/// One exported row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub innovation: String,
    /// Verbatim, not split
    pub centres_involved: String,
    pub type_of_innovation: String,
    pub scale: String,
    pub climate_classification: String,
    pub country: String,
    pub description: String,
}

impl ExportRow {
    pub fn from_record(record: &InnovationRecord) -> Self {
        let climate = match record.climate_classification.as_str() {
            "" => CLIMATE_FALLBACK.to_string(),
            c => c.to_string(),
        };

        Self {
            innovation: record.innovation.clone(),
            centres_involved: record.centres_involved.clone(),
            type_of_innovation: record.type_of_innovation.clone(),
            scale: record.scale.clone(),
            climate_classification: climate,
            country: record.country.clone(),
            description: record.description.clone(),
        }
    }

    /// Cells in [`EXPORT_HEADERS`] order
    pub fn cells(&self) -> [&str; 7] {
        [
            self.innovation.as_str(),
            self.centres_involved.as_str(),
            self.type_of_innovation.as_str(),
            self.scale.as_str(),
            self.climate_classification.as_str(),
            self.country.as_str(),
            self.description.as_str(),
        ]
    }
}

/// Projects records onto export rows, refusing an empty selection
pub fn export_rows<R: Borrow<InnovationRecord>>(records: &[R]) -> Result<Vec<ExportRow>, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    Ok(records
        .iter()
        .map(|r| ExportRow::from_record(r.borrow()))
        .collect())
}

/// A ready-to-download file
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Serializes `records` in `format`, naming the file after `date`
pub fn export<R: Borrow<InnovationRecord>>(
    records: &[R],
    format: ExportFormat,
    date: NaiveDate,
) -> Result<ExportFile, ExportError> {
    let rows = match export_rows(records) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(format = format.extension(), "Export refused: no rows");
            return Err(e);
        }
    };

    let bytes = match format {
        ExportFormat::Csv => to_csv(&rows)?,
        ExportFormat::Xlsx => to_xlsx(&rows)?,
    };

    telemetry::record_export(format.extension());
    tracing::info!(
        format = format.extension(),
        rows = rows.len(),
        bytes = bytes.len(),
        "Export generated"
    );

    Ok(ExportFile {
        file_name: format.file_name(date),
        mime_type: format.mime_type(),
        bytes,
    })
}

/// Today's date (UTC), for file names
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
