// * CSV serialization of export rows.
// * Fields holding a comma, quote, newline or carriage return are quoted with inner quotes doubled.

use super::{ExportError, ExportRow, EXPORT_HEADERS};
use ::csv::{QuoteStyle, Terminator, WriterBuilder};

pub fn to_csv(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        // ! Also quotes fields holding a bare '\r', not only comma, quote and newline
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }

    let mut bytes = writer.into_inner().map_err(|e| e.into_error())?;
    // * Rows are newline-joined: no terminator after the last one
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(bytes)
}
