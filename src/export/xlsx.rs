// * Spreadsheet serialization of export rows: one sheet, fixed column widths.

use super::{ExportError, ExportRow, EXPORT_HEADERS};
use crate::config::constants::{COLUMN_WIDTHS, SHEET_NAME};
use rust_xlsxwriter::Workbook;

pub fn to_xlsx(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, (header, width)) in EXPORT_HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
            let col = col as u16;
            sheet.set_column_width(col, width)?;
            sheet.write_string(0, col, *header)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let row_num = (idx + 1) as u32;
            for (col, cell) in row.cells().iter().enumerate() {
                sheet.write_string(row_num, col as u16, *cell)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
