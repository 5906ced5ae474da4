//! Workbook encoding
//!
//! Turns a `SnapshotTable` into OOXML spreadsheet bytes: one worksheet, a
//! header row, then one row per record.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use roster_core::errors::{ExError, ExErrorKind};
use roster_core::snapshot::{Cell, SnapshotTable};
use rust_xlsxwriter::{Workbook, XlsxError};

fn encode_error(err: XlsxError) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("encode_workbook")
        .with_message(err.to_string())
}

/// Encode the table as an `.xlsx` document held in memory
///
/// # Errors
/// `Serialization` if the table does not fit a worksheet or encoding fails.
pub fn encode_workbook(table: &SnapshotTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(table.sheet_name()).map_err(encode_error)?;

    for (col, title) in table.headers().iter().enumerate() {
        sheet
            .write_string(0, col as u16, *title)
            .map_err(encode_error)?;
    }

    for (idx, row) in table.rows().iter().enumerate() {
        let row_num = u32::try_from(idx + 1).map_err(|_| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("encode_workbook")
                .with_message(format!("row index {} out of range", idx + 1))
        })?;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => {
                    sheet
                        .write_string(row_num, col as u16, text)
                        .map_err(encode_error)?;
                }
                Cell::Number(value) => {
                    sheet
                        .write_number(row_num, col as u16, *value)
                        .map_err(encode_error)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save_to_buffer().map_err(encode_error)
}
