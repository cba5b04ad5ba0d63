//! Workbook reading and XLSX writing
//!
//! Reading goes through calamine, so any workbook format it understands
//! loads. Cells shown as dates in the source come back as serial numbers with
//! the date format flag set, counted from 1899-12-30 even when the workbook
//! uses the 1904 date system. Writing produces a single-sheet XLSX in the
//! 1900 date system with a bold header row and `yyyy-mm-dd` on every date
//! cell.

use std::collections::BTreeSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, ExcelDateTime, ExcelDateTimeType, Reader};
use datestarts_core::{CellValue, Epoch, MemorySheet, Sheet, DATE_FORMAT, HEADER_ROW};
use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, warn};

use crate::SheetError;

/// Width given to columns holding dates
const DATE_COLUMN_WIDTH: f64 = 12.0;

/// Load a worksheet by name, or the first one
pub fn load(path: &Path, worksheet: Option<&str>) -> Result<MemorySheet, SheetError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SheetError::Read(e.to_string()))?;

    let available = workbook.sheet_names();
    let name = match worksheet {
        Some(name) if available.iter().any(|n| n == name) => name.to_string(),
        Some(name) => {
            return Err(SheetError::UnknownWorksheet {
                name: name.to_string(),
                available,
            })
        }
        None => available.first().cloned().ok_or(SheetError::NoWorksheets)?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| SheetError::Read(e.to_string()))?;

    let mut sheet = MemorySheet::new(&name);
    let (first_row, first_column) = range.start().unwrap_or((0, 0));
    for (row, column, data) in range.used_cells() {
        let row = first_row + row as u32;
        let column = first_column + column as u32;
        let (value, is_date) = cell_value(data);
        if value.is_empty() {
            continue;
        }
        sheet.set_value(row, column, value);
        if is_date {
            sheet.set_date_format(row, column);
        }
    }

    debug!(worksheet = %name, rows = sheet.row_count(), "loaded worksheet");
    Ok(sheet)
}

/// Convert a calamine cell; the flag marks cells displayed as dates
fn cell_value(data: &Data) -> (CellValue, bool) {
    match data {
        Data::Empty => (CellValue::Empty, false),
        Data::Int(i) => (CellValue::Number(*i as f64), false),
        Data::Float(f) => (CellValue::Number(*f), false),
        Data::String(s) => (CellValue::Text(s.clone()), false),
        Data::Bool(b) => (CellValue::Bool(*b), false),
        Data::DateTime(dt) => date_time_value(dt),
        // ODS stores dates as ISO date-times; keep the date part
        Data::DateTimeIso(s) => {
            let date = s.split('T').next().unwrap_or(s);
            (CellValue::text(date), true)
        }
        Data::DurationIso(s) => (CellValue::Text(s.clone()), false),
        Data::Error(e) => (CellValue::Text(e.to_string()), false),
    }
}

/// Date-times as 1900-system serials; durations stay plain numbers
fn date_time_value(dt: &ExcelDateTime) -> (CellValue, bool) {
    let value = dt.as_f64();
    if *dt == ExcelDateTime::new(value, ExcelDateTimeType::DateTime, true) {
        let shift = Epoch::spreadsheet().to_serial(Epoch::mac_1904().origin()) as f64;
        (CellValue::Number(value + shift), true)
    } else if *dt == ExcelDateTime::new(value, ExcelDateTimeType::DateTime, false) {
        (CellValue::Number(value), true)
    } else {
        (CellValue::Number(value), false)
    }
}

/// Render a sheet as XLSX bytes
pub fn to_bytes(sheet: &MemorySheet) -> Result<Vec<u8>, SheetError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    if let Err(e) = worksheet.set_name(sheet.name()) {
        warn!(name = sheet.name(), error = %e, "keeping default worksheet name");
    }

    let header = Format::new().set_bold();
    let date = Format::new().set_num_format(DATE_FORMAT);
    let mut date_columns = BTreeSet::new();

    for (row, cells) in sheet.rows().enumerate() {
        let row = row as u32;
        for (column, cell) in cells.iter().enumerate() {
            if cell.is_blank() {
                continue;
            }
            let col = u16::try_from(column).map_err(|_| SheetError::TooManyColumns(column))?;
            if cell.date_format {
                date_columns.insert(col);
            }

            let written = match (&cell.value, cell.date_format) {
                (CellValue::Text(s), _) if row == HEADER_ROW => {
                    worksheet.write_string_with_format(row, col, s, &header)
                }
                (CellValue::Number(n), true) => worksheet.write_number_with_format(row, col, *n, &date),
                (CellValue::Number(n), false) => worksheet.write_number(row, col, *n),
                (CellValue::Text(s), true) => worksheet.write_string_with_format(row, col, s, &date),
                (CellValue::Text(s), false) => worksheet.write_string(row, col, s),
                (CellValue::Bool(b), _) => worksheet.write_boolean(row, col, *b),
                (CellValue::Empty, _) => worksheet.write_blank(row, col, &date),
            };
            written.map_err(|e| SheetError::Write(e.to_string()))?;
        }
    }

    for col in date_columns {
        worksheet.set_column_width(col, DATE_COLUMN_WIDTH).ok();
    }

    workbook
        .save_to_buffer()
        .map_err(|e| SheetError::Write(format!("Failed to create Excel: {e}")))
}

/// Write a sheet to an XLSX file
pub fn save(sheet: &MemorySheet, path: &Path) -> Result<(), SheetError> {
    let bytes = to_bytes(sheet)?;
    std::fs::write(path, bytes)?;
    debug!(path = %path.display(), "saved workbook");
    Ok(())
}
