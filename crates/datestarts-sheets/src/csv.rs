//! CSV reading and writing
//!
//! Every record is a row, including the first. Numeric fields load as
//! numbers, blank fields as empty cells, everything else as text. Each cell
//! keeps the field it was read from. On save, date-formatted numbers are
//! written as `YYYY-MM-DD`; other cells that still hold their loaded value
//! are written back exactly as read, so `02134` or `1.50` survive.

use std::path::Path;

use ::csv::{ReaderBuilder, WriterBuilder};
use datestarts_core::{CellValue, Epoch, MemoryCell, MemorySheet};
use tracing::debug;

use crate::SheetError;

/// Load a CSV file; the sheet is named after the file stem
pub fn load(path: &Path) -> Result<MemorySheet, SheetError> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1");
    let sheet = read(reader, name)?;
    debug!(path = %path.display(), rows = sheet.row_count(), "loaded CSV");
    Ok(sheet)
}

/// Parse CSV records from any reader
pub fn read<R: std::io::Read>(
    mut reader: ::csv::Reader<R>,
    name: &str,
) -> Result<MemorySheet, SheetError> {
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| MemoryCell::parsed(parse_field(field), field))
                .collect(),
        );
    }
    Ok(MemorySheet::from_cells(name, rows))
}

fn parse_field(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::text(field),
    }
}

/// Write a sheet to a CSV file
pub fn save(sheet: &MemorySheet, path: &Path, epoch: Epoch) -> Result<(), SheetError> {
    let writer = WriterBuilder::new().flexible(true).from_path(path)?;
    write(sheet, writer, epoch)?;
    debug!(path = %path.display(), "saved CSV");
    Ok(())
}

/// Write CSV records to any writer
pub fn write<W: std::io::Write>(
    sheet: &MemorySheet,
    mut writer: ::csv::Writer<W>,
    epoch: Epoch,
) -> Result<(), SheetError> {
    for cells in sheet.rows() {
        let fields: Vec<String> = cells.iter().map(|c| format_cell(c, epoch)).collect();
        writer.write_record(&fields)?;
    }
    writer.flush()?;
    Ok(())
}

fn format_cell(cell: &MemoryCell, epoch: Epoch) -> String {
    match (&cell.value, &cell.source) {
        (CellValue::Number(_), _) if cell.date_format => {}
        (_, Some(source)) => return source.clone(),
        _ => {}
    }
    match &cell.value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) if cell.date_format => {
            let date = (n.is_finite() && n.abs() < i64::MAX as f64)
                .then(|| epoch.to_date(n.trunc() as i64))
                .flatten();
            match date {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => n.to_string(),
            }
        }
        CellValue::Number(n) => n.to_string(),
        CellValue::Text(s) => s.clone(),
        CellValue::Bool(b) => b.to_string(),
    }
}
