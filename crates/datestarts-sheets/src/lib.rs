//! # datestarts-sheets
//!
//! File adapters for datestarts sheets.
//!
//! This crate provides:
//! - XLSX reading (also XLSM, XLSB, XLS and ODS) via calamine
//! - XLSX writing via rust_xlsxwriter, with date cells shown as `yyyy-mm-dd`
//! - CSV reading and writing, with date cells written as ISO text
//!
//! All formats load into a [`MemorySheet`], which the fill operation edits
//! in place before it is saved again.
//!
//! ## Example
//!
//! ```rust,ignore
//! use datestarts_core::{insert_date_starts, Epoch, FillOptions, Selection};
//! use datestarts_sheets::{load_sheet, save_sheet};
//!
//! let mut sheet = load_sheet("orders.xlsx".as_ref(), None)?;
//! insert_date_starts(&mut sheet, &Selection::cell(2), &FillOptions::new())?;
//! save_sheet(&sheet, "orders.xlsx".as_ref(), Epoch::default())?;
//! ```

pub mod csv;
pub mod xlsx;

use std::path::{Path, PathBuf};

use datestarts_core::{Epoch, MemorySheet};
use thiserror::Error;

/// Sheet loading or saving error
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read workbook: {0}")]
    Read(String),

    #[error("Failed to write workbook: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Workbook has no worksheets")]
    NoWorksheets,

    #[error("Worksheet '{name}' not found (available: {})", .available.join(", "))]
    UnknownWorksheet { name: String, available: Vec<String> },

    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Cannot write {}: only .xlsx, .xlsm and .csv can be written", .0.display())]
    ReadOnlyFormat(PathBuf),

    #[error("Column {0} is beyond the XLSX column limit")]
    TooManyColumns(usize),
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Office Open XML workbook (.xlsx, .xlsm), readable and writable
    Xlsx,
    /// Other workbook formats (.xlsb, .xls, .ods), read only
    Workbook,
    /// Comma separated values (.csv)
    Csv,
}

/// Detect file format from extension
pub fn detect_format(path: &Path) -> Result<FileFormat, SheetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("xlsx" | "xlsm") => Ok(FileFormat::Xlsx),
        Some("xlsb" | "xls" | "ods") => Ok(FileFormat::Workbook),
        Some("csv") => Ok(FileFormat::Csv),
        _ => Err(SheetError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load one worksheet from a file (auto-detects format)
///
/// `worksheet` picks a sheet by name in workbook formats; the first sheet is
/// used when it is `None`. CSV files hold a single sheet and ignore it.
pub fn load_sheet(path: &Path, worksheet: Option<&str>) -> Result<MemorySheet, SheetError> {
    match detect_format(path)? {
        FileFormat::Xlsx | FileFormat::Workbook => xlsx::load(path, worksheet),
        FileFormat::Csv => csv::load(path),
    }
}

/// Save a sheet to a file (format from the extension)
///
/// `epoch` converts date serials back to calendar dates for CSV output.
pub fn save_sheet(sheet: &MemorySheet, path: &Path, epoch: Epoch) -> Result<(), SheetError> {
    match detect_format(path)? {
        FileFormat::Xlsx => xlsx::save(sheet, path),
        FileFormat::Csv => csv::save(sheet, path, epoch),
        FileFormat::Workbook => Err(SheetError::ReadOnlyFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_formats_case_insensitively() {
        assert_eq!(detect_format(Path::new("a.xlsx")).unwrap(), FileFormat::Xlsx);
        assert_eq!(detect_format(Path::new("a.XLSM")).unwrap(), FileFormat::Xlsx);
        assert_eq!(detect_format(Path::new("a.ods")).unwrap(), FileFormat::Workbook);
        assert_eq!(detect_format(Path::new("dir/a.Csv")).unwrap(), FileFormat::Csv);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = detect_format(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, SheetError::UnsupportedFormat(_)));
        assert!(detect_format(Path::new("no_extension")).is_err());
    }

    #[test]
    fn legacy_workbooks_cannot_be_written() {
        let sheet = MemorySheet::new("Sheet1");
        let err = save_sheet(&sheet, Path::new("out.ods"), Epoch::default()).unwrap_err();
        assert!(matches!(err, SheetError::ReadOnlyFormat(_)));
    }

    #[test]
    fn unknown_worksheet_lists_alternatives() {
        let err = SheetError::UnknownWorksheet {
            name: "Q3".into(),
            available: vec!["Q1".into(), "Q2".into()],
        };
        assert_eq!(err.to_string(), "Worksheet 'Q3' not found (available: Q1, Q2)");
    }
}
