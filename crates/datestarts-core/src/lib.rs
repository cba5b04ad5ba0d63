//! # datestarts-core
//!
//! Core logic for the datestarts column filler.
//!
//! This crate provides:
//! - Date bucketing: week, month, quarter and year start of a date
//! - Serial day numbers relative to a spreadsheet epoch
//! - Cell parsing rules (numeric serial first, ISO-8601 text fallback)
//! - The `Sheet` trait, the narrow interface to a host spreadsheet
//! - `insert_date_starts`, which inserts and fills the four helper columns
//!
//! ## Example
//!
//! ```rust
//! use datestarts_core::{insert_date_starts, CellValue, FillOptions, MemorySheet, Selection};
//!
//! let mut sheet = MemorySheet::from_rows(
//!     "Orders",
//!     vec![
//!         vec![CellValue::text("Date")],
//!         vec![CellValue::text("2024-03-15")],
//!     ],
//! );
//!
//! let report = insert_date_starts(&mut sheet, &Selection::cell(0), &FillOptions::default()).unwrap();
//! assert_eq!(report.rows_filled(), 1);
//! assert_eq!(report.date_column, 4);
//! ```

pub mod bucket;
pub mod cell;
pub mod fill;
pub mod memory;
pub mod serial;

pub use bucket::{
    checked_week_start, month_start, quarter_start, week_start, year_start, Bucket, DateBuckets,
};
pub use cell::DateReader;
pub use fill::{insert_date_starts, BucketHeaders, DateRow, FillOptions, FillReport};
pub use memory::{MemoryCell, MemorySheet};
pub use serial::Epoch;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Type Aliases and Constants
// ============================================================================

/// Zero-based row index within a sheet
pub type Row = u32;

/// Zero-based column index within a sheet
pub type Column = u32;

/// Row holding the column headers
pub const HEADER_ROW: Row = 0;

/// First row scanned for dates (the row right below the headers)
pub const FIRST_DATA_ROW: Row = 1;

/// Display pattern applied to every cell that holds a date serial
pub const DATE_FORMAT: &str = "yyyy-mm-dd";

// ============================================================================
// Cells
// ============================================================================

/// Value of a single spreadsheet cell
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Blank cell, or a position outside the used area
    #[default]
    Empty,
    /// Numeric value (dates are stored as serial day numbers)
    Number(f64),
    /// Text value
    Text(String),
    /// Boolean value
    Bool(bool),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric value, if the cell holds a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text value, if the cell holds text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

// ============================================================================
// Selection
// ============================================================================

/// The user's selection in the host document
///
/// A range selection carries a start column; a single cell selection only
/// carries the cell's column. The target column is taken from the range
/// first and falls back to the cell address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// First column of a selected range
    pub range_start_column: Option<Column>,
    /// Column of a selected single cell
    pub cell_column: Option<Column>,
}

impl Selection {
    /// Selection of a single cell in `column`
    pub fn cell(column: Column) -> Self {
        Self {
            range_start_column: None,
            cell_column: Some(column),
        }
    }

    /// Selection of a range starting at `start_column`
    pub fn range(start_column: Column) -> Self {
        Self {
            range_start_column: Some(start_column),
            cell_column: None,
        }
    }

    /// Column the helper columns are inserted in front of
    pub fn target_column(&self) -> Option<Column> {
        self.range_start_column.or(self.cell_column)
    }
}

// ============================================================================
// Host Interface
// ============================================================================

/// Narrow interface to a host spreadsheet document
///
/// Everything the fill operation needs from the host: read a cell, write a
/// number or a string, insert columns, and mark a cell for date display.
pub trait Sheet {
    /// Insert `count` blank columns before `before`, shifting existing
    /// cells at or right of it
    fn insert_columns(&mut self, before: Column, count: u32);

    /// Read a cell; positions outside the used area are `CellValue::Empty`
    fn cell(&self, row: Row, column: Column) -> CellValue;

    /// Write a numeric value
    fn set_number(&mut self, row: Row, column: Column, value: f64);

    /// Write a string value
    fn set_text(&mut self, row: Row, column: Column, value: &str);

    /// Display the cell with [`DATE_FORMAT`]
    fn set_date_format(&mut self, row: Row, column: Column);
}

// ============================================================================
// Errors
// ============================================================================

/// Fill operation error
#[derive(Debug, Error, PartialEq)]
pub enum FillError {
    #[error("Selection does not identify a column")]
    NoSelection,

    #[error("Serial {serial} in row {} is outside the supported date range", .row + 1)]
    SerialOutOfRange { row: Row, serial: f64 },

    #[error("No room for the date start columns before column {}", .0 + 1)]
    ColumnOutOfRange(Column),
}

/// A numeric cell that cannot be turned into a date
#[derive(Debug, Error, PartialEq)]
#[error("Serial {0} is outside the supported date range")]
pub struct InvalidSerial(pub f64);
