//! In-memory sheet document
//!
//! `MemorySheet` is the document the file adapters load into and save from.
//! It keeps a ragged grid of cells; reads past the end of a row or past the
//! last row return `CellValue::Empty`.

use crate::{CellValue, Column, Row, Sheet};

/// A cell with its display state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryCell {
    pub value: CellValue,
    /// Display the value with [`crate::DATE_FORMAT`]
    pub date_format: bool,
    /// Text the value was parsed from; cleared when the value is replaced
    pub source: Option<String>,
}

impl MemoryCell {
    /// A cell loaded from text, remembering that text
    pub fn parsed(value: CellValue, source: impl Into<String>) -> Self {
        Self {
            value,
            date_format: false,
            source: Some(source.into()),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.is_empty() && !self.date_format
    }
}

/// A named worksheet held in memory
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemorySheet {
    name: String,
    rows: Vec<Vec<MemoryCell>>,
}

impl MemorySheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Build a sheet from rows of plain values
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|value| MemoryCell {
                        value,
                        ..MemoryCell::default()
                    })
                    .collect()
            })
            .collect();
        Self::from_cells(name, rows)
    }

    pub fn from_cells(name: impl Into<String>, rows: Vec<Vec<MemoryCell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows up to the last one holding any cell
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Width of the widest row
    pub fn column_count(&self) -> u32 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }

    pub fn get(&self, row: Row, column: Column) -> Option<&MemoryCell> {
        self.rows.get(row as usize)?.get(column as usize)
    }

    pub fn is_date_formatted(&self, row: Row, column: Column) -> bool {
        self.get(row, column).is_some_and(|c| c.date_format)
    }

    /// Rows as slices of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[MemoryCell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Store a value, growing the grid as needed
    pub fn set_value(&mut self, row: Row, column: Column, value: CellValue) {
        let cell = self.cell_mut(row, column);
        cell.value = value;
        cell.source = None;
    }

    /// Column whose header row text equals `header` (surrounding whitespace ignored)
    pub fn find_header(&self, header: &str) -> Option<Column> {
        let header = header.trim();
        self.rows
            .get(crate::HEADER_ROW as usize)?
            .iter()
            .position(|c| c.value.as_text().is_some_and(|t| t.trim() == header))
            .map(|i| i as Column)
    }

    fn cell_mut(&mut self, row: Row, column: Column) -> &mut MemoryCell {
        let (row, column) = (row as usize, column as usize);
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize_with(column + 1, MemoryCell::default);
        }
        &mut cells[column]
    }
}

impl Sheet for MemorySheet {
    fn insert_columns(&mut self, before: Column, count: u32) {
        let at = before as usize;
        for cells in &mut self.rows {
            if cells.len() > at {
                cells.splice(at..at, (0..count).map(|_| MemoryCell::default()));
            }
        }
    }

    fn cell(&self, row: Row, column: Column) -> CellValue {
        self.get(row, column)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    fn set_number(&mut self, row: Row, column: Column, value: f64) {
        self.set_value(row, column, CellValue::Number(value));
    }

    fn set_text(&mut self, row: Row, column: Column, value: &str) {
        self.set_value(row, column, CellValue::text(value));
    }

    fn set_date_format(&mut self, row: Row, column: Column) {
        self.cell_mut(row, column).date_format = true;
    }
}
