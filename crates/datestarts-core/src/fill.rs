//! The date-starts fill operation
//!
//! Inserts four columns (year, quarter, month and week start) to the left of
//! the selected date column, writes their headers, then walks down from the
//! first data row writing the start dates for each row. The walk stops at
//! the first row whose date cell yields no date.
//!
//! ```text
//! before:  | Date       |
//! after:   | Year Start | Quarter Start | Month Start | Week Start | Date       |
//!          | 2024-01-01 | 2024-01-01    | 2024-03-01  | 2024-03-11 | 2024-03-15 |
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Bucket, Column, DateBuckets, DateReader, Epoch, FillError, Row, Selection, Sheet,
    FIRST_DATA_ROW, HEADER_ROW,
};

/// Number of helper columns inserted
pub const BUCKET_COLUMNS: u32 = Bucket::ALL.len() as u32;

/// Header text for each inserted column
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BucketHeaders {
    pub year: String,
    pub quarter: String,
    pub month: String,
    pub week: String,
}

impl Default for BucketHeaders {
    fn default() -> Self {
        Self {
            year: Bucket::Year.default_header().into(),
            quarter: Bucket::Quarter.default_header().into(),
            month: Bucket::Month.default_header().into(),
            week: Bucket::Week.default_header().into(),
        }
    }
}

impl BucketHeaders {
    pub fn get(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Year => &self.year,
            Bucket::Quarter => &self.quarter,
            Bucket::Month => &self.month,
            Bucket::Week => &self.week,
        }
    }
}

/// Settings for [`insert_date_starts`]
#[derive(Clone, Debug, PartialEq)]
pub struct FillOptions {
    pub epoch: Epoch,
    pub zero_serial_is_blank: bool,
    pub headers: BucketHeaders,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            epoch: Epoch::default(),
            zero_serial_is_blank: true,
            headers: BucketHeaders::default(),
        }
    }
}

impl FillOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(mut self, epoch: Epoch) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn zero_serial_is_blank(mut self, blank: bool) -> Self {
        self.zero_serial_is_blank = blank;
        self
    }

    pub fn headers(mut self, headers: BucketHeaders) -> Self {
        self.headers = headers;
        self
    }

    fn reader(&self) -> DateReader {
        DateReader::new(self.epoch).zero_serial_is_blank(self.zero_serial_is_blank)
    }
}

/// One filled row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRow {
    /// Zero-based sheet row
    pub row: Row,
    #[serde(flatten)]
    pub buckets: DateBuckets,
}

/// Outcome of a fill
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FillReport {
    /// Column the helper columns were inserted at (now the year column)
    pub target_column: Column,
    /// Where the source date column ended up after the insertion
    pub date_column: Column,
    /// Row whose date cell ended the scan
    pub stop_row: Row,
    /// Filled rows, top to bottom
    pub rows: Vec<DateRow>,
}

impl FillReport {
    pub fn rows_filled(&self) -> usize {
        self.rows.len()
    }

    /// Column holding a bucket's start dates
    pub fn column_of(&self, bucket: Bucket) -> Column {
        self.target_column + bucket.offset()
    }
}

/// Insert the year/quarter/month/week start columns left of the selected
/// column and fill them down until the first row without a date.
pub fn insert_date_starts<S: Sheet + ?Sized>(
    sheet: &mut S,
    selection: &Selection,
    options: &FillOptions,
) -> Result<FillReport, FillError> {
    let target_column = match (selection.range_start_column, selection.cell_column) {
        (Some(column), _) => column,
        (None, Some(column)) => {
            debug!(column, "selection has no range, using the cell address");
            column
        }
        (None, None) => return Err(FillError::NoSelection),
    };

    let date_column = target_column
        .checked_add(BUCKET_COLUMNS)
        .ok_or(FillError::ColumnOutOfRange(target_column))?;
    sheet.insert_columns(target_column, BUCKET_COLUMNS);
    debug!(target_column, date_column, "inserted date start columns");

    for bucket in Bucket::ALL {
        sheet.set_text(HEADER_ROW, target_column + bucket.offset(), options.headers.get(bucket));
    }

    let reader = options.reader();
    let epoch = options.epoch;
    let mut rows = Vec::new();
    let mut row = FIRST_DATA_ROW;

    loop {
        let date = reader
            .read(&sheet.cell(row, date_column))
            .map_err(|e| FillError::SerialOutOfRange { row, serial: e.0 })?;
        let Some(date) = date else {
            break;
        };

        let buckets = DateBuckets::of(date);
        trace!(row, %date, "filling row");
        for bucket in Bucket::ALL {
            let column = target_column + bucket.offset();
            sheet.set_number(row, column, epoch.to_serial(buckets.get(bucket)) as f64);
            sheet.set_date_format(row, column);
        }
        sheet.set_date_format(row, date_column);

        rows.push(DateRow { row, buckets });
        row += 1;
    }

    debug!(rows = rows.len(), stop_row = row, "fill finished");
    Ok(FillReport {
        target_column,
        date_column,
        stop_row: row,
        rows,
    })
}
