//! Reading dates out of cells
//!
//! A cell yields a date when it holds a non-zero serial number, or text in
//! ISO-8601 `YYYY-MM-DD` form. Anything else yields no date, which is how
//! the fill operation detects the end of the data.

use chrono::NaiveDate;

use crate::{checked_week_start, CellValue, Epoch, InvalidSerial};

/// Turns cell values into dates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateReader {
    epoch: Epoch,
    zero_serial_is_blank: bool,
}

impl Default for DateReader {
    fn default() -> Self {
        Self::new(Epoch::default())
    }
}

impl DateReader {
    pub fn new(epoch: Epoch) -> Self {
        Self {
            epoch,
            zero_serial_is_blank: true,
        }
    }

    /// Whether a numeric 0 reads as blank (default) or as the epoch date
    ///
    /// Host documents report an empty cell's numeric value as 0, so with the
    /// default a real date on the epoch itself is indistinguishable from an
    /// empty cell.
    pub fn zero_serial_is_blank(mut self, blank: bool) -> Self {
        self.zero_serial_is_blank = blank;
        self
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Date held by `cell`, `Ok(None)` if it holds none
    ///
    /// Fractional serials are truncated toward zero (the time of day is
    /// dropped). Booleans never hold a date, although Calc gives `TRUE` the
    /// numeric value 1. Every date returned can be bucketed; a serial whose
    /// week start chrono cannot represent is an [`InvalidSerial`], and such
    /// ISO text yields no date.
    pub fn read(&self, cell: &CellValue) -> Result<Option<NaiveDate>, InvalidSerial> {
        match cell {
            CellValue::Number(n) if *n != 0.0 || !self.zero_serial_is_blank => {
                self.serial_to_date(*n).map(Some)
            }
            CellValue::Number(_) | CellValue::Empty | CellValue::Bool(_) => Ok(None),
            CellValue::Text(s) => {
                Ok(parse_iso_date(s).filter(|d| checked_week_start(*d).is_some()))
            }
        }
    }

    fn serial_to_date(&self, serial: f64) -> Result<NaiveDate, InvalidSerial> {
        let days = serial.trunc();
        if !days.is_finite() || days < i64::MIN as f64 || days > i64::MAX as f64 {
            return Err(InvalidSerial(serial));
        }
        self.epoch
            .to_date(days as i64)
            .filter(|d| checked_week_start(*d).is_some())
            .ok_or(InvalidSerial(serial))
    }
}

/// Parse trimmed `YYYY-MM-DD` text; blank or malformed text is `None`
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<NaiveDate>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn numeric_serial_is_preferred() {
        let reader = DateReader::default();
        assert_eq!(reader.read(&CellValue::Number(45366.0)), Ok(Some(date(2024, 3, 15))));
    }

    #[test]
    fn fractional_serial_drops_time_of_day() {
        let reader = DateReader::default();
        assert_eq!(reader.read(&CellValue::Number(45366.75)), Ok(Some(date(2024, 3, 15))));
        // Truncation goes toward zero, like an integer cast
        assert_eq!(reader.read(&CellValue::Number(-1.5)), Ok(Some(date(1899, 12, 29))));
    }

    #[test]
    fn iso_text_fallback_is_trimmed() {
        let reader = DateReader::default();
        assert_eq!(reader.read(&CellValue::text("  2024-01-02 ")), Ok(Some(date(2024, 1, 2))));
    }

    #[test]
    fn blank_and_malformed_text_yield_no_date() {
        let reader = DateReader::default();
        assert_eq!(reader.read(&CellValue::text("   ")), Ok(None));
        assert_eq!(reader.read(&CellValue::text("15/03/2024")), Ok(None));
        assert_eq!(reader.read(&CellValue::text("2024-02-30")), Ok(None));
        assert_eq!(reader.read(&CellValue::Empty), Ok(None));
        assert_eq!(reader.read(&CellValue::Bool(true)), Ok(None));
    }

    #[test]
    fn numeric_text_is_not_a_serial() {
        let reader = DateReader::default();
        assert_eq!(reader.read(&CellValue::text("45366")), Ok(None));
    }

    #[test]
    fn zero_serial_reads_as_blank_by_default() {
        let reader = DateReader::default();
        assert_eq!(reader.read(&CellValue::Number(0.0)), Ok(None));
    }

    #[test]
    fn zero_serial_can_read_as_epoch() {
        let reader = DateReader::default().zero_serial_is_blank(false);
        assert_eq!(reader.read(&CellValue::Number(0.0)), Ok(Some(date(1899, 12, 30))));
    }

    #[test]
    fn non_finite_or_huge_serials_are_errors() {
        let reader = DateReader::default();
        assert!(reader.read(&CellValue::Number(f64::NAN)).is_err());
        assert!(reader.read(&CellValue::Number(f64::INFINITY)).is_err());
        assert!(reader.read(&CellValue::Number(1e15)).is_err());
    }

    #[test]
    fn serials_at_the_start_of_the_calendar() {
        let reader = DateReader::default();
        let first_day = Epoch::default().to_serial(NaiveDate::MIN) as f64;
        assert_eq!(reader.read(&CellValue::Number(first_day)), Err(InvalidSerial(first_day)));

        // A week later the Monday is representable again
        let week_later = first_day + 7.0;
        let read = reader.read(&CellValue::Number(week_later)).unwrap().unwrap();
        assert_eq!(crate::DateBuckets::of(read).date, read);
    }

    #[test]
    fn zero_serial_on_an_unbucketable_epoch_is_an_error() {
        let reader = DateReader::new(Epoch::new(NaiveDate::MIN)).zero_serial_is_blank(false);
        assert_eq!(reader.read(&CellValue::Number(0.0)), Err(InvalidSerial(0.0)));
    }

    #[test]
    fn mac_epoch_shifts_serials() {
        let reader = DateReader::new(Epoch::mac_1904());
        assert_eq!(reader.read(&CellValue::Number(1.0)), Ok(Some(date(1904, 1, 2))));
    }
}
