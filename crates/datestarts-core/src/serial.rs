//! Serial day numbers
//!
//! Spreadsheet engines store dates as a count of days since a fixed epoch.
//! The conventional epoch is 1899-12-30, which makes serial 1 fall on
//! 1899-12-31 and keeps serials for dates after February 1900 in step with
//! the historical Lotus numbering. Legacy Mac workbooks count from
//! 1904-01-01 instead.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reference date for serial day numbers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Epoch {
    origin: NaiveDate,
}

impl Default for Epoch {
    fn default() -> Self {
        Self::spreadsheet()
    }
}

impl Epoch {
    pub fn new(origin: NaiveDate) -> Self {
        Self { origin }
    }

    /// The 1899-12-30 day zero used by Calc, Excel (1900 system) and Sheets
    pub fn spreadsheet() -> Self {
        Self::new(NaiveDate::from_ymd_opt(1899, 12, 30).expect("1899-12-30 is a valid date"))
    }

    /// The 1904-01-01 day zero of the Excel 1904 date system
    pub fn mac_1904() -> Self {
        Self::new(NaiveDate::from_ymd_opt(1904, 1, 1).expect("1904-01-01 is a valid date"))
    }

    /// The date serial 0 refers to
    pub fn origin(&self) -> NaiveDate {
        self.origin
    }

    /// Serial day number of `date`
    pub fn to_serial(&self, date: NaiveDate) -> i64 {
        (date - self.origin).num_days()
    }

    /// Date for a serial day number, `None` outside chrono's date range
    pub fn to_date(&self, serial: i64) -> Option<NaiveDate> {
        if serial >= 0 {
            self.origin.checked_add_days(Days::new(serial.unsigned_abs()))
        } else {
            self.origin.checked_sub_days(Days::new(serial.unsigned_abs()))
        }
    }
}
