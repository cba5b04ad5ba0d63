//! Date bucketing
//!
//! Maps a date to the first day of the week, month, quarter and year that
//! contain it. Weeks start on Monday (ISO 8601); quarters start in January,
//! April, July and October.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar period a date can be bucketed into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Year,
    Quarter,
    Month,
    Week,
}

impl Bucket {
    /// All buckets, in the left-to-right order of the inserted columns
    pub const ALL: [Bucket; 4] = [Bucket::Year, Bucket::Quarter, Bucket::Month, Bucket::Week];

    /// Position of this bucket's column within the inserted block
    pub fn offset(self) -> u32 {
        match self {
            Bucket::Year => 0,
            Bucket::Quarter => 1,
            Bucket::Month => 2,
            Bucket::Week => 3,
        }
    }

    /// Header written above the bucket's column unless configured otherwise
    pub fn default_header(self) -> &'static str {
        match self {
            Bucket::Year => "Year Start",
            Bucket::Quarter => "Quarter Start",
            Bucket::Month => "Month Start",
            Bucket::Week => "Week Start",
        }
    }

    /// First day of the period of this kind containing `date`
    pub fn start_of(self, date: NaiveDate) -> NaiveDate {
        match self {
            Bucket::Year => year_start(date),
            Bucket::Quarter => quarter_start(date),
            Bucket::Month => month_start(date),
            Bucket::Week => week_start(date),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Year => "year",
            Bucket::Quarter => "quarter",
            Bucket::Month => "month",
            Bucket::Week => "week",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monday of the ISO week containing `date`
///
/// # Panics
///
/// If that Monday falls before [`NaiveDate::MIN`]. Dates coming out of
/// [`crate::DateReader`] never do; use [`checked_week_start`] for others.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    checked_week_start(date).expect("week start before the first representable date")
}

/// Monday of the ISO week containing `date`, `None` if chrono cannot
/// represent it
pub fn checked_week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    first_of(date.year(), date.month())
}

/// First day of the quarter (Jan/Apr/Jul/Oct) containing `date`
pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    let q_month = (date.month0() / 3) * 3 + 1;
    first_of(date.year(), q_month)
}

/// January 1st of the year containing `date`
pub fn year_start(date: NaiveDate) -> NaiveDate {
    first_of(date.year(), 1)
}

fn first_of(year: i32, month: u32) -> NaiveDate {
    // The first of any month is valid for every year chrono can represent
    NaiveDate::from_ymd_opt(year, month, 1).expect("first day of month is always valid")
}

/// A date together with the start of every period containing it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBuckets {
    pub date: NaiveDate,
    pub week_start: NaiveDate,
    pub month_start: NaiveDate,
    pub quarter_start: NaiveDate,
    pub year_start: NaiveDate,
}

impl DateBuckets {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            date,
            week_start: week_start(date),
            month_start: month_start(date),
            quarter_start: quarter_start(date),
            year_start: year_start(date),
        }
    }

    /// Start date for one bucket
    pub fn get(&self, bucket: Bucket) -> NaiveDate {
        match bucket {
            Bucket::Year => self.year_start,
            Bucket::Quarter => self.quarter_start,
            Bucket::Month => self.month_start,
            Bucket::Week => self.week_start,
        }
    }
}
