//! Month/year pairs as printed on payment cards.
//!
//! Most cards only show an expiration date. Switch and solo cards can also
//! carry a start date. Both are a month and a year with no day, so the
//! temporal questions are answered against the first or last second of
//! that month in UTC.
//!
//! # Example
//!
//! ```
//! use cardcheck::MonthYearPair;
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2010, 11, 1, 1, 0, 0).unwrap();
//!
//! let expiration = MonthYearPair::new(10, 2010);
//! assert!(expiration.is_valid());
//! assert!(expiration.end_of_month_is_past(now));
//!
//! // Month 49 never forms a calendar date.
//! let bogus = MonthYearPair::new(49, 2010);
//! assert!(!bogus.is_valid());
//! assert!(bogus.end_of_month().is_none());
//! assert!(!bogus.end_of_month_is_past(now));
//! ```

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

/// Default horizon, in years, for [`MonthYearPair::exceeds_recent_future`].
pub const RECENT_FUTURE_YEAR_LIMIT: u32 = 20;

/// A calendar month and year.
///
/// The pair keeps whatever it was given, including out-of-range months and
/// non-positive years, so that validation can report on that input.
/// Anything that cannot form a real date has no start or end of month, and
/// every predicate on it is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthYearPair {
    month: i32,
    year: i32,
}

impl MonthYearPair {
    /// Creates a pair from a month (expected 1-12) and a year.
    #[inline]
    pub const fn new(month: i32, year: i32) -> Self {
        Self { month, year }
    }

    /// Creates a pair from optional parts. A missing part becomes 0, which
    /// is never valid.
    #[inline]
    pub fn from_parts(month: Option<i32>, year: Option<i32>) -> Self {
        Self::new(month.unwrap_or(0), year.unwrap_or(0))
    }

    /// The month as given.
    #[inline]
    pub const fn month(&self) -> i32 {
        self.month
    }

    /// The year as given.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// True when the month is 1-12 and the year is positive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month) && self.year > 0
    }

    /// Midnight UTC on the first day of the month, or `None` if the pair
    /// does not form a calendar date.
    pub fn start_of_month(&self) -> Option<DateTime<Utc>> {
        let (first, _) = self.bounds()?;
        first.and_hms_opt(0, 0, 0).map(utc)
    }

    /// 23:59:59 UTC on the last day of the month, or `None` if the pair
    /// does not form a calendar date.
    pub fn end_of_month(&self) -> Option<DateTime<Utc>> {
        let (_, last) = self.bounds()?;
        last.and_hms_opt(23, 59, 59).map(utc)
    }

    /// Whether the last second of the month is before `now`.
    pub fn end_of_month_is_past(&self, now: DateTime<Utc>) -> bool {
        self.end_of_month().is_some_and(|end| now > end)
    }

    /// Whether the first second of the month is after `now`.
    pub fn start_of_month_is_future(&self, now: DateTime<Utc>) -> bool {
        self.start_of_month().is_some_and(|start| now < start)
    }

    /// Whether the last second of the month lies strictly beyond `now`
    /// advanced by `years` years.
    ///
    /// A month ending exactly on the horizon does not exceed it. Advancing
    /// from February 29th lands on February 28th in non-leap years.
    pub fn exceeds_recent_future(&self, now: DateTime<Utc>, years: u32) -> bool {
        let Some(end) = self.end_of_month() else {
            return false;
        };
        let Some(horizon) = years
            .checked_mul(12)
            .and_then(|months| now.checked_add_months(Months::new(months)))
        else {
            return false;
        };

        end > horizon
    }

    /// First and last calendar day of the month.
    fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let month = u32::try_from(self.month).ok()?;
        let first = NaiveDate::from_ymd_opt(self.year, month, 1)?;
        let last = if month == 12 {
            NaiveDate::from_ymd_opt(self.year, 12, 31)?
        } else {
            NaiveDate::from_ymd_opt(self.year, month + 1, 1)?.pred_opt()?
        };
        Some((first, last))
    }
}

fn utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&naive)
}

impl fmt::Display for MonthYearPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}
