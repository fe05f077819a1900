//! Date navigation and selection engine for calendar date pickers.
//!
//! The crate models what a date-picker widget does between input events and
//! rendering: stepping through days, weeks, months and years while skipping
//! disabled dates, committing single dates or ranges, and keeping the
//! displayed month in sync with the value. Drawing the grid and moving
//! keyboard focus stay with the host; [`DatePicker`] only tells it what to
//! show and where focus should go.

mod config;
mod consts;
mod grid;
mod keyboard;
mod locale;
mod navigation;
mod picker;
mod prelude;
mod range;
mod selection;
#[cfg(test)]
mod test_utils;
mod types;

pub use chrono::Weekday;
pub use config::{ConfigError, PickerConfig, ResolvedConfig, weekday_from_sunday_index};
pub use consts::*;
pub use grid::{CalendarRow, DayCell, build_rows, days_of_month};
pub use keyboard::{Key, KeyCommand, UnknownKey};
pub use locale::{PickerLocale, WeekdayName, long_date, month_names, weekday_names};
pub use navigation::{Direction, DisabledDates, NoDisabledDates, find_available};
pub use picker::{DatePicker, MonthChange, PickerEvent};
pub use range::{DateBounds, DateRange, RangeError, is_date_in_range};
pub use selection::SelectionValue;
pub use types::{Day, Month, Year, days_in_month, is_leap_year};

use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// A Gregorian calendar day with no time-of-day or timezone attached.
///
/// Values are always valid (the day exists in its month) and the year is in
/// `MIN_YEAR..=MAX_YEAR`. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Not a YYYY-MM-DD date: {_0:?}")]
    InvalidFormat(String),
    #[display(fmt = "Year {} is outside {}..={}", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Month {_0} does not exist")]
    InvalidMonth(u8),
    #[display(fmt = "{year}-{month:02} has no day {day}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "No date given")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from raw components (month is 1-based).
    ///
    /// # Errors
    /// Returns the matching `ParseError` variant for an out-of-range year,
    /// month or day.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year_typed = Year::new(year)?;
        let month_typed = Month::new(month)?;
        let day_typed = Day::new(day, year_typed, month_typed)?;
        Ok(Self {
            year: year_typed,
            month: month_typed,
            day: day_typed,
        })
    }

    /// Creates a date, pulling `day` into the month's valid range.
    pub fn from_parts_clamped(year: Year, month: Month, day: u8) -> Self {
        Self {
            year,
            month,
            day: Day::clamped(day, year, month),
        }
    }

    /// Today's date in the host's local timezone.
    pub fn today() -> Self {
        Self::saturating_from_naive(Local::now().date_naive())
    }

    /// Converts a chrono date, returning `None` when its year is outside
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        let year = u16::try_from(date.year()).ok()?;
        let month = u8::try_from(date.month()).ok()?;
        let day = u8::try_from(date.day()).ok()?;
        Self::new(year, month, day).ok()
    }

    /// Drops the time and offset of a timestamp, keeping the calendar day
    /// as seen in the timestamp's own timezone.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Option<Self> {
        Self::from_naive(datetime.date_naive())
    }

    fn saturating_from_naive(date: NaiveDate) -> Self {
        let year = Year::clamped(i64::from(date.year()));
        let month = Month::saturating(u8::try_from(date.month()).unwrap_or(JANUARY));
        let day = u8::try_from(date.day()).unwrap_or(MIN_DAY);
        Self::from_parts_clamped(year, month, day)
    }

    /// The same day as a chrono `NaiveDate`.
    pub fn to_naive(self) -> NaiveDate {
        // Every CalendarDate lies inside chrono's supported range.
        NaiveDate::from_ymd_opt(
            i32::from(self.year.get()),
            u32::from(self.month.get()),
            u32::from(self.day.get()),
        )
        .unwrap_or_default()
    }

    #[inline]
    pub const fn year(&self) -> Year {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> Month {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> Day {
        self.day
    }

    /// Day of the week
    pub fn weekday(&self) -> chrono::Weekday {
        self.to_naive().weekday()
    }

    /// `true` when both dates fall in the same calendar month of the same year.
    #[inline]
    pub fn is_same_month(&self, other: &Self) -> bool {
        self.year == other.year && self.month == other.month
    }
}

// --- day arithmetic ---
impl CalendarDate {
    /// Adds `n` days. Returns `None` past `MAX_YEAR`.
    pub fn add_days(self, n: u64) -> Option<Self> {
        self.to_naive()
            .checked_add_days(Days::new(n))
            .and_then(Self::from_naive)
    }

    /// Subtracts `n` days. Returns `None` before `MIN_YEAR`.
    pub fn sub_days(self, n: u64) -> Option<Self> {
        self.to_naive()
            .checked_sub_days(Days::new(n))
            .and_then(Self::from_naive)
    }

    /// Moves by a signed number of days.
    pub fn offset_days(self, n: i64) -> Option<Self> {
        if n >= 0 {
            self.add_days(n.unsigned_abs())
        } else {
            self.sub_days(n.unsigned_abs())
        }
    }

    pub fn next_day(self) -> Option<Self> {
        self.add_days(1)
    }

    pub fn previous_day(self) -> Option<Self> {
        self.sub_days(1)
    }
}

// --- month / year boundaries ---
impl CalendarDate {
    pub fn first_of_month(self) -> Self {
        Self::from_parts_clamped(self.year, self.month, MIN_DAY)
    }

    pub fn last_of_month(self) -> Self {
        Self::from_parts_clamped(self.year, self.month, self.month.len_in(self.year))
    }

    /// Same day-of-month in `month`, clamped to that month's length.
    pub fn with_month(self, month: Month) -> Self {
        Self::from_parts_clamped(self.year, month, self.day.get())
    }

    /// Same month and day in `year`; February 29 becomes February 28 in
    /// common years.
    pub fn with_year(self, year: Year) -> Self {
        Self::from_parts_clamped(year, self.month, self.day.get())
    }

    /// Same day-of-month in the following month, clamped.
    /// Returns `None` after December `MAX_YEAR`.
    pub fn next_month(self) -> Option<Self> {
        let (year, month) = if self.month.get() == DECEMBER {
            (Year::new(self.year.get().checked_add(1)?).ok()?, JANUARY)
        } else {
            (self.year, self.month.get() + 1)
        };
        Some(Self::from_parts_clamped(year, Month::new(month).ok()?, self.day.get()))
    }

    /// Same day-of-month in the preceding month, clamped.
    /// Returns `None` before January `MIN_YEAR`.
    pub fn previous_month(self) -> Option<Self> {
        let (year, month) = if self.month.get() == JANUARY {
            (Year::new(self.year.get().checked_sub(1)?).ok()?, DECEMBER)
        } else {
            (self.year, self.month.get() - 1)
        };
        Some(Self::from_parts_clamped(year, Month::new(month).ok()?, self.day.get()))
    }

    pub fn next_year(self) -> Option<Self> {
        let year = Year::new(self.year.get().checked_add(1)?).ok()?;
        Some(self.with_year(year))
    }

    pub fn previous_year(self) -> Option<Self> {
        let year = Year::new(self.year.get().checked_sub(1)?).ok()?;
        Some(self.with_year(year))
    }
}

/// Two dates denote the same calendar day.
#[inline]
pub fn is_same_day(a: &CalendarDate, b: &CalendarDate) -> bool {
    a == b
}

/// Parses `YYYY-MM-DD`, or a timestamp whose calendar day is taken as
/// written: RFC 3339 (`2022-01-01T10:00:00+02:00`) or a naive local
/// `YYYY-MM-DDTHH:MM[:SS]`.
///
/// # Errors
/// Returns `ParseError` when none of the accepted forms match.
pub fn parse_iso_date_or_local(s: &str) -> Result<CalendarDate, ParseError> {
    let trimmed = s.trim();
    let date_error = match trimmed.parse::<CalendarDate>() {
        Ok(date) => return Ok(date),
        Err(err) => err,
    };

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return CalendarDate::from_datetime(&datetime)
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return CalendarDate::from_naive(naive.date())
                .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()));
        }
    }

    Err(date_error)
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let mut fields = input.split(DATE_SEPARATOR);
        let (Some(year), Some(month), Some(day), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseError::InvalidFormat(input.to_owned()));
        };

        Self::new(digits(year)?, digits(month)?, digits(day)?)
    }
}

/// Unsigned decimal field. Signs, blanks and overflow are format errors so
/// that only range problems surface as `InvalidYear` and friends.
fn digits<T: FromStr>(field: &str) -> Result<T, ParseError> {
    let bad = || ParseError::InvalidFormat(field.to_owned());
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    field.parse().map_err(|_| bad())
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.to_naive()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_naive(value)
            .ok_or_else(|| ParseError::InvalidYear(u16::try_from(value.year()).unwrap_or(u16::MAX)))
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

pub(crate) fn midnight(date: CalendarDate) -> NaiveDateTime {
    date.to_naive().and_time(NaiveTime::default())
}
