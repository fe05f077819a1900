//! Validated year, month and day components.

use std::fmt;
use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::consts::{FEBRUARY, JANUARY, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR};

/// A calendar year in `MIN_YEAR..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(u16);

impl Year {
    pub const MIN: Self = Self(MIN_YEAR);
    pub const MAX: Self = Self(MAX_YEAR);

    /// # Errors
    /// Returns `ParseError::InvalidYear` above `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        (MIN_YEAR..=MAX_YEAR)
            .contains(&value)
            .then_some(Self(value))
            .ok_or(ParseError::InvalidYear(value))
    }

    /// Pulls any integer into the supported range. Free-form year input
    /// (a number field, a config value) goes through here.
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(MIN_YEAR), i64::from(MAX_YEAR));
        u16::try_from(bounded).map_or(Self::MAX, Self)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.0)
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A month, January = 1.
///
/// Month-select widgets index months from zero; [`Month::from_index0`] and
/// [`Month::index0`] convert at that boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// Returns `ParseError::InvalidMonth` for 0 or anything past December.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|m| m.get() <= MAX_MONTH)
            .map(Self)
            .ok_or(ParseError::InvalidMonth(value))
    }

    /// # Errors
    /// Returns `ParseError::InvalidMonth` for an index past 11.
    pub fn from_index0(index: u8) -> Result<Self, ParseError> {
        index
            .checked_add(1)
            .ok_or(ParseError::InvalidMonth(index))
            .and_then(Self::new)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    #[inline]
    pub const fn index0(self) -> u8 {
        self.0.get() - 1
    }

    /// Number of days this month has in `year`.
    pub const fn len_in(self, year: Year) -> u8 {
        days_in_month(year.get(), self.get())
    }

    pub(crate) fn saturating(value: u8) -> Self {
        Self::new(value.clamp(JANUARY, MAX_MONTH)).unwrap_or(Self(NonZeroU8::MIN))
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A day of the month. Only constructible together with the month it
/// belongs to, so it is always valid there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// # Errors
    /// Returns `ParseError::InvalidDay` for 0 or a day past the end of
    /// `month` in `year`.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|d| d.get() <= month.len_in(year))
            .map(Self)
            .ok_or(ParseError::InvalidDay {
                month: month.get(),
                day: value,
                year: year.get(),
            })
    }

    /// Pulls `value` into the days `month` has, so that keeping the
    /// day-of-month across a month or year change turns January 31 into
    /// February 28 (or 29).
    pub fn clamped(value: u8, year: Year, month: Month) -> Self {
        let last = month.len_in(year);
        Self::new(value.clamp(MIN_DAY, last), year, month).unwrap_or(Self(NonZeroU8::MIN))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Gregorian rule: every fourth year, except centuries not divisible by 400.
pub const fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Length of `month` (1-based) in `year`. Out-of-range months count as 31.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        FEBRUARY if is_leap_year(year) => 29,
        FEBRUARY => 28,
        _ => 31,
    }
}
