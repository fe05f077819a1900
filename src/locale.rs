//! Locale-aware month and weekday names.
//!
//! Names come from chrono's bundled locale data (`unstable-locales`). Tags
//! are accepted in BCP-47 form (`de-DE`) as well as POSIX form (`de_DE`);
//! a bare language (`de`) maps to its primary region. Unknown tags fall back
//! to `en-US`.

use std::fmt;

use chrono::{Locale, TimeZone, Utc, Weekday};
use log::{debug, warn};
use serde::Serialize;

use crate::{CalendarDate, DEFAULT_LOCALE, MAX_MONTH, midnight};

/// A locale with name data available for formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerLocale {
    locale: Locale,
}

/// Short and long weekday name, e.g. `("Mon", "Monday")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayName {
    pub short: String,
    pub long: String,
}

/// Order of the parts in a locale's numeric date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    /// `dotted` when the day is followed by a dot, as in `03.02.2001`
    DayMonthYear { dotted: bool },
    MonthDayYear,
    YearMonthDay,
}

impl PickerLocale {
    /// Resolves a BCP-47 or POSIX locale tag.
    ///
    /// Returns `None` when chrono has no data for the tag.
    pub fn parse(tag: &str) -> Option<Self> {
        let normalized = normalize_tag(tag)?;
        if let Ok(locale) = Locale::try_from(normalized.as_str()) {
            return Some(Self { locale });
        }

        // "de" -> "de_DE", "fr" -> "fr_FR"
        if !normalized.contains('_') {
            let guess = format!("{normalized}_{}", normalized.to_ascii_uppercase());
            if let Ok(locale) = Locale::try_from(guess.as_str()) {
                return Some(Self { locale });
            }
        }
        None
    }

    /// Like [`PickerLocale::parse`], falling back to `en-US` for unknown tags.
    pub fn parse_or_default(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|| {
            warn!("Unknown locale {tag:?}, falling back to {DEFAULT_LOCALE}");
            Self::default()
        })
    }

    /// Locale of the host environment (`LC_ALL`, `LC_TIME`, then `LANG`).
    pub fn from_env() -> Self {
        let found = ["LC_ALL", "LC_TIME", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| Self::parse(&value));

        found.unwrap_or_else(|| {
            debug!("No usable locale in environment, using {DEFAULT_LOCALE}");
            Self::default()
        })
    }

    pub const fn chrono_locale(&self) -> Locale {
        self.locale
    }

    fn format(&self, date: CalendarDate, pattern: &str) -> String {
        Utc.from_utc_datetime(&midnight(date))
            .format_localized(pattern, self.locale)
            .to_string()
    }

    /// Reads the part order off the locale's numeric date format for
    /// 3 February 2001.
    fn date_order(&self) -> DateOrder {
        let Ok(sample) = CalendarDate::new(2001, 2, 3) else {
            return DateOrder::DayMonthYear { dotted: false };
        };
        let numeric = self.format(sample, "%x");
        let day = numeric.find("03");
        let month = numeric.find("02");
        let year = numeric.find("2001").or_else(|| numeric.find("01"));

        match (day, month, year) {
            (Some(day), Some(month), Some(year)) if year < month && month < day => {
                DateOrder::YearMonthDay
            }
            (Some(day), Some(month), _) if month < day => DateOrder::MonthDayYear,
            (Some(day), _, _) => DateOrder::DayMonthYear {
                dotted: numeric[day + 2..].starts_with('.'),
            },
            _ => DateOrder::DayMonthYear { dotted: false },
        }
    }
}

impl Default for PickerLocale {
    fn default() -> Self {
        Self { locale: Locale::en_US }
    }
}

impl fmt::Display for PickerLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.locale)
    }
}

/// Strips encoding/modifier suffixes (`de_DE.UTF-8@euro`) and switches
/// BCP-47 separators to POSIX ones.
fn normalize_tag(tag: &str) -> Option<String> {
    let base = tag.split(['.', '@']).next()?.trim();
    if base.is_empty() || base.eq_ignore_ascii_case("C") || base.eq_ignore_ascii_case("POSIX") {
        return None;
    }

    let mut parts = base.split(['-', '_']);
    let language = parts.next()?.to_ascii_lowercase();
    match parts.next() {
        Some(region) if !region.is_empty() => {
            Some(format!("{language}_{}", region.to_ascii_uppercase()))
        }
        _ => Some(language),
    }
}

/// The seven weekday names starting at `first_day_of_week`.
pub fn weekday_names(first_day_of_week: Weekday, locale: &PickerLocale) -> Vec<WeekdayName> {
    // 2023-01-01 was a Sunday; any week works as a source of names.
    let Ok(sunday) = CalendarDate::new(2023, 1, 1) else {
        return Vec::new();
    };
    let offset = u64::from(first_day_of_week.num_days_from_sunday());

    (0..7)
        .filter_map(|i| sunday.add_days(offset + i))
        .map(|day| WeekdayName {
            short: locale.format(day, "%a"),
            long: locale.format(day, "%A"),
        })
        .collect()
}

/// The twelve month names, January first.
pub fn month_names(locale: &PickerLocale) -> Vec<String> {
    (1..=MAX_MONTH)
        .filter_map(|m| CalendarDate::new(2000, m, 1).ok())
        .map(|first| locale.format(first, "%B"))
        .collect()
}

/// A spelled-out date used for accessible labels.
///
/// Day, month name and year follow the order of the locale's numeric dates:
/// `May 16, 1989` in `en-US`, `16 May 1989` in `en-GB`, `16. Mai 1989` in
/// `de-DE` and `1989 5月 16` in `ja-JP`.
pub fn long_date(date: CalendarDate, locale: &PickerLocale) -> String {
    let day = date.day().get();
    let month = locale.format(date, "%B");
    let year = date.year().get();

    match locale.date_order() {
        DateOrder::MonthDayYear => format!("{month} {day}, {year}"),
        DateOrder::YearMonthDay => format!("{year} {month} {day}"),
        DateOrder::DayMonthYear { dotted: true } => format!("{day}. {month} {year}"),
        DateOrder::DayMonthYear { dotted: false } => format!("{day} {month} {year}"),
    }
}
