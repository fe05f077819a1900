//! Shared helpers for unit tests.

use crate::{CalendarDate, Month, Year};

pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).expect("valid test date")
}

pub fn year(value: u16) -> Year {
    Year::new(value).expect("valid test year")
}

pub fn month(value: u8) -> Month {
    Month::new(value).expect("valid test month")
}

/// ISO strings for a row of grid slots, `-` for an empty slot.
pub fn iso(slots: &[Option<CalendarDate>]) -> Vec<String> {
    slots
        .iter()
        .map(|slot| slot.map_or_else(|| "-".to_owned(), |day| day.to_string()))
        .collect()
}
