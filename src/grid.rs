//! Month matrices for calendar rendering.

use std::iter;

use chrono::Weekday;
use serde::Serialize;

use crate::{CalendarDate, DAYS_IN_WEEK};

/// One week of the calendar, left to right. A slot is `None` only where the
/// week runs past the first or last supported day.
pub type CalendarRow = [Option<CalendarDate>; DAYS_IN_WEEK];

/// Column of `day` in a week starting on `first_day_of_week`, 0-based.
fn column(day: Weekday, first_day_of_week: Weekday) -> u32 {
    (day.num_days_from_monday() + 7 - first_day_of_week.num_days_from_monday()) % 7
}

/// Every day of `date`'s month in order.
///
/// With `pad`, the sequence is extended backwards to the nearest
/// `first_day_of_week` and forwards to the day before it, so the result is
/// made of whole weeks. January of year 0 and December of year 9999 get no
/// padding on their outer side, so their result may fall short of whole
/// weeks; [`build_rows`] keeps such months aligned.
pub fn days_of_month(
    date: CalendarDate,
    pad: bool,
    first_day_of_week: Weekday,
) -> Vec<CalendarDate> {
    let first = date.first_of_month();
    let last = date.last_of_month();

    let (leading, trailing) = if pad {
        let lead = column(first.weekday(), first_day_of_week);
        let trail = 6 - column(last.weekday(), first_day_of_week);
        (u64::from(lead), u64::from(trail))
    } else {
        (0, 0)
    };

    let start = first.sub_days(leading).unwrap_or(first);
    let end = last.add_days(trailing).unwrap_or(last);

    let mut days = Vec::with_capacity(6 * DAYS_IN_WEEK);
    let mut cursor = Some(start);
    while let Some(day) = cursor.filter(|day| *day <= end) {
        days.push(day);
        cursor = day.next_day();
    }
    days
}

/// The padded month around `reference`, split into weeks.
///
/// Every day of the month is present and sits in the column of its
/// weekday. Slots before year 0 or after year 9999 are `None`.
pub fn build_rows(reference: CalendarDate, first_day_of_week: Weekday) -> Vec<CalendarRow> {
    let days = days_of_month(reference, true, first_day_of_week);
    let lead = days
        .first()
        .map_or(0, |first| column(first.weekday(), first_day_of_week));
    let lead = usize::try_from(lead).unwrap_or_default();

    let mut slots: Vec<Option<CalendarDate>> = iter::repeat_n(None, lead)
        .chain(days.into_iter().map(Some))
        .collect();
    slots.resize(slots.len().next_multiple_of(DAYS_IN_WEEK), None);

    slots
        .chunks_exact(DAYS_IN_WEEK)
        .filter_map(|chunk| CalendarRow::try_from(chunk).ok())
        .collect()
}

/// Rendering state of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: CalendarDate,
    /// The keyboard cursor sits on this day
    pub is_current: bool,
    pub is_disabled: bool,
    /// Padding day from the previous or next month
    pub is_overflowing: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_in_range: bool,
    pub is_start: bool,
    pub is_end: bool,
}
