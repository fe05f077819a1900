//! Directional moves over the calendar that skip disabled dates.

use log::trace;

use crate::{CalendarDate, DateBounds, is_date_in_range};

/// A keyboard-style move relative to the cursor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    PreviousDay,
    NextDay,
    PreviousSameWeekday,
    NextSameWeekday,
    FirstOfMonth,
    LastOfMonth,
    PreviousMonth,
    NextMonth,
    PreviousYear,
    NextYear,
}

/// Decides which dates cannot be picked or landed on.
///
/// Any `Fn(CalendarDate) -> bool` closure implements this.
pub trait DisabledDates {
    fn is_disabled(&self, date: CalendarDate) -> bool;
}

impl<F> DisabledDates for F
where
    F: Fn(CalendarDate) -> bool,
{
    fn is_disabled(&self, date: CalendarDate) -> bool {
        self(date)
    }
}

/// Every date is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisabledDates;

impl DisabledDates for NoDisabledDates {
    fn is_disabled(&self, _date: CalendarDate) -> bool {
        false
    }
}

impl Direction {
    /// The date this move lands on when nothing is disabled.
    fn raw_target(self, date: CalendarDate) -> Option<CalendarDate> {
        match self {
            Self::PreviousDay => date.previous_day(),
            Self::NextDay => date.next_day(),
            Self::PreviousSameWeekday => date.sub_days(7),
            Self::NextSameWeekday => date.add_days(7),
            Self::FirstOfMonth => Some(date.first_of_month()),
            Self::LastOfMonth => Some(date.last_of_month()),
            Self::PreviousMonth => date.previous_month(),
            Self::NextMonth => date.next_month(),
            Self::PreviousYear => date.previous_year(),
            Self::NextYear => date.next_year(),
        }
    }

    /// The next candidate after `candidate` turned out to be disabled.
    fn step(self, candidate: CalendarDate) -> Option<CalendarDate> {
        match self {
            Self::PreviousDay | Self::LastOfMonth => candidate.previous_day(),
            Self::PreviousSameWeekday => candidate.sub_days(7),
            Self::NextSameWeekday => candidate.add_days(7),
            Self::NextDay
            | Self::FirstOfMonth
            | Self::PreviousMonth
            | Self::NextMonth
            | Self::PreviousYear
            | Self::NextYear => candidate.next_day(),
        }
    }
}

/// Finds the date a move in `direction` should land on.
///
/// Starts from the plain target of the move and, while that date is
/// disabled, keeps stepping (backwards for `PreviousDay` and `LastOfMonth`,
/// by whole weeks for the weekday moves, forwards otherwise). The search
/// gives up and returns `date` unchanged once it leaves its allowed window:
///
/// - month boundary moves and year moves stay in the month they landed in
/// - month moves stay in the adjacent month
/// - day and week moves stay within `horizon_days` of `date`
///
/// Moves past the supported years also return `date`.
pub fn find_available(
    date: CalendarDate,
    direction: Direction,
    disabled: &dyn DisabledDates,
    horizon_days: u32,
) -> CalendarDate {
    let Some(target) = direction.raw_target(date) else {
        trace!("{direction:?} from {date} leaves the supported years");
        return date;
    };

    let window = DateBounds {
        from: date.sub_days(u64::from(horizon_days)),
        to: date.add_days(u64::from(horizon_days)),
    };

    let in_window = |candidate: &CalendarDate| match direction {
        Direction::FirstOfMonth
        | Direction::LastOfMonth
        | Direction::PreviousYear
        | Direction::NextYear => candidate.month() == target.month(),
        Direction::PreviousMonth | Direction::NextMonth => candidate.is_same_month(&target),
        Direction::PreviousDay
        | Direction::NextDay
        | Direction::PreviousSameWeekday
        | Direction::NextSameWeekday => is_date_in_range(candidate, &window),
    };

    let mut candidate = target;
    while disabled.is_disabled(candidate) {
        match direction.step(candidate).filter(&in_window) {
            Some(next) => {
                trace!("{candidate} is disabled, trying {next}");
                candidate = next;
            }
            None => {
                trace!("No available date {direction:?} from {date}");
                return date;
            }
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_MAX_SEARCH_DAYS;
    use crate::test_utils::date;

    fn weekends(d: CalendarDate) -> bool {
        matches!(d.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun)
    }

    #[test]
    fn test_plain_moves() {
        struct TestCase {
            from: CalendarDate,
            direction: Direction,
            expected: CalendarDate,
        }

        let cases = [
            TestCase {
                from: date(2022, 1, 1),
                direction: Direction::PreviousDay,
                expected: date(2021, 12, 31),
            },
            TestCase {
                from: date(2021, 12, 31),
                direction: Direction::NextDay,
                expected: date(2022, 1, 1),
            },
            TestCase {
                from: date(2022, 1, 3),
                direction: Direction::PreviousSameWeekday,
                expected: date(2021, 12, 27),
            },
            TestCase {
                from: date(2021, 12, 27),
                direction: Direction::NextSameWeekday,
                expected: date(2022, 1, 3),
            },
            TestCase {
                from: date(2022, 2, 17),
                direction: Direction::FirstOfMonth,
                expected: date(2022, 2, 1),
            },
            TestCase {
                from: date(2024, 2, 17),
                direction: Direction::LastOfMonth,
                expected: date(2024, 2, 29),
            },
            TestCase {
                from: date(2022, 3, 31),
                direction: Direction::PreviousMonth,
                expected: date(2022, 2, 28),
            },
            TestCase {
                from: date(2022, 12, 15),
                direction: Direction::NextMonth,
                expected: date(2023, 1, 15),
            },
            TestCase {
                from: date(2020, 2, 29),
                direction: Direction::PreviousYear,
                expected: date(2019, 2, 28),
            },
            TestCase {
                from: date(2022, 6, 1),
                direction: Direction::NextYear,
                expected: date(2023, 6, 1),
            },
        ];

        for case in &cases {
            let found = find_available(
                case.from,
                case.direction,
                &NoDisabledDates,
                DEFAULT_MAX_SEARCH_DAYS,
            );
            assert_eq!(found, case.expected, "{:?} from {}", case.direction, case.from);
        }
    }

    #[test]
    fn test_skips_disabled_days() {
        // 2022-01-07 is a Friday
        let friday = date(2022, 1, 7);
        assert_eq!(find_available(friday, Direction::NextDay, &weekends, 365), date(2022, 1, 10));

        let monday = date(2022, 1, 10);
        assert_eq!(find_available(monday, Direction::PreviousDay, &weekends, 365), friday);
    }

    #[test]
    fn test_weekday_moves_step_by_week() {
        let blocked = [date(2022, 1, 8), date(2022, 1, 15)];
        let disabled = |d: CalendarDate| blocked.contains(&d);
        let found = find_available(date(2022, 1, 1), Direction::NextSameWeekday, &disabled, 365);
        assert_eq!(found, date(2022, 1, 22));

        let found =
            find_available(date(2022, 1, 22), Direction::PreviousSameWeekday, &disabled, 365);
        assert_eq!(found, date(2022, 1, 1));
    }

    #[test]
    fn test_month_boundaries_search_inwards() {
        // April 2022 starts on a Friday and ends on a Saturday
        let found = find_available(date(2022, 4, 20), Direction::FirstOfMonth, &weekends, 365);
        assert_eq!(found, date(2022, 4, 1));

        let found = find_available(date(2022, 4, 20), Direction::LastOfMonth, &weekends, 365);
        assert_eq!(found, date(2022, 4, 29));

        // May 2022 starts on a Sunday
        let found = find_available(date(2022, 5, 20), Direction::FirstOfMonth, &weekends, 365);
        assert_eq!(found, date(2022, 5, 2));
    }

    #[test]
    fn test_month_move_stays_in_adjacent_month() {
        let found = find_available(date(2022, 3, 5), Direction::NextMonth, &weekends, 365);
        // 2022-04-05 is a Tuesday
        assert_eq!(found, date(2022, 4, 5));

        // Everything from April 2022 onwards is disabled
        let after_march = |d: CalendarDate| d >= date(2022, 4, 1);
        let found = find_available(date(2022, 3, 5), Direction::NextMonth, &after_march, 365);
        assert_eq!(found, date(2022, 3, 5));

        // December -> January crosses the year and still counts as adjacent
        let first_week = |d: CalendarDate| d.month().get() == 1 && d.day().get() <= 7;
        let found = find_available(date(2021, 12, 3), Direction::NextMonth, &first_week, 365);
        assert_eq!(found, date(2022, 1, 8));

        let late_december = |d: CalendarDate| d.month().get() == 12 && d.day().get() >= 20;
        let found =
            find_available(date(2022, 1, 25), Direction::PreviousMonth, &late_december, 365);
        assert_eq!(found, date(2022, 1, 25));
    }

    #[test]
    fn test_year_move_stays_in_target_month() {
        let rest_of_june = |d: CalendarDate| {
            d.year().get() == 2023 && d.month().get() == 6 && d.day().get() >= 10
        };
        let found = find_available(date(2022, 6, 10), Direction::NextYear, &rest_of_june, 365);
        assert_eq!(found, date(2022, 6, 10));

        let found = find_available(date(2022, 6, 8), Direction::NextYear, &rest_of_june, 365);
        assert_eq!(found, date(2023, 6, 8));
    }

    #[test]
    fn test_horizon_bounds_the_search() {
        let everything = |_: CalendarDate| true;
        let origin = date(2022, 1, 1);
        for direction in [
            Direction::PreviousDay,
            Direction::NextDay,
            Direction::PreviousSameWeekday,
            Direction::NextSameWeekday,
            Direction::FirstOfMonth,
            Direction::LastOfMonth,
            Direction::PreviousMonth,
            Direction::NextMonth,
            Direction::PreviousYear,
            Direction::NextYear,
        ] {
            assert_eq!(
                find_available(origin, direction, &everything, 365),
                origin,
                "{direction:?}"
            );
        }

        // Next enabled day is 10 days out; a 5 day horizon cannot reach it
        let first_ten = |d: CalendarDate| d > origin && d <= date(2022, 1, 10);
        assert_eq!(find_available(origin, Direction::NextDay, &first_ten, 5), origin);
        assert_eq!(find_available(origin, Direction::NextDay, &first_ten, 10), date(2022, 1, 11));
    }

    #[test]
    fn test_never_lands_on_disabled_date() {
        let odd_days = |d: CalendarDate| d.day().get() % 2 == 1;
        let mut cursor = date(2022, 1, 2);
        for _ in 0..50 {
            cursor = find_available(cursor, Direction::NextDay, &odd_days, 365);
            assert!(!odd_days(cursor), "landed on {cursor}");
        }
    }

    #[test]
    fn test_year_limits() {
        assert_eq!(
            find_available(date(9999, 12, 31), Direction::NextDay, &NoDisabledDates, 365),
            date(9999, 12, 31)
        );
        assert_eq!(
            find_available(date(0, 1, 1), Direction::PreviousMonth, &NoDisabledDates, 365),
            date(0, 1, 1)
        );
        let last_days = |d: CalendarDate| d >= date(9999, 12, 30);
        assert_eq!(
            find_available(date(9999, 12, 20), Direction::LastOfMonth, &last_days, 365),
            date(9999, 12, 29)
        );
        assert_eq!(
            find_available(date(9999, 12, 29), Direction::NextDay, &last_days, 365),
            date(9999, 12, 29)
        );
    }
}
