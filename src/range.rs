use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, ParseError, RANGE_SEPARATOR, prelude::*};

/// A complete, ordered pair of days, both inclusive. Written `start/end`
/// (the ISO 8601 interval form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{start}/{end}")]
#[serde(try_from = "String", into = "String")]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Range ends ({end}) before it starts ({start})")]
    Reversed { start: CalendarDate, end: CalendarDate },

    #[error(transparent)]
    Date(#[from] ParseError),

    #[error("Expected start/end, got {0:?}")]
    InvalidFormat(String),
}

impl DateRange {
    /// # Errors
    /// Returns `RangeError::Reversed` when `end` is before `start`.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// Two endpoints picked in either order, as a range.
    pub fn ordered(a: CalendarDate, b: CalendarDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        (self.start..=self.end).contains(date)
    }

    /// Days covered, both endpoints counted.
    pub fn len_days(&self) -> i64 {
        (self.end.to_naive() - self.start.to_naive()).num_days() + 1
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .trim()
            .split_once(RANGE_SEPARATOR)
            .filter(|(_, end)| !end.contains(RANGE_SEPARATOR))
            .ok_or_else(|| RangeError::InvalidFormat(s.to_owned()))?;

        Self::new(start.parse()?, end.parse()?)
    }
}

impl TryFrom<String> for DateRange {
    type Error = RangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateRange> for String {
    fn from(range: DateRange) -> Self {
        range.to_string()
    }
}

/// Optional inclusive bounds; a missing side is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateBounds {
    pub from: Option<CalendarDate>,
    pub to: Option<CalendarDate>,
}

impl DateBounds {
    pub const fn between(from: CalendarDate, to: CalendarDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub const fn unbounded() -> Self {
        Self { from: None, to: None }
    }
}

impl From<DateRange> for DateBounds {
    fn from(range: DateRange) -> Self {
        Self::between(range.start, range.end)
    }
}

/// Inclusive containment check.
///
/// When both bounds are present they may be given in either order; a range
/// previewed towards an earlier hovered day is still a range.
pub fn is_date_in_range(date: &CalendarDate, bounds: &DateBounds) -> bool {
    let (from, to) = match (bounds.from, bounds.to) {
        (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
        other => other,
    };
    from.is_none_or(|from| from <= *date) && to.is_none_or(|to| *date <= to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_new_rejects_reversed() {
        let jan = date(2022, 1, 1);
        let mar = date(2022, 3, 1);

        assert!(DateRange::new(jan, mar).is_ok());
        assert!(DateRange::new(jan, jan).is_ok());
        assert_eq!(
            DateRange::new(mar, jan),
            Err(RangeError::Reversed { start: mar, end: jan })
        );
    }

    #[test]
    fn test_ordered_sorts_endpoints() {
        let a = date(2021, 11, 29);
        let b = date(2021, 11, 28);
        let range = DateRange::ordered(a, b);
        assert_eq!(range.dates(), (b, a));
        assert_eq!(DateRange::ordered(b, a), range);
    }

    #[test]
    fn test_contains_and_len() {
        let range = DateRange::new(date(2021, 12, 30), date(2022, 1, 2)).unwrap();

        assert!(range.contains(&date(2021, 12, 30)));
        assert!(range.contains(&date(2022, 1, 1)));
        assert!(range.contains(&date(2022, 1, 2)));
        assert!(!range.contains(&date(2022, 1, 3)));
        assert!(!range.contains(&date(2021, 12, 29)));
        assert_eq!(range.len_days(), 4);
        assert_eq!(DateRange::ordered(date(2020, 2, 1), date(2020, 3, 1)).len_days(), 30);
    }

    #[test]
    fn test_parse() {
        struct TestCase {
            input: &'static str,
            expected: Result<(CalendarDate, CalendarDate), fn(&RangeError) -> bool>,
        }

        let cases = [
            TestCase {
                input: "2022-01-01/2022-03-01",
                expected: Ok((date(2022, 1, 1), date(2022, 3, 1))),
            },
            TestCase {
                input: " 2022-01-01/2022-01-01 ",
                expected: Ok((date(2022, 1, 1), date(2022, 1, 1))),
            },
            TestCase {
                input: "2022-03-01/2022-01-01",
                expected: Err(|e| matches!(e, RangeError::Reversed { .. })),
            },
            TestCase {
                input: "2022-01-01",
                expected: Err(|e| matches!(e, RangeError::InvalidFormat(_))),
            },
            TestCase {
                input: "2022-01-01/2022-01-02/2022-01-03",
                expected: Err(|e| matches!(e, RangeError::InvalidFormat(_))),
            },
            TestCase {
                input: "2022-01-01/2022-02-30",
                expected: Err(|e| matches!(e, RangeError::Date(ParseError::InvalidDay { .. }))),
            },
        ];

        for case in &cases {
            let parsed = case.input.parse::<DateRange>();
            match (&parsed, &case.expected) {
                (Ok(range), Ok(dates)) => assert_eq!(range.dates(), *dates, "{:?}", case.input),
                (Err(err), Err(check)) => assert!(check(err), "{:?} gave {err}", case.input),
                _ => panic!("{:?} parsed as {parsed:?}", case.input),
            }
        }
    }

    #[test]
    fn test_display_and_serde_use_interval_form() {
        let range = DateRange::new(date(1990, 6, 15), date(2000, 12, 31)).unwrap();
        assert_eq!(range.to_string(), "1990-06-15/2000-12-31");

        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#""1990-06-15/2000-12-31""#);
        assert_eq!(serde_json::from_str::<DateRange>(&json).unwrap(), range);
        assert!(serde_json::from_str::<DateRange>(r#""2000-12-31/1990-06-15""#).is_err());
    }

    #[test]
    fn test_is_date_in_range_inclusive() {
        let bounds = DateBounds::between(date(2022, 1, 5), date(2022, 1, 10));
        assert!(is_date_in_range(&date(2022, 1, 5), &bounds));
        assert!(is_date_in_range(&date(2022, 1, 7), &bounds));
        assert!(is_date_in_range(&date(2022, 1, 10), &bounds));
        assert!(!is_date_in_range(&date(2022, 1, 4), &bounds));
        assert!(!is_date_in_range(&date(2022, 1, 11), &bounds));

        let range = DateRange::new(date(2022, 1, 5), date(2022, 1, 10)).unwrap();
        assert_eq!(DateBounds::from(range), bounds);
    }

    #[test]
    fn test_is_date_in_range_open_sides() {
        let from_only = DateBounds {
            from: Some(date(2022, 1, 5)),
            to: None,
        };
        assert!(is_date_in_range(&date(9999, 12, 31), &from_only));
        assert!(!is_date_in_range(&date(2022, 1, 4), &from_only));

        let to_only = DateBounds {
            from: None,
            to: Some(date(2022, 1, 5)),
        };
        assert!(is_date_in_range(&date(0, 1, 1), &to_only));
        assert!(!is_date_in_range(&date(2022, 1, 6), &to_only));

        assert!(is_date_in_range(&date(2022, 1, 6), &DateBounds::unbounded()));
    }

    #[test]
    fn test_is_date_in_range_reversed_bounds() {
        let bounds = DateBounds::between(date(2022, 1, 10), date(2022, 1, 5));
        assert!(is_date_in_range(&date(2022, 1, 7), &bounds));
        assert!(!is_date_in_range(&date(2022, 1, 11), &bounds));
    }
}
