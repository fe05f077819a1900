use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DateRange};

/// The committed selection of a picker.
///
/// On the wire (and in `ValueChanged` events) a selection is `null`, a single
/// ISO date string, or an ascending array of one or two ISO date strings for
/// ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SelectionValue {
    #[default]
    Empty,
    Single(CalendarDate),
    /// A range in progress (`end` missing) or complete. `start <= end`.
    Range {
        start: CalendarDate,
        end: Option<CalendarDate>,
    },
}

impl SelectionValue {
    /// A range that has only its first endpoint.
    pub const fn range_start(start: CalendarDate) -> Self {
        Self::Range { start, end: None }
    }

    /// A complete range from two endpoints in any order.
    pub fn complete_range(a: CalendarDate, b: CalendarDate) -> Self {
        DateRange::ordered(a, b).into()
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }

    /// The selected date, or the first endpoint of a range.
    pub const fn start(&self) -> Option<CalendarDate> {
        match *self {
            Self::Empty => None,
            Self::Single(date) | Self::Range { start: date, .. } => Some(date),
        }
    }

    /// The second endpoint of a complete range.
    pub const fn end(&self) -> Option<CalendarDate> {
        match *self {
            Self::Range { end, .. } => end,
            Self::Empty | Self::Single(_) => None,
        }
    }

    /// The selection as an ordered range, when it is a complete one.
    pub fn as_range(&self) -> Option<DateRange> {
        match *self {
            Self::Range { start, end: Some(end) } => Some(DateRange::ordered(start, end)),
            _ => None,
        }
    }

    /// `date` is the single selected day or one of the range endpoints.
    pub fn contains_endpoint(&self, date: &CalendarDate) -> bool {
        self.start().as_ref() == Some(date) || self.end().as_ref() == Some(date)
    }

    /// The selected dates in ascending order.
    pub fn dates(&self) -> Vec<CalendarDate> {
        self.start().into_iter().chain(self.end()).collect()
    }

    /// Converts the selection to the shape used in single or range mode.
    ///
    /// A single date becomes a range start; a range keeps only its start.
    pub const fn for_mode(self, range: bool) -> Self {
        match self {
            Self::Single(date) if range => Self::range_start(date),
            Self::Range { start, .. } if !range => Self::Single(start),
            other => other,
        }
    }
}

impl From<DateRange> for SelectionValue {
    fn from(range: DateRange) -> Self {
        Self::Range {
            start: range.start(),
            end: Some(range.end()),
        }
    }
}

impl fmt::Display for SelectionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "none"),
            Self::Single(date) => write!(f, "{date}"),
            Self::Range { start, end: None } => write!(f, "{start}/.."),
            Self::Range { start, end: Some(end) } => write!(f, "{start}/{end}"),
        }
    }
}

impl Serialize for SelectionValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Single(date) => date.serialize(serializer),
            Self::Range { .. } => self.dates().serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Single(CalendarDate),
    Range(Vec<CalendarDate>),
}

impl<'de> Deserialize<'de> for SelectionValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Option::<Payload>::deserialize(deserializer)? {
            None => Ok(Self::Empty),
            Some(Payload::Single(date)) => Ok(Self::Single(date)),
            Some(Payload::Range(dates)) => match dates.as_slice() {
                [] => Ok(Self::Empty),
                [start] => Ok(Self::range_start(*start)),
                [a, b] => Ok(Self::complete_range(*a, *b)),
                more => Err(serde::de::Error::custom(format!(
                    "Expected at most 2 dates in a range, found {}",
                    more.len()
                ))),
            },
        }
    }
}
