// Supported years. JavaScript date pickers cap the year input at four digits
// and chrono handles every year in between.
pub const MIN_YEAR: u16 = 0;
pub const MAX_YEAR: u16 = 9999;

pub const JANUARY: u8 = 1;
pub const FEBRUARY: u8 = 2;
pub const DECEMBER: u8 = 12;
pub const MAX_MONTH: u8 = DECEMBER;

pub const MIN_DAY: u8 = 1;

/// Width of a calendar row
pub const DAYS_IN_WEEK: usize = 7;

/// How far, in days, keyboard navigation looks past disabled dates
pub const DEFAULT_MAX_SEARCH_DAYS: u32 = 365;

/// Used when neither the caller nor the environment names a usable locale
pub const DEFAULT_LOCALE: &str = "en-US";

/// `YYYY-MM-DD`
pub const DATE_SEPARATOR: char = '-';
/// `start/end`
pub const RANGE_SEPARATOR: char = '/';
