//! # Configuration
//!
//! A picker is configured from a sparse [`PickerConfig`] (every field
//! optional, usually read from TOML) which is validated into a
//! [`ResolvedConfig`] holding concrete values.
//!
//! ```toml
//! first_day_of_week = 1        # 0 = Sunday .. 6 = Saturday
//! range = true
//! go_to_range_start_on_select = false
//! max_search_days = 90
//! locale = "de-DE"
//! start_date = "2022-01-01"
//! value = ["2022-01-03", "2022-01-07"]
//! ```

use std::fs;
use std::num::NonZeroU32;
use std::path::Path;

use chrono::Weekday;
use log::{debug, info};
use serde::Deserialize;

use crate::{
    CalendarDate, DAYS_IN_WEEK, DEFAULT_MAX_SEARCH_DAYS, ParseError, PickerLocale, SelectionValue,
    parse_iso_date_or_local,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    pub first_day_of_week: Option<u8>,
    pub range: Option<bool>,
    pub go_to_range_start_on_select: Option<bool>,
    pub max_search_days: Option<u32>,
    pub disabled: Option<bool>,
    pub locale: Option<String>,
    pub start_date: Option<String>,
    pub value: Option<SelectionValue>,
}

/// Validated configuration with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub first_day_of_week: Weekday,
    pub range: bool,
    pub go_to_range_start_on_select: bool,
    pub max_search_days: NonZeroU32,
    pub disabled: bool,
    pub locale: PickerLocale,
    /// `None` shows the current month.
    pub start_date: Option<CalendarDate>,
    pub value: SelectionValue,
}

/// Defaults for every field. The locale comes from the environment, see
/// [`PickerLocale::from_env`].
impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Sun,
            range: false,
            go_to_range_start_on_select: true,
            max_search_days: NonZeroU32::new(DEFAULT_MAX_SEARCH_DAYS).unwrap_or(NonZeroU32::MIN),
            disabled: false,
            locale: PickerLocale::from_env(),
            start_date: None,
            value: SelectionValue::Empty,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid first_day_of_week: {0} (must be 0-6, 0 = Sunday)")]
    InvalidFirstDayOfWeek(u8),

    #[error("Invalid max_search_days: must be positive")]
    InvalidMaxSearchDays,

    #[error("Invalid start_date {input:?}: {source}")]
    InvalidStartDate { input: String, source: ParseError },

    #[error("Value {value} does not fit {} selection", selection_mode(.range))]
    InvalidValue { value: SelectionValue, range: bool },
}

const fn selection_mode(range: &bool) -> &'static str {
    if *range { "range" } else { "single-date" }
}

/// Maps a Sunday-based index (0 = Sunday .. 6 = Saturday) to a weekday.
pub fn weekday_from_sunday_index(index: u8) -> Option<Weekday> {
    if usize::from(index) >= DAYS_IN_WEEK {
        return None;
    }
    // chrono numbers weekdays from Monday
    Weekday::try_from((index + 6) % 7).ok()
}

impl PickerConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        debug!("Config: {config:?}");
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` when the file cannot be read and
    /// `ConfigError::Parse` when it is not a valid config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded picker config from {}", path.display());
        Ok(config)
    }

    /// Validates the config and fills in defaults.
    ///
    /// A missing locale is taken from the environment.
    ///
    /// # Errors
    /// Returns the `ConfigError` variant naming the first invalid field.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let defaults = ResolvedConfig::default();

        let first_day_of_week = match self.first_day_of_week {
            Some(index) => weekday_from_sunday_index(index)
                .ok_or(ConfigError::InvalidFirstDayOfWeek(index))?,
            None => defaults.first_day_of_week,
        };

        let max_search_days = match self.max_search_days {
            Some(days) => NonZeroU32::new(days).ok_or(ConfigError::InvalidMaxSearchDays)?,
            None => defaults.max_search_days,
        };

        let start_date = self
            .start_date
            .as_deref()
            .map(|input| {
                parse_iso_date_or_local(input).map_err(|source| ConfigError::InvalidStartDate {
                    input: input.to_owned(),
                    source,
                })
            })
            .transpose()?;

        let range = self.range.unwrap_or(defaults.range);
        let value = self.value.unwrap_or(defaults.value);
        if !value.is_empty() && value.is_range() != range {
            return Err(ConfigError::InvalidValue { value, range });
        }

        let locale = match self.locale.as_deref() {
            Some(tag) => PickerLocale::parse_or_default(tag),
            None => defaults.locale,
        };

        Ok(ResolvedConfig {
            first_day_of_week,
            range,
            go_to_range_start_on_select: self
                .go_to_range_start_on_select
                .unwrap_or(defaults.go_to_range_start_on_select),
            max_search_days,
            disabled: self.disabled.unwrap_or(defaults.disabled),
            locale,
            start_date,
            value,
        })
    }
}
