//! The selection state machine behind a date picker.
//!
//! [`DatePicker`] owns the cursor date (which also decides the displayed
//! month), the committed value and the hovered date. Input handlers mutate
//! that state and queue [`PickerEvent`]s; the host drains the queue after
//! each call and re-renders from [`DatePicker::cells`].

use std::fmt;
use std::num::NonZeroU32;

use chrono::Weekday;
use log::{debug, warn};
use serde::Serialize;

use crate::{
    CalendarDate, CalendarRow, ConfigError, DAYS_IN_WEEK, DateBounds, DateRange, DayCell, Direction,
    DisabledDates, Key, KeyCommand, Month, NoDisabledDates, PickerConfig, PickerLocale,
    RANGE_SEPARATOR, ResolvedConfig, SelectionValue, WeekdayName, Year, build_rows, find_available,
    is_date_in_range, long_date, month_names, parse_iso_date_or_local, weekday_names,
};

/// Payload of a displayed-month change. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonthChange {
    pub month: u8,
    pub year: u16,
    pub day: u8,
}

impl From<CalendarDate> for MonthChange {
    fn from(date: CalendarDate) -> Self {
        Self {
            month: date.month().get(),
            year: date.year().get(),
            day: date.day().get(),
        }
    }
}

/// Notifications for the host, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PickerEvent {
    ValueChanged(SelectionValue),
    MonthChanged(MonthChange),
}

pub struct DatePicker {
    current_date: CalendarDate,
    value: SelectionValue,
    hovered_date: Option<CalendarDate>,
    pending_focus: Option<CalendarDate>,
    events: Vec<PickerEvent>,
    range: bool,
    disabled: bool,
    first_day_of_week: Weekday,
    go_to_range_start_on_select: bool,
    max_search_days: NonZeroU32,
    locale: PickerLocale,
    disabled_dates: Box<dyn DisabledDates>,
}

impl fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("current_date", &self.current_date)
            .field("value", &self.value)
            .field("hovered_date", &self.hovered_date)
            .field("pending_focus", &self.pending_focus)
            .field("range", &self.range)
            .field("disabled", &self.disabled)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl Default for DatePicker {
    fn default() -> Self {
        Self::new(ResolvedConfig::default())
    }
}

impl DatePicker {
    /// Creates a picker showing the configured start date, or today.
    ///
    /// The initial value does not move the cursor.
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            current_date: config.start_date.unwrap_or_else(CalendarDate::today),
            value: config.value.for_mode(config.range),
            hovered_date: None,
            pending_focus: None,
            events: Vec::new(),
            range: config.range,
            disabled: config.disabled,
            first_day_of_week: config.first_day_of_week,
            go_to_range_start_on_select: config.go_to_range_start_on_select,
            max_search_days: config.max_search_days,
            locale: config.locale,
            disabled_dates: Box::new(NoDisabledDates),
        }
    }

    /// Resolves `config` and creates a picker from it.
    ///
    /// # Errors
    /// Returns the `ConfigError` produced by [`PickerConfig::resolve`].
    pub fn from_config(config: &PickerConfig) -> Result<Self, ConfigError> {
        config.resolve().map(Self::new)
    }

    #[must_use]
    pub fn with_disabled_dates(mut self, disabled_dates: impl DisabledDates + 'static) -> Self {
        self.disabled_dates = Box::new(disabled_dates);
        self
    }

    /// The cursor date. Its month is the displayed month.
    pub const fn current_date(&self) -> CalendarDate {
        self.current_date
    }

    pub const fn displayed_month(&self) -> (Year, Month) {
        (self.current_date.year(), self.current_date.month())
    }

    pub const fn value(&self) -> SelectionValue {
        self.value
    }

    pub const fn hovered_date(&self) -> Option<CalendarDate> {
        self.hovered_date
    }

    pub const fn is_range(&self) -> bool {
        self.range
    }

    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub const fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    pub const fn locale(&self) -> &PickerLocale {
        &self.locale
    }

    pub const fn max_search_days(&self) -> NonZeroU32 {
        self.max_search_days
    }

    pub const fn go_to_range_start_on_select(&self) -> bool {
        self.go_to_range_start_on_select
    }

    pub fn is_date_disabled(&self, date: CalendarDate) -> bool {
        self.disabled_dates.is_disabled(date)
    }

    /// Takes the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<PickerEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: PickerEvent) {
        self.events.push(event);
    }
}

// --- configuration; applies even while the picker is disabled ---
impl DatePicker {
    /// Switches between single and range selection. A change clears the
    /// value and reports the empty selection.
    pub fn set_range_mode(&mut self, range: bool) {
        if self.range == range {
            return;
        }
        debug!("Range mode {}", if range { "on" } else { "off" });
        self.range = range;
        self.value = SelectionValue::Empty;
        self.hovered_date = None;
        self.emit(PickerEvent::ValueChanged(SelectionValue::Empty));
    }

    /// Shows `start_date`, or today when `None`. Emits nothing.
    pub fn set_start_date(&mut self, start_date: Option<CalendarDate>) {
        self.current_date = start_date.unwrap_or_else(CalendarDate::today);
    }

    /// Like [`DatePicker::set_start_date`] for textual input. Blank or
    /// unparseable input shows today.
    pub fn set_start_date_str(&mut self, input: &str) {
        let start_date = if input.trim().is_empty() {
            None
        } else {
            parse_iso_date_or_local(input)
                .map_err(|err| warn!("Ignoring start date {input:?}: {err}"))
                .ok()
        };
        self.set_start_date(start_date);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_first_day_of_week(&mut self, first_day_of_week: Weekday) {
        self.first_day_of_week = first_day_of_week;
    }

    pub fn set_locale(&mut self, locale: PickerLocale) {
        self.locale = locale;
    }

    pub fn set_max_search_days(&mut self, max_search_days: NonZeroU32) {
        self.max_search_days = max_search_days;
    }

    pub fn set_go_to_range_start_on_select(&mut self, go_to_range_start_on_select: bool) {
        self.go_to_range_start_on_select = go_to_range_start_on_select;
    }

    pub fn set_disabled_dates(&mut self, disabled_dates: impl DisabledDates + 'static) {
        self.disabled_dates = Box::new(disabled_dates);
    }
}

// --- value ---
impl DatePicker {
    /// Replaces the value from outside and shows the month it belongs to.
    ///
    /// A value of the wrong shape for the current mode is converted (a
    /// single date becomes a range start, a range keeps its start). The
    /// cursor goes to the first endpoint, or to the second one of a complete
    /// range when `go_to_range_start_on_select` is off. Emits nothing.
    pub fn set_value(&mut self, value: SelectionValue) {
        if self.disabled {
            return;
        }
        self.value = value.for_mode(self.range);
        self.follow_value();
    }

    /// Parses `YYYY-MM-DD` (or a timestamp), `start/end`, or blank for an
    /// empty value. Unparseable input leaves the value alone.
    pub fn set_value_str(&mut self, input: &str) {
        let trimmed = input.trim();
        let parsed = if trimmed.is_empty() {
            Ok(SelectionValue::Empty)
        } else if trimmed.contains(RANGE_SEPARATOR) {
            trimmed
                .parse::<DateRange>()
                .map(SelectionValue::from)
                .map_err(|err| err.to_string())
        } else {
            parse_iso_date_or_local(trimmed)
                .map(SelectionValue::Single)
                .map_err(|err| err.to_string())
        };

        match parsed {
            Ok(value) => self.set_value(value),
            Err(err) => warn!("Ignoring value {input:?}: {err}"),
        }
    }

    fn follow_value(&mut self) {
        let target = match self.value {
            SelectionValue::Range { end: Some(end), .. } if !self.go_to_range_start_on_select => {
                Some(end)
            }
            other => other.start(),
        };
        if let Some(target) = target {
            self.current_date = target;
        }
    }

    /// Commits `date` the way a click or Space/Enter does.
    ///
    /// In range mode the first pick starts a range and the second completes
    /// it (endpoints sorted); a pick after a complete range starts over. In
    /// single mode re-picking the selected day does nothing. Disabled dates
    /// are ignored.
    pub fn select_date(&mut self, date: CalendarDate) {
        if self.disabled || self.disabled_dates.is_disabled(date) {
            return;
        }

        let value = if self.range {
            match self.value {
                SelectionValue::Range { start, end: None } => {
                    SelectionValue::complete_range(start, date)
                }
                _ => SelectionValue::range_start(date),
            }
        } else {
            if self.value == SelectionValue::Single(date) {
                return;
            }
            SelectionValue::Single(date)
        };

        debug!("Selected {value}");
        self.value = value;
        self.emit(PickerEvent::ValueChanged(value));
        self.follow_value();
    }

    /// Commits the cursor date.
    pub fn select_current(&mut self) {
        self.select_date(self.current_date);
    }

    pub fn clear(&mut self) {
        if self.disabled {
            return;
        }
        self.value = SelectionValue::Empty;
        self.emit(PickerEvent::ValueChanged(SelectionValue::Empty));
    }

    /// Pointer entered (`Some`) or left (`None`) a day cell. Only tracked
    /// in range mode, where it previews the range being picked.
    pub fn hover(&mut self, date: Option<CalendarDate>) {
        if self.disabled || !self.range {
            return;
        }
        self.hovered_date = date;
    }
}

// --- navigation ---
impl DatePicker {
    /// Moves the cursor to `target`.
    ///
    /// Reports a `MonthChanged` first when the displayed month changes.
    /// With `move_focus` the host is asked to focus `target` after its next
    /// render (see [`DatePicker::finish_render`]).
    pub fn move_to(&mut self, target: CalendarDate, move_focus: bool) {
        if self.disabled {
            return;
        }

        if !target.is_same_month(&self.current_date) {
            debug!("Showing {}-{:02}", target.year(), target.month().get());
            self.emit(PickerEvent::MonthChanged(target.into()));
        }
        if move_focus {
            self.pending_focus = Some(target);
        }
        self.current_date = target;
    }

    /// Moves the cursor in `direction`, skipping disabled dates, and asks
    /// for focus on the result.
    pub fn handle_directional_key(&mut self, direction: Direction) {
        if self.disabled {
            return;
        }
        let target = find_available(
            self.current_date,
            direction,
            self.disabled_dates.as_ref(),
            self.max_search_days.get(),
        );
        self.move_to(target, true);
    }

    /// Runs the command bound to `key`. Returns whether the key was handled,
    /// in which case the host should suppress its default action.
    pub fn handle_key(&mut self, key: Key, modifier: bool) -> bool {
        if self.disabled {
            return false;
        }
        match key.command(modifier) {
            KeyCommand::Move(direction) => self.handle_directional_key(direction),
            KeyCommand::SelectCurrent => self.select_current(),
        }
        true
    }

    /// A day cell was clicked: show it, then select it.
    pub fn click_date(&mut self, date: CalendarDate) {
        if self.disabled {
            return;
        }
        self.move_to(date, false);
        self.select_date(date);
    }

    /// A day cell received focus.
    pub fn focus_date(&mut self, date: CalendarDate) {
        if date != self.current_date {
            self.move_to(date, false);
        }
    }

    /// The host finished rendering. Returns the date to focus, once.
    pub fn finish_render(&mut self) -> Option<CalendarDate> {
        self.pending_focus.take()
    }

    pub fn next_month(&mut self) {
        if let Some(target) = self.current_date.next_month() {
            self.move_to(target, false);
        }
    }

    pub fn previous_month(&mut self) {
        if let Some(target) = self.current_date.previous_month() {
            self.move_to(target, false);
        }
    }

    pub fn next_year(&mut self) {
        if let Some(target) = self.current_date.next_year() {
            self.move_to(target, false);
        }
    }

    pub fn previous_year(&mut self) {
        if let Some(target) = self.current_date.previous_year() {
            self.move_to(target, false);
        }
    }

    pub fn jump_to_today(&mut self) {
        self.move_to(CalendarDate::today(), false);
    }

    /// Shows `month` of the displayed year, keeping the day where it exists.
    pub fn jump_month(&mut self, month: Month) {
        self.move_to(self.current_date.with_month(month), false);
    }

    /// Shows the displayed month in `year`, keeping the day where it exists.
    pub fn jump_year(&mut self, year: Year) {
        self.move_to(self.current_date.with_year(year), false);
    }

    /// Year typed into a number field. Out-of-range input is clamped; the
    /// year actually used is returned so the field can be corrected.
    pub fn jump_year_input(&mut self, input: i64) -> Year {
        let year = Year::clamped(input);
        self.jump_year(year);
        year
    }

    /// Like [`DatePicker::jump_year_input`] for raw text. Text that is not a
    /// number means the current year.
    pub fn jump_year_str(&mut self, input: &str) -> Year {
        let year = match input.trim().parse::<i64>() {
            Ok(number) => Year::clamped(number),
            Err(_) => CalendarDate::today().year(),
        };
        self.jump_year(year);
        year
    }
}

// --- view data ---
impl DatePicker {
    /// Weeks of the displayed month, padded to whole weeks.
    pub fn rows(&self) -> Vec<CalendarRow> {
        build_rows(self.current_date, self.first_day_of_week)
    }

    /// The displayed weeks with per-day rendering state. Slots past the
    /// supported years are `None`, as in [`DatePicker::rows`].
    pub fn cells(&self) -> Vec<[Option<DayCell>; DAYS_IN_WEEK]> {
        self.cells_on(CalendarDate::today())
    }

    /// [`DatePicker::cells`] with an explicit date for "today".
    pub fn cells_on(&self, today: CalendarDate) -> Vec<[Option<DayCell>; DAYS_IN_WEEK]> {
        self.rows()
            .into_iter()
            .map(|row| row.map(|slot| slot.map(|date| self.cell(date, today))))
            .collect()
    }

    fn cell(&self, date: CalendarDate, today: CalendarDate) -> DayCell {
        let start = self.value.start().filter(|_| self.range);
        let (is_in_range, is_start, is_end) = start.map_or((false, false, false), |start| {
            let to = self.value.end().or(self.hovered_date).unwrap_or(self.current_date);
            let in_range = is_date_in_range(&date, &DateBounds::between(start, to));
            match self.value.end().or(self.hovered_date) {
                Some(other) => {
                    let preview = DateRange::ordered(start, other);
                    (in_range, date == preview.start(), date == preview.end())
                }
                None => (in_range, date == start, false),
            }
        });

        DayCell {
            date,
            is_current: date == self.current_date,
            is_disabled: self.disabled_dates.is_disabled(date),
            is_overflowing: !date.is_same_month(&self.current_date),
            is_today: date == today,
            is_selected: self.value.contains_endpoint(&date),
            is_in_range,
            is_start,
            is_end,
        }
    }

    pub fn weekday_names(&self) -> Vec<WeekdayName> {
        weekday_names(self.first_day_of_week, &self.locale)
    }

    pub fn month_names(&self) -> Vec<String> {
        month_names(&self.locale)
    }

    /// Spoken summary of the value, e.g. `January 1, 2022 - March 3, 2022`
    /// in `en-US`.
    pub fn title(&self) -> Option<String> {
        let start = long_date(self.value.start()?, &self.locale);
        match self.value.end() {
            Some(end) => Some(format!("{start} - {}", long_date(end, &self.locale))),
            None => Some(start),
        }
    }
}
