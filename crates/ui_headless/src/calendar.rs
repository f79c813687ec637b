//! Month grids, date selection, and keyboard focus for the calendar.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// A calendar month, anchored on its first day.
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// Month `month` (1-12) of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidParameter`] for an out-of-range month or year.
    pub fn new(year: i32, month: u32) -> Result<Self, UiError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| UiError::invalid("Calendar", format!("no such month {year}-{month}")))
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month number, 1-12.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first
            .pred_opt()
            .unwrap_or(self.first)
    }

    /// Number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Whether `date` falls in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Month `months` away; saturates at the representable range.
    pub fn add_months(&self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.first.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.first.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        Self {
            first: shifted.unwrap_or(self.first),
        }
    }

    /// Following month.
    pub fn next(&self) -> Self {
        self.add_months(1)
    }

    /// Preceding month.
    pub fn previous(&self) -> Self {
        self.add_months(-1)
    }

    /// Caption such as `March 2026`.
    pub fn caption(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// One cell of a month grid.
pub struct CalendarDay {
    /// Date shown in the cell.
    pub date: NaiveDate,
    /// The date belongs to an adjacent month.
    pub outside: bool,
}

/// Number of days from the week start back to `date`'s weekday.
fn days_since_week_start(date: NaiveDate, week_start: Weekday) -> u64 {
    let offset = (date.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;
    u64::from(offset)
}

/// Whole weeks covering `month`, starting on `week_start`.
///
/// Leading and trailing cells come from the adjacent months and are marked `outside`. With
/// `fixed_weeks` the grid always has six rows so the calendar height never jumps.
pub fn month_grid(
    month: CalendarMonth,
    week_start: Weekday,
    fixed_weeks: bool,
) -> Vec<[CalendarDay; 7]> {
    let first = month.first_day();
    let start = first
        .checked_sub_days(Days::new(days_since_week_start(first, week_start)))
        .unwrap_or(first);
    let last = month.last_day();
    let span = (last - start).num_days() + 1;
    let weeks = if fixed_weeks {
        6
    } else {
        usize::try_from((span + 6) / 7).unwrap_or(6)
    };

    (0..weeks)
        .map(|week| {
            std::array::from_fn(|weekday| {
                let offset = (week * 7 + weekday) as u64;
                let date = start.checked_add_days(Days::new(offset)).unwrap_or(start);
                CalendarDay {
                    date,
                    outside: !month.contains(date),
                }
            })
        })
        .collect()
}

/// Two-letter weekday labels starting on `week_start`.
pub fn weekday_labels(week_start: Weekday) -> [&'static str; 7] {
    let mut day = week_start;
    std::array::from_fn(|_| {
        let label = match day {
            Weekday::Mon => "Mo",
            Weekday::Tue => "Tu",
            Weekday::Wed => "We",
            Weekday::Thu => "Th",
            Weekday::Fri => "Fr",
            Weekday::Sat => "Sa",
            Weekday::Sun => "Su",
        };
        day = day.succ();
        label
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How clicks build a selection.
pub enum CalendarMode {
    /// One date, clicking it again clears it.
    #[default]
    Single,
    /// Any set of dates.
    Multiple,
    /// A start and end date.
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Selected dates.
pub enum DateSelection {
    /// At most one date.
    Single(Option<NaiveDate>),
    /// Sorted set of dates.
    Multiple(Vec<NaiveDate>),
    /// Inclusive range; `end` is unset while the second click is pending.
    Range {
        /// First date.
        start: Option<NaiveDate>,
        /// Last date.
        end: Option<NaiveDate>,
    },
}

impl DateSelection {
    /// Empty selection for `mode`.
    pub fn empty(mode: CalendarMode) -> Self {
        match mode {
            CalendarMode::Single => Self::Single(None),
            CalendarMode::Multiple => Self::Multiple(Vec::new()),
            CalendarMode::Range => Self::Range {
                start: None,
                end: None,
            },
        }
    }

    /// Applies a click on `date`.
    ///
    /// Range clicks set the start, then the end (swapping when the end precedes the start),
    /// and a third click starts a new range.
    pub fn select(&mut self, date: NaiveDate) {
        match self {
            Self::Single(current) => {
                *current = if *current == Some(date) {
                    None
                } else {
                    Some(date)
                };
            }
            Self::Multiple(dates) => match dates.binary_search(&date) {
                Ok(index) => {
                    dates.remove(index);
                }
                Err(index) => dates.insert(index, date),
            },
            Self::Range { start, end } => match (*start, *end) {
                (Some(first), None) if date < first => {
                    *start = Some(date);
                    *end = Some(first);
                }
                (Some(_), None) => *end = Some(date),
                _ => {
                    *start = Some(date);
                    *end = None;
                }
            },
        }
    }

    /// Whether `date` is selected (inclusive for ranges).
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::Single(current) => *current == Some(date),
            Self::Multiple(dates) => dates.binary_search(&date).is_ok(),
            Self::Range { start, end } => match (start, end) {
                (Some(start), Some(end)) => *start <= date && date <= *end,
                (Some(start), None) => *start == date,
                _ => false,
            },
        }
    }

    /// Whether `date` is the start of a range.
    pub fn is_range_start(&self, date: NaiveDate) -> bool {
        matches!(self, Self::Range { start: Some(start), .. } if *start == date)
    }

    /// Whether `date` is the end of a range.
    pub fn is_range_end(&self, date: NaiveDate) -> bool {
        matches!(self, Self::Range { end: Some(end), .. } if *end == date)
    }

    /// Whether `date` lies strictly inside a completed range.
    pub fn is_range_middle(&self, date: NaiveDate) -> bool {
        matches!(self, Self::Range { start: Some(start), end: Some(end) } if *start < date && date < *end)
    }

    /// Date to focus when the calendar opens.
    pub fn anchor(&self) -> Option<NaiveDate> {
        match self {
            Self::Single(current) => *current,
            Self::Multiple(dates) => dates.first().copied(),
            Self::Range { start, .. } => *start,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Displayed month, focused date, constraints, and selection.
pub struct CalendarState {
    month: CalendarMonth,
    focused: NaiveDate,
    today: NaiveDate,
    selection: DateSelection,
    week_start: Weekday,
    fixed_weeks: bool,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
    disabled_weekdays: Vec<Weekday>,
    disabled_dates: Vec<NaiveDate>,
}

impl CalendarState {
    /// Calendar showing the selection's anchor month, or `today`'s.
    pub fn new(today: NaiveDate, selection: DateSelection) -> Self {
        let focused = selection.anchor().unwrap_or(today);
        Self {
            month: CalendarMonth::containing(focused),
            focused,
            today,
            selection,
            week_start: Weekday::Sun,
            fixed_weeks: false,
            min: None,
            max: None,
            disabled_weekdays: Vec::new(),
            disabled_dates: Vec::new(),
        }
    }

    /// First column weekday.
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Always render six weeks.
    pub fn with_fixed_weeks(mut self, fixed_weeks: bool) -> Self {
        self.fixed_weeks = fixed_weeks;
        self
    }

    /// Restricts selectable dates to `min..=max`. Reversed bounds are swapped.
    pub fn with_bounds(mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        let (min, max) = match (min, max) {
            (Some(min), Some(max)) if min > max => (Some(max), Some(min)),
            bounds => bounds,
        };
        self.min = min;
        self.max = max;
        self.focused = self.clamp(self.focused);
        self.month = CalendarMonth::containing(self.focused);
        self
    }

    /// Disables every date on the given weekdays.
    pub fn with_disabled_weekdays(mut self, weekdays: Vec<Weekday>) -> Self {
        self.disabled_weekdays = weekdays;
        self
    }

    /// Disables specific dates.
    pub fn with_disabled_dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.disabled_dates = dates;
        self
    }

    /// Displayed month.
    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    /// Focused date.
    pub fn focused(&self) -> NaiveDate {
        self.focused
    }

    /// Today's date as supplied by the host.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Current selection.
    pub fn selection(&self) -> &DateSelection {
        &self.selection
    }

    /// First column weekday.
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Grid for the displayed month.
    pub fn grid(&self) -> Vec<[CalendarDay; 7]> {
        month_grid(self.month, self.week_start, self.fixed_weeks)
    }

    /// Whether `date` is outside the bounds or explicitly disabled.
    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.min.is_some_and(|min| date < min)
            || self.max.is_some_and(|max| date > max)
            || self.disabled_weekdays.contains(&date.weekday())
            || self.disabled_dates.contains(&date)
    }

    /// Whether the previous month has any date inside the bounds.
    pub fn can_go_previous(&self) -> bool {
        self.min
            .map_or(true, |min| self.month.previous().last_day() >= min)
    }

    /// Whether the next month has any date inside the bounds.
    pub fn can_go_next(&self) -> bool {
        self.max
            .map_or(true, |max| self.month.next().first_day() <= max)
    }

    /// Shows the previous month, moving focus along with it.
    pub fn previous_month(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.shift_months(-1);
        true
    }

    /// Shows the next month, moving focus along with it.
    pub fn next_month(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.shift_months(1);
        true
    }

    /// Moves focus for a `KeyboardEvent.key` value. The displayed month follows focus.
    pub fn move_focus(&mut self, key: &str) -> bool {
        let focused = self.focused;
        let target = match key {
            "ArrowLeft" => focused.checked_sub_days(Days::new(1)),
            "ArrowRight" => focused.checked_add_days(Days::new(1)),
            "ArrowUp" => focused.checked_sub_days(Days::new(7)),
            "ArrowDown" => focused.checked_add_days(Days::new(7)),
            "PageUp" => focused.checked_sub_months(Months::new(1)),
            "PageDown" => focused.checked_add_months(Months::new(1)),
            "Home" => {
                focused.checked_sub_days(Days::new(days_since_week_start(focused, self.week_start)))
            }
            "End" => focused.checked_add_days(Days::new(
                6 - days_since_week_start(focused, self.week_start),
            )),
            _ => return false,
        };
        let Some(target) = target else {
            return false;
        };
        self.focus(target);
        true
    }

    /// Focuses `date`, clamped to the bounds.
    pub fn focus(&mut self, date: NaiveDate) {
        self.focused = self.clamp(date);
        if !self.month.contains(self.focused) {
            self.month = CalendarMonth::containing(self.focused);
        }
    }

    /// Applies a click on `date`. Disabled dates are ignored.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        if self.is_disabled(date) {
            return false;
        }
        self.selection.select(date);
        self.focus(date);
        true
    }

    /// Applies a click on the focused date.
    pub fn select_focused(&mut self) -> bool {
        self.select(self.focused)
    }

    /// Replaces the selection.
    pub fn set_selection(&mut self, selection: DateSelection) {
        self.selection = selection;
    }

    fn shift_months(&mut self, months: i32) {
        self.month = self.month.add_months(months);
        let day = self.focused.day().min(self.month.days_in_month());
        let focused = self.month.first_day().with_day(day).unwrap_or(self.month.first_day());
        self.focused = self.clamp(focused);
    }

    fn clamp(&self, date: NaiveDate) -> NaiveDate {
        let date = self.min.map_or(date, |min| date.max(min));
        self.max.map_or(date, |max| date.min(max))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn month_metadata() {
        let february = CalendarMonth::new(2024, 2).expect("month");
        assert_eq!(february.days_in_month(), 29);
        assert_eq!(february.next(), CalendarMonth::new(2024, 3).expect("month"));
        assert_eq!(february.previous().year(), 2024);
        assert_eq!(
            CalendarMonth::new(2024, 1).expect("month").previous(),
            CalendarMonth::new(2023, 12).expect("month")
        );
        assert_eq!(february.caption(), "February 2024");
        assert!(CalendarMonth::new(2024, 13).is_err());
    }

    #[test]
    fn grid_pads_with_adjacent_months() {
        // March 2026 starts on a Sunday and ends on a Tuesday.
        let month = CalendarMonth::new(2026, 3).expect("month");
        let grid = month_grid(month, Weekday::Sun, false);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][0].date, date(2026, 3, 1));
        assert!(!grid[0][0].outside);
        assert_eq!(grid[4][6].date, date(2026, 4, 4));
        assert!(grid[4][6].outside);

        let monday_grid = month_grid(month, Weekday::Mon, false);
        assert_eq!(monday_grid[0][0].date, date(2026, 2, 23));
        assert!(monday_grid[0][0].outside);
        assert_eq!(monday_grid[0][6].date, date(2026, 3, 1));
    }

    #[test]
    fn fixed_weeks_always_render_six_rows() {
        let month = CalendarMonth::new(2026, 2).expect("month");
        assert_eq!(month_grid(month, Weekday::Sun, false).len(), 4);
        assert_eq!(month_grid(month, Weekday::Sun, true).len(), 6);
    }

    #[test]
    fn weekday_labels_rotate_with_week_start() {
        assert_eq!(weekday_labels(Weekday::Mon)[0], "Mo");
        assert_eq!(weekday_labels(Weekday::Mon)[6], "Su");
        assert_eq!(weekday_labels(Weekday::Sun)[0], "Su");
    }

    #[test]
    fn single_selection_toggles() {
        let mut selection = DateSelection::empty(CalendarMode::Single);
        selection.select(date(2026, 3, 4));
        assert!(selection.contains(date(2026, 3, 4)));
        selection.select(date(2026, 3, 4));
        assert_eq!(selection, DateSelection::Single(None));
    }

    #[test]
    fn multiple_selection_stays_sorted() {
        let mut selection = DateSelection::empty(CalendarMode::Multiple);
        selection.select(date(2026, 3, 9));
        selection.select(date(2026, 3, 2));
        selection.select(date(2026, 3, 5));
        selection.select(date(2026, 3, 9));
        assert_eq!(
            selection,
            DateSelection::Multiple(vec![date(2026, 3, 2), date(2026, 3, 5)])
        );
    }

    #[test]
    fn range_selection_orders_and_restarts() {
        let mut selection = DateSelection::empty(CalendarMode::Range);
        selection.select(date(2026, 3, 10));
        selection.select(date(2026, 3, 4));
        assert_eq!(
            selection,
            DateSelection::Range {
                start: Some(date(2026, 3, 4)),
                end: Some(date(2026, 3, 10))
            }
        );
        assert!(selection.is_range_middle(date(2026, 3, 7)));
        assert!(selection.is_range_start(date(2026, 3, 4)));
        assert!(selection.is_range_end(date(2026, 3, 10)));
        selection.select(date(2026, 3, 20));
        assert_eq!(
            selection,
            DateSelection::Range {
                start: Some(date(2026, 3, 20)),
                end: None
            }
        );
    }

    #[test]
    fn keyboard_focus_crosses_months() {
        let mut state = CalendarState::new(date(2026, 3, 31), DateSelection::Single(None));
        assert!(state.move_focus("ArrowRight"));
        assert_eq!(state.focused(), date(2026, 4, 1));
        assert_eq!(state.month(), CalendarMonth::new(2026, 4).expect("month"));
        assert!(state.move_focus("PageUp"));
        assert_eq!(state.focused(), date(2026, 3, 1));
        assert!(!state.move_focus("Enter"));
    }

    #[test]
    fn home_and_end_follow_week_start() {
        // 2026-03-04 is a Wednesday.
        let mut state = CalendarState::new(date(2026, 3, 4), DateSelection::Single(None))
            .with_week_start(Weekday::Mon);
        state.move_focus("Home");
        assert_eq!(state.focused(), date(2026, 3, 2));
        state.move_focus("End");
        assert_eq!(state.focused(), date(2026, 3, 8));
    }

    #[test]
    fn bounds_disable_and_clamp() {
        let mut state = CalendarState::new(date(2026, 3, 15), DateSelection::Single(None))
            .with_bounds(Some(date(2026, 3, 10)), Some(date(2026, 3, 20)))
            .with_disabled_weekdays(vec![Weekday::Sun]);
        assert!(state.is_disabled(date(2026, 3, 9)));
        assert!(state.is_disabled(date(2026, 3, 15)));
        assert!(!state.select(date(2026, 3, 21)));
        assert!(state.select(date(2026, 3, 16)));
        assert!(!state.can_go_previous());
        assert!(!state.can_go_next());
        state.move_focus("ArrowDown");
        state.move_focus("ArrowDown");
        assert_eq!(state.focused(), date(2026, 3, 20));
    }

    #[test]
    fn month_navigation_keeps_day_when_possible() {
        let mut state = CalendarState::new(date(2026, 1, 31), DateSelection::Single(None));
        assert!(state.next_month());
        assert_eq!(state.focused(), date(2026, 2, 28));
        assert!(state.previous_month());
        assert_eq!(state.focused(), date(2026, 1, 28));
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let mut state = CalendarState::new(date(2026, 3, 1), DateSelection::Single(None))
            .with_bounds(Some(date(2026, 3, 20)), Some(date(2026, 3, 10)));
        assert_eq!(state.focused(), date(2026, 3, 10));
        assert!(!state.is_disabled(date(2026, 3, 15)));
        assert!(state.is_disabled(date(2026, 3, 21)));
        assert!(state.select(date(2026, 3, 12)));
    }
}
