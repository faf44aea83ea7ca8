//! Calendar value types and format-string handling for the date widgets.

use chrono::format::{Item, Numeric, StrftimeItems};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// Display format for day-precision pickers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Display format for pickers with a time-of-day component.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Display format for standalone time fields.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Midnight, used when a side carries no explicit time of day.
pub fn midnight() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// A calendar month shown by one calendar panel.
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// Creates a month if `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Adds (or subtracts) whole months, carrying into the year.
    pub fn add_months(self, delta: i32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: total.div_euclid(12),
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Number of days in the month.
    pub fn days(self) -> u32 {
        let next = self.add_months(1).first_day();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    /// Header label such as `2024-01`.
    pub fn label(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Committed two-sided date value.
pub struct DateRangeValue {
    /// First side.
    pub start: NaiveDateTime,
    /// Second side.
    pub end: NaiveDateTime,
}

impl DateRangeValue {
    /// Creates a range without reordering.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Range spanning whole days, both sides at midnight.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start.and_time(midnight()), end.and_time(midnight()))
    }

    /// Copy with the earlier timestamp first.
    pub fn sorted(self) -> Self {
        if self.end < self.start {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }

    /// Whether `start <= end`.
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Validated chrono format string used to render and parse input text.
pub struct DateFormat(String);

impl DateFormat {
    /// Validates a chrono `strftime` pattern.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidFormat`] for empty patterns or unknown specifiers.
    pub fn new(pattern: impl Into<String>) -> Result<Self, WidgetError> {
        let pattern = pattern.into();
        let invalid = pattern.trim().is_empty()
            || StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(WidgetError::InvalidFormat(pattern));
        }
        Ok(Self(pattern))
    }

    /// Day-precision default, or date-time default when `show_time` is set.
    pub fn default_for(show_time: bool) -> Self {
        Self(if show_time { DATE_TIME_FORMAT } else { DATE_FORMAT }.to_string())
    }

    /// The raw pattern.
    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Whether the pattern renders any time-of-day field.
    pub fn has_time(&self) -> bool {
        StrftimeItems::new(&self.0).any(|item| {
            matches!(
                item,
                Item::Numeric(
                    Numeric::Hour | Numeric::Hour12 | Numeric::Minute | Numeric::Second,
                    _
                )
            )
        })
    }

    /// Renders a timestamp.
    pub fn format(&self, value: NaiveDateTime) -> String {
        value.format(&self.0).to_string()
    }

    /// Parses input text; date-only patterns resolve to midnight.
    ///
    /// Returns `None` unless the whole text matches the pattern.
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        NaiveDateTime::parse_from_str(text, &self.0)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(text, &self.0)
                    .ok()
                    .map(|date| date.and_time(midnight()))
            })
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::default_for(false)
    }
}

impl TryFrom<String> for DateFormat {
    type Error = WidgetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DateFormat> for String {
    fn from(value: DateFormat) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Days the user may not pick.
pub enum DisabledDates {
    /// Every day is selectable.
    #[default]
    None,
    /// Days strictly before the given day.
    Before(NaiveDate),
    /// Days strictly after the given day.
    After(NaiveDate),
    /// Days outside the inclusive window.
    Outside {
        /// First selectable day.
        start: NaiveDate,
        /// Last selectable day.
        end: NaiveDate,
    },
    /// An explicit list of blocked days.
    List(Vec<NaiveDate>),
}

impl DisabledDates {
    /// Whether `date` is blocked.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::None => false,
            Self::Before(limit) => date < *limit,
            Self::After(limit) => date > *limit,
            Self::Outside { start, end } => date < *start || date > *end,
            Self::List(days) => days.contains(&date),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn month_arithmetic_carries_years() {
        let jan = YearMonth::new(2024, 1).expect("month");
        assert_eq!(jan.add_months(-1), YearMonth { year: 2023, month: 12 });
        assert_eq!(jan.add_months(13), YearMonth { year: 2025, month: 2 });
        assert_eq!(YearMonth::of(day(2024, 2, 10)).days(), 29);
        assert_eq!(YearMonth::new(2024, 13), None);
    }

    #[test]
    fn parse_accepts_only_full_matches() {
        let format = DateFormat::default();
        assert_eq!(
            format.parse("2024-01-05"),
            Some(day(2024, 1, 5).and_time(midnight()))
        );
        assert_eq!(format.parse("2024-01-5x"), None);
        assert_eq!(format.parse("2024-02-30"), None);
        assert_eq!(format.parse(""), None);
    }

    #[test]
    fn date_time_format_round_trips_time_of_day() {
        let format = DateFormat::default_for(true);
        assert!(format.has_time());
        assert!(!DateFormat::default().has_time());
        let parsed = format.parse("2024-01-05 13:45:10").expect("parse");
        assert_eq!(format.format(parsed), "2024-01-05 13:45:10");
    }

    #[test]
    fn unknown_specifier_is_rejected() {
        assert_eq!(
            DateFormat::new("%Y-%Q"),
            Err(WidgetError::InvalidFormat("%Y-%Q".to_string()))
        );
        assert!(DateFormat::new("%d/%m/%Y").is_ok());
    }

    #[test]
    fn sorted_range_puts_earlier_side_first() {
        let range = DateRangeValue::from_dates(day(2024, 1, 10), day(2024, 1, 5));
        assert!(!range.is_ordered());
        assert_eq!(
            range.sorted(),
            DateRangeValue::from_dates(day(2024, 1, 5), day(2024, 1, 10))
        );
    }

    #[test]
    fn disabled_rules_match_days() {
        let start = day(2024, 1, 5);
        let end = day(2024, 1, 10);
        assert!(DisabledDates::Before(start).contains(day(2024, 1, 4)));
        assert!(!DisabledDates::Before(start).contains(start));
        assert!(DisabledDates::Outside { start, end }.contains(day(2024, 1, 11)));
        assert!(DisabledDates::List(vec![end]).contains(end));
        assert!(!DisabledDates::None.contains(end));
    }
}
