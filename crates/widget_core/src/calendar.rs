//! Month grid model for the calendar panels of the range picker.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::date::{DisabledDates, YearMonth};

/// Rows rendered per month; six weeks always cover any month.
pub const GRID_WEEKS: usize = 6;
/// Total cells in a month grid.
pub const GRID_CELLS: usize = GRID_WEEKS * 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Range-selection role of a day cell.
pub enum CellSelection {
    /// Not part of any selection.
    None,
    /// First day of the range.
    Start,
    /// Last day of the range.
    End,
    /// Range of a single day.
    StartEnd,
    /// Strictly inside a committed or completed range.
    InRange,
    /// Inside the preview between the pending start and the hovered day.
    HoverRange,
}

impl CellSelection {
    /// Stable token for the `data-ui-selection` DOM hook.
    pub const fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Start => "start",
            Self::End => "end",
            Self::StartEnd => "start-end",
            Self::InRange => "in-range",
            Self::HoverRange => "hover-range",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Days currently highlighted on the calendars.
pub struct RangeHighlight {
    /// Pending or committed start.
    pub start: Option<NaiveDate>,
    /// Pending or committed end.
    pub end: Option<NaiveDate>,
    /// Day under the pointer while only the start is chosen.
    pub hover: Option<NaiveDate>,
}

impl RangeHighlight {
    /// Selection role of `date`.
    pub fn classify(&self, date: NaiveDate) -> CellSelection {
        match (self.start, self.end, self.hover) {
            (Some(a), Some(b), _) => {
                let (lo, hi) = (a.min(b), a.max(b));
                if date == lo && date == hi {
                    CellSelection::StartEnd
                } else if date == lo {
                    CellSelection::Start
                } else if date == hi {
                    CellSelection::End
                } else if lo < date && date < hi {
                    CellSelection::InRange
                } else {
                    CellSelection::None
                }
            }
            (Some(start), None, hover) => {
                if date == start {
                    return CellSelection::Start;
                }
                match hover {
                    Some(hover) if date >= start.min(hover) && date <= start.max(hover) => {
                        CellSelection::HoverRange
                    }
                    _ => CellSelection::None,
                }
            }
            _ => CellSelection::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One day in a month grid.
pub struct DayCell {
    /// The day.
    pub date: NaiveDate,
    /// Belongs to the displayed month (otherwise a leading/trailing filler).
    pub in_month: bool,
    /// Equals the supplied `today`.
    pub is_today: bool,
    /// Blocked by the disabled-date rule.
    pub disabled: bool,
    /// Range-selection role.
    pub selection: CellSelection,
}

/// Builds the 6x7 grid for `month`, starting each week on `week_start`.
pub fn month_grid(
    month: YearMonth,
    week_start: Weekday,
    today: NaiveDate,
    highlight: &RangeHighlight,
    disabled: &DisabledDates,
) -> Vec<DayCell> {
    let first = month.first_day();
    let lead = (first.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    let grid_start = first - Duration::days(i64::from(lead));

    (0..GRID_CELLS as i64)
        .map(|index| {
            let date = grid_start + Duration::days(index);
            DayCell {
                date,
                in_month: YearMonth::of(date) == month,
                is_today: date == today,
                disabled: disabled.contains(date),
                selection: highlight.classify(date),
            }
        })
        .collect()
}

/// Short weekday headers in display order.
pub fn weekday_labels(week_start: Weekday) -> [&'static str; 7] {
    let mut day = week_start;
    let mut labels = [""; 7];
    for label in &mut labels {
        *label = match day {
            Weekday::Mon => "Mo",
            Weekday::Tue => "Tu",
            Weekday::Wed => "We",
            Weekday::Thu => "Th",
            Weekday::Fri => "Fr",
            Weekday::Sat => "Sa",
            Weekday::Sun => "Su",
        };
        day = day.succ();
    }
    labels
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn grid_starts_on_configured_weekday() {
        // 2024-01-01 is a Monday.
        let jan = YearMonth::of(day(2024, 1, 1));
        let cells = month_grid(
            jan,
            Weekday::Sun,
            day(2024, 1, 3),
            &RangeHighlight::default(),
            &DisabledDates::None,
        );

        assert_eq!(cells.len(), GRID_CELLS);
        assert_eq!(cells[0].date, day(2023, 12, 31));
        assert!(!cells[0].in_month);
        assert_eq!(cells[1].date, day(2024, 1, 1));
        assert!(cells[3].is_today);

        let monday_first = month_grid(
            jan,
            Weekday::Mon,
            day(2024, 1, 3),
            &RangeHighlight::default(),
            &DisabledDates::None,
        );
        assert_eq!(monday_first[0].date, day(2024, 1, 1));
    }

    #[test]
    fn completed_range_marks_ends_and_interior() {
        let highlight = RangeHighlight {
            start: Some(day(2024, 1, 10)),
            end: Some(day(2024, 1, 5)),
            hover: None,
        };
        assert_eq!(highlight.classify(day(2024, 1, 5)), CellSelection::Start);
        assert_eq!(highlight.classify(day(2024, 1, 7)), CellSelection::InRange);
        assert_eq!(highlight.classify(day(2024, 1, 10)), CellSelection::End);
        assert_eq!(highlight.classify(day(2024, 1, 11)), CellSelection::None);
    }

    #[test]
    fn pending_start_previews_hover_range() {
        let highlight = RangeHighlight {
            start: Some(day(2024, 1, 10)),
            end: None,
            hover: Some(day(2024, 1, 7)),
        };
        assert_eq!(highlight.classify(day(2024, 1, 10)), CellSelection::Start);
        assert_eq!(highlight.classify(day(2024, 1, 8)), CellSelection::HoverRange);
        assert_eq!(highlight.classify(day(2024, 1, 6)), CellSelection::None);
    }

    #[test]
    fn weekday_labels_rotate_with_week_start() {
        assert_eq!(weekday_labels(Weekday::Sun)[0], "Su");
        assert_eq!(weekday_labels(Weekday::Mon)[6], "Su");
    }
}
