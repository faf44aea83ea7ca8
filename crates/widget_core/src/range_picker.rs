//! Range date picker synchronization.
//!
//! One logical [`DateRangeValue`] is kept consistent across two calendar panels, the optional
//! start/end time pickers, shortcut presets, and the two-sided text input. Calendar clicks build a
//! pending pair; the pair is committed immediately for day pickers and on an explicit confirm when
//! time-of-day is enabled. Typed text is parsed with the active [`DateFormat`] and only valid
//! parses reach the pending value.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::RangeHighlight;
use crate::controlled::Controlled;
use crate::date::{midnight, DateFormat, DateRangeValue, DisabledDates, YearMonth};
use crate::error::WidgetError;

const MONTHS_PER_YEAR: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// One side of the range (and its text input).
pub enum RangeSide {
    /// Start side, input index 0.
    Start,
    /// End side, input index 1.
    End,
}

impl RangeSide {
    /// Input index of the side.
    pub const fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }

    /// The opposite side.
    pub const fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Pagination direction reported by a calendar panel.
pub enum PageDirection {
    /// Earlier months.
    Backward,
    /// Later months.
    Forward,
}

impl PageDirection {
    /// Infers direction from day offsets relative to today; a zero delta counts as forward.
    pub fn infer(previous_offset: i64, offset: i64) -> Self {
        if offset - previous_offset < 0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Pagination step.
pub enum PageUnit {
    /// Single arrow: one month.
    Month,
    /// Double arrow: one year.
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Where shortcut presets render.
pub enum ShortcutPlacement {
    /// Column left of the calendars.
    Left,
    /// Footer row below the calendars.
    #[default]
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Preset range offered next to the calendars.
pub struct Shortcut {
    /// Button text.
    pub label: String,
    /// Range applied when chosen.
    pub value: DateRangeValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Months shown by the left and right calendar panels.
pub struct CalendarCursor {
    /// Left panel month.
    pub left: YearMonth,
    /// Right panel month, always one month after `left`.
    pub right: YearMonth,
}

impl CalendarCursor {
    /// Cursor whose left panel shows `left`.
    pub fn starting_at(left: YearMonth) -> Self {
        Self {
            left,
            right: left.add_months(1),
        }
    }

    /// Cursor whose right panel shows `right`.
    pub fn ending_at(right: YearMonth) -> Self {
        Self {
            left: right.add_months(-1),
            right,
        }
    }

    fn shifted(self, months: i32) -> Self {
        Self::starting_at(self.left.add_months(months))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Range picker props.
pub struct RangePickerConfig {
    /// Display/parse pattern; defaults by `show_time`.
    pub format: Option<DateFormat>,
    /// Offer start/end time pickers and require an explicit confirm.
    pub show_time: bool,
    /// Keep `start <= end` on commit.
    pub order: bool,
    /// Disable the whole picker.
    pub disabled: bool,
    /// Disable one side; suspends ordering.
    pub disabled_sides: [bool; 2],
    /// Keep the popup open after a commit.
    pub disable_confirm: bool,
    /// Offer the clear affordance.
    pub allow_clear: bool,
    /// Accept typed input.
    pub editable: bool,
    /// Preset ranges.
    pub shortcuts: Vec<Shortcut>,
    /// Where the presets render.
    pub shortcuts_placement: ShortcutPlacement,
    /// Days that cannot be picked.
    pub disabled_dates: DisabledDates,
    /// Initial committed value when uncontrolled.
    pub default_value: Option<DateRangeValue>,
    /// Initial left panel month.
    pub default_picker_month: Option<YearMonth>,
    /// First day of the calendar week.
    pub week_start: Weekday,
    /// Input placeholders.
    pub placeholder: [String; 2],
    /// Text between the two inputs.
    pub separator: String,
}

impl Default for RangePickerConfig {
    fn default() -> Self {
        Self {
            format: None,
            show_time: false,
            order: true,
            disabled: false,
            disabled_sides: [false, false],
            disable_confirm: false,
            allow_clear: true,
            editable: true,
            shortcuts: Vec::new(),
            shortcuts_placement: ShortcutPlacement::Bottom,
            disabled_dates: DisabledDates::None,
            default_value: None,
            default_picker_month: None,
            week_start: Weekday::Sun,
            placeholder: ["Start date".to_string(), "End date".to_string()],
            separator: "-".to_string(),
        }
    }
}

impl RangePickerConfig {
    /// Parses a JSON props payload.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidConfig`] for malformed JSON or an invalid `format`.
    pub fn from_json(raw: &str) -> Result<Self, WidgetError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Active display/parse pattern.
    pub fn resolved_format(&self) -> DateFormat {
        self.format
            .clone()
            .unwrap_or_else(|| DateFormat::default_for(self.show_time))
    }

    fn side_disabled(&self, side: RangeSide) -> bool {
        self.disabled_sides[side.index()]
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Inputs accepted by [`reduce_range_picker`].
pub enum RangePickerAction {
    /// A day was clicked on either calendar.
    SelectDate(NaiveDate),
    /// Pointer moved over a day (or left the grid).
    HoverDate(Option<NaiveDate>),
    /// Arrow button on a calendar header.
    Paginate {
        /// Earlier or later.
        direction: PageDirection,
        /// Month or year.
        unit: PageUnit,
    },
    /// Calendar reported a newly focused date without direction.
    PanelChanged {
        /// Date the panel moved to.
        date: NaiveDate,
        /// Reference day for offset inference.
        today: NaiveDate,
    },
    /// Switch the popup between calendars and time pickers.
    ToggleTimePanel,
    /// Time picker changed one side.
    SetTime {
        /// Side edited.
        side: RangeSide,
        /// New time of day.
        time: NaiveTime,
    },
    /// The OK button.
    Confirm,
    /// A preset was chosen.
    ApplyShortcut(usize),
    /// Text typed into one input.
    InputChange {
        /// Input edited.
        side: RangeSide,
        /// Full input text.
        text: String,
    },
    /// Enter pressed in the focused input.
    PressEnter,
    /// An input received focus.
    FocusInput(RangeSide),
    /// Clear affordance.
    Clear,
    /// Popup open/close request.
    SetPopupVisible(bool),
    /// Host value update; `None` releases control.
    SyncValue(Option<DateRangeValue>),
    /// Host popup visibility update; `None` releases control.
    SyncPopupVisible(Option<bool>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Callbacks and collaborator commands emitted by [`reduce_range_picker`].
pub enum RangePickerEffect {
    /// Committed value changed.
    Change {
        /// Formatted sides.
        text: [String; 2],
        /// Raw value.
        value: DateRangeValue,
    },
    /// Pending pair completed while waiting for confirm.
    Select {
        /// Formatted sides.
        text: [String; 2],
        /// Raw value.
        value: DateRangeValue,
    },
    /// Range confirmed through OK.
    Ok {
        /// Formatted sides.
        text: [String; 2],
        /// Raw value.
        value: DateRangeValue,
    },
    /// Input cleared.
    Clear,
    /// Popup visibility changed.
    VisibleChange(bool),
    /// Preset applied.
    SelectShortcut(usize),
    /// Focus the given input.
    FocusInput(RangeSide),
    /// Blur the inputs.
    BlurInput,
}

#[derive(Debug, Clone, PartialEq)]
/// Range picker instance state.
pub struct RangePickerState {
    config: RangePickerConfig,
    format: DateFormat,
    value: Controlled<Option<DateRangeValue>>,
    popup: Controlled<bool>,
    cursor: CalendarCursor,
    last_panel_offset: i64,
    first: Option<NaiveDate>,
    second: Option<NaiveDate>,
    hover: Option<NaiveDate>,
    times: [Option<NaiveTime>; 2],
    time_panel_open: bool,
    shown: [Option<NaiveDateTime>; 2],
    raw: [Option<String>; 2],
    focused: RangeSide,
}

impl RangePickerState {
    /// Creates a picker. `today` seeds the calendars when no value or picker month is given.
    pub fn new(config: RangePickerConfig, value: Option<DateRangeValue>, today: NaiveDate) -> Self {
        let format = config.resolved_format();
        let anchor = config
            .default_picker_month
            .or_else(|| value.or(config.default_value).map(|v| YearMonth::of(v.start.date())))
            .unwrap_or_else(|| YearMonth::of(today));
        let committed = Controlled::new(value.map(Some), config.default_value);
        Self {
            format,
            value: committed,
            popup: Controlled::uncontrolled(false),
            cursor: CalendarCursor::starting_at(anchor),
            last_panel_offset: 0,
            first: None,
            second: None,
            hover: None,
            times: [None, None],
            time_panel_open: false,
            shown: [None, None],
            raw: [None, None],
            focused: RangeSide::Start,
            config,
        }
    }

    /// Props the picker was built with.
    pub fn config(&self) -> &RangePickerConfig {
        &self.config
    }

    /// Active format.
    pub fn format(&self) -> &DateFormat {
        &self.format
    }

    /// Committed value.
    pub fn value(&self) -> Option<DateRangeValue> {
        *self.value.current()
    }

    /// Whether the popup is open.
    pub fn popup_visible(&self) -> bool {
        *self.popup.current()
    }

    /// Months shown by the calendars.
    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    /// Whether the popup shows time pickers instead of calendars.
    pub fn time_panel_open(&self) -> bool {
        self.time_panel_open
    }

    /// Time chosen for a side, if any.
    pub fn time(&self, side: RangeSide) -> Option<NaiveTime> {
        self.times[side.index()]
    }

    /// Focused input.
    pub fn focused_input(&self) -> RangeSide {
        self.focused
    }

    /// Pending calendar selection, in click order.
    pub fn pending(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.first, self.second)
    }

    /// Days the calendars should highlight: the pending pair if any, else the typed sides, else
    /// the committed value.
    pub fn highlight(&self) -> RangeHighlight {
        if self.first.is_some() {
            return RangeHighlight {
                start: self.first,
                end: self.second,
                hover: self.hover,
            };
        }
        if self.shown.iter().any(Option::is_some) {
            return RangeHighlight {
                start: self.shown[0].map(|value| value.date()),
                end: self.shown[1].map(|value| value.date()),
                hover: None,
            };
        }
        let committed = self.value();
        RangeHighlight {
            start: committed.map(|v| v.start.date()),
            end: committed.map(|v| v.end.date()),
            hover: None,
        }
    }

    /// Text rendered by one input: raw text, else the typed pending value, else the committed
    /// value.
    pub fn input_text(&self, side: RangeSide) -> String {
        let index = side.index();
        if let Some(raw) = &self.raw[index] {
            return raw.clone();
        }
        if self.shown.iter().any(Option::is_some) {
            return self.shown[index]
                .map(|value| self.format.format(value))
                .unwrap_or_default();
        }
        self.value()
            .map(|value| {
                let side_value = match side {
                    RangeSide::Start => value.start,
                    RangeSide::End => value.end,
                };
                self.format.format(side_value)
            })
            .unwrap_or_default()
    }

    fn text_of(&self, value: DateRangeValue) -> [String; 2] {
        [self.format.format(value.start), self.format.format(value.end)]
    }

    fn time_or_midnight(&self, side: RangeSide) -> NaiveTime {
        self.times[side.index()].unwrap_or_else(midnight)
    }

    fn pending_range(&self) -> Option<DateRangeValue> {
        let (first, second) = (self.first?, self.second?);
        let (lo, hi) = (first.min(second), first.max(second));
        Some(DateRangeValue::new(
            lo.and_time(self.time_or_midnight(RangeSide::Start)),
            hi.and_time(self.time_or_midnight(RangeSide::End)),
        ))
    }

    fn shown_range(&self) -> Option<DateRangeValue> {
        Some(DateRangeValue::new(self.shown[0]?, self.shown[1]?))
    }

    fn set_popup(&mut self, visible: bool, effects: &mut Vec<RangePickerEffect>) {
        if !visible {
            self.hover = None;
        }
        if self.popup.set(visible) {
            effects.push(RangePickerEffect::VisibleChange(visible));
        }
    }

    /// Commits `candidate` and drops every pending edit. Returns the value as committed, which
    /// may still differ from [`Self::value`] while the host controls it.
    fn commit(
        &mut self,
        candidate: DateRangeValue,
        effects: &mut Vec<RangePickerEffect>,
    ) -> DateRangeValue {
        let ordered = self.config.order && !self.config.disabled_sides.iter().any(|side| *side);
        let next = if ordered { candidate.sorted() } else { candidate };
        self.shown = [None, None];
        self.raw = [None, None];
        self.first = None;
        self.second = None;
        self.hover = None;
        if self.value.set(Some(next)) {
            log::debug!("range picker committed {next:?}");
            effects.push(RangePickerEffect::Change {
                text: self.text_of(next),
                value: next,
            });
        }
        next
    }

    fn close_after_commit(&mut self, effects: &mut Vec<RangePickerEffect>) {
        if self.config.disable_confirm {
            return;
        }
        self.set_popup(false, effects);
        effects.push(RangePickerEffect::BlurInput);
    }

    fn complete_pair(&mut self, effects: &mut Vec<RangePickerEffect>) {
        let Some(range) = self.pending_range() else {
            return;
        };
        if self.config.show_time {
            effects.push(RangePickerEffect::Select {
                text: self.text_of(range),
                value: range,
            });
            return;
        }
        self.commit(range, effects);
        self.close_after_commit(effects);
    }

    fn paginate(&mut self, months: i32, effects: &mut Vec<RangePickerEffect>) {
        self.cursor = self.cursor.shifted(months);
        log::trace!(
            "range picker panels -> {} / {}",
            self.cursor.left.label(),
            self.cursor.right.label()
        );
        effects.push(RangePickerEffect::FocusInput(self.focused));
    }
}

/// Applies a [`RangePickerAction`] and collects callbacks and collaborator commands.
///
/// A disabled picker only accepts host synchronization actions.
///
/// # Errors
///
/// Returns [`WidgetError::UnknownShortcut`] when a shortcut index is out of range.
pub fn reduce_range_picker(
    state: &mut RangePickerState,
    action: RangePickerAction,
) -> Result<Vec<RangePickerEffect>, WidgetError> {
    let mut effects = Vec::new();
    let passive = matches!(
        action,
        RangePickerAction::SyncValue(_) | RangePickerAction::SyncPopupVisible(_)
    );
    if state.config.disabled && !passive {
        return Ok(effects);
    }

    match action {
        RangePickerAction::SelectDate(date) => {
            if state.config.disabled_dates.contains(date) {
                return Ok(effects);
            }
            match (state.first, state.second) {
                (Some(first), None) => {
                    if date < first {
                        state.first = Some(date);
                        state.second = Some(first);
                    } else {
                        state.second = Some(date);
                    }
                    state.hover = None;
                    state.complete_pair(&mut effects);
                }
                _ => {
                    state.first = Some(date);
                    state.second = None;
                }
            }
        }
        RangePickerAction::HoverDate(date) => {
            state.hover = date;
        }
        RangePickerAction::Paginate { direction, unit } => {
            let months = match unit {
                PageUnit::Month => 1,
                PageUnit::Year => MONTHS_PER_YEAR,
            };
            let months = match direction {
                PageDirection::Backward => -months,
                PageDirection::Forward => months,
            };
            state.paginate(months, &mut effects);
        }
        RangePickerAction::PanelChanged { date, today } => {
            let offset = date.signed_duration_since(today).num_days();
            let target = YearMonth::of(date);
            let next = match PageDirection::infer(state.last_panel_offset, offset) {
                PageDirection::Backward if state.cursor.left != target => {
                    CalendarCursor::starting_at(target)
                }
                PageDirection::Forward if state.cursor.right != target => {
                    CalendarCursor::ending_at(target)
                }
                _ => return Ok(effects),
            };
            state.cursor = next;
            state.last_panel_offset = offset;
            effects.push(RangePickerEffect::FocusInput(state.focused));
        }
        RangePickerAction::ToggleTimePanel => {
            if state.config.show_time {
                state.time_panel_open = !state.time_panel_open;
            }
        }
        RangePickerAction::SetTime { side, time } => {
            if !state.config.side_disabled(side) {
                state.times[side.index()] = Some(time);
            }
        }
        RangePickerAction::Confirm => {
            let Some(range) = state.pending_range().or_else(|| state.shown_range()) else {
                return Ok(effects);
            };
            let confirmed = state.commit(range, &mut effects);
            effects.push(RangePickerEffect::Ok {
                text: state.text_of(confirmed),
                value: confirmed,
            });
            state.time_panel_open = false;
            state.close_after_commit(&mut effects);
        }
        RangePickerAction::ApplyShortcut(index) => {
            let shortcut = state
                .config
                .shortcuts
                .get(index)
                .cloned()
                .ok_or(WidgetError::UnknownShortcut(index))?;
            let range = shortcut.value;
            state.first = Some(range.start.date());
            state.second = Some(range.end.date());
            state.times = [Some(range.start.time()), Some(range.end.time())];
            state.cursor = CalendarCursor::starting_at(YearMonth::of(range.start.date()));
            effects.push(RangePickerEffect::SelectShortcut(index));
            state.complete_pair(&mut effects);
        }
        RangePickerAction::InputChange { side, text } => {
            if !state.config.editable || state.config.side_disabled(side) {
                return Ok(effects);
            }
            state.focused = side;
            let index = side.index();
            match state.format.parse(&text) {
                Some(parsed) => {
                    if state.shown.iter().all(Option::is_none) {
                        if let Some(base) = state.pending_range().or_else(|| state.value()) {
                            state.shown = [Some(base.start), Some(base.end)];
                        }
                    }
                    state.first = None;
                    state.second = None;
                    state.hover = None;
                    state.shown[index] = Some(parsed);
                    state.raw[index] = None;
                    state.cursor = CalendarCursor::starting_at(YearMonth::of(parsed.date()));
                }
                None => state.raw[index] = Some(text),
            }
        }
        RangePickerAction::PressEnter => {
            if state.shown.iter().all(Option::is_none) {
                state.set_popup(false, &mut effects);
                return Ok(effects);
            }
            match state.shown_range() {
                Some(range) => {
                    state.commit(range, &mut effects);
                    state.close_after_commit(&mut effects);
                }
                None => {
                    state.focused = state.focused.other();
                    effects.push(RangePickerEffect::FocusInput(state.focused));
                }
            }
        }
        RangePickerAction::FocusInput(side) => {
            state.focused = side;
        }
        RangePickerAction::Clear => {
            if !state.config.allow_clear {
                return Ok(effects);
            }
            state.raw = [None, None];
            state.shown = [None, None];
            state.first = None;
            state.second = None;
            state.hover = None;
            state.times = [None, None];
            effects.push(RangePickerEffect::Clear);
        }
        RangePickerAction::SetPopupVisible(visible) => {
            state.set_popup(visible, &mut effects);
        }
        RangePickerAction::SyncValue(value) => {
            state.value.sync(value.map(Some));
        }
        RangePickerAction::SyncPopupVisible(visible) => {
            state.popup.sync(visible);
        }
    }

    Ok(effects)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).expect("valid date")
    }

    fn picker(config: RangePickerConfig) -> RangePickerState {
        RangePickerState::new(config, None, day(1, 1))
    }

    fn apply(state: &mut RangePickerState, action: RangePickerAction) -> Vec<RangePickerEffect> {
        reduce_range_picker(state, action).expect("reduce")
    }

    fn changes(effects: &[RangePickerEffect]) -> usize {
        effects
            .iter()
            .filter(|effect| matches!(effect, RangePickerEffect::Change { .. }))
            .count()
    }

    #[test]
    fn reversed_clicks_commit_ordered_range() {
        let mut state = picker(RangePickerConfig::default());
        apply(&mut state, RangePickerAction::SetPopupVisible(true));
        assert!(apply(&mut state, RangePickerAction::SelectDate(day(1, 10))).is_empty());
        let effects = apply(&mut state, RangePickerAction::SelectDate(day(1, 5)));

        let expected = DateRangeValue::from_dates(day(1, 5), day(1, 10));
        assert_eq!(state.value(), Some(expected));
        assert_eq!(
            effects,
            vec![
                RangePickerEffect::Change {
                    text: ["2024-01-05".to_string(), "2024-01-10".to_string()],
                    value: expected,
                },
                RangePickerEffect::VisibleChange(false),
                RangePickerEffect::BlurInput,
            ]
        );
        assert_eq!(state.input_text(RangeSide::End), "2024-01-10");
    }

    #[test]
    fn same_range_again_does_not_refire_change() {
        let mut state = picker(RangePickerConfig::default());
        apply(&mut state, RangePickerAction::SelectDate(day(1, 5)));
        apply(&mut state, RangePickerAction::SelectDate(day(1, 10)));
        apply(&mut state, RangePickerAction::SelectDate(day(1, 5)));
        let effects = apply(&mut state, RangePickerAction::SelectDate(day(1, 10)));
        assert_eq!(changes(&effects), 0);
    }

    #[test]
    fn time_mode_waits_for_confirm() {
        let mut state = picker(RangePickerConfig {
            show_time: true,
            ..RangePickerConfig::default()
        });
        apply(&mut state, RangePickerAction::SelectDate(day(1, 5)));
        let selected = apply(&mut state, RangePickerAction::SelectDate(day(1, 10)));
        assert!(matches!(selected.as_slice(), [RangePickerEffect::Select { .. }]));

        let start_time = NaiveTime::from_hms_opt(9, 30, 0).expect("time");
        let end_time = NaiveTime::from_hms_opt(17, 0, 0).expect("time");
        assert!(apply(
            &mut state,
            RangePickerAction::SetTime {
                side: RangeSide::Start,
                time: start_time,
            }
        )
        .is_empty());
        apply(
            &mut state,
            RangePickerAction::SetTime {
                side: RangeSide::End,
                time: end_time,
            },
        );
        assert_eq!(state.value(), None);

        let effects = apply(&mut state, RangePickerAction::Confirm);
        let expected = DateRangeValue::new(day(1, 5).and_time(start_time), day(1, 10).and_time(end_time));
        assert_eq!(state.value(), Some(expected));
        assert_eq!(changes(&effects), 1);
        assert!(effects.contains(&RangePickerEffect::Ok {
            text: [
                "2024-01-05 09:30:00".to_string(),
                "2024-01-10 17:00:00".to_string()
            ],
            value: expected,
        }));

        let again = apply(&mut state, RangePickerAction::Confirm);
        assert_eq!(changes(&again), 0);
    }

    #[test]
    fn typed_end_after_confirm_replaces_the_old_pair() {
        let mut state = picker(RangePickerConfig {
            show_time: true,
            ..RangePickerConfig::default()
        });
        apply(&mut state, RangePickerAction::SelectDate(day(1, 5)));
        apply(&mut state, RangePickerAction::SelectDate(day(1, 10)));
        apply(&mut state, RangePickerAction::Confirm);
        assert_eq!(state.pending(), (None, None));

        apply(
            &mut state,
            RangePickerAction::InputChange {
                side: RangeSide::End,
                text: "2024-01-20 00:00:00".to_string(),
            },
        );
        assert_eq!(state.highlight().end, Some(day(1, 20)));

        let effects = apply(&mut state, RangePickerAction::Confirm);
        let expected = DateRangeValue::from_dates(day(1, 5), day(1, 20));
        assert_eq!(state.value(), Some(expected));
        assert_eq!(changes(&effects), 1);
        assert!(effects.contains(&RangePickerEffect::Ok {
            text: [
                "2024-01-05 00:00:00".to_string(),
                "2024-01-20 00:00:00".to_string()
            ],
            value: expected,
        }));
    }

    #[test]
    fn controlled_confirm_reports_the_confirmed_range() {
        let host = DateRangeValue::from_dates(day(1, 1), day(1, 2));
        let mut state = RangePickerState::new(
            RangePickerConfig {
                show_time: true,
                ..RangePickerConfig::default()
            },
            Some(host),
            day(1, 1),
        );
        apply(&mut state, RangePickerAction::SelectDate(day(1, 5)));
        apply(&mut state, RangePickerAction::SelectDate(day(1, 10)));

        let effects = apply(&mut state, RangePickerAction::Confirm);
        let confirmed = DateRangeValue::from_dates(day(1, 5), day(1, 10));
        let text = [
            "2024-01-05 00:00:00".to_string(),
            "2024-01-10 00:00:00".to_string(),
        ];
        assert_eq!(
            &effects[..2],
            &[
                RangePickerEffect::Change {
                    text: text.clone(),
                    value: confirmed,
                },
                RangePickerEffect::Ok {
                    text,
                    value: confirmed,
                },
            ]
        );
        assert_eq!(state.value(), Some(host));
        assert_eq!(state.highlight().start, Some(day(1, 1)));
    }

    #[test]
    fn confirm_without_complete_pair_is_ignored() {
        let mut state = picker(RangePickerConfig {
            show_time: true,
            ..RangePickerConfig::default()
        });
        apply(&mut state, RangePickerAction::SelectDate(day(1, 5)));
        assert!(apply(&mut state, RangePickerAction::Confirm).is_empty());
        assert_eq!(state.value(), None);
    }

    #[test]
    fn pagination_moves_both_panels_together() {
        let mut state = picker(RangePickerConfig::default());
        assert_eq!(state.cursor().left, YearMonth { year: 2024, month: 1 });

        let effects = apply(
            &mut state,
            RangePickerAction::Paginate {
                direction: PageDirection::Backward,
                unit: PageUnit::Month,
            },
        );
        assert_eq!(state.cursor().left, YearMonth { year: 2023, month: 12 });
        assert_eq!(state.cursor().right, YearMonth { year: 2024, month: 1 });
        assert_eq!(effects, vec![RangePickerEffect::FocusInput(RangeSide::Start)]);

        apply(
            &mut state,
            RangePickerAction::Paginate {
                direction: PageDirection::Forward,
                unit: PageUnit::Year,
            },
        );
        assert_eq!(state.cursor().left, YearMonth { year: 2024, month: 12 });
        assert_eq!(state.cursor().right, YearMonth { year: 2025, month: 1 });
    }

    #[test]
    fn panel_change_infers_direction_from_day_offsets() {
        let mut state = picker(RangePickerConfig::default());
        let today = day(1, 15);

        apply(
            &mut state,
            RangePickerAction::PanelChanged {
                date: day(3, 1),
                today,
            },
        );
        assert_eq!(state.cursor().right, YearMonth { year: 2024, month: 3 });
        assert_eq!(state.cursor().left, YearMonth { year: 2024, month: 2 });

        apply(
            &mut state,
            RangePickerAction::PanelChanged {
                date: day(1, 1),
                today,
            },
        );
        assert_eq!(state.cursor().left, YearMonth { year: 2024, month: 1 });
        assert_eq!(state.cursor().right, YearMonth { year: 2024, month: 2 });
    }

    #[test]
    fn typed_input_is_parsed_or_held_raw() {
        let committed = DateRangeValue::from_dates(day(1, 5), day(1, 10));
        let mut state = RangePickerState::new(RangePickerConfig::default(), None, day(1, 1));
        apply(&mut state, RangePickerAction::SyncValue(Some(committed)));

        apply(
            &mut state,
            RangePickerAction::InputChange {
                side: RangeSide::End,
                text: "2024-01-".to_string(),
            },
        );
        assert_eq!(state.input_text(RangeSide::End), "2024-01-");
        assert_eq!(state.value(), Some(committed));

        apply(
            &mut state,
            RangePickerAction::InputChange {
                side: RangeSide::End,
                text: "2024-01-bad".to_string(),
            },
        );
        assert_eq!(state.input_text(RangeSide::End), "2024-01-bad");

        apply(
            &mut state,
            RangePickerAction::InputChange {
                side: RangeSide::End,
                text: "2024-01-20".to_string(),
            },
        );
        assert_eq!(state.input_text(RangeSide::End), "2024-01-20");
        assert_eq!(state.input_text(RangeSide::Start), "2024-01-05");
        assert_eq!(state.value(), Some(committed));

        let effects = apply(&mut state, RangePickerAction::PressEnter);
        assert_eq!(changes(&effects), 1);
        assert_eq!(
            state.value(),
            Some(committed),
            "controlled value stays with the host"
        );
    }

    #[test]
    fn enter_with_one_side_moves_focus() {
        let mut state = picker(RangePickerConfig::default());
        apply(
            &mut state,
            RangePickerAction::InputChange {
                side: RangeSide::Start,
                text: "2024-02-01".to_string(),
            },
        );
        let effects = apply(&mut state, RangePickerAction::PressEnter);
        assert_eq!(effects, vec![RangePickerEffect::FocusInput(RangeSide::End)]);
        assert_eq!(state.focused_input(), RangeSide::End);
        assert_eq!(state.value(), None);
    }

    #[test]
    fn clear_drops_pending_state_only() {
        let committed = DateRangeValue::from_dates(day(1, 5), day(1, 10));
        let mut state = picker(RangePickerConfig {
            default_value: Some(committed),
            ..RangePickerConfig::default()
        });
        apply(&mut state, RangePickerAction::SelectDate(day(2, 1)));
        apply(
            &mut state,
            RangePickerAction::InputChange {
                side: RangeSide::Start,
                text: "garbage".to_string(),
            },
        );

        let effects = apply(&mut state, RangePickerAction::Clear);
        assert_eq!(effects, vec![RangePickerEffect::Clear]);
        assert_eq!(state.pending(), (None, None));
        assert_eq!(state.value(), Some(committed));
        assert_eq!(state.input_text(RangeSide::Start), "2024-01-05");
    }

    #[test]
    fn shortcut_commits_preset_range() {
        let preset = DateRangeValue::from_dates(day(3, 1), day(3, 7));
        let mut state = picker(RangePickerConfig {
            shortcuts: vec![Shortcut {
                label: "First week of March".to_string(),
                value: preset,
            }],
            ..RangePickerConfig::default()
        });

        let effects = apply(&mut state, RangePickerAction::ApplyShortcut(0));
        assert_eq!(effects[0], RangePickerEffect::SelectShortcut(0));
        assert_eq!(state.value(), Some(preset));
        assert_eq!(state.cursor().left, YearMonth { year: 2024, month: 3 });

        assert_eq!(
            reduce_range_picker(&mut state, RangePickerAction::ApplyShortcut(4)),
            Err(WidgetError::UnknownShortcut(4))
        );
    }

    #[test]
    fn disabled_side_suspends_ordering() {
        let mut state = picker(RangePickerConfig {
            disabled_sides: [false, true],
            default_value: Some(DateRangeValue::from_dates(day(1, 1), day(1, 2))),
            ..RangePickerConfig::default()
        });
        apply(
            &mut state,
            RangePickerAction::InputChange {
                side: RangeSide::Start,
                text: "2024-01-09".to_string(),
            },
        );
        apply(&mut state, RangePickerAction::PressEnter);
        assert_eq!(
            state.value(),
            Some(DateRangeValue::from_dates(day(1, 9), day(1, 2)))
        );
    }

    #[test]
    fn disabled_dates_cannot_be_selected() {
        let mut state = picker(RangePickerConfig {
            disabled_dates: DisabledDates::Before(day(1, 3)),
            ..RangePickerConfig::default()
        });
        apply(&mut state, RangePickerAction::SelectDate(day(1, 2)));
        assert_eq!(state.pending(), (None, None));
    }

    #[test]
    fn popup_visibility_reports_only_real_changes() {
        let mut state = picker(RangePickerConfig::default());
        assert_eq!(
            apply(&mut state, RangePickerAction::SetPopupVisible(true)),
            vec![RangePickerEffect::VisibleChange(true)]
        );
        assert!(apply(&mut state, RangePickerAction::SetPopupVisible(true)).is_empty());
        apply(&mut state, RangePickerAction::SyncPopupVisible(Some(false)));
        assert!(!state.popup_visible());
    }

    #[test]
    fn disabled_picker_ignores_interaction() {
        let mut state = picker(RangePickerConfig {
            disabled: true,
            ..RangePickerConfig::default()
        });
        apply(&mut state, RangePickerAction::SelectDate(day(1, 5)));
        assert!(apply(&mut state, RangePickerAction::SelectDate(day(1, 6))).is_empty());
        assert_eq!(state.value(), None);
    }

    #[test]
    fn config_parses_from_json() {
        let config = RangePickerConfig::from_json(
            r#"{"show_time": true, "format": "%d/%m/%Y %H:%M", "disabled_dates": {"after": "2024-12-31"}}"#,
        )
        .expect("config");
        assert_eq!(config.resolved_format().pattern(), "%d/%m/%Y %H:%M");
        assert!(config.disabled_dates.contains(day(12, 31) + chrono::Duration::days(1)));

        assert!(matches!(
            RangePickerConfig::from_json(r#"{"format": "%Q"}"#),
            Err(WidgetError::InvalidConfig(_))
        ));
    }
}
