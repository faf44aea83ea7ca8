//! Range date picker: two inputs, two coordinated calendars, optional time panels.

use chrono::{NaiveDate, NaiveTime};
use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;
use wasm_bindgen::JsCast;
use widget_core::date::{midnight, DateRangeValue, TIME_FORMAT};
use widget_core::range_picker::{
    reduce_range_picker, PageDirection, PageUnit, RangePickerAction, RangePickerConfig,
    RangePickerEffect, RangePickerState, RangeSide, ShortcutPlacement,
};

use crate::dom::event_within;
use crate::focus::{FocusHandle, InputPairFocus};
use crate::primitives::{
    bool_token, merge_layout_class, Button, ButtonSize, ButtonVariant, FieldVariant, IconButton,
    Popup, TextField,
};
use crate::store::try_apply;
use crate::widgets::calendar::CalendarPanel;
use crate::{Icon, IconName, IconSize};

/// Formatted text of both sides plus the domain value, as handed to range callbacks.
pub type RangeChange = ([String; 2], DateRangeValue);

/// Parses the value of an `<input type="time">`, which omits seconds when they are zero.
pub fn parse_time_input(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .ok()
}

fn side_token(side: RangeSide) -> &'static str {
    match side {
        RangeSide::Start => "start",
        RangeSide::End => "end",
    }
}

#[component]
/// Two-sided date (and optionally time) range picker.
///
/// Values flow through the headless reducer; `value` and `popup_visible` put either one under
/// host control.
pub fn RangeDatePicker(
    #[prop(optional)] config: RangePickerConfig,
    /// Host-controlled committed value.
    #[prop(optional, into)]
    value: MaybeSignal<Option<DateRangeValue>>,
    /// Host-controlled popup visibility.
    #[prop(optional, into)]
    popup_visible: MaybeSignal<Option<bool>>,
    #[prop(optional)] on_change: Option<Callback<RangeChange>>,
    #[prop(optional)] on_select: Option<Callback<RangeChange>>,
    #[prop(optional)] on_ok: Option<Callback<RangeChange>>,
    #[prop(optional)] on_clear: Option<Callback<()>>,
    #[prop(optional)] on_visible_change: Option<Callback<bool>>,
    #[prop(optional)] on_select_shortcut: Option<Callback<usize>>,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    let today = chrono::Local::now().date_naive();
    let week_start = config.week_start;
    let show_time = config.show_time;
    let allow_clear = config.allow_clear;
    let editable = config.editable;
    let disabled = config.disabled;
    let disabled_sides = config.disabled_sides;
    let placement = config.shortcuts_placement;
    let placement_token = match placement {
        ShortcutPlacement::Left => "left",
        ShortcutPlacement::Bottom => "bottom",
    };
    let disabled_dates = config.disabled_dates.clone();
    let separator = config.separator.clone();
    let [start_placeholder, end_placeholder] = config.placeholder.clone();
    let shortcut_labels: Vec<String> = config
        .shortcuts
        .iter()
        .map(|shortcut| shortcut.label.clone())
        .collect();

    let state = create_rw_signal(RangePickerState::new(config, value.get_untracked(), today));
    let focus = InputPairFocus::new();
    let root = create_node_ref::<html::Div>();

    let dispatch = move |action: RangePickerAction| {
        for effect in try_apply(state, "range picker", action, reduce_range_picker) {
            match effect {
                RangePickerEffect::Change { text, value } => {
                    if let Some(on_change) = on_change.as_ref() {
                        on_change.call((text, value));
                    }
                }
                RangePickerEffect::Select { text, value } => {
                    if let Some(on_select) = on_select.as_ref() {
                        on_select.call((text, value));
                    }
                }
                RangePickerEffect::Ok { text, value } => {
                    if let Some(on_ok) = on_ok.as_ref() {
                        on_ok.call((text, value));
                    }
                }
                RangePickerEffect::Clear => {
                    if let Some(on_clear) = on_clear.as_ref() {
                        on_clear.call(());
                    }
                }
                RangePickerEffect::VisibleChange(visible) => {
                    if let Some(on_visible_change) = on_visible_change.as_ref() {
                        on_visible_change.call(visible);
                    }
                }
                RangePickerEffect::SelectShortcut(index) => {
                    if let Some(on_select_shortcut) = on_select_shortcut.as_ref() {
                        on_select_shortcut.call(index);
                    }
                }
                RangePickerEffect::FocusInput(side) => focus.focus(side.index()),
                RangePickerEffect::BlurInput => focus.blur(),
            }
        }
    };

    create_effect(move |_| {
        let value = value.get();
        dispatch(RangePickerAction::SyncValue(value));
    });
    create_effect(move |_| {
        let visible = popup_visible.get();
        dispatch(RangePickerAction::SyncPopupVisible(visible));
    });

    let outside_click_listener = window_event_listener(ev::mousedown, move |ev| {
        if !state.with_untracked(RangePickerState::popup_visible) {
            return;
        }
        let inside = root
            .get_untracked()
            .is_some_and(|root| event_within(&ev, root.unchecked_ref()));
        if !inside {
            dispatch(RangePickerAction::SetPopupVisible(false));
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    let open = move || state.with(RangePickerState::popup_visible);
    let has_text = move || {
        state.with(|state| {
            state.value().is_some()
                || !state.input_text(RangeSide::Start).is_empty()
                || !state.input_text(RangeSide::End).is_empty()
        })
    };

    let input = move |side: RangeSide, placeholder: String| {
        let side_disabled = disabled || disabled_sides[side.index()];
        view! {
            <TextField
                variant=FieldVariant::Embedded
                ui_slot=side_token(side)
                node_ref=focus.node_ref(side.index())
                placeholder=placeholder.clone()
                aria_label=placeholder
                value=Signal::derive(move || state.with(|state| state.input_text(side)))
                disabled=side_disabled
                readonly=!editable
                on_input=Callback::new(move |ev| {
                    dispatch(RangePickerAction::InputChange {
                        side,
                        text: event_target_value(&ev),
                    });
                })
                on_keydown=Callback::new(move |ev: KeyboardEvent| {
                    match ev.key().as_str() {
                        "Enter" => {
                            ev.prevent_default();
                            dispatch(RangePickerAction::PressEnter);
                        }
                        "Escape" => dispatch(RangePickerAction::SetPopupVisible(false)),
                        _ => {}
                    }
                })
                on_focus=Callback::new(move |_| {
                    dispatch(RangePickerAction::FocusInput(side));
                    dispatch(RangePickerAction::SetPopupVisible(true));
                })
            />
        }
    };

    let shortcuts = store_value(shortcut_labels);
    let shortcut_list = move || {
        view! {
            <div data-ui-slot="shortcuts" role="group" aria-label="Shortcuts">
                {shortcuts
                    .get_value()
                    .into_iter()
                    .enumerate()
                    .map(|(index, label)| {
                        view! {
                            <Button
                                variant=ButtonVariant::Quiet
                                size=ButtonSize::Sm
                                ui_slot="shortcut"
                                on_click=Callback::new(move |_| {
                                    dispatch(RangePickerAction::ApplyShortcut(index))
                                })
                            >
                                {label}
                            </Button>
                        }
                    })
                    .collect_view()}
            </div>
        }
    };
    let has_shortcuts = shortcuts.with_value(|labels| !labels.is_empty());
    let shortcuts_left = has_shortcuts && placement == ShortcutPlacement::Left;
    let shortcuts_bottom = has_shortcuts && placement == ShortcutPlacement::Bottom;

    let select_date =
        Callback::new(move |date: NaiveDate| dispatch(RangePickerAction::SelectDate(date)));
    let hover_date = Callback::new(move |date: Option<NaiveDate>| {
        dispatch(RangePickerAction::HoverDate(date))
    });
    let paginate = Callback::new(move |(direction, unit): (PageDirection, PageUnit)| {
        dispatch(RangePickerAction::Paginate { direction, unit })
    });
    let highlight = Signal::derive(move || state.with(RangePickerState::highlight));
    let left_month = Signal::derive(move || state.with(|state| state.cursor().left));
    let right_month = Signal::derive(move || state.with(|state| state.cursor().right));
    let disabled_dates = store_value(disabled_dates);

    let time_field = move |side: RangeSide| {
        let label = match side {
            RangeSide::Start => "Start time",
            RangeSide::End => "End time",
        };
        view! {
            <input
                type="time"
                step="1"
                class="ui-field"
                data-ui-slot=side_token(side)
                aria-label=label
                disabled=disabled_sides[side.index()]
                prop:value=move || {
                    state.with(|state| {
                        state.time(side).unwrap_or_else(midnight).format(TIME_FORMAT).to_string()
                    })
                }
                on:change=move |ev| {
                    if let Some(time) = parse_time_input(&event_target_value(&ev)) {
                        dispatch(RangePickerAction::SetTime { side, time });
                    }
                }
            />
        }
    };

    view! {
        <div
            class=merge_layout_class("ui-range-picker", layout_class)
            node_ref=root
            data-ui-primitive="true"
            data-ui-kind="range-picker"
            data-ui-open=move || bool_token(open())
            data-ui-disabled=bool_token(disabled)
            data-ui-focused=move || side_token(state.with(RangePickerState::focused_input))
        >
            <div
                data-ui-slot="inputs"
                on:click=move |_: MouseEvent| {
                    if !disabled {
                        dispatch(RangePickerAction::SetPopupVisible(true));
                    }
                }
            >
                {input(RangeSide::Start, start_placeholder)}
                <span data-ui-slot="separator" aria-hidden="true">{separator}</span>
                {input(RangeSide::End, end_placeholder)}
                <Show
                    when=move || allow_clear && !disabled && has_text()
                    fallback=|| view! { <Icon icon=IconName::Calendar size=IconSize::Sm /> }
                >
                    <IconButton
                        icon=IconName::Dismiss
                        ui_slot="clear"
                        aria_label="Clear".to_string()
                        on_click=Callback::new(move |ev: MouseEvent| {
                            ev.stop_propagation();
                            dispatch(RangePickerAction::Clear);
                        })
                    />
                </Show>
            </div>
            <Show when=open>
                <Popup position="bl" role="dialog">
                    <div data-ui-slot="body" data-ui-shortcuts=placement_token>
                        {shortcuts_left.then(shortcut_list)}
                        <div data-ui-slot="panels">
                            <Show
                                when=move || state.with(RangePickerState::time_panel_open)
                                fallback=move || {
                                    view! {
                                        <CalendarPanel
                                            month=left_month
                                            highlight=highlight
                                            today=today
                                            week_start=week_start
                                            disabled_dates=disabled_dates.get_value()
                                            show_prev=true
                                            on_select=select_date
                                            on_hover=hover_date
                                            on_paginate=paginate
                                        />
                                        <CalendarPanel
                                            month=right_month
                                            highlight=highlight
                                            today=today
                                            week_start=week_start
                                            disabled_dates=disabled_dates.get_value()
                                            show_next=true
                                            on_select=select_date
                                            on_hover=hover_date
                                            on_paginate=paginate
                                        />
                                    }
                                }
                            >
                                {time_field(RangeSide::Start)}
                                {time_field(RangeSide::End)}
                            </Show>
                        </div>
                    </div>
                    <div data-ui-slot="footer">
                        {shortcuts_bottom.then(shortcut_list)}
                        {show_time
                            .then(|| {
                                view! {
                                    <Button
                                        variant=ButtonVariant::Quiet
                                        size=ButtonSize::Sm
                                        ui_slot="time-toggle"
                                        on_click=Callback::new(move |_| {
                                            dispatch(RangePickerAction::ToggleTimePanel)
                                        })
                                    >
                                        {move || {
                                            if state.with(RangePickerState::time_panel_open) {
                                                "Select date"
                                            } else {
                                                "Select time"
                                            }
                                        }}
                                    </Button>
                                    <Button
                                        variant=ButtonVariant::Primary
                                        size=ButtonSize::Sm
                                        ui_slot="ok"
                                        disabled=Signal::derive(move || {
                                            state.with(|state| {
                                                state.pending().1.is_none()
                                                    && state.input_text(RangeSide::End).is_empty()
                                            })
                                        })
                                        on_click=Callback::new(move |_| {
                                            dispatch(RangePickerAction::Confirm)
                                        })
                                    >
                                        "OK"
                                    </Button>
                                }
                            })}
                    </div>
                </Popup>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn time_input_accepts_with_and_without_seconds() {
        let expected = NaiveTime::from_hms_opt(9, 30, 0).expect("valid time");
        assert_eq!(parse_time_input("09:30"), Some(expected));
        assert_eq!(parse_time_input("09:30:00"), Some(expected));
        assert_eq!(
            parse_time_input("23:59:59"),
            NaiveTime::from_hms_opt(23, 59, 59)
        );
        assert_eq!(parse_time_input(""), None);
        assert_eq!(parse_time_input("25:00"), None);
    }

    #[test]
    fn side_tokens_match_dom_contract() {
        assert_eq!(side_token(RangeSide::Start), "start");
        assert_eq!(side_token(RangeSide::End), "end");
    }
}
