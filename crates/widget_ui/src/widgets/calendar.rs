//! Month grid panel shared by the range picker's two calendars.

use chrono::{Datelike, NaiveDate, Weekday};
use leptos::ev::MouseEvent;
use leptos::*;
use widget_core::calendar::{month_grid, weekday_labels, CellSelection, DayCell, RangeHighlight};
use widget_core::date::{DisabledDates, YearMonth};
use widget_core::range_picker::{PageDirection, PageUnit};

use crate::primitives::{bool_token, IconButton};
use crate::IconName;

/// Accessible name of a day cell, e.g. `2024-03-09`.
pub(crate) fn day_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[component]
/// One month of selectable days with optional pagination arrows.
///
/// The left panel of a range picker shows the backward arrows and the right panel the forward
/// ones, so both panels always page together.
pub fn CalendarPanel(
    #[prop(into)] month: Signal<YearMonth>,
    #[prop(into)] highlight: Signal<RangeHighlight>,
    today: NaiveDate,
    #[prop(default = Weekday::Sun)] week_start: Weekday,
    #[prop(optional)] disabled_dates: DisabledDates,
    #[prop(optional)] show_prev: bool,
    #[prop(optional)] show_next: bool,
    on_select: Callback<NaiveDate>,
    #[prop(optional)] on_hover: Option<Callback<Option<NaiveDate>>>,
    #[prop(optional)] on_paginate: Option<Callback<(PageDirection, PageUnit)>>,
) -> impl IntoView {
    let disabled_dates = store_value(disabled_dates);
    let hover = move |date: Option<NaiveDate>| {
        if let Some(on_hover) = on_hover.as_ref() {
            on_hover.call(date);
        }
    };
    let paginate = move |direction: PageDirection, unit: PageUnit| {
        Callback::new(move |_: MouseEvent| {
            if let Some(on_paginate) = on_paginate.as_ref() {
                on_paginate.call((direction, unit));
            }
        })
    };

    let cells = move || {
        let month = month.get();
        highlight.with(|highlight| {
            disabled_dates
                .with_value(|disabled| month_grid(month, week_start, today, highlight, disabled))
        })
    };

    let render_cell = move |cell: DayCell| {
        let date = cell.date;
        view! {
            <button
                type="button"
                role="gridcell"
                data-ui-slot="day"
                data-ui-selection=cell.selection.token()
                data-ui-in-month=bool_token(cell.in_month)
                data-ui-today=bool_token(cell.is_today)
                aria-label=day_label(date)
                aria-selected=bool_token(cell.selection != CellSelection::None)
                disabled=cell.disabled
                on:click=move |_| on_select.call(date)
                on:mouseenter=move |_| hover(Some(date))
            >
                {date.day()}
            </button>
        }
    };

    view! {
        <div class="ui-calendar" data-ui-primitive="true" data-ui-kind="calendar">
            <div data-ui-slot="header">
                {show_prev
                    .then(|| {
                        view! {
                            <IconButton
                                icon=IconName::ChevronDoubleLeft
                                aria_label="Previous year".to_string()
                                on_click=paginate(PageDirection::Backward, PageUnit::Year)
                            />
                            <IconButton
                                icon=IconName::ChevronLeft
                                aria_label="Previous month".to_string()
                                on_click=paginate(PageDirection::Backward, PageUnit::Month)
                            />
                        }
                    })}
                <span data-ui-slot="title" aria-live="polite">{move || month.get().label()}</span>
                {show_next
                    .then(|| {
                        view! {
                            <IconButton
                                icon=IconName::ChevronRight
                                aria_label="Next month".to_string()
                                on_click=paginate(PageDirection::Forward, PageUnit::Month)
                            />
                            <IconButton
                                icon=IconName::ChevronDoubleRight
                                aria_label="Next year".to_string()
                                on_click=paginate(PageDirection::Forward, PageUnit::Year)
                            />
                        }
                    })}
            </div>
            <div data-ui-slot="weekdays" aria-hidden="true">
                {weekday_labels(week_start)
                    .into_iter()
                    .map(|label| view! { <span>{label}</span> })
                    .collect_view()}
            </div>
            <div role="grid" data-ui-slot="days" on:mouseleave=move |_| hover(None)>
                {move || cells().into_iter().map(render_cell).collect_view()}
            </div>
        </div>
    }
}
