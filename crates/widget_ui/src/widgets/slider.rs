//! Slider component over [`widget_core::slider`].

use leptos::ev::{KeyboardEvent, MouseEvent, PointerEvent};
use leptos::*;
use widget_core::slider::{
    reduce_slider, BoundMark, DragTarget, Handle, SliderAction, SliderConfig, SliderEffect,
    SliderKey, SliderState, SliderValue,
};

use crate::dom::{element_width, offset_from_left};
use crate::primitives::{bool_token, merge_layout_class};
use crate::store::apply;

/// Tooltip and aria text for a slider value; integral values drop the fraction.
pub fn format_slider_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn handle_token(handle: Handle) -> &'static str {
    match handle {
        Handle::Lower => "lower",
        Handle::Upper => "upper",
    }
}

#[component]
/// Single or range slider.
///
/// The track is measured on mount and on window resize; pointer gestures continue on the window
/// so a drag keeps tracking after the pointer leaves the track.
pub fn Slider(
    #[prop(optional)] config: SliderConfig,
    /// Host-controlled value; `None` lets the slider manage itself.
    #[prop(optional, into)]
    value: MaybeSignal<Option<SliderValue>>,
    #[prop(optional)] on_change: Option<Callback<SliderValue>>,
    #[prop(optional)] on_after_change: Option<Callback<SliderValue>>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
) -> impl IntoView {
    let initial = match SliderState::new(config, value.get_untracked()) {
        Ok(state) => state,
        Err(err) => {
            logging::warn!("slider props rejected: {err}");
            return view! {
                <div
                    class=merge_layout_class("ui-slider", layout_class)
                    data-ui-kind="slider"
                    data-ui-invalid="true"
                ></div>
            }
            .into_view();
        }
    };
    let range = initial.config().range;
    let show_ticks = initial.config().show_ticks;
    let marks = (initial.config().start_mark, initial.config().end_mark);
    let state = create_rw_signal(initial);
    let track = create_node_ref::<html::Div>();

    let dispatch = move |action: SliderAction| {
        for effect in apply(state, action, reduce_slider) {
            match effect {
                SliderEffect::Change(value) => {
                    if let Some(on_change) = on_change.as_ref() {
                        on_change.call(value);
                    }
                }
                SliderEffect::AfterChange(value) => {
                    if let Some(on_after_change) = on_after_change.as_ref() {
                        on_after_change.call(value);
                    }
                }
            }
        }
    };

    let measure = move || {
        if let Some(track) = track.get_untracked() {
            dispatch(SliderAction::Resize {
                width_px: element_width(&track),
            });
        }
    };

    track.on_load(move |_| request_animation_frame(measure));

    create_effect(move |_| {
        let value = value.get();
        dispatch(SliderAction::SyncValue(value));
    });

    let resize_listener = window_event_listener(ev::resize, move |_| measure());
    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        if state.with_untracked(|state| state.drag().is_some()) {
            dispatch(SliderAction::PointerMove {
                pointer_x: f64::from(ev.client_x()),
            });
        }
    });
    let up_listener = window_event_listener(ev::pointerup, move |ev| {
        if state.with_untracked(|state| state.drag().is_some()) {
            dispatch(SliderAction::PointerUp {
                pointer_x: f64::from(ev.client_x()),
            });
        }
    });
    let cancel_listener = window_event_listener(ev::pointercancel, move |_| {
        dispatch(SliderAction::PointerCancel);
    });
    on_cleanup(move || {
        resize_listener.remove();
        move_listener.remove();
        up_listener.remove();
        cancel_listener.remove();
    });

    let start_drag = move |target: DragTarget, ev: PointerEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        dispatch(SliderAction::PointerDown {
            target,
            pointer_x: f64::from(ev.client_x()),
        });
    };

    let percent = move |handle: Handle| {
        state.with(|state| state.geometry().percent_of(state.value().handle(handle)))
    };
    let disabled = move || state.with(|state| state.config().disabled);

    let bar_style = move || {
        let (start, end) = if range {
            (percent(Handle::Lower), percent(Handle::Upper))
        } else {
            (0.0, percent(Handle::Upper))
        };
        format!("left: {start:.3}%; width: {:.3}%;", end - start)
    };

    let ticks = move || {
        if !show_ticks {
            return Vec::new();
        }
        state.with(|state| {
            let geometry = *state.geometry();
            geometry
                .ticks()
                .into_iter()
                .map(|tick| (tick.value, geometry.percent_of(tick.value), tick.is_bound))
                .collect::<Vec<_>>()
        })
    };

    let handles = state.with_untracked(|state| state.handles().to_vec());
    let aria_label = aria_label.unwrap_or_else(|| "Slider".to_string());

    let bound_mark = move |mark: BoundMark| {
        let (slot, text) = match mark {
            BoundMark::Start => ("start-mark", state.with_untracked(|s| s.geometry().min())),
            BoundMark::End => ("end-mark", state.with_untracked(|s| s.geometry().max_aligned())),
        };
        view! {
            <button
                type="button"
                data-ui-slot=slot
                disabled=disabled
                on:click=move |_: MouseEvent| dispatch(SliderAction::ClickBound(mark))
            >
                {format_slider_value(text)}
            </button>
        }
    };

    view! {
        <div
            class=merge_layout_class("ui-slider", layout_class)
            data-ui-primitive="true"
            data-ui-kind="slider"
            data-ui-range=bool_token(range)
            data-ui-disabled=move || bool_token(disabled())
        >
            {marks.0.then(|| bound_mark(BoundMark::Start))}
            <div class="ui-slider-track" node_ref=track>
                <div
                    data-ui-slot="rail"
                    on:click=move |ev: MouseEvent| {
                        if let Some(track) = track.get_untracked() {
                            dispatch(SliderAction::ClickTrack {
                                offset_px: offset_from_left(&track, ev.client_x()),
                            });
                        }
                    }
                ></div>
                <div
                    data-ui-slot="bar"
                    style=bar_style
                    on:pointerdown=move |ev: PointerEvent| {
                        if range {
                            start_drag(DragTarget::Bar, ev);
                        }
                    }
                ></div>
                {move || {
                    ticks()
                        .into_iter()
                        .map(|(value, at, is_bound)| {
                            view! {
                                <span
                                    data-ui-slot="tick"
                                    data-ui-bound=bool_token(is_bound)
                                    style=format!("left: {at:.3}%;")
                                    on:click=move |ev: MouseEvent| {
                                        ev.stop_propagation();
                                        dispatch(SliderAction::ClickTick { value });
                                    }
                                ></span>
                            }
                        })
                        .collect_view()
                }}
                {handles
                    .into_iter()
                    .map(|handle| {
                        let aria_label = aria_label.clone();
                        let current = move || state.with(|state| state.value().handle(handle));
                        view! {
                            <div
                                data-ui-slot="handle"
                                data-ui-handle=handle_token(handle)
                                data-ui-dragging=move || {
                                    bool_token(state.with(|state| state.is_dragging(handle)))
                                }
                                role="slider"
                                tabindex=move || if disabled() { -1 } else { 0 }
                                aria-label=aria_label
                                aria-disabled=move || bool_token(disabled())
                                aria-valuemin=move || state.with(|s| s.geometry().min())
                                aria-valuemax=move || state.with(|s| s.geometry().max_aligned())
                                aria-valuenow=current
                                aria-valuetext=move || format_slider_value(current())
                                style=move || format!("left: {:.3}%;", percent(handle))
                                on:pointerdown=move |ev: PointerEvent| {
                                    start_drag(DragTarget::Handle(handle), ev)
                                }
                                on:keydown=move |ev: KeyboardEvent| {
                                    if let Some(key) = SliderKey::from_dom_key(&ev.key()) {
                                        ev.prevent_default();
                                        dispatch(SliderAction::Key { handle, key });
                                    }
                                }
                                on:mouseenter=move |_| {
                                    dispatch(SliderAction::Hover { handle, hovered: true })
                                }
                                on:mouseleave=move |_| {
                                    dispatch(SliderAction::Hover { handle, hovered: false })
                                }
                            >
                                <Show when=move || state.with(|state| state.tooltip_open(handle))>
                                    <span data-ui-slot="tooltip" role="tooltip">
                                        {move || format_slider_value(current())}
                                    </span>
                                </Show>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            {marks.1.then(|| bound_mark(BoundMark::End))}
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn integral_values_render_without_fraction() {
        assert_eq!(format_slider_value(4.0), "4");
        assert_eq!(format_slider_value(-2.0), "-2");
        assert_eq!(format_slider_value(0.5), "0.5");
    }

    #[test]
    fn handle_tokens_match_dom_contract() {
        assert_eq!(handle_token(Handle::Lower), "lower");
        assert_eq!(handle_token(Handle::Upper), "upper");
    }
}
