//! Single and multiple select with a keyboard-navigable option list.

use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;
use wasm_bindgen::JsCast;
use widget_core::select::{
    reduce_select, SelectAction, SelectConfig, SelectEffect, SelectKey, SelectState,
};

use crate::dom::event_within;
use crate::primitives::{bool_token, merge_layout_class, Button, IconButton, MenuItem, Popup};
use crate::store::try_apply;
use crate::{Icon, IconName, IconSize};

/// Text shown in the selector, and whether it is the placeholder.
pub(crate) fn selection_text(labels: &[String], placeholder: &str) -> (String, bool) {
    if labels.is_empty() {
        (placeholder.to_string(), true)
    } else {
        (labels.join(", "), false)
    }
}

#[component]
/// Dropdown select over a fixed option list.
pub fn Select(
    #[prop(optional)] config: SelectConfig,
    /// Host-controlled selected values.
    #[prop(optional, into)]
    value: MaybeSignal<Option<Vec<String>>>,
    #[prop(optional)] on_change: Option<Callback<Vec<String>>>,
    #[prop(optional)] on_visible_change: Option<Callback<bool>>,
    #[prop(optional)] on_clear: Option<Callback<()>>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
) -> impl IntoView {
    let options = config.options.clone();
    let multiple = config.multiple;
    let disabled = config.disabled;
    let allow_clear = config.allow_clear;
    let placeholder = store_value(config.placeholder.clone());
    let state = create_rw_signal(SelectState::new(config, value.get_untracked()));
    let root = create_node_ref::<html::Div>();

    let dispatch = move |action: SelectAction| {
        for effect in try_apply(state, "select", action, reduce_select) {
            match effect {
                SelectEffect::Change(values) => {
                    if let Some(on_change) = on_change.as_ref() {
                        on_change.call(values);
                    }
                }
                SelectEffect::VisibleChange(open) => {
                    if let Some(on_visible_change) = on_visible_change.as_ref() {
                        on_visible_change.call(open);
                    }
                }
                SelectEffect::Clear => {
                    if let Some(on_clear) = on_clear.as_ref() {
                        on_clear.call(());
                    }
                }
            }
        }
    };

    create_effect(move |_| {
        let value = value.get();
        dispatch(SelectAction::SyncValue(value));
    });

    let outside_click_listener = window_event_listener(ev::mousedown, move |ev| {
        if !state.with_untracked(SelectState::is_open) {
            return;
        }
        let inside = root
            .get_untracked()
            .is_some_and(|root| event_within(&ev, root.unchecked_ref()));
        if !inside {
            dispatch(SelectAction::SetOpen(false));
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    let open = move || state.with(SelectState::is_open);
    let text = move || {
        let labels = state.with(SelectState::selected_labels);
        placeholder.with_value(|placeholder| selection_text(&labels, placeholder))
    };
    let on_key = Callback::new(move |ev: KeyboardEvent| {
        if let Some(key) = SelectKey::from_dom_key(&ev.key()) {
            ev.prevent_default();
            dispatch(SelectAction::Key(key));
        }
    });
    let options = store_value(options);

    view! {
        <div
            class=merge_layout_class("ui-select", layout_class)
            node_ref=root
            data-ui-primitive="true"
            data-ui-kind="select"
            data-ui-open=move || bool_token(open())
            data-ui-multiple=bool_token(multiple)
            data-ui-disabled=bool_token(disabled)
        >
            <Button
                ui_slot="selector"
                role="combobox"
                aria_label=aria_label.unwrap_or_default()
                aria_expanded=Signal::derive(open)
                aria_haspopup="listbox".to_string()
                disabled=disabled
                trailing_icon=IconName::ChevronDown
                on_click=Callback::new(move |_| dispatch(SelectAction::SetOpen(!open())))
                on_keydown=on_key
            >
                <span
                    data-ui-slot="value"
                    data-ui-placeholder=move || bool_token(text().1)
                >
                    {move || text().0}
                </span>
            </Button>
            <Show when=move || {
                allow_clear && !disabled && state.with(|state| !state.value().is_empty())
            }>
                <IconButton
                    icon=IconName::Dismiss
                    ui_slot="clear"
                    aria_label="Clear".to_string()
                    on_click=Callback::new(move |ev: MouseEvent| {
                        ev.stop_propagation();
                        dispatch(SelectAction::Clear);
                    })
                />
            </Show>
            <Show when=open>
                <Popup position="bl" role="listbox">
                    {options
                        .get_value()
                        .into_iter()
                        .enumerate()
                        .map(|(index, option)| {
                            let value = option.value.clone();
                            let selected = {
                                let value = value.clone();
                                Signal::derive(move || state.with(|state| state.is_selected(&value)))
                            };
                            view! {
                                <MenuItem
                                    role="option"
                                    disabled=option.disabled
                                    selected=selected
                                    active=Signal::derive(move || {
                                        state.with(|state| state.active() == Some(index))
                                    })
                                    on_click=Callback::new(move |_| {
                                        dispatch(SelectAction::Choose(value.clone()))
                                    })
                                    on_mouseenter=Callback::new(move |_| {
                                        dispatch(SelectAction::Hover(index))
                                    })
                                >
                                    {option.label().to_string()}
                                    <Show when=move || selected.get()>
                                        <Icon icon=IconName::Checkmark size=IconSize::Xs />
                                    </Show>
                                </MenuItem>
                            }
                        })
                        .collect_view()}
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
    fn empty_selection_shows_placeholder() {
        assert_eq!(
            selection_text(&[], "Please select"),
            ("Please select".to_string(), true)
        );
    }

    #[test]
    fn multiple_labels_are_joined() {
        let labels = vec!["Apple".to_string(), "Pear".to_string()];
        assert_eq!(
            selection_text(&labels, "Please select"),
            ("Apple, Pear".to_string(), false)
        );
    }
}
