//! Password input with a reveal toggle and optional clear button.

use leptos::ev::MouseEvent;
use leptos::*;
use widget_core::password::{
    reduce_password, PasswordAction, PasswordConfig, PasswordEffect, PasswordState,
};

use crate::primitives::{bool_token, merge_layout_class, FieldVariant, IconButton, TextField};
use crate::store::apply;
use crate::IconName;

/// Icon and accessible label of the reveal toggle for the current visibility.
pub(crate) fn toggle_affordance(visible: bool) -> (IconName, &'static str) {
    if visible {
        (IconName::EyeOff, "Hide password")
    } else {
        (IconName::Eye, "Show password")
    }
}

#[component]
/// Masked text input whose visibility can be toggled.
pub fn PasswordInput(
    #[prop(optional)] config: PasswordConfig,
    /// Host-controlled text.
    #[prop(optional, into)]
    value: MaybeSignal<Option<String>>,
    /// Host-controlled visibility.
    #[prop(optional, into)]
    visible: MaybeSignal<Option<bool>>,
    #[prop(optional)] on_change: Option<Callback<String>>,
    #[prop(optional)] on_visibility_change: Option<Callback<bool>>,
    #[prop(optional)] on_clear: Option<Callback<()>>,
    #[prop(optional)] on_focus: Option<Callback<()>>,
    #[prop(optional)] on_blur: Option<Callback<()>>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
) -> impl IntoView {
    let toggle = config.visibility_toggle;
    let disabled = config.disabled;
    let max_length = config.max_length;
    let placeholder = config.placeholder.clone();
    let state = create_rw_signal(PasswordState::new(config, value.get_untracked()));

    let dispatch = move |action: PasswordAction| {
        for effect in apply(state, action, reduce_password) {
            match effect {
                PasswordEffect::Change(text) => {
                    if let Some(on_change) = on_change.as_ref() {
                        on_change.call(text);
                    }
                }
                PasswordEffect::VisibilityChange(visible) => {
                    if let Some(on_visibility_change) = on_visibility_change.as_ref() {
                        on_visibility_change.call(visible);
                    }
                }
                PasswordEffect::Clear => {
                    if let Some(on_clear) = on_clear.as_ref() {
                        on_clear.call(());
                    }
                }
                PasswordEffect::Focus => {
                    if let Some(on_focus) = on_focus.as_ref() {
                        on_focus.call(());
                    }
                }
                PasswordEffect::Blur => {
                    if let Some(on_blur) = on_blur.as_ref() {
                        on_blur.call(());
                    }
                }
            }
        }
    };

    create_effect(move |_| {
        let value = value.get();
        dispatch(PasswordAction::SyncValue(value));
    });
    create_effect(move |_| {
        let visible = visible.get();
        dispatch(PasswordAction::SyncVisible(visible));
    });

    let is_visible = move || state.with(PasswordState::is_visible);

    view! {
        <span
            class=merge_layout_class("ui-password", layout_class)
            data-ui-primitive="true"
            data-ui-kind="password"
            data-ui-visible=move || bool_token(is_visible())
            data-ui-focused=move || bool_token(state.with(PasswordState::is_focused))
            data-ui-disabled=bool_token(disabled)
        >
            <TextField
                variant=FieldVariant::Embedded
                ui_slot="input"
                placeholder=placeholder
                aria_label=aria_label.unwrap_or_else(|| "Password".to_string())
                autocomplete="current-password"
                input_type=Signal::derive(move || state.with(PasswordState::input_type))
                max_length=max_length
                value=Signal::derive(move || state.with(|state| state.value().to_string()))
                disabled=disabled
                on_input=Callback::new(move |ev| {
                    dispatch(PasswordAction::Input(event_target_value(&ev)))
                })
                on_focus=Callback::new(move |_| dispatch(PasswordAction::Focus))
                on_blur=Callback::new(move |_| dispatch(PasswordAction::Blur))
            />
            <Show when=move || state.with(PasswordState::shows_clear)>
                <IconButton
                    icon=IconName::Dismiss
                    ui_slot="clear"
                    aria_label="Clear".to_string()
                    on_click=Callback::new(move |_: MouseEvent| dispatch(PasswordAction::Clear))
                />
            </Show>
            {toggle
                .then(|| {
                    view! {
                        <span data-ui-slot="toggle">
                            {move || {
                                let (icon, label) = toggle_affordance(is_visible());
                                view! {
                                    <IconButton
                                        icon=icon
                                        aria_label=label.to_string()
                                        pressed=is_visible()
                                        disabled=disabled
                                        on_click=Callback::new(move |_: MouseEvent| {
                                            dispatch(PasswordAction::ToggleVisibility)
                                        })
                                    />
                                }
                            }}
                        </span>
                    }
                })}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn toggle_offers_the_opposite_state() {
        assert_eq!(toggle_affordance(false), (IconName::Eye, "Show password"));
        assert_eq!(toggle_affordance(true), (IconName::EyeOff, "Hide password"));
    }
}
