//! Popup trigger: shows floating content next to a target element.

use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;
use wasm_bindgen::JsCast;
use widget_core::trigger::{
    reduce_trigger, TriggerAction, TriggerConfig, TriggerContext, TriggerEffect, TriggerMode,
    TriggerState,
};

use crate::dom::event_within;
use crate::primitives::{bool_token, merge_layout_class, Popup};
use crate::store::apply;

/// Context published by the nearest enclosing [`Trigger`], or the root defaults.
pub fn use_trigger_context() -> TriggerContext {
    use_context::<TriggerContext>().unwrap_or_default()
}

#[component]
/// Wraps a target element and toggles a popup according to `config.mode`.
///
/// Nested triggers stack above their parent: each one republishes the context with a higher
/// `z_index`.
pub fn Trigger(
    #[prop(optional)] config: TriggerConfig,
    /// Host-controlled visibility; `None` lets the trigger manage itself.
    #[prop(optional, into)]
    visible: MaybeSignal<Option<bool>>,
    #[prop(optional)] on_visible_change: Option<Callback<bool>>,
    #[prop(optional)] layout_class: Option<&'static str>,
    /// Popup content.
    #[prop(into)]
    popup: ViewFn,
    children: Children,
) -> impl IntoView {
    let parent = use_trigger_context();
    let mode_token = match config.mode {
        TriggerMode::Click => "click",
        TriggerMode::Hover => "hover",
        TriggerMode::Focus => "focus",
    };
    let position = config.position.token();
    let state = create_rw_signal(TriggerState::new(config, visible.get_untracked()));
    let root = create_node_ref::<html::Div>();

    provide_context(TriggerContext {
        z_index: parent.z_index + 1,
        ..parent
    });

    let dispatch = move |action: TriggerAction| {
        for effect in apply(state, action, reduce_trigger) {
            let TriggerEffect::VisibleChange(open) = effect;
            if let Some(on_visible_change) = on_visible_change.as_ref() {
                on_visible_change.call(open);
            }
        }
    };

    create_effect(move |_| {
        let visible = visible.get();
        dispatch(TriggerAction::SyncVisible(visible));
    });

    let outside_click_listener = window_event_listener(ev::mousedown, move |ev| {
        if !state.with_untracked(TriggerState::is_visible) {
            return;
        }
        let inside = root
            .get_untracked()
            .is_some_and(|root| event_within(&ev, root.unchecked_ref()));
        if !inside {
            dispatch(TriggerAction::ClickOutside);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    let open = move || state.with(TriggerState::is_visible);
    let popup = store_value(popup);

    view! {
        <div
            class=merge_layout_class("ui-trigger", layout_class)
            node_ref=root
            data-ui-primitive="true"
            data-ui-kind="trigger"
            data-ui-mode=mode_token
            data-ui-open=move || bool_token(open())
            on:mouseenter=move |_| dispatch(TriggerAction::PointerEnter)
            on:mouseleave=move |_| dispatch(TriggerAction::PointerLeave)
            on:focusin=move |_| dispatch(TriggerAction::Focus)
            on:focusout=move |_| dispatch(TriggerAction::Blur)
            on:keydown=move |ev: KeyboardEvent| {
                if ev.key() == "Escape" {
                    dispatch(TriggerAction::Escape);
                }
            }
        >
            <div
                data-ui-slot="target"
                aria-expanded=move || bool_token(open())
                on:click=move |_: MouseEvent| dispatch(TriggerAction::ClickTarget)
            >
                {children()}
            </div>
            <Show when=open>
                <div
                    data-ui-slot="popup-frame"
                    on:click=move |_| dispatch(TriggerAction::ClickPopup)
                >
                    <Popup position=position>{popup.with_value(|popup| popup.run())}</Popup>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn root_context_is_the_default() {
        let _ = create_runtime();
        assert_eq!(use_trigger_context(), TriggerContext::default());
    }
}
