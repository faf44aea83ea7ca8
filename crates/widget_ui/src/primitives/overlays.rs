use super::*;

use crate::widgets::trigger::use_trigger_context;

#[component]
/// Shared overlay surface for menus and option lists.
pub fn MenuSurface(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] role: Option<String>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-menu-surface", layout_class)
            role=role
            data-ui-primitive="true"
            data-ui-kind="menu-surface"
            data-ui-slot=ui_slot
        >
            {children()}
        </div>
    }
}

#[component]
/// Shared overlay menu item primitive.
pub fn MenuItem(
    #[prop(optional, into)] role: Option<String>,
    #[prop(default = None)] icon: Option<IconName>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    #[prop(optional, into)] active: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    #[prop(optional)] on_mouseenter: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <Button
            role=role.unwrap_or_else(|| "menuitem".to_string())
            disabled=disabled
            selected=selected
            pressed=active
            ui_slot="menu-item"
            variant=ButtonVariant::Quiet
            on_click=Callback::new(move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            })
            on_mouseenter=Callback::new(move |ev| {
                if let Some(on_mouseenter) = on_mouseenter.as_ref() {
                    on_mouseenter.call(ev);
                }
            })
        >
            {icon.map(|icon| view! { <Icon icon size=IconSize::Sm /> })}
            <span data-ui-slot="label">{children()}</span>
        </Button>
    }
}

#[component]
/// Floating popup layer anchored to its positioned parent.
///
/// Stacking order and body mounting come from the nearest trigger context.
pub fn Popup(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(default = "bl")] position: &'static str,
    #[prop(optional, into)] role: Option<String>,
    children: Children,
) -> impl IntoView {
    let context = use_trigger_context();
    view! {
        <div
            class=merge_layout_class("ui-popup", layout_class)
            role=role
            style=format!("z-index: {};", context.z_index)
            data-ui-primitive="true"
            data-ui-kind="popup"
            data-ui-position=position
            data-ui-render-in-body=bool_token(context.render_in_body)
        >
            {children()}
        </div>
    }
}
