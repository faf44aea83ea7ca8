//! Nested menu rendered from a [`MenuEntry`] tree.

use leptos::*;
use wasm_bindgen::JsCast;
use widget_core::menu::{
    reduce_menu, MenuAction, MenuConfig, MenuEffect, MenuEntry, MenuMode, MenuState,
};

use crate::dom::event_within;
use crate::primitives::{bool_token, merge_layout_class, MenuItem, MenuSurface};
use crate::store::try_apply;
use crate::{Icon, IconName, IconSize};

/// Payload of an item click: the value and its path from the root.
pub type MenuItemClick = (String, Vec<String>);

/// Payload of a submenu toggle: the value, whether it is now open, and its path.
pub type SubMenuClick = (String, bool, Vec<String>);

#[derive(Clone, Copy)]
struct MenuHandle {
    state: RwSignal<MenuState>,
    dispatch: Callback<MenuAction>,
}

fn entry_icon(entry: &MenuEntry) -> Option<IconName> {
    entry.icon().and_then(IconName::from_token)
}

fn render_entries(entries: &[MenuEntry], depth: usize, menu: MenuHandle) -> View {
    entries
        .iter()
        .map(|entry| render_entry(entry, depth, menu))
        .collect_view()
}

fn render_entry(entry: &MenuEntry, depth: usize, menu: MenuHandle) -> View {
    let value = entry.value().to_string();
    let label = entry.label().to_string();
    let icon = entry_icon(entry);
    let disabled = entry.is_disabled();

    match entry {
        MenuEntry::Item { .. } => {
            let selected = {
                let value = value.clone();
                Signal::derive(move || menu.state.with(|state| state.is_selected(&value)))
            };
            view! {
                <MenuItem
                    role="menuitem"
                    icon=icon
                    disabled=disabled
                    selected=selected
                    on_click=Callback::new(move |_| {
                        menu.dispatch.call(MenuAction::ClickItem(value.clone()))
                    })
                >
                    {label}
                </MenuItem>
            }
            .into_view()
        }
        MenuEntry::SubMenu { items, .. } => {
            let children = store_value(items.clone());
            let open = {
                let value = value.clone();
                Signal::derive(move || menu.state.with(|state| state.is_open(&value)))
            };
            let selected_within = {
                let value = value.clone();
                Signal::derive(move || menu.state.with(|state| state.contains_selected(&value)))
            };
            view! {
                <div
                    data-ui-slot="submenu"
                    data-ui-depth=depth
                    data-ui-open=move || bool_token(open.get())
                    aria-expanded=move || bool_token(open.get())
                >
                    <MenuItem
                        role="menuitem"
                        icon=icon
                        disabled=disabled
                        selected=selected_within
                        on_click=Callback::new(move |_| {
                            menu.dispatch.call(MenuAction::ClickSubMenu(value.clone()))
                        })
                    >
                        {label}
                        <Icon icon=IconName::ChevronDown size=IconSize::Xs />
                    </MenuItem>
                    <Show when=move || open.get()>
                        <MenuSurface role="menu" ui_slot="submenu-items">
                            {children.with_value(|children| render_entries(children, depth + 1, menu))}
                        </MenuSurface>
                    </Show>
                </div>
            }
            .into_view()
        }
    }
}

#[component]
/// Vertical or horizontal menu with nested submenus.
pub fn Menu(
    #[prop(optional)] config: MenuConfig,
    /// Host-controlled selected values.
    #[prop(optional, into)]
    selected: MaybeSignal<Option<Vec<String>>>,
    /// Host-controlled open submenu values.
    #[prop(optional, into)]
    opened: MaybeSignal<Option<Vec<String>>>,
    #[prop(optional)] on_click_item: Option<Callback<MenuItemClick>>,
    #[prop(optional)] on_click_sub_menu: Option<Callback<SubMenuClick>>,
    #[prop(optional)] on_selected_change: Option<Callback<Vec<String>>>,
    #[prop(optional)] on_opened_change: Option<Callback<Vec<String>>>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
) -> impl IntoView {
    let items = config.items.clone();
    let mode = config.mode;
    let state = create_rw_signal(MenuState::new(
        config,
        selected.get_untracked(),
        opened.get_untracked(),
    ));
    let root = create_node_ref::<html::Div>();

    let dispatch = Callback::new(move |action: MenuAction| {
        for effect in try_apply(state, "menu", action, reduce_menu) {
            match effect {
                MenuEffect::ItemClicked { value, value_path } => {
                    if let Some(on_click_item) = on_click_item.as_ref() {
                        on_click_item.call((value, value_path));
                    }
                }
                MenuEffect::SubMenuClicked {
                    value,
                    opened,
                    value_path,
                } => {
                    if let Some(on_click_sub_menu) = on_click_sub_menu.as_ref() {
                        on_click_sub_menu.call((value, opened, value_path));
                    }
                }
                MenuEffect::SelectedChange(values) => {
                    if let Some(on_selected_change) = on_selected_change.as_ref() {
                        on_selected_change.call(values);
                    }
                }
                MenuEffect::OpenedChange(values) => {
                    if let Some(on_opened_change) = on_opened_change.as_ref() {
                        on_opened_change.call(values);
                    }
                }
            }
        }
    });

    create_effect(move |_| {
        let selected = selected.get();
        dispatch.call(MenuAction::SyncSelected(selected));
    });
    create_effect(move |_| {
        let opened = opened.get();
        dispatch.call(MenuAction::SyncOpened(opened));
    });

    if mode == MenuMode::Horizontal {
        let outside_click_listener = window_event_listener(ev::mousedown, move |ev| {
            if state.with_untracked(|state| state.opened().is_empty()) {
                return;
            }
            let inside = root
                .get_untracked()
                .is_some_and(|root| event_within(&ev, root.unchecked_ref()));
            if !inside {
                dispatch.call(MenuAction::CollapseAll);
            }
        });
        on_cleanup(move || outside_click_listener.remove());
    }

    let menu = MenuHandle { state, dispatch };
    let role = match mode {
        MenuMode::Horizontal => "menubar",
        MenuMode::Vertical => "menu",
    };

    view! {
        <div
            class=merge_layout_class("ui-menu", layout_class)
            node_ref=root
            role=role
            aria-label=aria_label
            aria-orientation=mode.token()
            data-ui-primitive="true"
            data-ui-kind="menu"
            data-ui-mode=mode.token()
        >
            {render_entries(&items, 0, menu)}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn entry_icons_resolve_known_tokens_only() {
        let mut known = MenuEntry::item("docs", "Docs");
        if let MenuEntry::Item { icon, .. } = &mut known {
            *icon = Some("document".to_string());
        }
        assert_eq!(entry_icon(&known), Some(IconName::Document));

        let mut unknown = MenuEntry::item("misc", "Misc");
        if let MenuEntry::Item { icon, .. } = &mut unknown {
            *icon = Some("sparkles".to_string());
        }
        assert_eq!(entry_icon(&unknown), None);
        assert_eq!(entry_icon(&MenuEntry::item("plain", "Plain")), None);
    }
}
