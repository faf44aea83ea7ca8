//! Menu tree, selection, and submenu expansion.

use serde::{Deserialize, Serialize};

use crate::controlled::Controlled;
use crate::error::WidgetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Menu layout.
pub enum MenuMode {
    /// Stacked items with inline submenus; any number may be open.
    #[default]
    Vertical,
    /// Top-level bar with popup submenus; at most one open at a time.
    Horizontal,
}

impl MenuMode {
    /// Stable token for the `data-ui-mode` DOM hook.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Node of the menu tree.
pub enum MenuEntry {
    /// Leaf entry that can be selected.
    Item {
        /// Unique value.
        value: String,
        /// Rendered text.
        label: String,
        /// Icon token rendered before the label.
        #[serde(default)]
        icon: Option<String>,
        /// Ignores clicks.
        #[serde(default)]
        disabled: bool,
    },
    /// Expandable group of entries.
    SubMenu {
        /// Unique value.
        value: String,
        /// Rendered text.
        label: String,
        /// Icon token rendered before the label.
        #[serde(default)]
        icon: Option<String>,
        /// Ignores clicks.
        #[serde(default)]
        disabled: bool,
        /// Nested entries.
        items: Vec<MenuEntry>,
    },
}

impl MenuEntry {
    /// Leaf item helper.
    pub fn item(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Item {
            value: value.into(),
            label: label.into(),
            icon: None,
            disabled: false,
        }
    }

    /// Submenu helper.
    pub fn sub_menu(
        value: impl Into<String>,
        label: impl Into<String>,
        items: Vec<MenuEntry>,
    ) -> Self {
        Self::SubMenu {
            value: value.into(),
            label: label.into(),
            icon: None,
            disabled: false,
            items,
        }
    }

    /// Returns the entry marked disabled.
    pub fn disabled(mut self) -> Self {
        match &mut self {
            Self::Item { disabled, .. } | Self::SubMenu { disabled, .. } => *disabled = true,
        }
        self
    }

    /// Entry value.
    pub fn value(&self) -> &str {
        match self {
            Self::Item { value, .. } | Self::SubMenu { value, .. } => value,
        }
    }

    /// Entry label.
    pub fn label(&self) -> &str {
        match self {
            Self::Item { label, .. } | Self::SubMenu { label, .. } => label,
        }
    }

    /// Icon token, if any.
    pub fn icon(&self) -> Option<&str> {
        match self {
            Self::Item { icon, .. } | Self::SubMenu { icon, .. } => icon.as_deref(),
        }
    }

    /// Whether the entry ignores clicks.
    pub fn is_disabled(&self) -> bool {
        match self {
            Self::Item { disabled, .. } | Self::SubMenu { disabled, .. } => *disabled,
        }
    }

    /// Nested entries; empty for items.
    pub fn children(&self) -> &[MenuEntry] {
        match self {
            Self::Item { .. } => &[],
            Self::SubMenu { items, .. } => items,
        }
    }
}

/// Finds `value` and returns the entry plus the path of values from the root to it.
pub fn find_entry<'a>(entries: &'a [MenuEntry], value: &str) -> Option<(&'a MenuEntry, Vec<String>)> {
    for entry in entries {
        if entry.value() == value {
            return Some((entry, vec![entry.value().to_string()]));
        }
        if let Some((found, mut path)) = find_entry(entry.children(), value) {
            path.insert(0, entry.value().to_string());
            return Some((found, path));
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Menu props.
pub struct MenuConfig {
    /// Item tree.
    pub items: Vec<MenuEntry>,
    /// Layout.
    pub mode: MenuMode,
    /// Allow more than one selected item.
    pub multiple: bool,
    /// Initially selected item values when uncontrolled.
    pub default_selected: Vec<String>,
    /// Initially opened submenu values when uncontrolled.
    pub default_opened: Vec<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            mode: MenuMode::Vertical,
            multiple: false,
            default_selected: Vec::new(),
            default_opened: Vec::new(),
        }
    }
}

impl MenuConfig {
    /// Parses a JSON props payload.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidConfig`] for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, WidgetError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inputs accepted by [`reduce_menu`].
pub enum MenuAction {
    /// Leaf item clicked.
    ClickItem(String),
    /// Submenu title clicked.
    ClickSubMenu(String),
    /// Collapse every open submenu.
    CollapseAll,
    /// Host selection update; `None` releases control.
    SyncSelected(Option<Vec<String>>),
    /// Host expansion update; `None` releases control.
    SyncOpened(Option<Vec<String>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Callbacks emitted by [`reduce_menu`].
pub enum MenuEffect {
    /// A leaf item was activated.
    ItemClicked {
        /// Item value.
        value: String,
        /// Values from the root to the item.
        value_path: Vec<String>,
    },
    /// A submenu title was toggled.
    SubMenuClicked {
        /// Submenu value.
        value: String,
        /// Whether it is now open.
        opened: bool,
        /// Values from the root to the submenu.
        value_path: Vec<String>,
    },
    /// Selection changed.
    SelectedChange(Vec<String>),
    /// Opened submenus changed.
    OpenedChange(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
/// Menu instance state.
pub struct MenuState {
    config: MenuConfig,
    selected: Controlled<Vec<String>>,
    opened: Controlled<Vec<String>>,
}

impl MenuState {
    /// Creates a menu; `Some` arguments put the corresponding value under host control.
    pub fn new(
        config: MenuConfig,
        selected: Option<Vec<String>>,
        opened: Option<Vec<String>>,
    ) -> Self {
        Self {
            selected: Controlled::new(selected, config.default_selected.clone()),
            opened: Controlled::new(opened, config.default_opened.clone()),
            config,
        }
    }

    /// Item tree.
    pub fn items(&self) -> &[MenuEntry] {
        &self.config.items
    }

    /// Layout.
    pub fn mode(&self) -> MenuMode {
        self.config.mode
    }

    /// Selected item values.
    pub fn selected(&self) -> &[String] {
        self.selected.current()
    }

    /// Opened submenu values.
    pub fn opened(&self) -> &[String] {
        self.opened.current()
    }

    /// Whether `value` is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected().iter().any(|selected| selected == value)
    }

    /// Whether `value` is an open submenu.
    pub fn is_open(&self, value: &str) -> bool {
        self.opened().iter().any(|opened| opened == value)
    }

    /// Whether any descendant of submenu `value` is selected.
    pub fn contains_selected(&self, value: &str) -> bool {
        find_entry(self.items(), value)
            .map(|(entry, _)| self.subtree_selected(entry.children()))
            .unwrap_or(false)
    }

    fn subtree_selected(&self, entries: &[MenuEntry]) -> bool {
        entries
            .iter()
            .any(|entry| self.is_selected(entry.value()) || self.subtree_selected(entry.children()))
    }
}

/// Applies a [`MenuAction`].
///
/// Disabled entries are ignored without error.
///
/// # Errors
///
/// Returns [`WidgetError::UnknownMenuValue`] when a click names a value absent from the tree.
pub fn reduce_menu(state: &mut MenuState, action: MenuAction) -> Result<Vec<MenuEffect>, WidgetError> {
    let mut effects = Vec::new();
    match action {
        MenuAction::ClickItem(value) => {
            let (entry, value_path) = find_entry(&state.config.items, &value)
                .ok_or_else(|| WidgetError::UnknownMenuValue(value.clone()))?;
            if entry.is_disabled() {
                return Ok(effects);
            }
            let next = if state.config.multiple {
                let mut next = state.selected().to_vec();
                if let Some(index) = next.iter().position(|selected| *selected == value) {
                    next.remove(index);
                } else {
                    next.push(value.clone());
                }
                next
            } else {
                vec![value.clone()]
            };
            effects.push(MenuEffect::ItemClicked { value, value_path });
            if state.selected.set(next.clone()) {
                effects.push(MenuEffect::SelectedChange(next));
            }
            if state.config.mode == MenuMode::Horizontal && state.opened.set(Vec::new()) {
                effects.push(MenuEffect::OpenedChange(Vec::new()));
            }
        }
        MenuAction::ClickSubMenu(value) => {
            let (entry, value_path) = find_entry(&state.config.items, &value)
                .ok_or_else(|| WidgetError::UnknownMenuValue(value.clone()))?;
            if entry.is_disabled() {
                return Ok(effects);
            }
            let opened = !state.is_open(&value);
            let next = match (opened, state.config.mode) {
                (true, MenuMode::Horizontal) => value_path.clone(),
                (true, MenuMode::Vertical) => {
                    let mut next = state.opened().to_vec();
                    next.push(value.clone());
                    next
                }
                (false, _) => state
                    .opened()
                    .iter()
                    .filter(|open| **open != value)
                    .cloned()
                    .collect(),
            };
            log::trace!("submenu {value} opened={opened}");
            effects.push(MenuEffect::SubMenuClicked {
                value,
                opened,
                value_path,
            });
            if state.opened.set(next.clone()) {
                effects.push(MenuEffect::OpenedChange(next));
            }
        }
        MenuAction::CollapseAll => {
            if state.opened.set(Vec::new()) {
                effects.push(MenuEffect::OpenedChange(Vec::new()));
            }
        }
        MenuAction::SyncSelected(selected) => state.selected.sync(selected),
        MenuAction::SyncOpened(opened) => state.opened.sync(opened),
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_items() -> Vec<MenuEntry> {
        vec![
            MenuEntry::item("home", "Home"),
            MenuEntry::sub_menu(
                "docs",
                "Docs",
                vec![
                    MenuEntry::item("guide", "Guide"),
                    MenuEntry::sub_menu("api", "API", vec![MenuEntry::item("slider", "Slider")]),
                ],
            ),
            MenuEntry::item("admin", "Admin").disabled(),
        ]
    }

    fn menu(mode: MenuMode) -> MenuState {
        MenuState::new(
            MenuConfig {
                items: sample_items(),
                mode,
                ..MenuConfig::default()
            },
            None,
            None,
        )
    }

    #[test]
    fn item_click_reports_value_path() {
        let mut state = menu(MenuMode::Vertical);
        let effects = reduce_menu(&mut state, MenuAction::ClickItem("slider".to_string()))
            .expect("reduce");

        assert_eq!(
            effects,
            vec![
                MenuEffect::ItemClicked {
                    value: "slider".to_string(),
                    value_path: vec!["docs".to_string(), "api".to_string(), "slider".to_string()],
                },
                MenuEffect::SelectedChange(vec!["slider".to_string()]),
            ]
        );
        assert!(state.contains_selected("docs"));
        assert!(!state.contains_selected("home"));
    }

    #[test]
    fn vertical_mode_keeps_several_submenus_open() {
        let mut state = menu(MenuMode::Vertical);
        reduce_menu(&mut state, MenuAction::ClickSubMenu("docs".to_string())).expect("reduce");
        reduce_menu(&mut state, MenuAction::ClickSubMenu("api".to_string())).expect("reduce");
        assert_eq!(state.opened(), ["docs".to_string(), "api".to_string()]);

        let effects =
            reduce_menu(&mut state, MenuAction::ClickSubMenu("docs".to_string())).expect("reduce");
        assert!(matches!(
            effects[0],
            MenuEffect::SubMenuClicked { opened: false, .. }
        ));
        assert_eq!(state.opened(), ["api".to_string()]);
    }

    #[test]
    fn horizontal_mode_opens_only_the_clicked_branch() {
        let mut state = menu(MenuMode::Horizontal);
        reduce_menu(&mut state, MenuAction::ClickSubMenu("api".to_string())).expect("reduce");
        assert_eq!(state.opened(), ["docs".to_string(), "api".to_string()]);

        reduce_menu(&mut state, MenuAction::ClickItem("home".to_string())).expect("reduce");
        assert!(state.opened().is_empty());
    }

    #[test]
    fn disabled_and_unknown_entries() {
        let mut state = menu(MenuMode::Vertical);
        assert_eq!(
            reduce_menu(&mut state, MenuAction::ClickItem("admin".to_string())),
            Ok(Vec::new())
        );
        assert_eq!(
            reduce_menu(&mut state, MenuAction::ClickItem("missing".to_string())),
            Err(WidgetError::UnknownMenuValue("missing".to_string()))
        );
    }

    #[test]
    fn controlled_selection_follows_host() {
        let mut state = MenuState::new(
            MenuConfig {
                items: sample_items(),
                ..MenuConfig::default()
            },
            Some(vec!["home".to_string()]),
            None,
        );
        let effects =
            reduce_menu(&mut state, MenuAction::ClickItem("guide".to_string())).expect("reduce");
        assert!(effects.contains(&MenuEffect::SelectedChange(vec!["guide".to_string()])));
        assert!(state.is_selected("home"));

        reduce_menu(&mut state, MenuAction::SyncSelected(Some(vec!["guide".to_string()])))
            .expect("reduce");
        assert!(state.is_selected("guide"));
    }

    #[test]
    fn multiple_selection_toggles() {
        let mut state = MenuState::new(
            MenuConfig {
                items: sample_items(),
                multiple: true,
                ..MenuConfig::default()
            },
            None,
            None,
        );
        reduce_menu(&mut state, MenuAction::ClickItem("home".to_string())).expect("reduce");
        reduce_menu(&mut state, MenuAction::ClickItem("guide".to_string())).expect("reduce");
        reduce_menu(&mut state, MenuAction::ClickItem("home".to_string())).expect("reduce");
        assert_eq!(state.selected(), ["guide".to_string()]);
    }

    #[test]
    fn items_parse_from_json() {
        let config = MenuConfig::from_json(
            r#"{"mode": "horizontal", "items": [
                {"kind": "item", "value": "a", "label": "A"},
                {"kind": "sub_menu", "value": "b", "label": "B", "items": [
                    {"kind": "item", "value": "c", "label": "C", "disabled": true}
                ]}
            ]}"#,
        )
        .expect("config");
        assert_eq!(config.mode, MenuMode::Horizontal);
        let (entry, path) = find_entry(&config.items, "c").expect("entry");
        assert!(entry.is_disabled());
        assert_eq!(path, vec!["b".to_string(), "c".to_string()]);
    }
}
