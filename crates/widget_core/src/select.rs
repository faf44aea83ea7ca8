//! Option list selection with keyboard navigation.

use serde::{Deserialize, Serialize};

use crate::controlled::Controlled;
use crate::error::WidgetError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One selectable option.
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Rendered text; defaults to the value.
    #[serde(default)]
    pub label: Option<String>,
    /// Cannot be chosen.
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    /// Enabled option labelled by its value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            disabled: false,
        }
    }

    /// Sets the rendered text.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the option marked disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Rendered text.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Select props.
pub struct SelectConfig {
    /// Available options.
    pub options: Vec<SelectOption>,
    /// Allow several values.
    pub multiple: bool,
    /// Disable the whole control.
    pub disabled: bool,
    /// Offer the clear affordance.
    pub allow_clear: bool,
    /// Initial values when uncontrolled.
    pub default_value: Vec<String>,
    /// Text shown with nothing selected.
    pub placeholder: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            multiple: false,
            disabled: false,
            allow_clear: false,
            default_value: Vec::new(),
            placeholder: "Please select".to_string(),
        }
    }
}

impl SelectConfig {
    /// Parses a JSON props payload.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidConfig`] for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, WidgetError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Keys the option list reacts to.
pub enum SelectKey {
    /// Move the active option up.
    ArrowUp,
    /// Move the active option down.
    ArrowDown,
    /// First enabled option.
    Home,
    /// Last enabled option.
    End,
    /// Open, or choose the active option.
    Enter,
    /// Close.
    Escape,
}

impl SelectKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "Enter" | " " => Some(Self::Enter),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inputs accepted by [`reduce_select`].
pub enum SelectAction {
    /// Option clicked.
    Choose(String),
    /// Key pressed while the control has focus.
    Key(SelectKey),
    /// Pointer entered an option.
    Hover(usize),
    /// Popup open/close request.
    SetOpen(bool),
    /// Clear affordance.
    Clear,
    /// Host value update; `None` releases control.
    SyncValue(Option<Vec<String>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Callbacks emitted by [`reduce_select`].
pub enum SelectEffect {
    /// Selected values changed.
    Change(Vec<String>),
    /// Popup visibility changed.
    VisibleChange(bool),
    /// Selection cleared.
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
/// Select instance state.
pub struct SelectState {
    config: SelectConfig,
    value: Controlled<Vec<String>>,
    open: bool,
    active: Option<usize>,
}

impl SelectState {
    /// Creates a select; `Some(value)` puts the selection under host control.
    pub fn new(config: SelectConfig, value: Option<Vec<String>>) -> Self {
        Self {
            value: Controlled::new(value, config.default_value.clone()),
            open: false,
            active: None,
            config,
        }
    }

    /// Props.
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Selected values.
    pub fn value(&self) -> &[String] {
        self.value.current()
    }

    /// Whether the option list is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the keyboard-highlighted option.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Whether `value` is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.value().iter().any(|selected| selected == value)
    }

    /// Labels of the selected options in selection order.
    pub fn selected_labels(&self) -> Vec<String> {
        self.value()
            .iter()
            .filter_map(|value| self.config.options.iter().find(|option| option.value == *value))
            .map(|option| option.label().to_string())
            .collect()
    }

    fn step_active(&self, forward: bool) -> Option<usize> {
        let count = self.config.options.len();
        if count == 0 {
            return None;
        }
        let mut index = self.active.unwrap_or(if forward { count - 1 } else { 0 });
        for _ in 0..count {
            index = if forward {
                (index + 1) % count
            } else {
                (index + count - 1) % count
            };
            if !self.config.options[index].disabled {
                return Some(index);
            }
        }
        None
    }

    fn edge_active(&self, last: bool) -> Option<usize> {
        let enabled = |(_, option): &(usize, &SelectOption)| !option.disabled;
        let mut options = self.config.options.iter().enumerate();
        let found = if last {
            options.rev().find(enabled)
        } else {
            options.find(enabled)
        };
        found.map(|(index, _)| index)
    }

    fn set_open(&mut self, open: bool, effects: &mut Vec<SelectEffect>) {
        if self.open == open {
            return;
        }
        self.open = open;
        self.active = if open {
            self.config
                .options
                .iter()
                .position(|option| self.is_selected(&option.value) && !option.disabled)
        } else {
            None
        };
        effects.push(SelectEffect::VisibleChange(open));
    }

    fn choose(&mut self, value: String, effects: &mut Vec<SelectEffect>) -> Result<(), WidgetError> {
        let option = self
            .config
            .options
            .iter()
            .find(|option| option.value == value)
            .ok_or_else(|| WidgetError::UnknownOption(value.clone()))?;
        if option.disabled {
            return Ok(());
        }
        let next = if self.config.multiple {
            let mut next = self.value().to_vec();
            match next.iter().position(|selected| *selected == value) {
                Some(index) => {
                    next.remove(index);
                }
                None => next.push(value),
            }
            next
        } else {
            vec![value]
        };
        if self.value.set(next.clone()) {
            effects.push(SelectEffect::Change(next));
        }
        if !self.config.multiple {
            self.set_open(false, effects);
        }
        Ok(())
    }
}

/// Applies a [`SelectAction`].
///
/// # Errors
///
/// Returns [`WidgetError::UnknownOption`] when a value is not among the options.
pub fn reduce_select(
    state: &mut SelectState,
    action: SelectAction,
) -> Result<Vec<SelectEffect>, WidgetError> {
    let mut effects = Vec::new();
    if state.config.disabled && !matches!(action, SelectAction::SyncValue(_)) {
        return Ok(effects);
    }
    match action {
        SelectAction::Choose(value) => state.choose(value, &mut effects)?,
        SelectAction::Key(key) => match key {
            SelectKey::ArrowDown | SelectKey::ArrowUp if !state.open => {
                state.set_open(true, &mut effects);
            }
            SelectKey::ArrowDown => state.active = state.step_active(true),
            SelectKey::ArrowUp => state.active = state.step_active(false),
            SelectKey::Home | SelectKey::End if !state.open => {}
            SelectKey::Home => state.active = state.edge_active(false),
            SelectKey::End => state.active = state.edge_active(true),
            SelectKey::Enter if !state.open => state.set_open(true, &mut effects),
            SelectKey::Enter => {
                if let Some(option) = state.active.and_then(|index| state.config.options.get(index)) {
                    let value = option.value.clone();
                    state.choose(value, &mut effects)?;
                }
            }
            SelectKey::Escape => state.set_open(false, &mut effects),
        },
        SelectAction::Hover(index) => {
            if state
                .config
                .options
                .get(index)
                .is_some_and(|option| !option.disabled)
            {
                state.active = Some(index);
            }
        }
        SelectAction::SetOpen(open) => state.set_open(open, &mut effects),
        SelectAction::Clear => {
            if !state.config.allow_clear || state.value().is_empty() {
                return Ok(effects);
            }
            if state.value.set(Vec::new()) {
                effects.push(SelectEffect::Change(Vec::new()));
            }
            effects.push(SelectEffect::Clear);
        }
        SelectAction::SyncValue(value) => state.value.sync(value),
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("beijing").with_label("Beijing"),
            SelectOption::new("shanghai").with_label("Shanghai").disabled(),
            SelectOption::new("guangzhou").with_label("Guangzhou"),
        ]
    }

    fn select(multiple: bool) -> SelectState {
        SelectState::new(
            SelectConfig {
                options: options(),
                multiple,
                allow_clear: true,
                ..SelectConfig::default()
            },
            None,
        )
    }

    fn apply(state: &mut SelectState, action: SelectAction) -> Vec<SelectEffect> {
        reduce_select(state, action).expect("reduce")
    }

    #[test]
    fn single_choice_closes_the_list() {
        let mut state = select(false);
        apply(&mut state, SelectAction::SetOpen(true));
        let effects = apply(&mut state, SelectAction::Choose("guangzhou".to_string()));
        assert_eq!(
            effects,
            vec![
                SelectEffect::Change(vec!["guangzhou".to_string()]),
                SelectEffect::VisibleChange(false),
            ]
        );
        assert_eq!(state.selected_labels(), vec!["Guangzhou".to_string()]);
    }

    #[test]
    fn keyboard_navigation_skips_disabled_options() {
        let mut state = select(false);
        apply(&mut state, SelectAction::Key(SelectKey::ArrowDown));
        assert!(state.is_open());
        apply(&mut state, SelectAction::Key(SelectKey::ArrowDown));
        assert_eq!(state.active(), Some(0));
        apply(&mut state, SelectAction::Key(SelectKey::ArrowDown));
        assert_eq!(state.active(), Some(2));
        apply(&mut state, SelectAction::Key(SelectKey::ArrowDown));
        assert_eq!(state.active(), Some(0));
        apply(&mut state, SelectAction::Key(SelectKey::ArrowUp));
        assert_eq!(state.active(), Some(2));

        apply(&mut state, SelectAction::Key(SelectKey::Home));
        assert_eq!(state.active(), Some(0));
        apply(&mut state, SelectAction::Key(SelectKey::End));
        assert_eq!(state.active(), Some(2));

        apply(&mut state, SelectAction::Key(SelectKey::Enter));
        assert_eq!(state.value(), ["guangzhou".to_string()]);
        assert!(!state.is_open());
    }

    #[test]
    fn multiple_mode_toggles_and_stays_open() {
        let mut state = select(true);
        apply(&mut state, SelectAction::SetOpen(true));
        apply(&mut state, SelectAction::Choose("beijing".to_string()));
        apply(&mut state, SelectAction::Choose("guangzhou".to_string()));
        apply(&mut state, SelectAction::Choose("beijing".to_string()));
        assert_eq!(state.value(), ["guangzhou".to_string()]);
        assert!(state.is_open());
    }

    #[test]
    fn disabled_and_unknown_options() {
        let mut state = select(false);
        assert!(apply(&mut state, SelectAction::Choose("shanghai".to_string())).is_empty());
        assert_eq!(
            reduce_select(&mut state, SelectAction::Choose("paris".to_string())),
            Err(WidgetError::UnknownOption("paris".to_string()))
        );
    }

    #[test]
    fn clear_empties_selection() {
        let mut state = select(false);
        apply(&mut state, SelectAction::Choose("beijing".to_string()));
        assert_eq!(
            apply(&mut state, SelectAction::Clear),
            vec![SelectEffect::Change(Vec::new()), SelectEffect::Clear]
        );
        assert!(apply(&mut state, SelectAction::Clear).is_empty());
    }

    #[test]
    fn options_parse_from_json() {
        let config = SelectConfig::from_json(
            r#"{"options": [{"value": "a"}, {"value": "b", "label": "Bee", "disabled": true}]}"#,
        )
        .expect("config");
        assert_eq!(config.options[0].label(), "a");
        assert!(config.options[1].disabled);
    }
}
