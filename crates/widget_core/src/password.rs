//! Password field with a visibility toggle.

use serde::{Deserialize, Serialize};

use crate::controlled::Controlled;
use crate::error::WidgetError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Password field props.
pub struct PasswordConfig {
    /// Render the reveal toggle.
    pub visibility_toggle: bool,
    /// Start with the text revealed.
    pub default_visible: bool,
    /// Offer the clear affordance.
    pub allow_clear: bool,
    /// Disable editing.
    pub disabled: bool,
    /// Maximum characters kept.
    pub max_length: Option<usize>,
    /// Initial text when uncontrolled.
    pub default_value: String,
    /// Placeholder text.
    pub placeholder: String,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            visibility_toggle: true,
            default_visible: false,
            allow_clear: false,
            disabled: false,
            max_length: None,
            default_value: String::new(),
            placeholder: String::new(),
        }
    }
}

impl PasswordConfig {
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
/// Inputs accepted by [`reduce_password`].
pub enum PasswordAction {
    /// Text edited.
    Input(String),
    /// Reveal toggle clicked.
    ToggleVisibility,
    /// Input focused.
    Focus,
    /// Input blurred.
    Blur,
    /// Clear affordance.
    Clear,
    /// Host visibility update; `None` releases control.
    SyncVisible(Option<bool>),
    /// Host value update; `None` releases control.
    SyncValue(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Callbacks emitted by [`reduce_password`].
pub enum PasswordEffect {
    /// Text changed.
    Change(String),
    /// Reveal state changed.
    VisibilityChange(bool),
    /// Text cleared.
    Clear,
    /// Input focused.
    Focus,
    /// Input blurred.
    Blur,
}

#[derive(Debug, Clone, PartialEq)]
/// Password field instance state.
pub struct PasswordState {
    config: PasswordConfig,
    value: Controlled<String>,
    visible: Controlled<bool>,
    focused: bool,
}

impl PasswordState {
    /// Creates a field; `Some(value)` puts the text under host control.
    pub fn new(config: PasswordConfig, value: Option<String>) -> Self {
        Self {
            value: Controlled::new(value, config.default_value.clone()),
            visible: Controlled::uncontrolled(config.default_visible),
            focused: false,
            config,
        }
    }

    /// Props.
    pub fn config(&self) -> &PasswordConfig {
        &self.config
    }

    /// Current text.
    pub fn value(&self) -> &str {
        self.value.current()
    }

    /// Whether the text is revealed.
    pub fn is_visible(&self) -> bool {
        *self.visible.current()
    }

    /// Whether the input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// `type` attribute for the underlying input.
    pub fn input_type(&self) -> &'static str {
        if self.is_visible() {
            "text"
        } else {
            "password"
        }
    }

    /// Whether the clear affordance should render.
    pub fn shows_clear(&self) -> bool {
        self.config.allow_clear && !self.config.disabled && !self.value().is_empty()
    }
}

/// Applies a [`PasswordAction`].
pub fn reduce_password(state: &mut PasswordState, action: PasswordAction) -> Vec<PasswordEffect> {
    let mut effects = Vec::new();
    let passive = matches!(
        action,
        PasswordAction::SyncValue(_) | PasswordAction::SyncVisible(_) | PasswordAction::Blur
    );
    if state.config.disabled && !passive {
        return effects;
    }
    match action {
        PasswordAction::Input(text) => {
            let text = match state.config.max_length {
                Some(limit) => text.chars().take(limit).collect(),
                None => text,
            };
            if state.value.set(text.clone()) {
                effects.push(PasswordEffect::Change(text));
            }
        }
        PasswordAction::ToggleVisibility => {
            if !state.config.visibility_toggle {
                return effects;
            }
            let next = !state.is_visible();
            state.visible.set(next);
            effects.push(PasswordEffect::VisibilityChange(next));
        }
        PasswordAction::Focus => {
            if !state.focused {
                state.focused = true;
                effects.push(PasswordEffect::Focus);
            }
        }
        PasswordAction::Blur => {
            if state.focused {
                state.focused = false;
                effects.push(PasswordEffect::Blur);
            }
        }
        PasswordAction::Clear => {
            if !state.shows_clear() {
                return effects;
            }
            if state.value.set(String::new()) {
                effects.push(PasswordEffect::Change(String::new()));
            }
            effects.push(PasswordEffect::Clear);
        }
        PasswordAction::SyncVisible(visible) => state.visible.sync(visible),
        PasswordAction::SyncValue(value) => state.value.sync(value),
    }
    effects
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn toggle_switches_input_type() {
        let mut state = PasswordState::new(PasswordConfig::default(), None);
        assert_eq!(state.input_type(), "password");
        assert_eq!(
            reduce_password(&mut state, PasswordAction::ToggleVisibility),
            vec![PasswordEffect::VisibilityChange(true)]
        );
        assert_eq!(state.input_type(), "text");
    }

    #[test]
    fn toggle_defers_to_host_and_respects_the_toggle_prop() {
        let mut hidden = PasswordState::new(
            PasswordConfig {
                visibility_toggle: false,
                ..PasswordConfig::default()
            },
            None,
        );
        assert!(reduce_password(&mut hidden, PasswordAction::ToggleVisibility).is_empty());

        let mut controlled = PasswordState::new(PasswordConfig::default(), None);
        reduce_password(&mut controlled, PasswordAction::SyncVisible(Some(false)));
        let effects = reduce_password(&mut controlled, PasswordAction::ToggleVisibility);
        assert_eq!(effects, vec![PasswordEffect::VisibilityChange(true)]);
        assert!(!controlled.is_visible());
    }

    #[test]
    fn input_respects_max_length_and_clear() {
        let mut state = PasswordState::new(
            PasswordConfig {
                max_length: Some(4),
                allow_clear: true,
                ..PasswordConfig::default()
            },
            None,
        );
        assert_eq!(
            reduce_password(&mut state, PasswordAction::Input("secret".to_string())),
            vec![PasswordEffect::Change("secr".to_string())]
        );
        assert!(state.shows_clear());
        assert_eq!(
            reduce_password(&mut state, PasswordAction::Clear),
            vec![PasswordEffect::Change(String::new()), PasswordEffect::Clear]
        );
    }

    #[test]
    fn focus_events_fire_once() {
        let mut state = PasswordState::new(PasswordConfig::default(), None);
        assert_eq!(
            reduce_password(&mut state, PasswordAction::Focus),
            vec![PasswordEffect::Focus]
        );
        assert!(reduce_password(&mut state, PasswordAction::Focus).is_empty());
        assert_eq!(
            reduce_password(&mut state, PasswordAction::Blur),
            vec![PasswordEffect::Blur]
        );
    }
}
