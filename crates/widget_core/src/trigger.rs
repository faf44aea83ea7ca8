//! Popup trigger visibility rules.
//!
//! A trigger wraps a target element and decides when its popup opens and closes from pointer,
//! focus, and outside-click activity. Widgets that render popups (the range picker, select,
//! horizontal menus) share these rules.

use serde::{Deserialize, Serialize};

use crate::controlled::Controlled;
use crate::error::WidgetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Activity that toggles the popup.
pub enum TriggerMode {
    /// Click toggles.
    #[default]
    Click,
    /// Pointer enter opens, leave closes.
    Hover,
    /// Focus opens, blur closes.
    Focus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Popup placement relative to the target.
pub enum TriggerPosition {
    /// Above, centered.
    Top,
    /// Above, left-aligned.
    Tl,
    /// Above, right-aligned.
    Tr,
    /// Below, centered.
    Bottom,
    /// Below, left-aligned.
    #[default]
    Bl,
    /// Below, right-aligned.
    Br,
    /// Left, centered.
    Left,
    /// Right, centered.
    Right,
}

impl TriggerPosition {
    /// Stable token for the `data-ui-position` DOM hook.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Tl => "tl",
            Self::Tr => "tr",
            Self::Bottom => "bottom",
            Self::Bl => "bl",
            Self::Br => "br",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Values every trigger publishes to nested popups.
pub struct TriggerContext {
    /// Mount popups at the document body rather than inline.
    pub render_in_body: bool,
    /// Base stacking order for popups.
    pub z_index: i32,
}

impl Default for TriggerContext {
    fn default() -> Self {
        Self {
            render_in_body: true,
            z_index: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Trigger props.
pub struct TriggerConfig {
    /// Activity that toggles the popup.
    pub mode: TriggerMode,
    /// Placement.
    pub position: TriggerPosition,
    /// Close when the popup content is clicked.
    pub close_on_click: bool,
    /// Close on clicks outside both target and popup.
    pub click_outside_to_close: bool,
    /// Never open.
    pub disabled: bool,
    /// Initial visibility when uncontrolled.
    pub default_visible: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            mode: TriggerMode::Click,
            position: TriggerPosition::Bl,
            close_on_click: false,
            click_outside_to_close: true,
            disabled: false,
            default_visible: false,
        }
    }
}

impl TriggerConfig {
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
/// Inputs accepted by [`reduce_trigger`].
pub enum TriggerAction {
    /// Target clicked.
    ClickTarget,
    /// Popup content clicked.
    ClickPopup,
    /// Click landed outside target and popup.
    ClickOutside,
    /// Pointer entered target or popup.
    PointerEnter,
    /// Pointer left target and popup.
    PointerLeave,
    /// Target focused.
    Focus,
    /// Target blurred.
    Blur,
    /// Escape pressed.
    Escape,
    /// Programmatic request.
    SetVisible(bool),
    /// Host update; `None` releases control.
    SyncVisible(Option<bool>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Callbacks emitted by [`reduce_trigger`].
pub enum TriggerEffect {
    /// Visibility changed.
    VisibleChange(bool),
}

#[derive(Debug, Clone, PartialEq)]
/// Trigger instance state.
pub struct TriggerState {
    config: TriggerConfig,
    visible: Controlled<bool>,
}

impl TriggerState {
    /// Creates a trigger; `Some(visible)` puts visibility under host control.
    pub fn new(config: TriggerConfig, visible: Option<bool>) -> Self {
        Self {
            visible: Controlled::new(visible, config.default_visible),
            config,
        }
    }

    /// Props.
    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// Whether the popup is shown.
    pub fn is_visible(&self) -> bool {
        *self.visible.current()
    }
}

/// Applies a [`TriggerAction`]; a `VisibleChange` fires only when visibility actually flips.
pub fn reduce_trigger(state: &mut TriggerState, action: TriggerAction) -> Vec<TriggerEffect> {
    let mode = state.config.mode;
    let requested = match action {
        TriggerAction::SyncVisible(visible) => {
            state.visible.sync(visible);
            return Vec::new();
        }
        _ if state.config.disabled => None,
        TriggerAction::ClickTarget if mode == TriggerMode::Click => Some(!state.is_visible()),
        TriggerAction::ClickPopup if state.config.close_on_click => Some(false),
        TriggerAction::ClickOutside if state.config.click_outside_to_close => Some(false),
        TriggerAction::PointerEnter if mode == TriggerMode::Hover => Some(true),
        TriggerAction::PointerLeave if mode == TriggerMode::Hover => Some(false),
        TriggerAction::Focus if mode == TriggerMode::Focus => Some(true),
        TriggerAction::Blur if mode == TriggerMode::Focus => Some(false),
        TriggerAction::Escape => Some(false),
        TriggerAction::SetVisible(visible) => Some(visible),
        _ => None,
    };

    match requested {
        Some(visible) if state.visible.set(visible) => {
            log::trace!("trigger popup visible={visible}");
            vec![TriggerEffect::VisibleChange(visible)]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn trigger(mode: TriggerMode) -> TriggerState {
        TriggerState::new(
            TriggerConfig {
                mode,
                ..TriggerConfig::default()
            },
            None,
        )
    }

    #[test]
    fn click_mode_toggles_and_closes_outside() {
        let mut state = trigger(TriggerMode::Click);
        assert_eq!(
            reduce_trigger(&mut state, TriggerAction::ClickTarget),
            vec![TriggerEffect::VisibleChange(true)]
        );
        assert!(reduce_trigger(&mut state, TriggerAction::PointerLeave).is_empty());
        assert!(reduce_trigger(&mut state, TriggerAction::ClickPopup).is_empty());
        assert_eq!(
            reduce_trigger(&mut state, TriggerAction::ClickOutside),
            vec![TriggerEffect::VisibleChange(false)]
        );
    }

    #[test]
    fn hover_and_focus_modes_follow_their_events() {
        let mut hover = trigger(TriggerMode::Hover);
        reduce_trigger(&mut hover, TriggerAction::PointerEnter);
        assert!(hover.is_visible());
        assert!(reduce_trigger(&mut hover, TriggerAction::ClickTarget).is_empty());
        reduce_trigger(&mut hover, TriggerAction::PointerLeave);
        assert!(!hover.is_visible());

        let mut focus = trigger(TriggerMode::Focus);
        reduce_trigger(&mut focus, TriggerAction::Focus);
        assert!(focus.is_visible());
        reduce_trigger(&mut focus, TriggerAction::Escape);
        assert!(!focus.is_visible());
    }

    #[test]
    fn repeated_requests_do_not_refire() {
        let mut state = trigger(TriggerMode::Click);
        reduce_trigger(&mut state, TriggerAction::SetVisible(true));
        assert!(reduce_trigger(&mut state, TriggerAction::SetVisible(true)).is_empty());
    }

    #[test]
    fn controlled_visibility_waits_for_host() {
        let mut state = TriggerState::new(TriggerConfig::default(), Some(false));
        assert_eq!(
            reduce_trigger(&mut state, TriggerAction::ClickTarget),
            vec![TriggerEffect::VisibleChange(true)]
        );
        assert!(!state.is_visible());
        reduce_trigger(&mut state, TriggerAction::SyncVisible(Some(true)));
        assert!(state.is_visible());
    }

    #[test]
    fn disabled_trigger_never_opens() {
        let mut state = TriggerState::new(
            TriggerConfig {
                disabled: true,
                ..TriggerConfig::default()
            },
            None,
        );
        assert!(reduce_trigger(&mut state, TriggerAction::ClickTarget).is_empty());
        assert!(!state.is_visible());
    }

    #[test]
    fn context_defaults_render_in_body() {
        assert_eq!(
            TriggerContext::default(),
            TriggerContext {
                render_in_body: true,
                z_index: 1,
            }
        );
    }
}
