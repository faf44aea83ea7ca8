//! Shared control and overlay primitives the widgets are composed from.

use leptos::ev::{FocusEvent, KeyboardEvent, MouseEvent};
use leptos::*;

use crate::{Icon, IconName, IconSize};

mod controls;
mod overlays;

pub use controls::{Button, IconButton, TextField};
pub use overlays::{MenuItem, MenuSurface, Popup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Shared button variants.
pub enum ButtonVariant {
    /// Standard action button.
    #[default]
    Standard,
    /// Primary emphasized action button.
    Primary,
    /// Quiet/toggle style button.
    Quiet,
    /// Borderless icon-only button.
    Icon,
}

impl ButtonVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Primary => "primary",
            Self::Quiet => "quiet",
            Self::Icon => "icon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Shared button sizing tokens.
pub enum ButtonSize {
    /// Dense button.
    Sm,
    /// Default button.
    #[default]
    Md,
}

impl ButtonSize {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Button silhouettes: text buttons are rounded rectangles, icon buttons are circles.
pub(crate) enum ButtonShape {
    Standard,
    Circle,
}

impl ButtonShape {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Circle => "circle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Shared input-field variants.
pub enum FieldVariant {
    /// Standard input.
    #[default]
    Standard,
    /// Borderless input nested in a composite control.
    Embedded,
}

impl FieldVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Embedded => "embedded",
        }
    }
}

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn layout_class_is_appended_when_present() {
        assert_eq!(merge_layout_class("ui-button", None), "ui-button");
        assert_eq!(merge_layout_class("ui-button", Some("")), "ui-button");
        assert_eq!(
            merge_layout_class("ui-button", Some("picker-ok")),
            "ui-button picker-ok"
        );
    }

    #[test]
    fn tokens_are_stable() {
        assert_eq!(ButtonVariant::default().token(), "standard");
        assert_eq!(ButtonShape::Circle.token(), "circle");
        assert_eq!(FieldVariant::Embedded.token(), "embedded");
        assert_eq!(bool_token(true), "true");
    }
}
