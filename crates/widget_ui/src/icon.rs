//! Centralized icon catalog for the widget set.
//!
//! Widgets reference icons by semantic name so no component embeds raw SVG. Most glyphs are
//! Fluent UI System Icons (regular, 24px grid); the link glyph keeps its own 12px grid, so every
//! icon carries its view box alongside its path body.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Semantic icon identifiers used by widget components.
pub enum IconName {
    /// Date input affordance.
    Calendar,
    /// Time panel toggle.
    Clock,
    /// Password revealed.
    Eye,
    /// Password hidden.
    EyeOff,
    /// Hyperlink glyph.
    Link,
    /// Clear/close glyph.
    Dismiss,
    /// Previous month.
    ChevronLeft,
    /// Next month.
    ChevronRight,
    /// Expand/open chevron.
    ChevronDown,
    /// Previous year.
    ChevronDoubleLeft,
    /// Next year.
    ChevronDoubleRight,
    /// Upload trigger.
    ArrowUpload,
    /// Uploaded file entry.
    Document,
    /// Selected option / finished upload.
    Checkmark,
    /// Failed upload.
    ErrorCircle,
}

impl IconName {
    /// Every icon, in catalog order.
    pub const ALL: [Self; 15] = [
        Self::Calendar,
        Self::Clock,
        Self::Eye,
        Self::EyeOff,
        Self::Link,
        Self::Dismiss,
        Self::ChevronLeft,
        Self::ChevronRight,
        Self::ChevronDown,
        Self::ChevronDoubleLeft,
        Self::ChevronDoubleRight,
        Self::ArrowUpload,
        Self::Document,
        Self::Checkmark,
        Self::ErrorCircle,
    ];

    /// Stable token used for CSS hooks and debugging.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Clock => "clock",
            Self::Eye => "eye",
            Self::EyeOff => "eye-off",
            Self::Link => "link",
            Self::Dismiss => "dismiss",
            Self::ChevronLeft => "chevron-left",
            Self::ChevronRight => "chevron-right",
            Self::ChevronDown => "chevron-down",
            Self::ChevronDoubleLeft => "chevron-double-left",
            Self::ChevronDoubleRight => "chevron-double-right",
            Self::ArrowUpload => "arrow-upload",
            Self::Document => "document",
            Self::Checkmark => "checkmark",
            Self::ErrorCircle => "error-circle",
        }
    }

    /// Resolves a token back to an icon, for icons named in host configuration.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.token() == token)
    }

    /// Human-readable title used when the icon is not decorative.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Calendar => "Calendar",
            Self::Clock => "Clock",
            Self::Eye => "Show",
            Self::EyeOff => "Hide",
            Self::Link => "Link",
            Self::Dismiss => "Clear",
            Self::ChevronLeft => "Previous month",
            Self::ChevronRight => "Next month",
            Self::ChevronDown => "Expand",
            Self::ChevronDoubleLeft => "Previous year",
            Self::ChevronDoubleRight => "Next year",
            Self::ArrowUpload => "Upload",
            Self::Document => "File",
            Self::Checkmark => "Done",
            Self::ErrorCircle => "Error",
        }
    }

    /// SVG `viewBox` of the path body.
    pub const fn view_box(self) -> &'static str {
        match self {
            Self::Link => "0 0 12 12",
            _ => "0 0 24 24",
        }
    }

    fn svg_body(self) -> &'static str {
        match self {
            Self::Calendar => {
                r#"<path d="M17.75 3C19.55 3 21 4.46 21 6.25v11.5c0 1.8-1.46 3.25-3.25 3.25H6.25A3.25 3.25 0 0 1 3 17.75V6.25C3 4.45 4.46 3 6.25 3h11.5Zm1.75 5.5h-15v9.25c0 .97.78 1.75 1.75 1.75h11.5c.97 0 1.75-.78 1.75-1.75V8.5Zm-11.75 6a1.25 1.25 0 1 1 0 2.5 1.25 1.25 0 0 1 0-2.5Zm4.25 0a1.25 1.25 0 1 1 0 2.5 1.25 1.25 0 0 1 0-2.5Zm-4.25-4a1.25 1.25 0 1 1 0 2.5 1.25 1.25 0 0 1 0-2.5Zm4.25 0a1.25 1.25 0 1 1 0 2.5 1.25 1.25 0 0 1 0-2.5Zm4.25 0a1.25 1.25 0 1 1 0 2.5 1.25 1.25 0 0 1 0-2.5Zm1.5-6H6.25c-.97 0-1.75.78-1.75 1.75V7h15v-.75c0-.97-.78-1.75-1.75-1.75Z"/>"#
            }
            Self::Clock => {
                r#"<path d="M12 2a10 10 0 1 1 0 20 10 10 0 0 1 0-20Zm0 1.5a8.5 8.5 0 1 0 0 17 8.5 8.5 0 0 0 0-17ZM11.25 6a.75.75 0 0 1 .75.65V12h3.25a.75.75 0 0 1 .1 1.5h-4.1a.75.75 0 0 1-.75-.65v-6.1a.75.75 0 0 1 .75-.75Z"/>"#
            }
            Self::Eye => {
                r#"<path d="M12 9.01a3 3 0 1 1 0 6 3 3 0 0 1 0-6Zm0 1.5a1.5 1.5 0 1 0 0 3 1.5 1.5 0 0 0 0-3ZM12 5.5c4.61 0 8.6 3.15 9.7 7.55a.75.75 0 0 1-1.45.37 8.52 8.52 0 0 0-16.5 0 .75.75 0 0 1-1.45-.37A10 10 0 0 1 12 5.5Z"/>"#
            }
            Self::EyeOff => {
                r#"<path d="M2.22 2.22a.75.75 0 0 0-.07.98l.07.08 4.03 4.03a10 10 0 0 0-3.95 5.75.75.75 0 0 0 1.45.37 8.5 8.5 0 0 1 3.58-5.04l1.81 1.81a4 4 0 0 0 5.65 5.65l5.93 5.93a.75.75 0 0 0 1.13-.98l-.07-.08L3.28 2.22a.75.75 0 0 0-1.06 0Zm7.98 9.05 3.53 3.53a2.5 2.5 0 0 1-3.53-3.53ZM12 5.5c-1 0-1.97.15-2.88.43l1.24 1.24a8.52 8.52 0 0 1 9.9 6.25.75.75 0 0 0 1.45-.37A10 10 0 0 0 12 5.5Zm.2 3.51 3.8 3.8a4 4 0 0 0-3.8-3.8Z"/>"#
            }
            Self::Link => {
                r#"<path d="M9.689 1.606a1.3 1.3 0 0 0-1.422.29l-.003.003L5.72 4.444a1.3 1.3 0 0 0 0 1.839l-.708.707a2.3 2.3 0 0 1 0-3.253l2.545-2.544a2.3 2.3 0 1 1 3.253 3.252L9.204 6.053l-.708-.706 1.608-1.613a1.302 1.302 0 0 0-.416-2.128zm-2.7 3.404a2.3 2.3 0 0 1 0 3.253l-2.545 2.545a2.3 2.3 0 0 1-3.253-3.252L2.676 6.07l.707.707-1.485 1.485A1.3 1.3 0 1 0 3.737 10.1l2.545-2.545a1.3 1.3 0 0 0 0-1.839l.708-.707z"/>"#
            }
            Self::Dismiss => {
                r#"<path d="m4.4 4.55.07-.08a.75.75 0 0 1 .98-.07l.08.07L12 10.94l6.47-6.47a.75.75 0 1 1 1.06 1.06L13.06 12l6.47 6.47c.27.27.3.68.07.98l-.07.08a.75.75 0 0 1-.98.07l-.08-.07L12 13.06l-6.47 6.47a.75.75 0 0 1-1.06-1.06L10.94 12 4.47 5.53a.75.75 0 0 1-.07-.98l.07-.08-.07.08Z"/>"#
            }
            Self::ChevronLeft => {
                r#"<path d="M15.53 4.22c.3.3.3.77 0 1.06L8.81 12l6.72 6.72a.75.75 0 1 1-1.06 1.06l-7.25-7.25a.75.75 0 0 1 0-1.06l7.25-7.25c.3-.3.77-.3 1.06 0Z"/>"#
            }
            Self::ChevronRight => {
                r#"<path d="M8.47 4.22c.3-.3.77-.3 1.06 0l7.25 7.25c.3.3.3.77 0 1.06l-7.25 7.25a.75.75 0 0 1-1.06-1.06L15.19 12 8.47 5.28a.75.75 0 0 1 0-1.06Z"/>"#
            }
            Self::ChevronDown => {
                r#"<path d="M4.22 8.47c.3-.3.77-.3 1.06 0L12 15.19l6.72-6.72a.75.75 0 1 1 1.06 1.06l-7.25 7.25c-.3.3-.77.3-1.06 0L4.22 9.53a.75.75 0 0 1 0-1.06Z"/>"#
            }
            Self::ChevronDoubleLeft => {
                r#"<path d="M11.53 4.22c.3.3.3.77 0 1.06L4.81 12l6.72 6.72a.75.75 0 1 1-1.06 1.06l-7.25-7.25a.75.75 0 0 1 0-1.06l7.25-7.25c.3-.3.77-.3 1.06 0Zm9 0c.3.3.3.77 0 1.06L13.81 12l6.72 6.72a.75.75 0 1 1-1.06 1.06l-7.25-7.25a.75.75 0 0 1 0-1.06l7.25-7.25c.3-.3.77-.3 1.06 0Z"/>"#
            }
            Self::ChevronDoubleRight => {
                r#"<path d="M3.47 4.22c.3-.3.77-.3 1.06 0l7.25 7.25c.3.3.3.77 0 1.06l-7.25 7.25a.75.75 0 0 1-1.06-1.06L10.19 12 3.47 5.28a.75.75 0 0 1 0-1.06Zm9 0c.3-.3.77-.3 1.06 0l7.25 7.25c.3.3.3.77 0 1.06l-7.25 7.25a.75.75 0 0 1-1.06-1.06L19.19 12l-6.72-6.72a.75.75 0 0 1 0-1.06Z"/>"#
            }
            Self::ArrowUpload => {
                r#"<path d="M5.25 3.5a.75.75 0 0 1 0-1.5h13.5a.75.75 0 0 1 0 1.5H5.25Zm6.22 2.72a.75.75 0 0 1 1.06 0l5.25 5.25a.75.75 0 1 1-1.06 1.06l-3.97-3.97v12.69a.75.75 0 0 1-1.5 0V8.56l-3.97 3.97a.75.75 0 0 1-1.06-1.06l5.25-5.25Z"/>"#
            }
            Self::Document => {
                r#"<path d="M8.75 11.5a.75.75 0 0 0 0 1.5h6.5a.75.75 0 0 0 0-1.5h-6.5Zm0 2.75a.75.75 0 0 0 0 1.5h6.5a.75.75 0 0 0 0-1.5h-6.5Zm0 2.75a.75.75 0 0 0 0 1.5h6.5a.75.75 0 0 0 0-1.5h-6.5Zm4.84-14.41L19.4 8.4A2 2 0 0 1 20 9.83V20a2 2 0 0 1-2 2H6a2 2 0 0 1-2-2V4c0-1.1.9-2 2-2h6.17c.52 0 1.05.22 1.42.59ZM18 20.5a.5.5 0 0 0 .5-.5V10H14a2 2 0 0 1-2-2V3.5H6a.5.5 0 0 0-.5.5v16c0 .27.22.5.5.5h12Zm-.62-12L13.5 4.62V8c0 .28.22.5.5.5h3.38Z"/>"#
            }
            Self::Checkmark => {
                r#"<path d="M4.53 12.97a.75.75 0 0 0-1.06 1.06l4.5 4.5c.3.3.77.3 1.06 0l11-11a.75.75 0 0 0-1.06-1.06L8.5 16.94l-3.97-3.97Z"/>"#
            }
            Self::ErrorCircle => {
                r#"<path d="M12 2a10 10 0 1 1 0 20 10 10 0 0 1 0-20Zm0 1.5a8.5 8.5 0 1 0 0 17 8.5 8.5 0 0 0 0-17Zm0 11a1 1 0 1 1 0 2 1 1 0 0 1 0-2Zm0-8a.75.75 0 0 1 .74.65l.01.1v5.5a.75.75 0 0 1-1.5.1v-5.6A.75.75 0 0 1 12 6.5Z"/>"#
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
/// Standardized icon sizes.
pub enum IconSize {
    /// 12px glyph inside dense inputs.
    Xs,
    /// 16px standard icon.
    #[default]
    Sm,
    /// 20px prominent icon.
    Md,
    /// 24px large icon (upload drop zone).
    Lg,
}

impl IconSize {
    /// Pixel size for the icon.
    pub const fn px(self) -> u16 {
        match self {
            Self::Xs => 12,
            Self::Sm => 16,
            Self::Md => 20,
            Self::Lg => 24,
        }
    }

    /// Stable size token used for CSS hooks and debugging.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

#[component]
/// Renders an icon from the catalog.
///
/// Icons are decorative by default; pass `labelled` to expose the icon title to assistive
/// technology.
pub fn Icon(
    /// Semantic icon identifier.
    icon: IconName,
    /// Standardized icon size token.
    #[prop(default = IconSize::Sm)]
    size: IconSize,
    /// Announce the icon title instead of hiding the glyph.
    #[prop(optional)]
    labelled: bool,
) -> impl IntoView {
    let size_px = size.px().to_string();

    view! {
        <svg
            class="ui-icon"
            data-icon=icon.token()
            data-size=size.token()
            xmlns="http://www.w3.org/2000/svg"
            viewBox=icon.view_box()
            width=size_px.clone()
            height=size_px
            fill="currentColor"
            focusable="false"
            role=labelled.then_some("img")
            aria-label=labelled.then(|| icon.title())
            aria-hidden=(!labelled).then_some("true")
            inner_html=icon.svg_body()
        />
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tokens_are_unique_and_resolvable() {
        let tokens: HashSet<&str> = IconName::ALL.iter().map(|icon| icon.token()).collect();
        assert_eq!(tokens.len(), IconName::ALL.len());
        for icon in IconName::ALL {
            assert_eq!(IconName::from_token(icon.token()), Some(icon));
        }
        assert_eq!(IconName::from_token("missing"), None);
    }

    #[test]
    fn link_keeps_its_own_grid() {
        assert_eq!(IconName::Link.view_box(), "0 0 12 12");
        assert_eq!(IconName::Calendar.view_box(), "0 0 24 24");
    }

    #[test]
    fn every_body_is_a_single_path() {
        for icon in IconName::ALL {
            let body = icon.svg_body();
            assert!(body.starts_with("<path d=\""), "{}", icon.token());
            assert!(body.ends_with("\"/>"), "{}", icon.token());
        }
    }
}
