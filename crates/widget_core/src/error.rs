//! Error types shared by the widget reducers and configuration loaders.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
/// Errors for invalid configuration or actions that reference missing entities.
pub enum WidgetError {
    /// Numeric bounds where `min` is not below `max`.
    #[error("invalid bounds: min {min} must be below max {max}")]
    InvalidBounds {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// A date format string chrono cannot render.
    #[error("invalid date format `{0}`")]
    InvalidFormat(String),
    /// Host configuration payload could not be decoded.
    #[error("invalid widget config: {0}")]
    InvalidConfig(String),
    /// Shortcut index outside the configured preset list.
    #[error("shortcut {0} not found")]
    UnknownShortcut(usize),
    /// Menu value not present in the item tree.
    #[error("menu value `{0}` not found")]
    UnknownMenuValue(String),
    /// Select option value not present in the option list.
    #[error("option `{0}` not found")]
    UnknownOption(String),
    /// Upload uid not present in the file list.
    #[error("file {0} not found")]
    UnknownFile(u64),
}

impl From<serde_json::Error> for WidgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
