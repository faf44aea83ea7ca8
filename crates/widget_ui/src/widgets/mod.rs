//! Widget components: each one owns a headless reducer state in a signal and renders it through
//! the shared primitives.

pub(crate) mod calendar;
pub(crate) mod menu;
pub(crate) mod password;
pub(crate) mod range_picker;
pub(crate) mod select;
pub(crate) mod slider;
pub(crate) mod trigger;
pub(crate) mod upload;
