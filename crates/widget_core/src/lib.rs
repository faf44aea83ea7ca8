//! Headless state machines for the form widget library.
//!
//! Each widget is a plain state struct plus a `reduce_*` function that applies one user or host
//! action and returns the callbacks the host should observe. Rendering crates own the DOM and
//! feed measurements (track width, pointer offsets, parsed file metadata) back in as actions, so
//! every rule here runs under `cargo test` without a browser.
//!
//! Values a host may control flow through [`Controlled`]: when the host supplies a value it wins,
//! and the widget reports requested changes without applying them until the host syncs.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod calendar;
mod controlled;
pub mod date;
mod error;
pub mod menu;
pub mod password;
pub mod range_picker;
pub mod select;
pub mod slider;
pub mod trigger;
pub mod upload;

pub use controlled::Controlled;
pub use error::WidgetError;

/// Convenience imports for rendering crates.
pub mod prelude {
    pub use crate::calendar::{month_grid, weekday_labels, CellSelection, DayCell, RangeHighlight};
    pub use crate::date::{DateFormat, DateRangeValue, DisabledDates, YearMonth};
    pub use crate::menu::{reduce_menu, MenuAction, MenuConfig, MenuEffect, MenuEntry, MenuMode, MenuState};
    pub use crate::password::{
        reduce_password, PasswordAction, PasswordConfig, PasswordEffect, PasswordState,
    };
    pub use crate::range_picker::{
        reduce_range_picker, CalendarCursor, PageDirection, PageUnit, RangePickerAction,
        RangePickerConfig, RangePickerEffect, RangePickerState, RangeSide, Shortcut,
        ShortcutPlacement,
    };
    pub use crate::select::{
        reduce_select, SelectAction, SelectConfig, SelectEffect, SelectKey, SelectOption,
        SelectState,
    };
    pub use crate::slider::{
        reduce_slider, BoundMark, DragTarget, Handle, SliderAction, SliderConfig, SliderEffect,
        SliderKey, SliderState, SliderValue, TrackGeometry,
    };
    pub use crate::trigger::{
        reduce_trigger, TriggerAction, TriggerConfig, TriggerContext, TriggerEffect, TriggerMode,
        TriggerPosition, TriggerState,
    };
    pub use crate::upload::{
        reduce_upload, FileMeta, UploadAction, UploadConfig, UploadEffect, UploadItem,
        UploadRejection, UploadState, UploadStatus,
    };
    pub use crate::{Controlled, WidgetError};
}
