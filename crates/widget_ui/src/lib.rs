//! Leptos components for the form widget library.
//!
//! Every widget keeps its behavior in a `widget_core` reducer and renders it with the shared
//! primitives and the stable `data-ui-*` DOM contract. Host-controlled props are
//! `MaybeSignal<Option<T>>`: `None` leaves the widget in charge, `Some` makes the host value
//! authoritative until it is released again.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod dom;
mod focus;
mod icon;
mod primitives;
mod store;
mod widgets;

pub use focus::{FocusHandle, InputPairFocus};
pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    Button, ButtonSize, ButtonVariant, FieldVariant, IconButton, MenuItem, MenuSurface, Popup,
    TextField,
};
pub use widgets::calendar::CalendarPanel;
pub use widgets::menu::{Menu, MenuItemClick, SubMenuClick};
pub use widgets::password::PasswordInput;
pub use widgets::range_picker::{parse_time_input, RangeChange, RangeDatePicker};
pub use widgets::select::Select;
pub use widgets::slider::{format_slider_value, Slider};
pub use widgets::trigger::{use_trigger_context, Trigger};
pub use widgets::upload::{create_upload, format_file_size, Upload, UploadHandle};

/// Convenience imports for applications mounting the widgets.
pub mod prelude {
    pub use crate::{
        create_upload, use_trigger_context, Button, ButtonSize, ButtonVariant, CalendarPanel,
        FieldVariant, FocusHandle, Icon, IconButton, IconName, IconSize, InputPairFocus, Menu,
        MenuItem, MenuItemClick, MenuSurface, PasswordInput, Popup, RangeChange, RangeDatePicker,
        Select, Slider, SubMenuClick, TextField, Trigger, Upload, UploadHandle,
    };
    pub use widget_core::prelude::*;
}
