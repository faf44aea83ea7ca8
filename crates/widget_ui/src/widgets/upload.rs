//! File picker and upload list.
//!
//! The widget never performs a transfer. Accepted files are handed to the host through
//! `on_start` together with their browser [`web_sys::File`], and the host reports progress back
//! through the [`UploadHandle`].

use std::collections::HashMap;

use leptos::ev::MouseEvent;
use leptos::*;
use widget_core::upload::{
    reduce_upload, FileMeta, UploadAction, UploadConfig, UploadEffect, UploadItem,
    UploadRejection, UploadState, UploadStatus,
};

use crate::dom::input_files;
use crate::primitives::{bool_token, merge_layout_class, Button, ButtonVariant, IconButton};
use crate::store::try_apply;
use crate::{Icon, IconName, IconSize};

/// Human-readable byte size, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

fn file_meta(file: &web_sys::File) -> FileMeta {
    FileMeta {
        name: file.name(),
        size: file.size().max(0.0) as u64,
        mime: file.type_(),
    }
}

/// Pairs newly listed items with the browser files they were built from.
///
/// Rejected files leave gaps, so items are matched in order by name and size.
fn pair_new_files(
    new_items: &[UploadItem],
    files: Vec<web_sys::File>,
) -> Vec<(u64, web_sys::File)> {
    let mut files = files.into_iter();
    new_items
        .iter()
        .filter_map(|item| {
            files
                .by_ref()
                .find(|file| {
                    let meta = file_meta(file);
                    meta.name == item.file.name && meta.size == item.file.size
                })
                .map(|file| (item.uid, file))
        })
        .collect()
}

#[derive(Clone, Copy)]
/// Reactive upload list shared between the [`Upload`] component and the host's transfer code.
pub struct UploadHandle {
    state: RwSignal<UploadState>,
    files: StoredValue<HashMap<u64, web_sys::File>>,
    on_start: Option<Callback<(u64, web_sys::File)>>,
    on_abort: Option<Callback<u64>>,
    on_change: Option<Callback<Vec<UploadItem>>>,
    on_reject: Option<Callback<UploadRejection>>,
}

/// Creates an upload list in the current reactive scope.
pub fn create_upload(config: UploadConfig) -> UploadHandle {
    UploadHandle {
        state: create_rw_signal(UploadState::new(config)),
        files: store_value(HashMap::new()),
        on_start: None,
        on_abort: None,
        on_change: None,
        on_reject: None,
    }
}

impl UploadHandle {
    /// Called with each file whose transfer should begin.
    pub fn on_start(mut self, callback: Callback<(u64, web_sys::File)>) -> Self {
        self.on_start = Some(callback);
        self
    }

    /// Called when an in-flight file is removed and its transfer should stop.
    pub fn on_abort(mut self, callback: Callback<u64>) -> Self {
        self.on_abort = Some(callback);
        self
    }

    /// Called with the full list after every change.
    pub fn on_change(mut self, callback: Callback<Vec<UploadItem>>) -> Self {
        self.on_change = Some(callback);
        self
    }

    /// Called once per refused file.
    pub fn on_reject(mut self, callback: Callback<UploadRejection>) -> Self {
        self.on_reject = Some(callback);
        self
    }

    /// Reactive item list.
    pub fn items(&self) -> Signal<Vec<UploadItem>> {
        let state = self.state;
        Signal::derive(move || state.with(|state| state.items().to_vec()))
    }

    /// Whether the picker still accepts files.
    pub fn can_add(&self) -> bool {
        self.state.with(UploadState::can_add)
    }

    /// Browser file behind `uid`, while it is listed.
    pub fn file(&self, uid: u64) -> Option<web_sys::File> {
        self.files.with_value(|files| files.get(&uid).cloned())
    }

    /// Adds picked files.
    pub fn add_files(&self, files: Vec<web_sys::File>) {
        let metas = files.iter().map(file_meta).collect();
        let before = self.state.with_untracked(|state| state.items().len());
        let effects = try_apply(
            self.state,
            "upload",
            UploadAction::AddFiles(metas),
            reduce_upload,
        );
        let added = self.state.with_untracked(|state| {
            let new_items = state.items().get(before..).unwrap_or_default();
            pair_new_files(new_items, files)
        });
        self.files.update_value(|stored| stored.extend(added));
        self.route(effects);
    }

    /// Starts every pending file (for `auto_upload = false`).
    pub fn start_pending(&self) {
        self.dispatch(UploadAction::StartPending);
    }

    /// Reports transfer progress in percent.
    pub fn progress(&self, uid: u64, percent: f64) {
        self.dispatch(UploadAction::Progress { uid, percent });
    }

    /// Reports a finished transfer.
    pub fn succeed(&self, uid: u64) {
        self.dispatch(UploadAction::Succeeded(uid));
    }

    /// Reports a failed transfer.
    pub fn fail(&self, uid: u64, message: impl Into<String>) {
        self.dispatch(UploadAction::Failed {
            uid,
            message: message.into(),
        });
    }

    /// Removes a file, aborting it when in flight.
    pub fn remove(&self, uid: u64) {
        self.dispatch(UploadAction::Remove(uid));
        self.files.update_value(|files| {
            files.remove(&uid);
        });
    }

    /// Restarts a failed file.
    pub fn retry(&self, uid: u64) {
        self.dispatch(UploadAction::Retry(uid));
    }

    fn dispatch(&self, action: UploadAction) {
        let effects = try_apply(self.state, "upload", action, reduce_upload);
        self.route(effects);
    }

    fn route(&self, effects: Vec<UploadEffect>) {
        for effect in effects {
            match effect {
                UploadEffect::Rejected(rejection) => {
                    logging::log!("upload rejected: {rejection}");
                    if let Some(on_reject) = self.on_reject.as_ref() {
                        on_reject.call(rejection);
                    }
                }
                UploadEffect::Start(uid) => {
                    let Some(file) = self.file(uid) else {
                        logging::warn!("upload start for unknown file {uid}");
                        continue;
                    };
                    if let Some(on_start) = self.on_start.as_ref() {
                        on_start.call((uid, file));
                    }
                }
                UploadEffect::Abort(uid) => {
                    if let Some(on_abort) = self.on_abort.as_ref() {
                        on_abort.call(uid);
                    }
                }
                UploadEffect::Change(items) => {
                    if let Some(on_change) = self.on_change.as_ref() {
                        on_change.call(items);
                    }
                }
            }
        }
    }
}

#[component]
/// Upload button plus the list of picked files.
pub fn Upload(
    handle: UploadHandle,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(default = "Upload")] label: &'static str,
) -> impl IntoView {
    let (accept, multiple, disabled) = handle.state.with_untracked(|state| {
        let config = state.config();
        (config.accept.clone(), config.multiple, config.disabled)
    });
    let input = create_node_ref::<html::Input>();
    let items = handle.items();

    view! {
        <div
            class=merge_layout_class("ui-upload", layout_class)
            data-ui-primitive="true"
            data-ui-kind="upload"
            data-ui-disabled=bool_token(disabled)
        >
            <input
                type="file"
                hidden=true
                node_ref=input
                accept=accept
                multiple=multiple
                disabled=disabled
                on:change=move |ev| handle.add_files(input_files(&ev))
            />
            <Button
                ui_slot="picker"
                leading_icon=IconName::ArrowUpload
                disabled=Signal::derive(move || !handle.can_add())
                on_click=Callback::new(move |_| {
                    if let Some(input) = input.get_untracked() {
                        input.click();
                    }
                })
            >
                {label}
            </Button>
            <ul data-ui-slot="list">
                <For
                    each=move || items.get()
                    key=|item| (item.uid, item.status.token(), item.percent.to_bits())
                    children=move |item| {
                        let uid = item.uid;
                        let failed = item.status == UploadStatus::Error;
                        let icon = if failed { IconName::ErrorCircle } else { IconName::Document };
                        view! {
                            <li data-ui-slot="item" data-ui-status=item.status.token()>
                                <Icon icon=icon size=IconSize::Sm />
                                <span data-ui-slot="name" title=item.file.name.clone()>
                                    {item.file.name.clone()}
                                </span>
                                <span data-ui-slot="size">{format_file_size(item.file.size)}</span>
                                {(item.status == UploadStatus::Uploading)
                                    .then(|| {
                                        view! {
                                            <progress
                                                data-ui-slot="progress"
                                                max="100"
                                                value=item.percent
                                            ></progress>
                                        }
                                    })}
                                {(item.status == UploadStatus::Done)
                                    .then(|| {
                                        view! { <Icon icon=IconName::Checkmark size=IconSize::Xs /> }
                                    })}
                                {item
                                    .error
                                    .clone()
                                    .map(|error| {
                                        view! {
                                            <span data-ui-slot="error" role="alert">{error}</span>
                                        }
                                    })}
                                {failed
                                    .then(|| {
                                        view! {
                                            <Button
                                                variant=ButtonVariant::Quiet
                                                ui_slot="retry"
                                                on_click=Callback::new(move |_| handle.retry(uid))
                                            >
                                                "Retry"
                                            </Button>
                                        }
                                    })}
                                <IconButton
                                    icon=IconName::Dismiss
                                    ui_slot="remove"
                                    aria_label="Remove file".to_string()
                                    on_click=Callback::new(move |_: MouseEvent| handle.remove(uid))
                                />
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sizes_scale_to_the_largest_whole_unit() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
    }
}
