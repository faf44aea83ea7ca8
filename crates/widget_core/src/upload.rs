//! Upload file list: acceptance filtering, limits, and per-file progress.
//!
//! The reducer never touches the network. It tells the host which files to start and tracks
//! the progress the host reports back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::WidgetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Lifecycle of one file.
pub enum UploadStatus {
    /// Accepted, not yet started.
    #[default]
    Pending,
    /// Transfer in progress.
    Uploading,
    /// Transfer finished.
    Done,
    /// Transfer failed.
    Error,
}

impl UploadStatus {
    /// Stable token for the `data-ui-status` DOM hook.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Uploading => "uploading",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// File metadata as picked by the user.
pub struct FileMeta {
    /// File name including extension.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type reported by the browser; may be empty.
    #[serde(default)]
    pub mime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One entry in the file list.
pub struct UploadItem {
    /// Identifier assigned on acceptance.
    pub uid: u64,
    /// File metadata.
    pub file: FileMeta,
    /// Lifecycle state.
    pub status: UploadStatus,
    /// Progress, 0-100.
    pub percent: f64,
    /// Failure message.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Why a picked file was not added.
pub enum UploadRejection {
    /// Type or extension not in `accept`.
    #[error("{name} does not match accepted types `{accept}`")]
    NotAccepted {
        /// File name.
        name: String,
        /// Configured accept list.
        accept: String,
    },
    /// Larger than `max_size`.
    #[error("{name} exceeds {max_size} bytes")]
    TooLarge {
        /// File name.
        name: String,
        /// Configured limit.
        max_size: u64,
    },
    /// The list already holds `limit` files.
    #[error("{name} exceeds the limit of {limit} files")]
    LimitReached {
        /// File name.
        name: String,
        /// Configured limit.
        limit: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Upload props.
pub struct UploadConfig {
    /// Comma-separated `.ext`, `type/*`, or `type/subtype` patterns; empty accepts all.
    pub accept: String,
    /// Allow picking several files at once.
    pub multiple: bool,
    /// Maximum number of files in the list.
    pub limit: Option<usize>,
    /// Maximum size per file in bytes.
    pub max_size: Option<u64>,
    /// Start transfers as soon as files are accepted.
    pub auto_upload: bool,
    /// Disable picking.
    pub disabled: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accept: String::new(),
            multiple: false,
            limit: None,
            max_size: None,
            auto_upload: true,
            disabled: false,
        }
    }
}

impl UploadConfig {
    /// Parses a JSON props payload.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidConfig`] for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, WidgetError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Whether `file` matches the accept list.
    pub fn accepts(&self, file: &FileMeta) -> bool {
        let patterns: Vec<&str> = self
            .accept
            .split(',')
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
            .collect();
        if patterns.is_empty() {
            return true;
        }
        let name = file.name.to_ascii_lowercase();
        let mime = file.mime.to_ascii_lowercase();
        patterns.iter().any(|pattern| {
            let pattern = pattern.to_ascii_lowercase();
            if pattern.starts_with('.') {
                name.ends_with(&pattern)
            } else if let Some(family) = pattern.strip_suffix("/*") {
                mime.split_once('/').is_some_and(|(kind, _)| kind == family)
            } else {
                mime == pattern
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Inputs accepted by [`reduce_upload`].
pub enum UploadAction {
    /// Files picked or dropped.
    AddFiles(Vec<FileMeta>),
    /// Start every pending file.
    StartPending,
    /// Host progress report.
    Progress {
        /// File uid.
        uid: u64,
        /// Percent complete.
        percent: f64,
    },
    /// Host reported success.
    Succeeded(u64),
    /// Host reported failure.
    Failed {
        /// File uid.
        uid: u64,
        /// Failure message.
        message: String,
    },
    /// Remove a file from the list.
    Remove(u64),
    /// Restart a failed file.
    Retry(u64),
}

#[derive(Debug, Clone, PartialEq)]
/// Callbacks and host commands emitted by [`reduce_upload`].
pub enum UploadEffect {
    /// File was not added.
    Rejected(UploadRejection),
    /// Host should begin transferring the file.
    Start(u64),
    /// Host should abort the file's transfer.
    Abort(u64),
    /// File list changed.
    Change(Vec<UploadItem>),
}

#[derive(Debug, Clone, PartialEq)]
/// Upload instance state.
pub struct UploadState {
    config: UploadConfig,
    items: Vec<UploadItem>,
    next_uid: u64,
}

impl Default for UploadState {
    fn default() -> Self {
        Self::new(UploadConfig::default())
    }
}

impl UploadState {
    /// Empty list.
    pub fn new(config: UploadConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            next_uid: 1,
        }
    }

    /// Props.
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// File list in insertion order.
    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    /// Whether the picker should still accept files.
    pub fn can_add(&self) -> bool {
        !self.config.disabled
            && self
                .config
                .limit
                .map_or(true, |limit| self.items.len() < limit)
    }

    fn item_mut(&mut self, uid: u64) -> Result<&mut UploadItem, WidgetError> {
        self.items
            .iter_mut()
            .find(|item| item.uid == uid)
            .ok_or(WidgetError::UnknownFile(uid))
    }

    fn start(&mut self, uid: u64, effects: &mut Vec<UploadEffect>) -> Result<(), WidgetError> {
        let item = self.item_mut(uid)?;
        item.status = UploadStatus::Uploading;
        item.percent = 0.0;
        item.error = None;
        effects.push(UploadEffect::Start(uid));
        Ok(())
    }
}

/// Applies an [`UploadAction`].
///
/// # Errors
///
/// Returns [`WidgetError::UnknownFile`] when an action names a uid absent from the list.
pub fn reduce_upload(
    state: &mut UploadState,
    action: UploadAction,
) -> Result<Vec<UploadEffect>, WidgetError> {
    let mut effects = Vec::new();
    match action {
        UploadAction::AddFiles(files) => {
            if state.config.disabled {
                return Ok(effects);
            }
            let files = if state.config.multiple {
                files
            } else {
                files.into_iter().take(1).collect()
            };
            let mut added = Vec::new();
            for file in files {
                if !state.config.accepts(&file) {
                    effects.push(UploadEffect::Rejected(UploadRejection::NotAccepted {
                        name: file.name,
                        accept: state.config.accept.clone(),
                    }));
                    continue;
                }
                if let Some(max_size) = state.config.max_size.filter(|max| file.size > *max) {
                    effects.push(UploadEffect::Rejected(UploadRejection::TooLarge {
                        name: file.name,
                        max_size,
                    }));
                    continue;
                }
                if let Some(limit) = state.config.limit.filter(|limit| state.items.len() >= *limit) {
                    effects.push(UploadEffect::Rejected(UploadRejection::LimitReached {
                        name: file.name,
                        limit,
                    }));
                    continue;
                }
                let uid = state.next_uid;
                state.next_uid += 1;
                state.items.push(UploadItem {
                    uid,
                    file,
                    status: UploadStatus::Pending,
                    percent: 0.0,
                    error: None,
                });
                added.push(uid);
            }
            if added.is_empty() {
                return Ok(effects);
            }
            log::debug!("upload accepted {} file(s)", added.len());
            if state.config.auto_upload {
                for uid in added {
                    state.start(uid, &mut effects)?;
                }
            }
            effects.push(UploadEffect::Change(state.items.clone()));
        }
        UploadAction::StartPending => {
            let pending: Vec<u64> = state
                .items
                .iter()
                .filter(|item| item.status == UploadStatus::Pending)
                .map(|item| item.uid)
                .collect();
            if pending.is_empty() {
                return Ok(effects);
            }
            for uid in pending {
                state.start(uid, &mut effects)?;
            }
            effects.push(UploadEffect::Change(state.items.clone()));
        }
        UploadAction::Progress { uid, percent } => {
            let item = state.item_mut(uid)?;
            if item.status != UploadStatus::Uploading {
                return Ok(effects);
            }
            item.percent = percent.clamp(0.0, 100.0);
            effects.push(UploadEffect::Change(state.items.clone()));
        }
        UploadAction::Succeeded(uid) => {
            let item = state.item_mut(uid)?;
            item.status = UploadStatus::Done;
            item.percent = 100.0;
            effects.push(UploadEffect::Change(state.items.clone()));
        }
        UploadAction::Failed { uid, message } => {
            let item = state.item_mut(uid)?;
            log::warn!("upload of {} failed: {message}", item.file.name);
            item.status = UploadStatus::Error;
            item.error = Some(message);
            effects.push(UploadEffect::Change(state.items.clone()));
        }
        UploadAction::Remove(uid) => {
            let index = state
                .items
                .iter()
                .position(|item| item.uid == uid)
                .ok_or(WidgetError::UnknownFile(uid))?;
            let removed = state.items.remove(index);
            if removed.status == UploadStatus::Uploading {
                effects.push(UploadEffect::Abort(uid));
            }
            effects.push(UploadEffect::Change(state.items.clone()));
        }
        UploadAction::Retry(uid) => {
            if state.item_mut(uid)?.status != UploadStatus::Error {
                return Ok(effects);
            }
            state.start(uid, &mut effects)?;
            effects.push(UploadEffect::Change(state.items.clone()));
        }
    }
    Ok(effects)
}
