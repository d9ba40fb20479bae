// SPDX-License-Identifier: MPL-2.0
//! Crop session - the orchestration state machine.
//!
//! A [`CropSession`] owns everything a front end displays: the loaded files
//! and selection, the shared margins, the rendered preview, the original
//! image of the selected file and the commit status. Front ends call the
//! operations below and observe [`SessionState`] through [`CropSession::subscribe`];
//! they never mutate the state directly.
//!
//! # Operations
//!
//! | Operation | Effect |
//! |---|---|
//! | [`add_files`](CropSession::add_files) | concurrent describe + thumbnail per path, one atomic append |
//! | [`remove_file`](CropSession::remove_file) | remove by index, selection repaired |
//! | [`clear_files`](CropSession::clear_files) | empty catalog, preview and original image |
//! | [`select_file`](CropSession::select_file) | move the selection |
//! | [`set_settings`](CropSession::set_settings) / [`apply_preset`](CropSession::apply_preset) | replace the margins |
//! | [`execute_crop`](CropSession::execute_crop) | commit the margins to every file |
//!
//! Selection and margin changes refresh the preview through the debounced
//! pipeline in [`preview`].
//!
//! # Runtime
//!
//! Operations that trigger preview work spawn tokio tasks, so the session
//! must be driven from inside a tokio runtime.

mod batch;
mod preview;

#[cfg(test)]
mod testing;

pub use batch::{CommitOutcome, CANCELLED_MESSAGE};

use crate::application::port::{BackendGateway, OriginalSource};
use crate::domain::catalog::{Catalog, CatalogError, FileEntry};
use crate::domain::crop::{CropPreset, CropResult, CropSettings, CroppedSize, ProcessingStatus};
use crate::domain::image::EncodedImage;
use futures_util::future::{join, join_all};
use preview::PreviewPipeline;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

/// Default quiet window before a preview is rendered.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default longest side of a rendered preview.
pub const DEFAULT_PREVIEW_MAX_SIZE: u32 = 600;

/// Default longest side of a catalog thumbnail.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 80;

// =============================================================================
// SessionError
// =============================================================================

/// Caller errors rejected by session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The index does not address a loaded file; nothing was changed.
    #[error("file index {index} is out of range ({len} files loaded)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<CatalogError> for SessionError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::IndexOutOfRange { index, len } => {
                SessionError::IndexOutOfRange { index, len }
            }
        }
    }
}

// =============================================================================
// SessionOptions
// =============================================================================

/// Tuning knobs for a session, usually built from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Quiet window before a preview refresh is sent to the backend.
    pub debounce: Duration,
    /// Longest side of rendered previews (`None` lets the backend decide).
    pub preview_max_size: Option<u32>,
    /// Longest side of catalog thumbnails.
    pub thumbnail_size: u32,
    /// Directory for cropped files (`None` writes next to each input).
    pub output_dir: Option<PathBuf>,
    /// Renders thumbnails and previews and loads original images.
    ///
    /// Headless front ends that only commit turn this off; the catalog then
    /// holds metadata only and the display fields stay `None`.
    pub display: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            preview_max_size: Some(DEFAULT_PREVIEW_MAX_SIZE),
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            output_dir: None,
            display: true,
        }
    }
}

// =============================================================================
// SessionState
// =============================================================================

/// Raw bytes of the selected file, backing the original-image view.
///
/// The buffer is released when the last clone is dropped. The session drops
/// its own handle as soon as the selection moves, the catalog is cleared or
/// the read fails.
#[derive(Clone, PartialEq, Eq)]
pub struct OriginalImage {
    path: String,
    bytes: Arc<[u8]>,
}

impl OriginalImage {
    fn new(path: String, bytes: Vec<u8>) -> Self {
        Self {
            path,
            bytes: bytes.into(),
        }
    }

    /// Path the bytes were read from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for OriginalImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OriginalImage")
            .field("path", &self.path)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything a front end observes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Loaded files and the selection cursor.
    pub catalog: Catalog,
    /// Margins shared by every file.
    pub settings: CropSettings,
    /// Commit status.
    pub status: ProcessingStatus,
    /// Commit progress in `0.0..=1.0`.
    pub progress: f32,
    /// Per-file results of the last completed commit.
    pub results: Vec<CropResult>,
    /// Cropped rendering of the selected file.
    pub preview: Option<EncodedImage>,
    /// Untouched bytes of the selected file.
    pub original: Option<OriginalImage>,
    /// Last user-visible failure (commit report or preview error).
    pub error_message: Option<String>,
}

impl SessionState {
    /// Loaded files in order.
    #[must_use]
    pub fn files(&self) -> &[FileEntry] {
        self.catalog.entries()
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.catalog.selected_index()
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.catalog.selected_entry()
    }

    /// Output size of the selected file under the current margins.
    ///
    /// `None` when nothing is selected or its metadata is unknown.
    #[must_use]
    pub fn cropped_size(&self) -> Option<CroppedSize> {
        let info = self.selected_entry()?.info.as_ref()?;
        Some(self.settings.cropped_size(info))
    }
}

// =============================================================================
// CropSession
// =============================================================================

struct Inner {
    gateway: Arc<dyn BackendGateway>,
    originals: Arc<dyn OriginalSource>,
    options: SessionOptions,
    state: watch::Sender<SessionState>,
    pipeline: Mutex<PreviewPipeline>,
}

impl Inner {
    // Lock order: pipeline first, then state.
    fn lock_pipeline(&self) -> MutexGuard<'_, PreviewPipeline> {
        self.pipeline.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to one crop session.
///
/// Cloning the handle shares the session.
#[derive(Clone)]
pub struct CropSession {
    inner: Arc<Inner>,
}

impl CropSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn BackendGateway>,
        originals: Arc<dyn OriginalSource>,
        options: SessionOptions,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(Inner {
                gateway,
                originals,
                options,
                state,
                pipeline: Mutex::new(PreviewPipeline::default()),
            }),
        }
    }

    /// Options this session was created with.
    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.inner.options
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Returns a receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Loads `paths` and appends them to the catalog.
    ///
    /// Metadata and thumbnails are fetched concurrently for every path and
    /// independently for each field. A failed fetch leaves that field empty
    /// but never drops the entry. Entries become visible together, in input
    /// order, once every fetch has settled.
    pub async fn add_files<I, P>(&self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return;
        }

        let gateway = self.inner.gateway.as_ref();
        let thumbnail_size = self
            .inner
            .options
            .display
            .then_some(self.inner.options.thumbnail_size);
        let entries = join_all(
            paths
                .into_iter()
                .map(|path| load_entry(gateway, path, thumbnail_size)),
        )
        .await;

        let added = entries.len();
        let mut selection_changed = false;
        self.inner.state.send_modify(|state| {
            selection_changed = state.catalog.append(entries);
        });
        log::info!("Added {added} files to the catalog");

        if selection_changed {
            self.on_selection_changed();
        }
    }

    /// Removes the file at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IndexOutOfRange`] and leaves the session
    /// untouched if `index` does not address a loaded file.
    pub fn remove_file(&self, index: usize) -> Result<(), SessionError> {
        let mut outcome = Err(SessionError::IndexOutOfRange { index, len: 0 });
        self.inner.state.send_if_modified(|state| {
            outcome = state
                .catalog
                .remove(index)
                .map_err(SessionError::from);
            outcome.is_ok()
        });

        let removal = outcome?;
        log::debug!("Removed {} from the catalog", removal.entry.path);
        if removal.selection_changed {
            self.on_selection_changed();
        }
        Ok(())
    }

    /// Empties the catalog and drops the preview and original image.
    ///
    /// Pending preview and original-image work is cancelled; a late response
    /// is discarded.
    pub fn clear_files(&self) {
        let mut pipeline = self.inner.lock_pipeline();
        pipeline.supersede_all();
        self.inner.state.send_modify(|state| {
            state.catalog.clear();
            state.preview = None;
            state.original = None;
        });
        log::debug!("Catalog cleared");
    }

    /// Selects the file at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IndexOutOfRange`] and keeps the current
    /// selection if `index` does not address a loaded file.
    pub fn select_file(&self, index: usize) -> Result<(), SessionError> {
        let mut outcome = Ok(false);
        self.inner.state.send_if_modified(|state| {
            outcome = state.catalog.select(index).map_err(SessionError::from);
            matches!(outcome, Ok(true))
        });

        if outcome? {
            self.on_selection_changed();
        }
        Ok(())
    }

    /// Replaces the margins.
    ///
    /// A different value schedules a debounced preview refresh. The value is
    /// read by [`execute_crop`](Self::execute_crop) only when a commit starts.
    pub fn set_settings(&self, settings: CropSettings) {
        let changed = self.inner.state.send_if_modified(|state| {
            if state.settings == settings {
                return false;
            }
            state.settings = settings;
            true
        });

        if changed && self.inner.options.display {
            preview::refresh_preview(&self.inner);
        }
    }

    /// Replaces all four margins with the preset's.
    pub fn apply_preset(&self, preset: &CropPreset) {
        log::debug!("Applying preset {}", preset.label);
        self.set_settings(preset.settings);
    }

    fn on_selection_changed(&self) {
        if !self.inner.options.display {
            return;
        }
        preview::refresh_preview(&self.inner);
        preview::refresh_original(&self.inner);
    }
}

impl fmt::Debug for CropSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropSession")
            .field("options", &self.inner.options)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Fetches metadata and, unless `thumbnail_size` is `None`, a thumbnail for one path.
async fn load_entry(
    gateway: &dyn BackendGateway,
    path: String,
    thumbnail_size: Option<u32>,
) -> FileEntry {
    let thumbnail = async {
        match thumbnail_size {
            Some(size) => Some(
                gateway
                    .render_preview(path.clone(), CropSettings::default(), Some(size))
                    .await,
            ),
            None => None,
        }
    };
    let (info, thumbnail) = join(gateway.describe_image(path.clone()), thumbnail).await;

    let info = info
        .map_err(|err| log::warn!("Failed to describe {path}: {err}"))
        .ok();
    let thumbnail = thumbnail.and_then(|thumbnail| {
        thumbnail
            .map_err(|err| log::warn!("Failed to render thumbnail for {path}: {err}"))
            .ok()
    });

    FileEntry::new(path).with_info(info).with_thumbnail(thumbnail)
}
