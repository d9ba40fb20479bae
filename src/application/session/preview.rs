// SPDX-License-Identifier: MPL-2.0
//! Debounced preview pipeline.
//!
//! Keeps the rendered preview of the selected file consistent with the
//! current margins without sending one backend request per slider tick.
//!
//! # Design
//!
//! - **Latest request wins**: every trigger bumps a generation counter and
//!   aborts the task started by the previous trigger.
//! - **Debounce**: the new task sleeps for the quiet window before reading
//!   the selection and margins, so a burst of changes renders once.
//! - **Stale rejection**: a response is applied only while its generation is
//!   still current. The check and the write happen under the pipeline lock,
//!   the same lock a new trigger takes to bump the generation.
//!
//! The original-image view uses the same fencing without the quiet window.

use super::{Inner, OriginalImage};
use std::sync::Arc;
use tokio::task::JoinHandle;

// =============================================================================
// TaskFence
// =============================================================================

/// Generation counter plus the handle of the task running for it.
#[derive(Debug, Default)]
pub(super) struct TaskFence {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl TaskFence {
    /// Invalidates the current generation and aborts its task.
    ///
    /// Returns the new generation.
    pub(super) fn supersede(&mut self) -> u64 {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Stores the task started for `generation`.
    ///
    /// A task for an outdated generation is aborted instead.
    pub(super) fn install(&mut self, generation: u64, task: JoinHandle<()>) {
        if self.is_current(generation) {
            self.task = Some(task);
        } else {
            task.abort();
        }
    }

    #[must_use]
    pub(super) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Forgets the handle of a task that has delivered its result.
    pub(super) fn complete(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.task = None;
        }
    }

    #[cfg(test)]
    #[must_use]
    pub(super) fn is_pending(&self) -> bool {
        self.task.is_some()
    }
}

/// Fences for the two display pipelines of a session.
#[derive(Debug, Default)]
pub(super) struct PreviewPipeline {
    pub(super) preview: TaskFence,
    pub(super) original: TaskFence,
    /// Message of the last failed render, while it is shown as the session error.
    preview_error: Option<String>,
}

impl PreviewPipeline {
    /// Cancels all outstanding display work.
    pub(super) fn supersede_all(&mut self) {
        self.preview.supersede();
        self.original.supersede();
    }
}

// =============================================================================
// Preview
// =============================================================================

/// Schedules a preview refresh for the current selection and margins.
///
/// With nothing selected the preview is cleared right away.
pub(super) fn refresh_preview(inner: &Arc<Inner>) {
    let mut pipeline = inner.lock_pipeline();
    let generation = pipeline.preview.supersede();

    let has_selection = inner.state.borrow().catalog.selected_entry().is_some();
    if !has_selection {
        inner
            .state
            .send_if_modified(|state| state.preview.take().is_some());
        return;
    }

    let task = tokio::spawn(render_after_quiet_window(Arc::clone(inner), generation));
    pipeline.preview.install(generation, task);
}

async fn render_after_quiet_window(inner: Arc<Inner>, generation: u64) {
    tokio::time::sleep(inner.options.debounce).await;

    let request = {
        let state = inner.state.borrow();
        state
            .catalog
            .selected_entry()
            .map(|entry| (entry.path.clone(), state.settings))
    };
    let Some((path, settings)) = request else {
        return;
    };

    log::debug!("Rendering preview of {path} ({settings})");
    let result = inner
        .gateway
        .render_preview(path.clone(), settings, inner.options.preview_max_size)
        .await;

    let mut pipeline = inner.lock_pipeline();
    if !pipeline.preview.is_current(generation) {
        log::debug!("Discarding stale preview of {path}");
        return;
    }
    pipeline.preview.complete(generation);

    let stale_error = pipeline.preview_error.take();
    inner.state.send_modify(|state| match result {
        Ok(image) => {
            state.preview = Some(image);
            if stale_error.is_some() && state.error_message == stale_error {
                state.error_message = None;
            }
        }
        Err(err) => {
            log::warn!("Failed to render preview of {path}: {err}");
            let message = err.to_string();
            state.preview = None;
            state.error_message = Some(message.clone());
            pipeline.preview_error = Some(message);
        }
    });
}

// =============================================================================
// Original image
// =============================================================================

/// Releases the current original image and loads the selected file's bytes.
pub(super) fn refresh_original(inner: &Arc<Inner>) {
    let mut pipeline = inner.lock_pipeline();
    let generation = pipeline.original.supersede();

    let path = inner
        .state
        .borrow()
        .catalog
        .selected_entry()
        .map(|entry| entry.path.clone());
    inner
        .state
        .send_if_modified(|state| state.original.take().is_some());

    let Some(path) = path else {
        return;
    };

    let task = tokio::spawn(load_original(Arc::clone(inner), generation, path));
    pipeline.original.install(generation, task);
}

async fn load_original(inner: Arc<Inner>, generation: u64, path: String) {
    let result = inner.originals.read_original(path.clone()).await;

    let mut pipeline = inner.lock_pipeline();
    if !pipeline.original.is_current(generation) {
        return;
    }
    pipeline.original.complete(generation);

    match result {
        Ok(bytes) => inner.state.send_modify(|state| {
            state.original = Some(OriginalImage::new(path, bytes));
        }),
        Err(err) => log::warn!("Failed to read original image {path}: {err}"),
    }
}
