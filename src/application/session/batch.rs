// SPDX-License-Identifier: MPL-2.0
//! Batch crop orchestration.
//!
//! A commit snapshots the catalog paths and the margins, makes a single
//! backend call and folds the per-file results into the session status.

use super::{CropSession, SessionState};
use crate::domain::crop::{summarize, CropSettings, ProcessingStatus};
use tokio::sync::watch;

/// Message left in the session when a commit is dropped mid-flight.
pub const CANCELLED_MESSAGE: &str = "commit was cancelled";

/// What [`CropSession::execute_crop`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The catalog was empty; nothing changed and the backend was not called.
    NothingToCrop,
    /// Another commit was in flight; nothing changed.
    AlreadyRunning,
    /// The commit ran and ended in this status.
    Finished(ProcessingStatus),
}

impl CropSession {
    /// Crops every loaded file with the current margins.
    ///
    /// The status switches to [`ProcessingStatus::Processing`] (progress 0,
    /// previous results and error cleared) before the backend is called.
    /// Paths and margins are captured at that moment; edits made while the
    /// call is in flight only affect the next commit.
    ///
    /// Backend failures never escape: they end the commit in
    /// [`ProcessingStatus::Error`] with a message in
    /// [`SessionState::error_message`](super::SessionState::error_message).
    pub async fn execute_crop(&self) -> CommitOutcome {
        let mut request: Result<(Vec<String>, CropSettings), CommitOutcome> =
            Err(CommitOutcome::NothingToCrop);
        self.inner.state.send_if_modified(|state| {
            if state.catalog.is_empty() {
                return false;
            }
            if state.status.is_processing() {
                request = Err(CommitOutcome::AlreadyRunning);
                return false;
            }
            debug_assert!(state.status.can_transition_to(ProcessingStatus::Processing));
            state.status = ProcessingStatus::Processing;
            state.progress = 0.0;
            state.results.clear();
            state.error_message = None;
            request = Ok((state.catalog.paths(), state.settings));
            true
        });

        let (paths, settings) = match request {
            Ok(request) => request,
            Err(outcome) => {
                log::debug!("Commit skipped: {outcome:?}");
                return outcome;
            }
        };

        let expected = paths.len();
        log::info!("Cropping {expected} files ({settings})");
        let guard = InFlightCommit::new(&self.inner.state);
        let response = self
            .inner
            .gateway
            .batch_crop(paths, settings, self.inner.options.output_dir.clone())
            .await;

        guard.disarm();
        let status = match response {
            Ok(results) => {
                let summary = summarize(&results, expected);
                for failed in results.iter().filter(|result| !result.success) {
                    log::warn!("Crop failed: {}", failed.failure_line());
                }
                self.inner.state.send_modify(|state| {
                    state.results = results;
                    state.progress = 1.0;
                    state.status = summary.status;
                    state.error_message = summary.error_message;
                });
                summary.status
            }
            Err(err) => {
                log::error!("Batch crop failed: {err}");
                self.inner.state.send_modify(|state| {
                    state.status = ProcessingStatus::Error;
                    state.error_message = Some(err.to_string());
                });
                ProcessingStatus::Error
            }
        };

        log::info!("Commit finished: {status}");
        CommitOutcome::Finished(status)
    }
}

/// Ends a `Processing` commit in `Error` if its future is dropped before the
/// backend answers.
struct InFlightCommit<'a> {
    state: &'a watch::Sender<SessionState>,
    armed: bool,
}

impl<'a> InFlightCommit<'a> {
    fn new(state: &'a watch::Sender<SessionState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightCommit<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        log::warn!("Commit dropped before the backend answered");
        self.state.send_modify(|state| {
            state.status = ProcessingStatus::Error;
            state.error_message = Some(CANCELLED_MESSAGE.to_string());
        });
    }
}
