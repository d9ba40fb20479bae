// SPDX-License-Identifier: MPL-2.0
//! Batch crop outcomes.
//!
//! The backend reports one [`CropResult`] per input path. [`summarize`]
//! folds them into the final [`ProcessingStatus`] and the error report shown
//! to the user.

use std::fmt;

/// Outcome of cropping a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropResult {
    /// Path that was passed to the backend.
    pub input_path: String,
    /// Path the cropped image was (or would have been) written to.
    pub output_path: String,
    /// Whether the crop was written.
    pub success: bool,
    /// Backend error text for failed crops.
    pub error: Option<String>,
}

impl CropResult {
    /// Creates a successful result.
    #[must_use]
    pub fn succeeded(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            success: true,
            error: None,
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn failed(
        input_path: impl Into<String>,
        output_path: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            success: false,
            error: Some(error.into()),
        }
    }

    /// One line of the commit error report: `"<input_path>: <error>"`.
    #[must_use]
    pub fn failure_line(&self) -> String {
        format!(
            "{}: {}",
            self.input_path,
            self.error.as_deref().unwrap_or("unknown error")
        )
    }
}

// =============================================================================
// ProcessingStatus
// =============================================================================

/// Commit status machine.
///
/// ```text
/// Idle ──▶ Processing ──▶ Done
///              ▲  │
///              │  └─────▶ Error
///              └── Done / Error
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Processing,
    Done,
    Error,
}

impl ProcessingStatus {
    /// Returns `true` while a commit is in flight.
    #[must_use]
    pub fn is_processing(self) -> bool {
        self == ProcessingStatus::Processing
    }

    /// Returns `true` if `self → next` is an allowed transition.
    #[must_use]
    pub fn can_transition_to(self, next: ProcessingStatus) -> bool {
        use ProcessingStatus::{Done, Error, Idle, Processing};
        matches!(
            (self, next),
            (Idle | Done | Error, Processing) | (Processing, Done | Error)
        )
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProcessingStatus::Idle => "idle",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Done => "done",
            ProcessingStatus::Error => "error",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Final status and error report of a completed batch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub status: ProcessingStatus,
    pub error_message: Option<String>,
}

/// Folds the backend results of one commit into its final status.
///
/// `expected` is the number of paths sent to the backend. A result list of
/// another length cannot be correlated with the inputs and is reported as an
/// error. Otherwise the status is [`ProcessingStatus::Done`] when every crop
/// succeeded, and [`ProcessingStatus::Error`] with one line per failed file
/// (in input order) when any did not.
#[must_use]
pub fn summarize(results: &[CropResult], expected: usize) -> BatchSummary {
    if results.len() != expected {
        return BatchSummary {
            status: ProcessingStatus::Error,
            error_message: Some(format!(
                "backend returned {} results for {expected} files",
                results.len()
            )),
        };
    }

    let failures: Vec<String> = results
        .iter()
        .filter(|result| !result.success)
        .map(CropResult::failure_line)
        .collect();

    if failures.is_empty() {
        BatchSummary {
            status: ProcessingStatus::Done,
            error_message: None,
        }
    } else {
        BatchSummary {
            status: ProcessingStatus::Error,
            error_message: Some(failures.join("\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_successes_are_done() {
        let results = vec![
            CropResult::succeeded("/a.png", "/a_cropped.png"),
            CropResult::succeeded("/b.png", "/b_cropped.png"),
        ];
        let summary = summarize(&results, 2);
        assert_eq!(summary.status, ProcessingStatus::Done);
        assert_eq!(summary.error_message, None);
    }

    #[test]
    fn failures_are_reported_in_input_order() {
        let results = vec![
            CropResult::failed("/a.png", "/a_cropped.png", "bad format"),
            CropResult::succeeded("/b.png", "/b_cropped.png"),
            CropResult::failed("/c.png", "/c_cropped.png", "too small"),
        ];
        let summary = summarize(&results, 3);
        assert_eq!(summary.status, ProcessingStatus::Error);
        assert_eq!(
            summary.error_message.as_deref(),
            Some("/a.png: bad format\n/c.png: too small")
        );
    }

    #[test]
    fn failure_without_text_is_labelled() {
        let mut result = CropResult::failed("/a.png", "/a_cropped.png", "x");
        result.error = None;
        assert_eq!(result.failure_line(), "/a.png: unknown error");
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let results = vec![CropResult::succeeded("/a.png", "/a_cropped.png")];
        let summary = summarize(&results, 2);
        assert_eq!(summary.status, ProcessingStatus::Error);
        assert!(summary
            .error_message
            .as_deref()
            .is_some_and(|message| message.contains("1 results for 2 files")));
    }

    #[test]
    fn status_transitions() {
        use ProcessingStatus::*;
        assert!(Idle.can_transition_to(Processing));
        assert!(Done.can_transition_to(Processing));
        assert!(Error.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Done));
        assert!(Processing.can_transition_to(Error));

        assert!(!Idle.can_transition_to(Done));
        assert!(!Idle.can_transition_to(Error));
        assert!(!Processing.can_transition_to(Processing));
        assert!(!Done.can_transition_to(Idle));
        assert!(!Error.can_transition_to(Done));
    }

    #[test]
    fn status_display_is_lowercase() {
        assert_eq!(ProcessingStatus::Processing.to_string(), "processing");
        assert_eq!(ProcessingStatus::default().to_string(), "idle");
    }
}
