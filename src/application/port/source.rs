// SPDX-License-Identifier: MPL-2.0
//! Original-image source port.
//!
//! The original-image view shows the untouched file next to the cropped
//! preview. Reading those bytes is file-system access, kept behind
//! [`OriginalSource`] so the session stays testable.

use super::backend::BackendFuture;

/// Port for reading the raw bytes of a source file.
pub trait OriginalSource: Send + Sync {
    /// Reads the whole file at `path`.
    fn read_original(&self, path: String) -> BackendFuture<Vec<u8>>;
}
