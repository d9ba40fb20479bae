// SPDX-License-Identifier: MPL-2.0
//! A single loaded file.

use crate::domain::image::{display_name, EncodedImage, ImageInfo};

/// One loaded image file.
///
/// `info` and `thumbnail` are fetched independently when the file is added;
/// either may be absent without invalidating the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path as given by the user, passed to the backend unchanged.
    pub path: String,
    /// Name shown in lists, derived from `path`.
    pub name: String,
    /// Backend-reported dimensions and format, `None` if describing failed.
    pub info: Option<ImageInfo>,
    /// Small encoded rendering, `None` if thumbnail generation failed.
    pub thumbnail: Option<EncodedImage>,
}

impl FileEntry {
    /// Creates an entry with no metadata yet.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = display_name(&path).to_string();
        Self {
            path,
            name,
            info: None,
            thumbnail: None,
        }
    }

    /// Sets the fetched metadata.
    #[must_use]
    pub fn with_info(mut self, info: Option<ImageInfo>) -> Self {
        self.info = info;
        self
    }

    /// Sets the fetched thumbnail.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: Option<EncodedImage>) -> Self {
        self.thumbnail = thumbnail;
        self
    }
}
