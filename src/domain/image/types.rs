// SPDX-License-Identifier: MPL-2.0
//! Core image types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.

use std::fmt;
use std::sync::Arc;

/// Intrinsic dimensions and format of a source file, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Lowercase format name (e.g. `png`, `jpeg`, `unknown`).
    pub format: String,
}

impl ImageInfo {
    /// Creates a new `ImageInfo`.
    #[must_use]
    pub fn new(width: u32, height: u32, format: impl Into<String>) -> Self {
        Self {
            width,
            height,
            format: format.into(),
        }
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.format)
    }
}

/// Encoded image bytes suitable for display (thumbnails and previews).
///
/// The container format is decided by the backend; the local backend emits PNG.
/// Bytes are shared, so cloning an `EncodedImage` never copies the payload.
///
/// # Example
///
/// ```
/// use cropdeck::domain::image::EncodedImage;
///
/// let image = EncodedImage::new("png", vec![0x89, b'P', b'N', b'G']);
/// assert_eq!(image.format(), "png");
/// assert_eq!(image.len(), 4);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    format: String,
    bytes: Arc<[u8]>,
}

impl EncodedImage {
    /// Creates a new `EncodedImage` from a format tag and its encoded bytes.
    #[must_use]
    pub fn new(format: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            format: format.into(),
            bytes: bytes.into(),
        }
    }

    /// Returns the container format tag.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the encoded bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Payloads can be megabytes; keep debug output readable.
impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Derives the display name of a path.
///
/// Returns the part after the last `/` or `\`, whichever comes later,
/// or the whole path when it contains neither separator.
#[must_use]
pub fn display_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_handles_both_separator_conventions() {
        assert_eq!(display_name("/path/to/image.png"), "image.png");
        assert_eq!(display_name(r"C:\shots\gba.png"), "gba.png");
        assert_eq!(display_name(r"C:\mixed/dir\last.jpg"), "last.jpg");
        assert_eq!(display_name("bare.bmp"), "bare.bmp");
    }

    #[test]
    fn display_name_of_trailing_separator_is_empty() {
        assert_eq!(display_name("/dir/"), "");
    }

    #[test]
    fn encoded_image_clone_shares_payload() {
        let image = EncodedImage::new("png", vec![1u8, 2, 3]);
        let copy = image.clone();
        assert_eq!(image, copy);
        assert!(std::ptr::eq(image.bytes().as_ptr(), copy.bytes().as_ptr()));
    }

    #[test]
    fn encoded_image_debug_omits_payload() {
        let image = EncodedImage::new("png", vec![0u8; 1024]);
        let debug = format!("{image:?}");
        assert!(debug.contains("len: 1024"));
        assert!(!debug.contains("0, 0, 0"));
    }

    #[test]
    fn image_info_display() {
        assert_eq!(ImageInfo::new(1280, 720, "png").to_string(), "1280x720 png");
    }
}
