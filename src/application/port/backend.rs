// SPDX-License-Identifier: MPL-2.0
//! Image-processing backend port.
//!
//! This module defines the [`BackendGateway`] trait, the only way the
//! session reaches the code that decodes, crops and encodes pixels.
//! Infrastructure adapters implement it; tests substitute a recording mock.

use crate::domain::crop::{CropBoundsError, CropResult, CropSettings};
use crate::domain::image::{EncodedImage, ImageInfo};
use futures_util::future::BoxFuture;
use std::path::PathBuf;

// =============================================================================
// BackendError
// =============================================================================

/// Errors reported by backend calls.
///
/// The display string of a `BackendError` is what the user eventually sees
/// in the session's error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The file could not be read.
    #[error("failed to read image: {0}")]
    Io(String),

    /// The file could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The cropped image could not be encoded or written.
    #[error("failed to encode image: {0}")]
    Encode(String),

    /// The margins do not fit the image.
    #[error("{0}")]
    InvalidCrop(#[from] CropBoundsError),

    /// The file extension does not map to a supported format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The backend task itself failed (worker panic, process gone, ...).
    #[error("backend task failed: {0}")]
    Task(String),
}

/// Future returned by every backend call.
pub type BackendFuture<T> = BoxFuture<'static, Result<T, BackendError>>;

// =============================================================================
// BackendGateway Trait
// =============================================================================

/// Port for the three image-processing operations.
///
/// Calls are opaque, potentially slow and potentially failing. Each returns
/// an owned, `'static` future so callers can spawn it on the runtime.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the session shares one gateway
/// between its preview tasks and the commit path.
///
/// # Example
///
/// ```ignore
/// use cropdeck::application::port::BackendGateway;
/// use cropdeck::domain::crop::CropSettings;
///
/// async fn show(gateway: &dyn BackendGateway) {
///     match gateway.describe_image("/shots/001.png".into()).await {
///         Ok(info) => println!("{}x{}", info.width, info.height),
///         Err(e) => eprintln!("Failed to describe: {e}"),
///     }
/// }
/// ```
pub trait BackendGateway: Send + Sync {
    /// Reports the intrinsic dimensions and format of a file.
    fn describe_image(&self, path: String) -> BackendFuture<ImageInfo>;

    /// Renders `path` cropped by `settings`, downsized so that neither side
    /// exceeds `max_size` (backend default when `None`).
    fn render_preview(
        &self,
        path: String,
        settings: CropSettings,
        max_size: Option<u32>,
    ) -> BackendFuture<EncodedImage>;

    /// Crops every path with the same settings.
    ///
    /// Returns one [`CropResult`] per path, in input order. Individual file
    /// failures are reported inside the results; an `Err` means the call as a
    /// whole did not complete.
    fn batch_crop(
        &self,
        paths: Vec<String>,
        settings: CropSettings,
        output_dir: Option<PathBuf>,
    ) -> BackendFuture<Vec<CropResult>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_display() {
        let err = BackendError::Decode("bad header".to_string());
        assert_eq!(err.to_string(), "failed to decode image: bad header");

        let err = BackendError::UnsupportedFormat("xcf".to_string());
        assert!(err.to_string().contains("xcf"));

        let err = BackendError::Task("worker panicked".to_string());
        assert!(err.to_string().starts_with("backend task failed"));
    }

    #[test]
    fn crop_bounds_error_converts_transparently() {
        let bounds = CropSettings::new(50, 50, 0, 0)
            .validate(100, 80)
            .unwrap_err();
        let err: BackendError = bounds.into();
        assert_eq!(err.to_string(), bounds.to_string());
    }
}
