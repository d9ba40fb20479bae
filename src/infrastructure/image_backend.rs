// SPDX-License-Identifier: MPL-2.0
//! Local image backend implementing the [`BackendGateway`] port trait.
//!
//! [`LocalImageBackend`] decodes, crops and encodes with the `image` crate on
//! the blocking thread pool. The synchronous building blocks are public so
//! that tools and benches can call them without a runtime.
//!
//! # Output Naming
//!
//! A cropped file is written as `<stem>_cropped.<ext>`, either in the
//! configured output directory or next to its input. The encoder is chosen
//! from that extension.
//!
//! [`BackendGateway`]: crate::application::port::BackendGateway

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use futures_util::FutureExt;
use image_rs::imageops::FilterType;
use image_rs::{DynamicImage, GenericImageView, ImageError, ImageFormat, ImageReader};

use crate::application::port::{BackendError, BackendFuture, BackendGateway};
use crate::domain::crop::{CropResult, CropSettings};
use crate::domain::image::{EncodedImage, ImageInfo};

/// Longest preview side used when the caller does not pass one.
pub const DEFAULT_MAX_PREVIEW_SIZE: u32 = 600;

/// Suffix appended to the file stem of cropped outputs.
pub const OUTPUT_SUFFIX: &str = "_cropped";

/// [`BackendGateway`] backed by the local file system.
///
/// The backend holds no state; each request opens its input afresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalImageBackend;

impl LocalImageBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Runs blocking image work off the async runtime.
fn run_blocking<T, F>(work: F) -> BackendFuture<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, BackendError> + Send + 'static,
{
    async move {
        tokio::task::spawn_blocking(work)
            .await
            .map_err(|err| BackendError::Task(err.to_string()))?
    }
    .boxed()
}

impl BackendGateway for LocalImageBackend {
    fn describe_image(&self, path: String) -> BackendFuture<ImageInfo> {
        run_blocking(move || describe(Path::new(&path)))
    }

    fn render_preview(
        &self,
        path: String,
        settings: CropSettings,
        max_size: Option<u32>,
    ) -> BackendFuture<EncodedImage> {
        run_blocking(move || render_preview(Path::new(&path), settings, max_size))
    }

    fn batch_crop(
        &self,
        paths: Vec<String>,
        settings: CropSettings,
        output_dir: Option<PathBuf>,
    ) -> BackendFuture<Vec<CropResult>> {
        run_blocking(move || Ok(crop_all(&paths, settings, output_dir.as_deref())))
    }
}

// =============================================================================
// Synchronous operations
// =============================================================================

/// Reads the dimensions and format of an image without decoding its pixels.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its header is unreadable.
pub fn describe(path: &Path) -> Result<ImageInfo, BackendError> {
    let reader = ImageReader::open(path)
        .map_err(|err| BackendError::Io(format!("{}: {err}", path.display())))?
        .with_guessed_format()
        .map_err(|err| BackendError::Io(format!("{}: {err}", path.display())))?;

    let format = reader.format().map_or("unknown", format_name);
    let (width, height) = reader.into_dimensions().map_err(map_decode_error)?;
    Ok(ImageInfo::new(width, height, format))
}

/// Crops an image and encodes it as PNG, downsized so that neither side
/// exceeds `max_size` (default [`DEFAULT_MAX_PREVIEW_SIZE`]).
///
/// # Errors
///
/// Returns an error if the image cannot be decoded, the margins do not fit
/// inside it, or PNG encoding fails.
pub fn render_preview(
    path: &Path,
    settings: CropSettings,
    max_size: Option<u32>,
) -> Result<EncodedImage, BackendError> {
    let image = open(path)?;
    let cropped = crop(&image, settings)?;
    let preview = fit_within(cropped, max_size.unwrap_or(DEFAULT_MAX_PREVIEW_SIZE));

    let mut buffer = Cursor::new(Vec::new());
    preview
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|err| BackendError::Encode(err.to_string()))?;
    Ok(EncodedImage::new("png", buffer.into_inner()))
}

/// Crops `input` and writes the result to `output`.
///
/// Missing parent directories of `output` are created.
///
/// # Errors
///
/// Returns an error if the output extension has no encoder, the input cannot
/// be decoded, the margins do not fit, or writing fails.
pub fn crop_to_file(input: &Path, output: &Path, settings: CropSettings) -> Result<(), BackendError> {
    let format = output_format(output)?;
    let image = open(input)?;
    let cropped = crop(&image, settings)?;

    if let Some(parent) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| BackendError::Io(format!("{}: {err}", parent.display())))?;
    }

    // JPEG has no alpha channel; the other encoders only take 8-bit RGB(A).
    let encodable = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(cropped.to_rgb8()),
        ImageFormat::Png | ImageFormat::Tiff => cropped,
        _ => DynamicImage::ImageRgba8(cropped.to_rgba8()),
    };
    encodable
        .save_with_format(output, format)
        .map_err(map_encode_error)
}

/// Crops every input, in order, with the same margins.
///
/// One [`CropResult`] is returned per input; a failing file never stops the
/// others.
#[must_use]
pub fn crop_all(inputs: &[String], settings: CropSettings, output_dir: Option<&Path>) -> Vec<CropResult> {
    inputs
        .iter()
        .map(|input| {
            let output = output_path_for(Path::new(input), output_dir);
            let output_str = output.to_string_lossy().into_owned();
            match crop_to_file(Path::new(input), &output, settings) {
                Ok(()) => CropResult::succeeded(input.clone(), output_str),
                Err(err) => CropResult::failed(input.clone(), output_str, err.to_string()),
            }
        })
        .collect()
}

/// Builds the output path `<stem>_cropped.<ext>` for `input`.
///
/// Without an output directory the file lands next to its input.
#[must_use]
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}{OUTPUT_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{OUTPUT_SUFFIX}"),
    };

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(file_name),
    }
}

/// Lowercase name reported for a detected format.
#[must_use]
pub fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::WebP => "webp",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Gif => "gif",
        ImageFormat::Tiff => "tiff",
        _ => "unknown",
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn open(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(|err| BackendError::Io(format!("{}: {err}", path.display())))?
        .with_guessed_format()
        .map_err(|err| BackendError::Io(format!("{}: {err}", path.display())))?
        .decode()
        .map_err(map_decode_error)
}

fn crop(image: &DynamicImage, settings: CropSettings) -> Result<DynamicImage, BackendError> {
    let (width, height) = image.dimensions();
    settings.validate(width, height)?;
    Ok(image.crop_imm(
        settings.left,
        settings.top,
        width - settings.horizontal(),
        height - settings.vertical(),
    ))
}

/// Downsizes `image` (aspect ratio kept) so that neither side exceeds `max_size`.
fn fit_within(image: DynamicImage, max_size: u32) -> DynamicImage {
    let max_size = max_size.max(1);
    let (width, height) = image.dimensions();
    if width <= max_size && height <= max_size {
        return image;
    }
    image.resize(max_size, max_size, FilterType::Lanczos3)
}

fn output_format(output: &Path) -> Result<ImageFormat, BackendError> {
    let ext = output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "png" => Ok(ImageFormat::Png),
        "webp" => Ok(ImageFormat::WebP),
        "bmp" => Ok(ImageFormat::Bmp),
        "gif" => Ok(ImageFormat::Gif),
        "tif" | "tiff" => Ok(ImageFormat::Tiff),
        _ => Err(BackendError::UnsupportedFormat(if ext.is_empty() {
            "no file extension".to_string()
        } else {
            ext
        })),
    }
}

fn map_decode_error(err: ImageError) -> BackendError {
    match err {
        ImageError::IoError(err) => BackendError::Io(err.to_string()),
        ImageError::Unsupported(err) => BackendError::UnsupportedFormat(err.to_string()),
        other => BackendError::Decode(other.to_string()),
    }
}

fn map_encode_error(err: ImageError) -> BackendError {
    match err {
        ImageError::IoError(err) => BackendError::Io(err.to_string()),
        ImageError::Unsupported(err) => BackendError::UnsupportedFormat(err.to_string()),
        other => BackendError::Encode(other.to_string()),
    }
}
