// SPDX-License-Identifier: MPL-2.0
//! Crop margin model.
//!
//! A single [`CropSettings`] value is shared by every loaded file: the same
//! number of pixels is removed from each edge of every image on commit.

use crate::domain::image::ImageInfo;
use std::fmt;

// =============================================================================
// CropSettings
// =============================================================================

/// Pixel margins removed from each edge of an image.
///
/// # Example
///
/// ```
/// use cropdeck::domain::crop::CropSettings;
///
/// let settings = CropSettings::new(22, 58, 160, 160);
/// assert_eq!(settings.horizontal(), 320);
/// assert_eq!(settings.vertical(), 80);
/// assert!(settings.validate(1280, 720).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CropSettings {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl CropSettings {
    /// Creates margins in `top, bottom, left, right` order.
    #[must_use]
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Total horizontal margin (`left + right`), saturating.
    #[must_use]
    pub fn horizontal(self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Total vertical margin (`top + bottom`), saturating.
    #[must_use]
    pub fn vertical(self) -> u32 {
        self.top.saturating_add(self.bottom)
    }

    /// Checks that at least one pixel survives on each axis.
    ///
    /// # Errors
    ///
    /// Returns a [`CropBoundsError`] naming the first axis whose margins
    /// consume the whole image.
    pub fn validate(self, width: u32, height: u32) -> Result<(), CropBoundsError> {
        let horizontal = u64::from(self.left) + u64::from(self.right);
        if horizontal >= u64::from(width) {
            return Err(CropBoundsError::Horizontal {
                margin: horizontal,
                width,
            });
        }
        let vertical = u64::from(self.top) + u64::from(self.bottom);
        if vertical >= u64::from(height) {
            return Err(CropBoundsError::Vertical {
                margin: vertical,
                height,
            });
        }
        Ok(())
    }

    /// Size of the image left after removing the margins, floored at zero.
    #[must_use]
    pub fn cropped_size(self, info: &ImageInfo) -> CroppedSize {
        CroppedSize {
            width: info.width.saturating_sub(self.horizontal()),
            height: info.height.saturating_sub(self.vertical()),
        }
    }
}

impl fmt::Display for CropSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top {} / bottom {} / left {} / right {}",
            self.top, self.bottom, self.left, self.right
        )
    }
}

/// Output dimensions derived from an [`ImageInfo`] and the current margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CroppedSize {
    pub width: u32,
    pub height: u32,
}

impl CroppedSize {
    /// Returns `true` if either side collapsed to zero.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// =============================================================================
// CropBoundsError
// =============================================================================

/// Margins that leave nothing of the image on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropBoundsError {
    /// `left + right` is not smaller than the image width.
    Horizontal {
        /// Sum of the left and right margins.
        margin: u64,
        /// Image width.
        width: u32,
    },
    /// `top + bottom` is not smaller than the image height.
    Vertical {
        /// Sum of the top and bottom margins.
        margin: u64,
        /// Image height.
        height: u32,
    },
}

impl fmt::Display for CropBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropBoundsError::Horizontal { margin, width } => write!(
                f,
                "left + right margin ({margin}) must be smaller than image width ({width})"
            ),
            CropBoundsError::Vertical { margin, height } => write!(
                f,
                "top + bottom margin ({margin}) must be smaller than image height ({height})"
            ),
        }
    }
}

impl std::error::Error for CropBoundsError {}
