// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Preview**: Debounce window and rendering sizes

use crate::application::session::{DEFAULT_DEBOUNCE, DEFAULT_PREVIEW_MAX_SIZE, DEFAULT_THUMBNAIL_SIZE};

// ==========================================================================
// Preview Defaults
// ==========================================================================

/// Default quiet window before a preview is rendered (in milliseconds).
#[allow(clippy::cast_possible_truncation)]
pub const DEFAULT_DEBOUNCE_MS: u64 = DEFAULT_DEBOUNCE.as_millis() as u64;

/// Minimum debounce window (in milliseconds).
pub const MIN_DEBOUNCE_MS: u64 = 0;

/// Maximum debounce window (in milliseconds).
pub const MAX_DEBOUNCE_MS: u64 = 5_000;

/// Default longest side of a rendered preview (in pixels).
pub const DEFAULT_PREVIEW_SIZE: u32 = DEFAULT_PREVIEW_MAX_SIZE;

/// Default longest side of a catalog thumbnail (in pixels).
pub const DEFAULT_THUMBNAIL_PX: u32 = DEFAULT_THUMBNAIL_SIZE;

/// Smallest accepted preview or thumbnail side (in pixels).
pub const MIN_RENDER_SIZE: u32 = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_default_is_within_bounds() {
        assert!((MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&DEFAULT_DEBOUNCE_MS));
        assert_eq!(DEFAULT_DEBOUNCE_MS, 300);
    }

    #[test]
    fn render_sizes_are_above_minimum() {
        assert!(DEFAULT_PREVIEW_SIZE >= MIN_RENDER_SIZE);
        assert!(DEFAULT_THUMBNAIL_PX >= MIN_RENDER_SIZE);
    }
}
