// SPDX-License-Identifier: MPL-2.0
//! Image domain types.
//!
//! This module contains the image descriptions exchanged with the backend.
//! They are independent of any codec or presentation concerns.

pub mod types;

// Re-export commonly used types
pub use types::{display_name, EncodedImage, ImageInfo};
