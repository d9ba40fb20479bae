// SPDX-License-Identifier: MPL-2.0
//! Crop domain types.
//!
//! - [`settings`]: the shared margin model ([`CropSettings`]) and its bounds rules
//! - [`preset`]: named margin suggestions keyed to source resolutions
//! - [`outcome`]: per-file results and the commit status machine

pub mod outcome;
pub mod preset;
pub mod settings;

pub use outcome::{summarize, BatchSummary, CropResult, ProcessingStatus};
pub use preset::{builtin_presets, find_preset, preset_for_resolution, CropPreset};
pub use settings::{CropBoundsError, CropSettings, CroppedSize};
