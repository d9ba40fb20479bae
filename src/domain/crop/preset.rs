// SPDX-License-Identifier: MPL-2.0
//! Named crop presets keyed to known source resolutions.

use super::settings::CropSettings;

/// A read-only margin suggestion for screenshots of a given resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropPreset {
    /// Short label shown to the user (e.g. `GBA`).
    pub label: String,
    /// Width of the screenshots this preset was measured on.
    pub source_width: u32,
    /// Height of the screenshots this preset was measured on.
    pub source_height: u32,
    /// Margins applied when the preset is chosen.
    pub settings: CropSettings,
}

impl CropPreset {
    /// Creates a new preset.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        source_width: u32,
        source_height: u32,
        settings: CropSettings,
    ) -> Self {
        Self {
            label: label.into(),
            source_width,
            source_height,
            settings,
        }
    }

    /// Returns `true` if this preset was measured on a `width`x`height` source.
    #[must_use]
    pub fn matches_resolution(&self, width: u32, height: u32) -> bool {
        self.source_width == width && self.source_height == height
    }
}

/// Presets shipped with the application.
///
/// - `GC`: GameCube captures at 1920x1080
/// - `GBA`: Game Boy Advance captures at 1280x720
#[must_use]
pub fn builtin_presets() -> Vec<CropPreset> {
    vec![
        CropPreset::new("GC", 1920, 1080, CropSettings::new(0, 60, 280, 280)),
        CropPreset::new("GBA", 1280, 720, CropSettings::new(22, 58, 160, 160)),
    ]
}

/// Returns the first preset measured on a `width`x`height` source.
#[must_use]
pub fn preset_for_resolution(presets: &[CropPreset], width: u32, height: u32) -> Option<&CropPreset> {
    presets
        .iter()
        .find(|preset| preset.matches_resolution(width, height))
}

/// Looks up a preset by label, ignoring ASCII case.
#[must_use]
pub fn find_preset<'a>(presets: &'a [CropPreset], label: &str) -> Option<&'a CropPreset> {
    presets
        .iter()
        .find(|preset| preset.label.eq_ignore_ascii_case(label))
}
