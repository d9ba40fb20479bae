// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[preview]` - Debounce window, preview and thumbnail sizes
//! - `[output]` - Where cropped files are written
//! - `[[presets]]` - User crop presets, listed after the built-in ones
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()` (the CLI's `--config-dir`)
//! 3. Set `CROPDECK_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use cropdeck::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.preview.debounce_ms = Some(150);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::application::session::SessionOptions;
use crate::domain::crop::{builtin_presets, CropPreset, CropSettings};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Preview pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Quiet window before a preview refresh, in milliseconds.
    #[serde(default = "default_debounce_ms", skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,

    /// Longest side of rendered previews, in pixels.
    #[serde(default = "default_max_size", skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,

    /// Longest side of catalog thumbnails, in pixels.
    #[serde(
        default = "default_thumbnail_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail_size: Option<u32>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_size: default_max_size(),
            thumbnail_size: default_thumbnail_size(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory for cropped files; next to each input when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// A user preset as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresetConfig {
    pub label: String,
    pub source_width: u32,
    pub source_height: u32,
    #[serde(default)]
    pub top: u32,
    #[serde(default)]
    pub bottom: u32,
    #[serde(default)]
    pub left: u32,
    #[serde(default)]
    pub right: u32,
}

impl From<&PresetConfig> for CropPreset {
    fn from(preset: &PresetConfig) -> Self {
        CropPreset::new(
            preset.label.clone(),
            preset.source_width,
            preset.source_height,
            CropSettings::new(preset.top, preset.bottom, preset.left, preset.right),
        )
    }
}

// =============================================================================
// Config
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<PresetConfig>,
}

impl Config {
    /// Builds session options, clamping out-of-range values.
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        let debounce_ms = self
            .preview
            .debounce_ms
            .unwrap_or(DEFAULT_DEBOUNCE_MS)
            .clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS);
        let max_size = self
            .preview
            .max_size
            .unwrap_or(DEFAULT_PREVIEW_SIZE)
            .max(MIN_RENDER_SIZE);
        let thumbnail_size = self
            .preview
            .thumbnail_size
            .unwrap_or(DEFAULT_THUMBNAIL_PX)
            .max(MIN_RENDER_SIZE);

        SessionOptions {
            debounce: Duration::from_millis(debounce_ms),
            preview_max_size: Some(max_size),
            thumbnail_size,
            output_dir: self.output.directory.clone(),
            display: true,
        }
    }

    /// Built-in presets followed by the user's.
    #[must_use]
    pub fn presets(&self) -> Vec<CropPreset> {
        let mut presets = builtin_presets();
        presets.extend(self.presets.iter().map(CropPreset::from));
        presets
    }
}

fn default_debounce_ms() -> Option<u64> {
    Some(DEFAULT_DEBOUNCE_MS)
}

fn default_max_size() -> Option<u32> {
    Some(DEFAULT_PREVIEW_SIZE)
}

fn default_thumbnail_size() -> Option<u32> {
    Some(DEFAULT_THUMBNAIL_PX)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!(
                            "ignoring {}: {err}; using default settings",
                            path.display()
                        )),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::DEFAULT_DEBOUNCE;
    use tempfile::tempdir;

    fn sample_config() -> Config {
        Config {
            preview: PreviewConfig {
                debounce_ms: Some(120),
                max_size: Some(480),
                thumbnail_size: Some(64),
            },
            output: OutputConfig {
                directory: Some(PathBuf::from("/tmp/cropped")),
            },
            presets: vec![PresetConfig {
                label: "DS".to_string(),
                source_width: 1024,
                source_height: 768,
                top: 0,
                bottom: 0,
                left: 128,
                right: 128,
            }],
        }
    }

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = sample_config();
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[preview]\ndebounce_ms = 50\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.preview.debounce_ms, Some(50));
        assert_eq!(loaded.preview.max_size, Some(DEFAULT_PREVIEW_SIZE));
        assert_eq!(loaded.output, OutputConfig::default());
        assert!(loaded.presets.is_empty());
    }

    #[test]
    fn preset_margins_default_to_zero() {
        let content = r#"
            [[presets]]
            label = "Wide"
            source_width = 2560
            source_height = 1080
            left = 320
            right = 320
        "#;
        let config: Config = toml::from_str(content).expect("preset should parse");
        let preset = CropPreset::from(&config.presets[0]);
        assert_eq!(preset.settings, CropSettings::new(0, 0, 320, 320));
    }

    #[test]
    fn default_config_maps_to_default_session_options() {
        let options = Config::default().session_options();
        assert_eq!(options, SessionOptions::default());
        assert_eq!(options.debounce, DEFAULT_DEBOUNCE);
    }

    #[test]
    fn session_options_clamp_out_of_range_values() {
        let mut config = Config::default();
        config.preview.debounce_ms = Some(60_000);
        config.preview.max_size = Some(1);
        config.preview.thumbnail_size = Some(0);

        let options = config.session_options();
        assert_eq!(options.debounce, Duration::from_millis(MAX_DEBOUNCE_MS));
        assert_eq!(options.preview_max_size, Some(MIN_RENDER_SIZE));
        assert_eq!(options.thumbnail_size, MIN_RENDER_SIZE);
    }

    #[test]
    fn session_options_carry_output_directory() {
        let options = sample_config().session_options();
        assert_eq!(options.output_dir, Some(PathBuf::from("/tmp/cropped")));
        assert_eq!(options.debounce, Duration::from_millis(120));
        assert_eq!(options.thumbnail_size, 64);
    }

    #[test]
    fn presets_list_builtins_before_user_presets() {
        let presets = sample_config().presets();
        let labels: Vec<&str> = presets.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["GC", "GBA", "DS"]);
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        let config = sample_config();

        save_with_override(&config, Some(base_dir.clone())).expect("failed to save config");
        assert!(base_dir.join(CONFIG_FILE).exists());

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none());
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[preview\nbroken").expect("write failed");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        let warning = warning.expect("corrupted file should produce a warning");
        assert!(warning.contains(CONFIG_FILE));
    }
}
