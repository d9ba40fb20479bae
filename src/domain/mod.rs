// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`catalog`]: Loaded files and the selection cursor ([`Catalog`](catalog::Catalog),
//!   [`FileEntry`](catalog::FileEntry))
//! - [`crop`]: Margin model, presets and commit outcomes
//!   ([`CropSettings`](crop::CropSettings), [`CropPreset`](crop::CropPreset),
//!   [`ProcessingStatus`](crop::ProcessingStatus))
//! - [`image`]: Backend image descriptions ([`ImageInfo`](image::ImageInfo),
//!   [`EncodedImage`](image::EncodedImage))

pub mod catalog;
pub mod crop;
pub mod image;
