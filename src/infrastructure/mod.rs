// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap the `image` crate and file-system I/O.
//!
//! # Available Adapters
//!
//! - [`image_backend`]: Decoding, cropping and encoding (implements [`BackendGateway`])
//! - [`fs_source`]: Raw file reads for the original-image view (implements [`OriginalSource`])
//!
//! [`BackendGateway`]: crate::application::port::BackendGateway
//! [`OriginalSource`]: crate::application::port::OriginalSource

pub mod fs_source;
pub mod image_backend;

pub use fs_source::FsOriginalSource;
pub use image_backend::LocalImageBackend;
