// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`session`]: The crop session that drives catalog, preview and commit
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Front ends drive a [`session::CropSession`] and observe its state
//!
//! # Example
//!
//! ```ignore
//! use cropdeck::application::session::{CropSession, SessionOptions};
//! use cropdeck::infrastructure::{FsOriginalSource, LocalImageBackend};
//! use std::sync::Arc;
//!
//! let session = CropSession::new(
//!     Arc::new(LocalImageBackend::new()),
//!     Arc::new(FsOriginalSource::new()),
//!     SessionOptions::default(),
//! );
//! session.add_files(["shots/001.png"]).await;
//! ```

pub mod port;
pub mod session;
