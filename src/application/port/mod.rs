// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`backend`]: Describe, preview and batch-crop operations
//! - [`source`]: Raw file bytes for the original-image view
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `image` crate types)
//! - Traits are `Send + Sync` so one adapter can serve every session task
//! - Methods return boxed `'static` futures, which keeps the traits object-safe

pub mod backend;
pub mod source;

// Re-export main types for convenience
pub use backend::{BackendError, BackendFuture, BackendGateway};
pub use source::OriginalSource;
