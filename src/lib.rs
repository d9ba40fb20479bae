// SPDX-License-Identifier: MPL-2.0
//! `cropdeck` crops batches of screenshots with one shared set of margins.
//!
//! The crate is the orchestration core of a batch cropping tool: a catalog of
//! loaded files with a selection cursor, a debounced preview pipeline that
//! never shows a stale rendering, shared crop margins with presets, and a
//! batch commit that reports per-file failures. Pixel work sits behind the
//! [`application::port::BackendGateway`] trait; [`infrastructure`] provides a
//! local implementation on top of the `image` crate.
//!
//! # Layers
//!
//! - [`domain`]: pure types and rules (catalog, margins, presets, results)
//! - [`application`]: ports and the [`CropSession`](application::session::CropSession)
//! - [`infrastructure`]: adapters implementing the ports
//! - [`config`], [`logging`], [`error`]: ambient support for the binary

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

#[cfg(test)]
mod test_utils;
