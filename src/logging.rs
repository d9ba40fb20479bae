// SPDX-License-Identifier: MPL-2.0
//! Log dispatch for the command-line front end.
//!
//! The library only emits records through the `log` facade; installing a
//! logger is left to the binary.

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

use crate::error::Result;

/// Installs a stderr logger at `level`.
///
/// Lines look like `[14:03:07][INFO][cropdeck::application::session] message`.
/// Dependencies are capped at `warn` so `--verbose` stays readable.
///
/// # Errors
///
/// Returns [`Error::Logging`](crate::error::Error::Logging) if a global
/// logger is already installed.
pub fn init(level: LevelFilter) -> Result<()> {
    dispatch(level).chain(std::io::stderr()).apply()?;
    log::debug!("Logging initialized at {level}");
    Ok(())
}

fn dispatch(level: LevelFilter) -> Dispatch {
    Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level.min(LevelFilter::Warn))
        .level_for(env!("CARGO_PKG_NAME"), level)
}
