// SPDX-License-Identifier: MPL-2.0
//! Crate-level error type for configuration, logging and file I/O.
//!
//! Session operations never return this type: backend failures become
//! session state, and caller mistakes are [`SessionError`]s.
//!
//! [`SessionError`]: crate::application::session::SessionError

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Logging Error: {0}")]
    Logging(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Self {
        Error::Logging(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
