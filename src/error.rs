//! Crate error type.
//!
//! Covers failures that stop a run: unreadable tables, malformed
//! timestamps, bad configuration. Per-meeting input problems are reported as
//! [`ValidationError`](crate::validation::ValidationError) values instead
//! and never abort the run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading inputs, configuring, or writing outputs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid timestamp '{value}' in {table} table (expected YYYY-MM-DD HH:MM[:SS])")]
    Timestamp { table: &'static str, value: String },

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
