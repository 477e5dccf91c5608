//! Error kinds shared across the SIV core

use std::path::PathBuf;

/// Errors produced by the snapshot/diff core
#[derive(Debug, thiserror::Error)]
pub enum SivError {
    #[error("the monitored directory does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("{0}")]
    PathConflict(String),

    #[error("the report file is not a text file with .txt extension: {0}")]
    InvalidExtension(PathBuf),

    #[error("invalid hash function: {0} (expected md5 or sha1)")]
    UnsupportedAlgorithm(String),

    #[error("malformed verification file: {0}")]
    MalformedSnapshot(String),

    #[error("verification file line {line} is malformed (expected 7 fields, found {found})")]
    MalformedRecord { line: usize, found: usize },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl SivError {
    /// Wrap an I/O error with a human-readable context line
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Common result type used throughout siv-core
pub type Result<T> = std::result::Result<T, SivError>;
