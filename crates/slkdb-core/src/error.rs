//! Core error types.

use thiserror::Error;

/// Core store errors.
///
/// Lookups that simply find nothing are not errors; they return `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// The archive has no file at this path.
    #[error("file not found in archive: {path}")]
    SourceNotFound { path: String },

    /// IO error while reading the archive.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A table file could not be parsed.
    #[error("parse error in {path} at line {line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    /// A layout description could not be read.
    #[error("invalid layout: {0}")]
    Layout(#[from] serde_json::Error),

    /// A category name outside the fixed set.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

impl Error {
    /// Create a parse error.
    pub fn parse(path: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Check if this error means the archive path is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SourceNotFound { .. })
    }
}
