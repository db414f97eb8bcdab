//! Host error types.

use thiserror::Error;

/// Errors from running a script against an archive.
#[derive(Debug, Error)]
pub enum Error {
    /// Archive or layout error.
    #[error("object data error: {0}")]
    Core(#[from] slkdb_core::Error),

    /// Script error.
    #[error("lua error: {0}")]
    Lua(#[from] mlua::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias for host operations.
pub type Result<T> = std::result::Result<T, Error>;
