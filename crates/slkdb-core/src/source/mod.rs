//! Archive access.
//!
//! A [`RecordSource`] is the only way the store reaches raw table bytes.
//! Archive paths are case-insensitive and accept either `\` or `/` as the
//! separator; [`normalize_path`] maps both spellings to one key.

mod directory;
mod memory;

pub use directory::DirectorySource;
pub use memory::MemorySource;

use crate::error::Error;

/// Read access to an archive of table files.
pub trait RecordSource {
    /// Check if the archive has a file at `path`.
    fn has(&self, path: &str) -> bool;

    /// Read the file at `path`.
    ///
    /// Returns [`Error::SourceNotFound`] when the path does not exist.
    fn load(&self, path: &str) -> Result<Vec<u8>, Error>;
}

/// Normalize an archive path for lookup.
pub fn normalize_path(path: &str) -> String {
    path.trim_start_matches(['\\', '/'])
        .chars()
        .map(|c| if c == '\\' { '/' } else { c.to_ascii_lowercase() })
        .collect()
}
