//! Directory-backed archive.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::{normalize_path, RecordSource};
use crate::error::Error;

/// A directory on disk used as the archive.
///
/// The tree is indexed once at open time so lookups can ignore case the
/// way archive paths do.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    index: HashMap<String, PathBuf>,
}

impl DirectorySource {
    /// Open a directory and index its files.
    ///
    /// Symbolic links are not followed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        let mut index = HashMap::new();

        for entry in WalkDir::new(&root) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&root) {
                let key = normalize_path(&relative.to_string_lossy());
                index.insert(key, entry.into_path());
            }
        }

        debug!(root = %root.display(), files = index.len(), "indexed archive directory");

        Ok(Self { root, index })
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the directory has no files.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl RecordSource for DirectorySource {
    fn has(&self, path: &str) -> bool {
        self.index.contains_key(&normalize_path(path))
    }

    fn load(&self, path: &str) -> Result<Vec<u8>, Error> {
        match self.index.get(&normalize_path(path)) {
            Some(file) => Ok(fs::read(file)?),
            None => Err(Error::SourceNotFound {
                path: path.to_string(),
            }),
        }
    }
}
