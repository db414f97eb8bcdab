//! In-memory archive.

use std::collections::HashMap;

use super::{normalize_path, RecordSource};
use crate::error::Error;

/// Archive held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (builder style).
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        self.files.insert(normalize_path(path), contents.into());
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the archive is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl RecordSource for MemorySource {
    fn has(&self, path: &str) -> bool {
        self.files.contains_key(&normalize_path(path))
    }

    fn load(&self, path: &str) -> Result<Vec<u8>, Error> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| Error::SourceNotFound {
                path: path.to_string(),
            })
    }
}
