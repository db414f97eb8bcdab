//! String interning.

use std::collections::HashSet;
use std::rc::Rc;

/// Deduplicating string table.
///
/// Object data repeats the same short payloads ("human", "_", "0") across
/// thousands of records; interning stores each distinct payload once.
/// Payloads that are not UTF-8 live in a separate byte table.
#[derive(Debug, Default)]
pub struct StringInterner {
    strings: HashSet<Rc<str>>,
    bytes: HashSet<Rc<[u8]>>,
    /// Total intern requests, including hits.
    requests: u64,
}

impl StringInterner {
    /// Create an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the shared copy of `s`, inserting it on first use.
    pub fn intern(&mut self, s: &str) -> Rc<str> {
        self.requests += 1;
        if let Some(existing) = self.strings.get(s) {
            return existing.clone();
        }
        let shared: Rc<str> = Rc::from(s);
        self.strings.insert(shared.clone());
        shared
    }

    /// Get the shared copy of a non-UTF-8 payload.
    pub fn intern_bytes(&mut self, b: &[u8]) -> Rc<[u8]> {
        self.requests += 1;
        if let Some(existing) = self.bytes.get(b) {
            return existing.clone();
        }
        let shared: Rc<[u8]> = Rc::from(b);
        self.bytes.insert(shared.clone());
        shared
    }

    /// Check if `s` is already interned.
    pub fn contains(&self, s: &str) -> bool {
        self.strings.contains(s)
    }

    /// Number of distinct payloads.
    pub fn len(&self) -> usize {
        self.strings.len() + self.bytes.len()
    }

    /// Check if nothing is interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty() && self.bytes.is_empty()
    }

    /// Number of intern requests served so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Drop every interned string.
    pub fn clear(&mut self) {
        self.strings.clear();
        self.bytes.clear();
    }
}
