//! Record store manager.
//!
//! The manager owns one record set per category. A category is parsed the
//! first time it is requested and cached for the life of the manager; later
//! requests are a map lookup. A failed parse caches nothing, so the next
//! request retries it.
//!
//! The manager is single-threaded: it is owned by one scripting runtime,
//! which never calls into it concurrently.

mod interner;
mod stats;

pub use interner::StringInterner;
pub use stats::LoadStats;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::category::Category;
use crate::error::Error;
use crate::parser::{RecordParser, SlkParser, SourceLayout};
use crate::record::RecordSet;
use crate::source::RecordSource;

/// Lazily loading, caching owner of all record sets.
pub struct RecordStoreManager {
    source: Rc<dyn RecordSource>,
    parser: Box<dyn RecordParser>,
    tables: RefCell<HashMap<Category, Rc<RecordSet>>>,
    strings: RefCell<StringInterner>,
    stats: LoadStats,
}

impl RecordStoreManager {
    /// Create a manager over `source` using `parser`.
    ///
    /// Nothing is read until the first [`load`](Self::load).
    pub fn new(source: Rc<dyn RecordSource>, parser: impl RecordParser + 'static) -> Self {
        Self {
            source,
            parser: Box::new(parser),
            tables: RefCell::new(HashMap::new()),
            strings: RefCell::new(StringInterner::new()),
            stats: LoadStats::default(),
        }
    }

    /// Create a manager using the SYLK/profile parser with `layout`.
    pub fn with_layout(source: Rc<dyn RecordSource>, layout: SourceLayout) -> Self {
        Self::new(source, SlkParser::new(layout))
    }

    /// Get the record set of `category`, parsing it on first use.
    pub fn load(&self, category: Category) -> Result<Rc<RecordSet>, Error> {
        let cached = self.tables.borrow().get(&category).cloned();
        if let Some(set) = cached {
            self.stats.record_hit();
            return Ok(set);
        }

        let started = Instant::now();
        let result = {
            let mut strings = self.strings.borrow_mut();
            self.parser.parse(category, self.source.as_ref(), &mut strings)
        };

        match result {
            Ok(set) => {
                let set = Rc::new(set);
                self.tables.borrow_mut().insert(category, set.clone());
                self.stats.record_load();
                info!(
                    %category,
                    records = set.len(),
                    interned = self.strings.borrow().len(),
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "loaded category"
                );
                Ok(set)
            }
            Err(e) => {
                self.stats.record_failure();
                warn!(%category, error = %e, "failed to load category");
                Err(e)
            }
        }
    }

    /// Get the record set of `category` only if it is already loaded.
    pub fn cached(&self, category: Category) -> Option<Rc<RecordSet>> {
        self.tables.borrow().get(&category).cloned()
    }

    /// Check if `category` has been loaded.
    pub fn is_loaded(&self, category: Category) -> bool {
        self.tables.borrow().contains_key(&category)
    }

    /// Loaded categories, in registration order.
    pub fn loaded_categories(&self) -> Vec<Category> {
        let tables = self.tables.borrow();
        Category::ALL
            .into_iter()
            .filter(|c| tables.contains_key(c))
            .collect()
    }

    /// Get the shared copy of `s`.
    ///
    /// Equal strings return the same allocation for as long as the manager
    /// (or any holder of the returned `Rc`) lives.
    pub fn convert_string(&self, s: &str) -> Rc<str> {
        self.strings.borrow_mut().intern(s)
    }

    /// Number of distinct interned strings.
    pub fn interned_strings(&self) -> usize {
        self.strings.borrow().len()
    }

    /// Get load statistics.
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

impl Drop for RecordStoreManager {
    fn drop(&mut self) {
        debug!(
            loaded = self.tables.get_mut().len(),
            interned = self.strings.get_mut().len(),
            "releasing record store"
        );
    }
}

impl fmt::Debug for RecordStoreManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStoreManager")
            .field("loaded", &self.loaded_categories())
            .field("interned", &self.interned_strings())
            .field("stats", &self.stats)
            .finish()
    }
}
