//! Parsing archive tables into record sets.
//!
//! A category's record set is assembled from an ordered list of table
//! files (its [`SourceLayout`] entry). Two formats are understood:
//!
//! - SYLK spreadsheets (`.slk`), one record per row keyed by column 1
//! - Profile text (`.txt`), one record per `[id]` section
//!
//! Later files override field values of earlier ones.

mod layout;
mod profile;
mod sylk;

pub use layout::{SourceLayout, TableFile, TableFormat};

use tracing::debug;

use crate::category::Category;
use crate::error::Error;
use crate::manager::StringInterner;
use crate::record::RecordSet;
use crate::source::RecordSource;
use crate::value::Value;

/// Builds the record set of one category from the archive.
///
/// A parser must be total for a well-formed archive and deterministic: the
/// manager calls it at most once per category and caches the result.
pub trait RecordParser {
    /// Parse all records of `category`.
    ///
    /// String payloads should be deduplicated through `strings`.
    fn parse(
        &self,
        category: Category,
        source: &dyn RecordSource,
        strings: &mut StringInterner,
    ) -> Result<RecordSet, Error>;
}

/// Parser for SYLK tables and profile text files.
#[derive(Debug, Clone, Default)]
pub struct SlkParser {
    layout: SourceLayout,
}

impl SlkParser {
    /// Create a parser with the given layout.
    pub fn new(layout: SourceLayout) -> Self {
        Self { layout }
    }
}

impl RecordParser for SlkParser {
    fn parse(
        &self,
        category: Category,
        source: &dyn RecordSource,
        strings: &mut StringInterner,
    ) -> Result<RecordSet, Error> {
        let mut set = RecordSet::new();

        for file in self.layout.files(category) {
            if !source.has(&file.path) {
                if file.required {
                    return Err(Error::SourceNotFound {
                        path: file.path.clone(),
                    });
                }
                debug!(%category, path = %file.path, "optional table missing, skipped");
                continue;
            }

            let bytes = source.load(&file.path)?;

            match file.format {
                TableFormat::Slk => {
                    sylk::merge(&file.path, &bytes, file.new_records, &mut set, strings)?
                }
                TableFormat::Profile => {
                    profile::merge(&bytes, file.new_records, &mut set, strings)
                }
            }

            debug!(%category, path = %file.path, records = set.len(), "merged table");
        }

        Ok(set)
    }
}

/// Lines of `data` with `\n` or `\r\n` endings removed.
pub(crate) fn lines(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    data.split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Text field value: interned UTF-8, or the raw bytes otherwise.
pub(crate) fn text_value(text: &[u8], strings: &mut StringInterner) -> Value {
    match std::str::from_utf8(text) {
        Ok(text) => Value::String(strings.intern(text)),
        Err(_) => Value::Bytes(strings.intern_bytes(text)),
    }
}
