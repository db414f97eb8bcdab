//! SLKDB Core - Object identifiers, records, and the lazily loaded record store.
//!
//! This crate provides everything below the scripting boundary:
//!
//! - [`identifier`] - The two-shape object identifier (alias or ordinal)
//! - [`value`] - Field values stored in records
//! - [`record`] - Records and per-category record sets
//! - [`category`] - The closed set of object data categories
//! - [`source`] - Archive access (`has` / `load`)
//! - [`parser`] - SYLK and profile parsing into record sets
//! - [`manager`] - The record store manager with per-category caching
//! - [`error`] - Core error types

pub mod category;
pub mod error;
pub mod identifier;
pub mod manager;
pub mod parser;
pub mod record;
pub mod source;
pub mod value;

pub use category::Category;
pub use error::Error;
pub use identifier::ObjectId;
pub use manager::{LoadStats, RecordStoreManager, StringInterner};
pub use parser::{RecordParser, SlkParser, SourceLayout, TableFile, TableFormat};
pub use record::{Record, RecordSet};
pub use source::{DirectorySource, MemorySource, RecordSource};
pub use value::Value;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
