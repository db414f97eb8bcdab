//! Records and record sets.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::identifier::ObjectId;
use crate::value::Value;

/// One object's fields, in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<Rc<str>, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder style).
    pub fn with_field(mut self, name: impl Into<Rc<str>>, value: impl Into<Value>) -> Self {
        self.insert(name.into(), value.into());
        self
    }

    /// Set a field, keeping its position if it already exists.
    ///
    /// Returns the previous value.
    pub fn insert(&mut self, name: Rc<str>, value: Value) -> Option<Value> {
        self.fields.insert(name, value)
    }

    /// Look up a field by exact name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get the field at a position.
    pub fn get_index(&self, index: usize) -> Option<(&str, &Value)> {
        self.fields.get_index(index).map(|(k, v)| (k.as_ref(), v))
    }

    /// Iterate fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.iter().map(|(name, _)| name).collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All records of one category, keyed by identifier.
///
/// Records keep their insertion position ("slot") for the life of the set.
/// Sets are built once by a parser and never modified afterwards, so a slot
/// is a stable handle to a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: IndexMap<ObjectId, Record>,
}

impl RecordSet {
    /// Create an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record (builder style).
    pub fn with_record(mut self, id: impl Into<ObjectId>, record: Record) -> Self {
        self.insert(id.into(), record);
        self
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, id: ObjectId, record: Record) -> Option<Record> {
        self.records.insert(id, record)
    }

    /// Get the record for `id`, creating an empty one at the end if missing.
    pub fn entry(&mut self, id: ObjectId) -> &mut Record {
        self.records.entry(id).or_default()
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: &ObjectId) -> Option<&Record> {
        self.records.get(id)
    }

    /// Look up a record and its slot.
    pub fn get_full(&self, id: &ObjectId) -> Option<(usize, &Record)> {
        self.records.get_full(id).map(|(slot, _, record)| (slot, record))
    }

    /// Get the record in a slot.
    pub fn get_index(&self, slot: usize) -> Option<(&ObjectId, &Record)> {
        self.records.get_index(slot)
    }

    /// Check if a record exists.
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.records.contains_key(id)
    }

    /// Iterate records in order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &Record)> {
        self.records.iter()
    }

    /// Identifiers in order.
    pub fn ids(&self) -> Vec<&ObjectId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
