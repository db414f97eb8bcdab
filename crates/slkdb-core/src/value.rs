//! Field values stored in records.

use std::fmt;
use std::rc::Rc;

use crate::identifier::ObjectId;

/// A record field value.
///
/// Table cells carry no type information beyond "text" and "reference to
/// another object". Text that is not valid UTF-8 keeps its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Interned string payload.
    String(Rc<str>),
    /// Interned text in a legacy encoding.
    Bytes(Rc<[u8]>),
    /// Identifier of another (or the same) record.
    ObjectId(ObjectId),
}

impl Value {
    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Bytes(_) | Value::ObjectId(_) => None,
        }
    }

    /// Raw bytes of a text payload, whatever its encoding.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s.as_bytes()),
            Value::Bytes(b) => Some(b),
            Value::ObjectId(_) => None,
        }
    }

    /// Try to get as object identifier.
    pub fn as_object_id(&self) -> Option<&ObjectId> {
        match self {
            Value::ObjectId(id) => Some(id),
            Value::String(_) | Value::Bytes(_) => None,
        }
    }
}

/// String form shared by every consumer of field values.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Value::ObjectId(id) => id.fmt(f),
        }
    }
}

impl From<Rc<str>> for Value {
    fn from(v: Rc<str>) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(Rc::from(v))
    }
}

impl From<ObjectId> for Value {
    fn from(v: ObjectId) -> Self {
        Value::ObjectId(v)
    }
}
