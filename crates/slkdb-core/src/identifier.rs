//! Object identifiers.

use std::fmt;

/// Key addressing one record within a record set.
///
/// An identifier is either a string alias (`"hfoo"`) or a numeric ordinal.
/// Equality and hashing cover both the shape and the payload, so the alias
/// `"7"` and the ordinal `7` are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectId {
    /// String alias, matched exactly.
    Alias(String),
    /// Unsigned 32-bit ordinal.
    Ordinal(u32),
}

impl ObjectId {
    /// Create an alias identifier.
    pub fn alias(alias: impl Into<String>) -> Self {
        ObjectId::Alias(alias.into())
    }

    /// Create an ordinal identifier.
    pub fn ordinal(ordinal: u32) -> Self {
        ObjectId::Ordinal(ordinal)
    }

    /// Try to get the alias.
    pub fn as_alias(&self) -> Option<&str> {
        match self {
            ObjectId::Alias(s) => Some(s),
            ObjectId::Ordinal(_) => None,
        }
    }

    /// Try to get the ordinal.
    pub fn as_ordinal(&self) -> Option<u32> {
        match self {
            ObjectId::Ordinal(n) => Some(*n),
            ObjectId::Alias(_) => None,
        }
    }
}

/// Canonical rendering.
///
/// Aliases render verbatim. Ordinals whose four big-endian bytes are all
/// printable ASCII render as that four-character code (`0x68666f6f` is
/// `hfoo`); any other ordinal renders in decimal.
impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Alias(s) => f.write_str(s),
            ObjectId::Ordinal(n) => {
                let bytes = n.to_be_bytes();
                if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
                    for b in bytes {
                        write!(f, "{}", b as char)?;
                    }
                    Ok(())
                } else {
                    write!(f, "{}", n)
                }
            }
        }
    }
}

impl From<&str> for ObjectId {
    fn from(v: &str) -> Self {
        ObjectId::Alias(v.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(v: String) -> Self {
        ObjectId::Alias(v)
    }
}

impl From<u32> for ObjectId {
    fn from(v: u32) -> Self {
        ObjectId::Ordinal(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alias_and_ordinal_never_equal() {
        assert_ne!(ObjectId::alias("7"), ObjectId::ordinal(7));

        let mut set = HashSet::new();
        set.insert(ObjectId::alias("7"));
        set.insert(ObjectId::ordinal(7));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_alias_is_exact() {
        assert_ne!(ObjectId::alias("hfoo"), ObjectId::alias("HFOO"));
        assert_ne!(ObjectId::alias("hfoo"), ObjectId::alias(" hfoo"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ObjectId::alias("hfoo").to_string(), "hfoo");
        assert_eq!(ObjectId::ordinal(42).to_string(), "42");
        assert_eq!(ObjectId::ordinal(0x6866_6f6f).to_string(), "hfoo");
        assert_eq!(ObjectId::ordinal(0).to_string(), "0");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(ObjectId::from("Hpal").as_alias(), Some("Hpal"));
        assert_eq!(ObjectId::from(5u32).as_ordinal(), Some(5));
        assert_eq!(ObjectId::from(5u32).as_alias(), None);
    }
}
