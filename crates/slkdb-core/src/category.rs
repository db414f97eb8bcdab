//! Object data categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A fixed object data domain.
///
/// Each category owns exactly one record set in the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ability,
    Buff,
    Unit,
    Item,
    Upgrade,
    Doodad,
    Destructable,
    Misc,
}

impl Category {
    /// All categories, in registration order.
    pub const ALL: [Category; 8] = [
        Category::Ability,
        Category::Buff,
        Category::Unit,
        Category::Item,
        Category::Upgrade,
        Category::Doodad,
        Category::Destructable,
        Category::Misc,
    ];

    /// Name exposed to scripts.
    pub fn name(self) -> &'static str {
        match self {
            Category::Ability => "ability",
            Category::Buff => "buff",
            Category::Unit => "unit",
            Category::Item => "item",
            Category::Upgrade => "upgrade",
            Category::Doodad => "doodad",
            Category::Destructable => "destructable",
            Category::Misc => "misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown() {
        let err = "hero".parse::<Category>().unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(ref s) if s == "hero"));
    }

    #[test]
    fn test_serde_name() {
        let json = serde_json::to_string(&Category::Destructable).unwrap();
        assert_eq!(json, "\"destructable\"");
    }
}
