//! Which archive files make up each category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::Error;

/// On-disk format of a table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// SYLK spreadsheet.
    Slk,
    /// `[id]` sections with `key=value` lines.
    Profile,
}

/// One table file contributing to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFile {
    /// Archive path.
    pub path: String,

    /// File format.
    pub format: TableFormat,

    /// Fail the whole category load when the file is missing.
    #[serde(default = "default_true")]
    pub required: bool,

    /// Whether ids not seen in earlier files create new records.
    /// When false the file only adds fields to existing records.
    #[serde(default = "default_true")]
    pub new_records: bool,
}

fn default_true() -> bool {
    true
}

impl TableFile {
    /// A required SYLK table that defines records.
    pub fn slk(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            format: TableFormat::Slk,
            required: true,
            new_records: true,
        }
    }

    /// An optional profile file that decorates existing records.
    pub fn profile(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            format: TableFormat::Profile,
            required: false,
            new_records: false,
        }
    }

    /// Mark the file as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Mark the file as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set whether unknown ids create records.
    pub fn with_new_records(mut self, new_records: bool) -> Self {
        self.new_records = new_records;
        self
    }
}

/// Category to table-file mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceLayout {
    tables: BTreeMap<Category, Vec<TableFile>>,
}

impl SourceLayout {
    /// A layout with no tables for any category.
    pub fn empty() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }

    /// Parse a layout from JSON, e.g. `{"unit": [{"path": "...", "format": "slk"}]}`.
    ///
    /// Categories not mentioned have no tables.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the layout to pretty JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the tables of a category (builder style).
    pub fn with_table(mut self, category: Category, files: Vec<TableFile>) -> Self {
        self.tables.insert(category, files);
        self
    }

    /// Tables of a category, in merge order.
    pub fn files(&self, category: Category) -> &[TableFile] {
        self.tables.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Overlay another layout; its categories replace ours.
    pub fn merge(mut self, other: SourceLayout) -> Self {
        self.tables.extend(other.tables);
        self
    }
}

const RACES: [&str; 6] = ["Campaign", "Human", "Neutral", "NightElf", "Orc", "Undead"];

fn race_profiles(kind: &str) -> Vec<TableFile> {
    RACES
        .iter()
        .flat_map(|race| {
            [
                TableFile::profile(format!("Units\\{race}{kind}Func.txt")),
                TableFile::profile(format!("Units\\{race}{kind}Strings.txt")),
            ]
        })
        .collect()
}

fn ability_profiles() -> Vec<TableFile> {
    let mut files = race_profiles("Ability");
    for prefix in ["Common", "Item"] {
        files.push(TableFile::profile(format!("Units\\{prefix}AbilityFunc.txt")));
        files.push(TableFile::profile(format!("Units\\{prefix}AbilityStrings.txt")));
    }
    files
}

/// The stock Warcraft III table set.
impl Default for SourceLayout {
    fn default() -> Self {
        let unit = [
            TableFile::slk("Units\\UnitData.slk"),
            TableFile::slk("Units\\UnitBalance.slk").optional().with_new_records(false),
            TableFile::slk("Units\\UnitUI.slk").optional().with_new_records(false),
            TableFile::slk("Units\\UnitWeapons.slk").optional().with_new_records(false),
            TableFile::slk("Units\\UnitAbilities.slk").optional().with_new_records(false),
        ]
        .into_iter()
        .chain(race_profiles("Unit"))
        .collect();

        let ability = std::iter::once(TableFile::slk("Units\\AbilityData.slk"))
            .chain(ability_profiles())
            .collect();

        let buff = std::iter::once(TableFile::slk("Units\\AbilityBuffData.slk"))
            .chain(ability_profiles())
            .collect();

        let item = vec![
            TableFile::slk("Units\\ItemData.slk"),
            TableFile::profile("Units\\ItemFunc.txt"),
            TableFile::profile("Units\\ItemStrings.txt"),
        ];

        let upgrade = std::iter::once(TableFile::slk("Units\\UpgradeData.slk"))
            .chain(race_profiles("Upgrade"))
            .collect();

        let misc = vec![
            TableFile::profile("Units\\MiscData.txt")
                .required()
                .with_new_records(true),
            TableFile::profile("Units\\MiscGame.txt").with_new_records(true),
        ];

        Self::empty()
            .with_table(Category::Ability, ability)
            .with_table(Category::Buff, buff)
            .with_table(Category::Unit, unit)
            .with_table(Category::Item, item)
            .with_table(Category::Upgrade, upgrade)
            .with_table(Category::Doodad, vec![TableFile::slk("Doodads\\Doodads.slk")])
            .with_table(
                Category::Destructable,
                vec![TableFile::slk("Units\\DestructableData.slk")],
            )
            .with_table(Category::Misc, misc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_all_categories() {
        let layout = SourceLayout::default();
        for category in Category::ALL {
            let files = layout.files(category);
            assert!(!files.is_empty(), "{category} has no tables");
            assert!(files[0].required, "{category} primary table is optional");
            assert!(files[0].new_records);
        }
    }

    #[test]
    fn test_default_unit_tables() {
        let layout = SourceLayout::default();
        let files = layout.files(Category::Unit);
        assert_eq!(files[0].path, "Units\\UnitData.slk");
        assert!(files
            .iter()
            .any(|f| f.path == "Units\\HumanUnitStrings.txt" && f.format == TableFormat::Profile));
    }

    #[test]
    fn test_from_json() {
        let layout = SourceLayout::from_json(
            r#"{
                "unit": [
                    {"path": "custom\\units.slk", "format": "slk"},
                    {"path": "custom\\names.txt", "format": "profile", "required": false, "new_records": false}
                ]
            }"#,
        )
        .unwrap();

        let files = layout.files(Category::Unit);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], TableFile::slk("custom\\units.slk"));
        assert_eq!(files[1], TableFile::profile("custom\\names.txt"));
        assert!(layout.files(Category::Item).is_empty());
    }

    #[test]
    fn test_json_roundtrip_and_merge() {
        let defaults = SourceLayout::default();
        let json = defaults.to_json().unwrap();
        assert_eq!(SourceLayout::from_json(&json).unwrap(), defaults);

        let overlay = SourceLayout::empty()
            .with_table(Category::Doodad, vec![TableFile::slk("my\\doodads.slk")]);
        let merged = defaults.merge(overlay);
        assert_eq!(merged.files(Category::Doodad)[0].path, "my\\doodads.slk");
        assert_eq!(merged.files(Category::Unit)[0].path, "Units\\UnitData.slk");
    }

    #[test]
    fn test_invalid_json() {
        let err = SourceLayout::from_json(r#"{"hero": []}"#).unwrap_err();
        assert!(matches!(err, Error::Layout(_)));
    }
}
