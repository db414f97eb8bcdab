//! Integration tests for the record store over an on-disk archive.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use slkdb_core::{
    Category, DirectorySource, Error, ObjectId, RecordStoreManager, SourceLayout, Value,
};

const UNIT_DATA: &str = "ID;PWXL;N;E\n\
    B;X3;Y3;D0\n\
    C;X1;Y1;K\"unitID\"\n\
    C;X2;K\"race\"\n\
    C;X3;K\"HP\"\n\
    C;X1;Y2;K\"hfoo\"\n\
    C;X2;K\"human\"\n\
    C;X3;K420\n\
    C;X1;Y3;K\"opeo\"\n\
    C;X2;K\"orc\"\n\
    C;X3;K250\n\
    E\n";

const UNIT_BALANCE: &str = "ID;PWXL;N;E\n\
    C;X1;Y1;K\"unitBalanceID\"\n\
    C;X2;K\"HP\"\n\
    C;X1;Y2;K\"hfoo\"\n\
    C;X2;K\"425\"\n\
    E\n";

const HUMAN_STRINGS: &str = "[hfoo]\nName=Footman\nTip=Train |cffffcc00F|rootman\n";
const ORC_STRINGS: &str = "[opeo]\nName=Peon\n";

const MISC_DATA: &str = "[Misc]\nGoldTextColor=255,255,220,0\n[Terrain]\nDefaultTileset=L\n";

fn write(root: &Path, path: &str, contents: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, contents).unwrap();
}

fn archive() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Units/UnitData.slk", UNIT_DATA);
    write(dir.path(), "units/unitbalance.slk", UNIT_BALANCE);
    write(dir.path(), "Units/HumanUnitStrings.txt", HUMAN_STRINGS);
    write(dir.path(), "Units/OrcUnitStrings.txt", ORC_STRINGS);
    write(dir.path(), "Units/MiscData.txt", MISC_DATA);
    dir
}

fn manager(dir: &tempfile::TempDir) -> RecordStoreManager {
    let source = DirectorySource::open(dir.path()).unwrap();
    RecordStoreManager::with_layout(Rc::new(source), SourceLayout::default())
}

#[test]
fn test_unit_tables_merge() {
    let dir = archive();
    let manager = manager(&dir);

    let units = manager.load(Category::Unit).unwrap();
    assert_eq!(
        units.ids(),
        vec![&ObjectId::alias("hfoo"), &ObjectId::alias("opeo")]
    );

    let footman = units.get(&ObjectId::alias("hfoo")).unwrap();
    assert_eq!(
        footman.field_names(),
        vec!["unitID", "race", "HP", "unitBalanceID", "Name", "Tip"]
    );
    // UnitBalance overrides UnitData
    assert_eq!(footman.get("HP"), Some(&Value::from("425")));
    assert_eq!(footman.get("Name"), Some(&Value::from("Footman")));
    assert_eq!(
        footman.get("Tip").map(ToString::to_string),
        Some("Train |cffffcc00F|rootman".to_string())
    );

    let peon = units.get(&ObjectId::alias("opeo")).unwrap();
    assert_eq!(peon.get("HP"), Some(&Value::from("250")));
    assert_eq!(peon.get("Name"), Some(&Value::from("Peon")));
}

#[test]
fn test_misc_from_profiles() {
    let dir = archive();
    let manager = manager(&dir);

    let misc = manager.load(Category::Misc).unwrap();
    assert_eq!(
        misc.ids(),
        vec![&ObjectId::alias("Misc"), &ObjectId::alias("Terrain")]
    );
    assert_eq!(
        misc.get(&ObjectId::alias("Terrain")).unwrap().get("DefaultTileset"),
        Some(&Value::from("L"))
    );
}

#[test]
fn test_missing_category_file_then_retry() {
    let dir = archive();
    let manager = manager(&dir);

    let err = manager.load(Category::Item).unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }));
    assert!(!manager.is_loaded(Category::Item));

    // The directory index is fixed at open time, so the retry still misses.
    write(dir.path(), "Units/ItemData.slk", "ID;P\nE\n");
    assert!(manager.load(Category::Item).is_err());
    assert_eq!(manager.stats().failures(), 2);

    let reopened = self::manager(&dir);
    assert!(reopened.load(Category::Item).unwrap().is_empty());
}

#[test]
fn test_repeated_payloads_are_shared() {
    let dir = archive();
    let manager = manager(&dir);
    manager.load(Category::Unit).unwrap();

    let before = manager.interned_strings();
    let name = manager.convert_string("Footman");
    assert_eq!(manager.interned_strings(), before);
    assert_eq!(&*name, "Footman");
}
