//! Integration tests for the script host over an on-disk archive.

use std::fs;
use std::path::Path;

use slkdb_cli::{open_state, run, Error, HostConfig, Script};
use slkdb_lua::{BindingConfig, WritePolicy};

const ITEM_DATA: &str = "ID;PWXL;N;E\n\
    C;X1;Y1;K\"itemID\"\n\
    C;X2;K\"class\"\n\
    C;X1;Y2;K\"ratf\"\n\
    C;X2;K\"Permanent\"\n\
    E\n";

const ITEM_STRINGS: &str = "[ratf]\nName=Claws of Attack +15\n";

fn write(root: &Path, path: &str, contents: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, contents).unwrap();
}

fn archive() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Units/ItemData.slk", ITEM_DATA);
    write(dir.path(), "Units/ItemStrings.txt", ITEM_STRINGS);
    dir
}

fn chunk(dir: &tempfile::TempDir, code: &str) -> HostConfig {
    HostConfig::new(dir.path(), Script::Chunk(code.to_string()))
}

#[test]
fn test_open_state_exposes_archive() {
    let dir = archive();
    let lua = open_state(&chunk(&dir, "")).unwrap();

    let name: String = lua.load("return slk.item.ratf.Name").eval().unwrap();
    assert_eq!(name, "Claws of Attack +15");
    let class: String = lua.load("return slk.item.ratf.class").eval().unwrap();
    assert_eq!(class, "Permanent");
}

#[test]
fn test_run_chunk_and_file() {
    let dir = archive();
    run(&chunk(&dir, "assert(slk.item.ratf.class == 'Permanent')")).unwrap();

    let script = dir.path().join("check.lua");
    fs::write(&script, "assert(slk.item.nope == nil)\n").unwrap();
    run(&HostConfig::new(dir.path(), Script::File(script))).unwrap();
}

#[test]
fn test_script_errors_surface() {
    let dir = archive();
    let err = run(&chunk(&dir, "error('boom')")).unwrap_err();
    assert!(matches!(err, Error::Lua(_)));

    let missing = HostConfig::new(dir.path(), Script::File(dir.path().join("missing.lua")));
    assert!(matches!(run(&missing).unwrap_err(), Error::Io(_)));
}

#[test]
fn test_reject_writes() {
    let dir = archive();
    let config = chunk(&dir, "slk.item.ratf.class = 'Charged'")
        .with_binding(BindingConfig::new().with_write_policy(WritePolicy::Reject));
    assert!(matches!(run(&config).unwrap_err(), Error::Lua(_)));

    run(&chunk(&dir, "slk.item.ratf.class = 'Charged'")).unwrap();
}

#[test]
fn test_layout_override() {
    let dir = archive();
    write(dir.path(), "Custom/Doodads.txt", "[LTlt]\nName=Tree\n");
    let layout = dir.path().join("layout.json");
    fs::write(
        &layout,
        r#"{"doodad": [{"path": "Custom\\Doodads.txt", "format": "profile"}]}"#,
    )
    .unwrap();

    let config = chunk(&dir, "").with_layout(&layout);
    let lua = open_state(&config).unwrap();

    let name: String = lua.load("return slk.doodad.LTlt.Name").eval().unwrap();
    assert_eq!(name, "Tree");
    // Categories not in the file keep the stock tables.
    let item: String = lua.load("return slk.item.ratf.Name").eval().unwrap();
    assert_eq!(item, "Claws of Attack +15");
}

#[test]
fn test_bad_layout_file() {
    let dir = archive();
    let layout = dir.path().join("layout.json");
    fs::write(&layout, "{not json").unwrap();

    let err = open_state(&chunk(&dir, "").with_layout(&layout)).unwrap_err();
    assert!(matches!(err, Error::Core(_)));
}
