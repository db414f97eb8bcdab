//! Script host: archive, manager and Lua state wired together.

use std::fs;
use std::rc::Rc;

use mlua::Lua;
use slkdb_core::{DirectorySource, RecordStoreManager, SourceLayout};
use slkdb_lua::{install_global, lifecycle, ManagerHandle};
use tracing::info;

use crate::config::{HostConfig, Script};
use crate::error::Result;

/// Build the layout for `config`: the stock tables, overlaid by the layout
/// file when one is given.
pub fn load_layout(config: &HostConfig) -> Result<SourceLayout> {
    let layout = SourceLayout::default();
    match &config.layout {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            Ok(layout.merge(SourceLayout::from_json(&json)?))
        }
        None => Ok(layout),
    }
}

/// Create a Lua state with the object data namespace installed.
pub fn open_state(config: &HostConfig) -> Result<Lua> {
    let source = DirectorySource::open(&config.archive)?;
    info!(
        archive = %config.archive.display(),
        files = source.len(),
        "archive opened"
    );

    let manager = RecordStoreManager::with_layout(Rc::new(source), load_layout(config)?);
    let lua = Lua::new();
    install_global(&lua, manager, &config.binding)?;
    Ok(lua)
}

/// Run the configured script.
pub fn run(config: &HostConfig) -> Result<()> {
    let lua = open_state(config)?;

    match &config.script {
        Script::File(path) => {
            let code = fs::read_to_string(path)?;
            lua.load(code)
                .set_name(format!("@{}", path.display()))
                .exec()?;
        }
        Script::Chunk(chunk) => {
            lua.load(chunk.as_str()).set_name("=(command line)").exec()?;
        }
    }

    log_stats(&lua, &config.binding.registry_key)?;
    Ok(())
}

fn log_stats(lua: &Lua, key: &str) -> Result<()> {
    let handle = lifecycle::get(lua, key)?;
    let handle = handle.borrow::<ManagerHandle>()?;
    handle.slot().with(|m| {
        let stats = m.stats();
        info!(
            loads = stats.loads(),
            hits = stats.hits(),
            failures = stats.failures(),
            hit_rate = stats.hit_rate(),
            interned = m.interned_strings(),
            "script finished"
        );
    });
    Ok(())
}
