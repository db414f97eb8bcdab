//! SLKDB Lua - Read-only Lua proxies over the record store.
//!
//! Scripts see the record store as a namespace of eight category tables:
//!
//! ```lua
//! local footman = slk.unit.hfoo
//! print(footman.Name)          -- "Footman"
//! for id, obj in pairs(slk.item) do print(id, obj.Name) end
//! ```
//!
//! Every table in that view is a proxy. Lookups are answered by native
//! resolvers, categories are parsed on first access, and assignments never
//! reach the store.
//!
//! - [`config`] - Binding configuration and write policy
//! - [`key`] - Lua key to identifier / field name resolution
//! - [`convert`] - Field value to Lua conversion
//! - [`proxy`] - The generic proxy table builder
//! - [`resolver`] - Category and record resolvers
//! - [`registry`] - The namespace table
//! - [`lifecycle`] - Manager ownership by the Lua state

pub mod config;
pub mod convert;
pub mod key;
pub mod lifecycle;
pub mod proxy;
pub mod registry;
pub mod resolver;

pub use config::{BindingConfig, WritePolicy};
pub use lifecycle::{ManagerHandle, ManagerSlot};
pub use proxy::{build_proxy, Resolver, FACTORY_FIELD};
pub use resolver::{CategoryResolver, RecordKey, RecordResolver};

use mlua::{Lua, Table};
use slkdb_core::RecordStoreManager;
use tracing::debug;

/// Hand `manager` to the Lua state and build the namespace table.
///
/// The manager is stored in the named registry under
/// `config.registry_key` and lives until the state finalizes it. Nothing
/// is bound to globals; see [`install_global`].
pub fn open(lua: &Lua, manager: RecordStoreManager, config: &BindingConfig) -> mlua::Result<Table> {
    let slot = lifecycle::create(lua, manager, &config.registry_key)?;
    let namespace = registry::build_namespace(lua, &slot, config.write_policy)?;
    debug!(
        registry_key = %config.registry_key,
        write_policy = ?config.write_policy,
        "opened object data namespace"
    );
    Ok(namespace)
}

/// Like [`open`], then publish the namespace.
///
/// The namespace is bound to the global `config.global_name` and stored in
/// `package.loaded[config.module_name]` so `require` finds it. Either step
/// is skipped when its name is unset.
pub fn install_global(
    lua: &Lua,
    manager: RecordStoreManager,
    config: &BindingConfig,
) -> mlua::Result<Table> {
    let namespace = open(lua, manager, config)?;

    if let Some(global) = &config.global_name {
        lua.globals().set(global.as_str(), namespace.clone())?;
    }

    if let Some(module) = &config.module_name {
        if let Some(package) = lua.globals().get::<Option<Table>>("package")? {
            let loaded: Table = package.get("loaded")?;
            loaded.set(module.as_str(), namespace.clone())?;
        }
    }

    Ok(namespace)
}
