//! The namespace table: one category proxy per category.

use std::rc::Rc;

use mlua::{Lua, Table};
use slkdb_core::Category;

use crate::config::WritePolicy;
use crate::lifecycle::ManagerSlot;
use crate::proxy::build_proxy;
use crate::resolver::CategoryResolver;

/// Build the namespace table over `manager`.
///
/// The namespace itself is a plain table; each of its fields is a
/// read-only category proxy. No category is loaded here.
pub fn build_namespace(
    lua: &Lua,
    manager: &Rc<ManagerSlot>,
    policy: WritePolicy,
) -> mlua::Result<Table> {
    let namespace = lua.create_table_with_capacity(0, Category::ALL.len())?;
    for category in Category::ALL {
        let resolver = CategoryResolver::new(manager.clone(), category, policy);
        let proxy = build_proxy(lua, Rc::new(resolver), policy)?;
        namespace.set(category.name(), proxy)?;
    }
    Ok(namespace)
}
