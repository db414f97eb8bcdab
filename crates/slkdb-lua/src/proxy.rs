//! Read-only proxy tables.
//!
//! A proxy is an empty Lua table whose metatable routes every access to a
//! native [`Resolver`]:
//!
//! | Lua                | metamethod   | native                         |
//! |--------------------|--------------|--------------------------------|
//! | `proxy[key]`       | `__index`    | [`Resolver::index`]            |
//! | `pairs(proxy)`     | `__pairs`    | [`Resolver::entry`] from 0     |
//! | `proxy.factory`    | `__index`    | the `__pairs` function itself  |
//! | `proxy[key] = v`   | `__newindex` | discarded or rejected          |
//!
//! The proxy holds no data. Since the table stays empty, every write goes
//! through `__newindex`, and the metatable is locked with `__metatable`.

use std::rc::Rc;

use mlua::{Function, Lua, Table, Value as LuaValue, Variadic};

use crate::config::WritePolicy;

/// Field name that yields the iteration function.
pub const FACTORY_FIELD: &str = "factory";

/// Native side of a proxy.
///
/// A resolver pairs the native object a proxy stands for with the lookups
/// Lua may perform on it.
pub trait Resolver: 'static {
    /// Resolve `proxy[key]`. Misses return nil.
    fn index(&self, lua: &Lua, key: LuaValue) -> mlua::Result<LuaValue>;

    /// Produce the entry at position `cursor`, or None past the end.
    fn entry(&self, lua: &Lua, cursor: usize) -> mlua::Result<Option<(LuaValue, LuaValue)>>;
}

/// Build a proxy table around `resolver`.
pub fn build_proxy<R: Resolver>(
    lua: &Lua,
    resolver: Rc<R>,
    policy: WritePolicy,
) -> mlua::Result<Table> {
    let pairs = pairs_function(lua, resolver.clone())?;

    let index = lua.create_function(move |lua, (proxy, key): (Table, LuaValue)| {
        if is_factory(&key) {
            return factory(&proxy);
        }
        resolver.index(lua, key)
    })?;

    let newindex = lua.create_function(
        move |_, (_, key, _): (Table, LuaValue, LuaValue)| match policy {
            WritePolicy::Discard => Ok(()),
            WritePolicy::Reject => Err(mlua::Error::RuntimeError(format!(
                "attempt to assign to read-only object data ({})",
                key.type_name()
            ))),
        },
    )?;

    let metatable = lua.create_table()?;
    metatable.set("__index", index)?;
    metatable.set("__newindex", newindex)?;
    metatable.set("__pairs", pairs)?;
    metatable.set("__metatable", false)?;

    let proxy = lua.create_table()?;
    proxy.set_metatable(Some(metatable));
    Ok(proxy)
}

/// The `__pairs` function: each call starts a fresh cursor at entry 0.
fn pairs_function<R: Resolver>(lua: &Lua, resolver: Rc<R>) -> mlua::Result<Function> {
    lua.create_function(move |lua, _: Variadic<LuaValue>| {
        let resolver = resolver.clone();
        let mut cursor = 0usize;
        let next = lua.create_function_mut(move |lua, _: Variadic<LuaValue>| {
            match resolver.entry(lua, cursor)? {
                Some((key, value)) => {
                    cursor += 1;
                    Ok((key, value))
                }
                None => Ok((LuaValue::Nil, LuaValue::Nil)),
            }
        })?;
        Ok((next, LuaValue::Nil, LuaValue::Nil))
    })
}

fn is_factory(key: &LuaValue) -> bool {
    match key {
        LuaValue::String(s) => &*s.as_bytes() == FACTORY_FIELD.as_bytes(),
        _ => false,
    }
}

/// Fetch the proxy's own `__pairs` function.
fn factory(proxy: &Table) -> mlua::Result<LuaValue> {
    match proxy.get_metatable() {
        Some(metatable) => metatable.raw_get("__pairs"),
        None => Ok(LuaValue::Nil),
    }
}
