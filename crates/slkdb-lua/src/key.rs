//! Lua key resolution.

use mlua::{Lua, Value as LuaValue};
use slkdb_core::ObjectId;

/// Resolve a category-level key to an object identifier.
///
/// Strings become aliases with their exact contents; numbers are truncated
/// to an unsigned 32-bit ordinal. Any other kind (and non-UTF-8 strings)
/// resolves to nothing.
pub fn object_id(key: &LuaValue) -> Option<ObjectId> {
    match key {
        LuaValue::String(s) => s.to_str().ok().map(|s| ObjectId::alias(s.to_string())),
        LuaValue::Integer(n) => Some(ObjectId::Ordinal(*n as u32)),
        LuaValue::Number(n) => Some(ObjectId::Ordinal(n.trunc() as i64 as u32)),
        _ => None,
    }
}

/// Resolve a record-level key to a field name.
///
/// Strings are used as is and numbers go through Lua's own number to
/// string coercion, so `record[1]` looks up the field named `"1"`.
pub fn field_name(lua: &Lua, key: &LuaValue) -> mlua::Result<Option<String>> {
    match key {
        LuaValue::String(s) => Ok(s.to_str().ok().map(|s| s.to_string())),
        LuaValue::Integer(_) | LuaValue::Number(_) => Ok(lua
            .coerce_string(key.clone())?
            .and_then(|s| s.to_str().ok().map(|s| s.to_string()))),
        _ => Ok(None),
    }
}
