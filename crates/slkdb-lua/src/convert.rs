//! Field value to Lua conversion.
//!
//! Both `record[name]` and iteration go through [`to_lua`], so the two
//! paths always agree.

use mlua::{Lua, Value as LuaValue};
use slkdb_core::Value;

/// Convert a field value to a Lua string.
pub fn to_lua(lua: &Lua, value: &Value) -> mlua::Result<LuaValue> {
    let s = match value {
        Value::String(s) => lua.create_string(s.as_bytes())?,
        Value::Bytes(b) => lua.create_string(b)?,
        Value::ObjectId(id) => lua.create_string(id.to_string())?,
    };
    Ok(LuaValue::String(s))
}

/// Convert an optional field value; absent becomes nil.
pub fn optional_to_lua(lua: &Lua, value: Option<&Value>) -> mlua::Result<LuaValue> {
    match value {
        Some(value) => to_lua(lua, value),
        None => Ok(LuaValue::Nil),
    }
}
