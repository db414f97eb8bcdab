//! Resolvers for category and record proxies.
//!
//! Resolvers never hold references into a record set. A record proxy is
//! addressed by `(category, slot)` and looked up again on every access, so
//! once the manager is finalized every proxy quietly resolves to nil.

use std::rc::Rc;

use mlua::{Lua, Value as LuaValue};
use slkdb_core::{Category, Value};
use tracing::trace;

use crate::config::WritePolicy;
use crate::convert;
use crate::key;
use crate::lifecycle::ManagerSlot;
use crate::proxy::{build_proxy, Resolver};

/// Address of one record inside a loaded category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordKey {
    pub category: Category,
    pub slot: usize,
}

/// Resolves `slk.<category>[id]` and iterates a category.
#[derive(Debug)]
pub struct CategoryResolver {
    manager: Rc<ManagerSlot>,
    category: Category,
    policy: WritePolicy,
}

impl CategoryResolver {
    pub fn new(manager: Rc<ManagerSlot>, category: Category, policy: WritePolicy) -> Self {
        Self {
            manager,
            category,
            policy,
        }
    }

    fn record_proxy(&self, lua: &Lua, slot: usize) -> mlua::Result<LuaValue> {
        let resolver = RecordResolver::new(
            self.manager.clone(),
            RecordKey {
                category: self.category,
                slot,
            },
        );
        let proxy = build_proxy(lua, Rc::new(resolver), self.policy)?;
        Ok(LuaValue::Table(proxy))
    }
}

impl Resolver for CategoryResolver {
    fn index(&self, lua: &Lua, key: LuaValue) -> mlua::Result<LuaValue> {
        let Some(id) = key::object_id(&key) else {
            return Ok(LuaValue::Nil);
        };

        // Load failures are logged by the manager and read as a miss.
        let slot = self
            .manager
            .with(|m| {
                m.load(self.category)
                    .ok()
                    .and_then(|set| set.get_full(&id).map(|(slot, _)| slot))
            })
            .flatten();

        match slot {
            Some(slot) => self.record_proxy(lua, slot),
            None => {
                trace!(category = %self.category, %id, "object not found");
                Ok(LuaValue::Nil)
            }
        }
    }

    fn entry(&self, lua: &Lua, cursor: usize) -> mlua::Result<Option<(LuaValue, LuaValue)>> {
        let id = self
            .manager
            .with(|m| {
                m.load(self.category)
                    .ok()
                    .and_then(|set| set.get_index(cursor).map(|(id, _)| id.to_string()))
            })
            .flatten();

        match id {
            Some(id) => {
                let key = LuaValue::String(lua.create_string(id)?);
                Ok(Some((key, self.record_proxy(lua, cursor)?)))
            }
            None => Ok(None),
        }
    }
}

/// Resolves `record[field]` and iterates a record's fields.
#[derive(Debug)]
pub struct RecordResolver {
    manager: Rc<ManagerSlot>,
    key: RecordKey,
}

impl RecordResolver {
    pub fn new(manager: Rc<ManagerSlot>, key: RecordKey) -> Self {
        Self { manager, key }
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.manager
            .with(|m| {
                let set = m.cached(self.key.category)?;
                let (_, record) = set.get_index(self.key.slot)?;
                record.get(name).cloned()
            })
            .flatten()
    }

    fn field_at(&self, cursor: usize) -> Option<(String, Value)> {
        self.manager
            .with(|m| {
                let set = m.cached(self.key.category)?;
                let (_, record) = set.get_index(self.key.slot)?;
                record
                    .get_index(cursor)
                    .map(|(name, value)| (name.to_string(), value.clone()))
            })
            .flatten()
    }
}

impl Resolver for RecordResolver {
    fn index(&self, lua: &Lua, key: LuaValue) -> mlua::Result<LuaValue> {
        let Some(name) = key::field_name(lua, &key)? else {
            return Ok(LuaValue::Nil);
        };
        convert::optional_to_lua(lua, self.field(&name).as_ref())
    }

    fn entry(&self, lua: &Lua, cursor: usize) -> mlua::Result<Option<(LuaValue, LuaValue)>> {
        match self.field_at(cursor) {
            Some((name, value)) => {
                let key = LuaValue::String(lua.create_string(name)?);
                Ok(Some((key, convert::to_lua(lua, &value)?)))
            }
            None => Ok(None),
        }
    }
}
