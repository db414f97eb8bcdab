//! Ties the manager's lifetime to the Lua state.
//!
//! The manager lives in a [`ManagerSlot`] shared by every proxy resolver.
//! The Lua state owns the slot through a [`ManagerHandle`] userdata kept in
//! the named registry; when Lua finalizes that userdata (garbage collection
//! or state teardown) the slot is emptied and the manager dropped. Emptying
//! an already empty slot does nothing, so the manager is dropped exactly
//! once however many times finalization is requested.
//!
//! Proxies that outlive the manager resolve every lookup to nil.

use std::cell::RefCell;
use std::rc::Rc;

use mlua::{AnyUserData, Lua, UserData, UserDataFields, UserDataMethods};
use slkdb_core::RecordStoreManager;
use tracing::debug;

/// Shared, finalizable home of the manager.
#[derive(Debug)]
pub struct ManagerSlot {
    manager: RefCell<Option<RecordStoreManager>>,
}

impl ManagerSlot {
    /// Create a slot holding `manager`.
    pub fn new(manager: RecordStoreManager) -> Self {
        Self {
            manager: RefCell::new(Some(manager)),
        }
    }

    /// Run `f` against the manager, if it is still alive.
    ///
    /// `f` must not call back into Lua.
    pub fn with<R>(&self, f: impl FnOnce(&RecordStoreManager) -> R) -> Option<R> {
        let guard = self.manager.try_borrow().ok()?;
        guard.as_ref().map(f)
    }

    /// Check if the manager is still alive.
    pub fn is_alive(&self) -> bool {
        self.manager
            .try_borrow()
            .map(|m| m.is_some())
            .unwrap_or(true)
    }

    /// Drop the manager. Returns false if it was already gone.
    pub fn finalize(&self) -> bool {
        let taken = match self.manager.try_borrow_mut() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        match taken {
            Some(manager) => {
                debug!(loaded = ?manager.loaded_categories(), "finalizing record store manager");
                drop(manager);
                true
            }
            None => false,
        }
    }
}

/// Lua userdata owning the manager slot.
#[derive(Debug)]
pub struct ManagerHandle {
    slot: Rc<ManagerSlot>,
}

impl ManagerHandle {
    /// Wrap a slot.
    pub fn new(slot: Rc<ManagerSlot>) -> Self {
        Self { slot }
    }

    /// Get the slot.
    pub fn slot(&self) -> &Rc<ManagerSlot> {
        &self.slot
    }
}

impl Drop for ManagerHandle {
    fn drop(&mut self) {
        self.slot.finalize();
    }
}

impl UserData for ManagerHandle {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("alive", |_, this| Ok(this.slot.is_alive()));
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("finalize", |_, this, ()| Ok(this.slot.finalize()));

        methods.add_method("loaded", |lua, this, ()| {
            let names = this
                .slot
                .with(|m| {
                    m.loaded_categories()
                        .into_iter()
                        .map(|c| c.name())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            lua.create_sequence_from(names)
        });
    }
}

/// Move `manager` into the Lua state under the named-registry `key`.
///
/// Returns the slot for resolvers to share.
pub fn create(lua: &Lua, manager: RecordStoreManager, key: &str) -> mlua::Result<Rc<ManagerSlot>> {
    let slot = Rc::new(ManagerSlot::new(manager));
    let handle = lua.create_userdata(ManagerHandle::new(slot.clone()))?;
    lua.set_named_registry_value(key, handle)?;
    debug!(key, "installed record store manager");
    Ok(slot)
}

/// Get the handle stored under `key`.
pub fn get(lua: &Lua, key: &str) -> mlua::Result<AnyUserData> {
    lua.named_registry_value::<AnyUserData>(key)
}

/// Finalize the manager stored under `key`.
///
/// Returns false if it was already finalized.
pub fn finalize(lua: &Lua, key: &str) -> mlua::Result<bool> {
    let handle = get(lua, key)?;
    let handle = handle.borrow::<ManagerHandle>()?;
    Ok(handle.slot().finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlua::ObjectLike;
    use slkdb_core::{Category, MemorySource, SourceLayout};

    fn manager() -> RecordStoreManager {
        let source = MemorySource::new().with_file("Units\\MiscData.txt", "[Misc]\nA=1\n");
        RecordStoreManager::with_layout(Rc::new(source), SourceLayout::default())
    }

    #[test]
    fn test_slot_finalize_once() {
        let slot = ManagerSlot::new(manager());
        assert!(slot.is_alive());
        assert!(slot.finalize());
        assert!(!slot.finalize());
        assert!(!slot.is_alive());
        assert!(slot.with(|_| ()).is_none());
    }

    #[test]
    fn test_handle_drop_finalizes() {
        let slot = Rc::new(ManagerSlot::new(manager()));
        let handle = ManagerHandle::new(slot.clone());
        drop(handle);
        assert!(!slot.is_alive());
    }

    #[test]
    fn test_registry_roundtrip() {
        let lua = Lua::new();
        let slot = create(&lua, manager(), "_TEST_MGR").unwrap();
        slot.with(|m| m.load(Category::Misc).unwrap()).unwrap();

        let handle = get(&lua, "_TEST_MGR").unwrap();
        lua.globals().set("handle", handle.clone()).unwrap();
        assert!(lua.load("return handle.alive").eval::<bool>().unwrap());
        let loaded: Vec<String> = handle.call_method("loaded", ()).unwrap();
        assert_eq!(loaded, vec!["misc".to_string()]);

        assert!(finalize(&lua, "_TEST_MGR").unwrap());
        assert!(!finalize(&lua, "_TEST_MGR").unwrap());
        assert!(!handle.call_method::<bool>("finalize", ()).unwrap());
        assert!(!lua.load("return handle.alive").eval::<bool>().unwrap());
    }
}
