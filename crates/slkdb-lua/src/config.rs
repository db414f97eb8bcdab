//! Binding configuration.

/// Default named-registry key holding the manager handle.
pub const DEFAULT_REGISTRY_KEY: &str = "_JASS_SLK_MGR";

/// Default global name for the namespace table.
pub const DEFAULT_GLOBAL_NAME: &str = "slk";

/// Default `package.loaded` entry for the namespace table.
pub const DEFAULT_MODULE_NAME: &str = "jass.slk";

/// What a proxy does with `proxy[key] = value`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Accept the assignment and drop it.
    #[default]
    Discard,
    /// Raise a Lua runtime error.
    Reject,
}

/// Configuration for installing the binding into a Lua state.
#[derive(Debug, Clone)]
pub struct BindingConfig {
    /// Named-registry key for the manager handle.
    pub registry_key: String,

    /// Global to bind the namespace to. None leaves globals untouched.
    pub global_name: Option<String>,

    /// `package.loaded` entry for the namespace. None skips registration.
    pub module_name: Option<String>,

    /// Assignment behavior of every proxy.
    pub write_policy: WritePolicy,
}

impl BindingConfig {
    /// Create a configuration with default names.
    pub fn new() -> Self {
        Self {
            registry_key: DEFAULT_REGISTRY_KEY.to_string(),
            global_name: Some(DEFAULT_GLOBAL_NAME.to_string()),
            module_name: Some(DEFAULT_MODULE_NAME.to_string()),
            write_policy: WritePolicy::default(),
        }
    }

    /// Set the registry key.
    pub fn with_registry_key(mut self, key: impl Into<String>) -> Self {
        self.registry_key = key.into();
        self
    }

    /// Set the global name.
    pub fn with_global_name(mut self, name: impl Into<String>) -> Self {
        self.global_name = Some(name.into());
        self
    }

    /// Do not bind a global.
    pub fn without_global(mut self) -> Self {
        self.global_name = None;
        self
    }

    /// Set the module name.
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    /// Do not register in `package.loaded`.
    pub fn without_module(mut self) -> Self {
        self.module_name = None;
        self
    }

    /// Set the write policy.
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self::new()
    }
}
