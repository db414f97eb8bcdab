//! Host configuration.

use std::path::PathBuf;

use clap::Parser;
use slkdb_lua::{BindingConfig, WritePolicy};

use crate::error::{Error, Result};

/// Default archive directory.
pub const DEFAULT_ARCHIVE_PATH: &str = ".";

/// What to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    /// A Lua file.
    File(PathBuf),
    /// An inline chunk.
    Chunk(String),
}

/// Host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Directory acting as the archive.
    pub archive: PathBuf,

    /// JSON layout overlaid on the stock layout.
    pub layout: Option<PathBuf>,

    /// Binding options.
    pub binding: BindingConfig,

    /// Script to run.
    pub script: Script,
}

impl HostConfig {
    /// Create a configuration running `script` against the archive at `archive`.
    pub fn new(archive: impl Into<PathBuf>, script: Script) -> Self {
        Self {
            archive: archive.into(),
            layout: None,
            binding: BindingConfig::default(),
            script,
        }
    }

    /// Set the layout override file.
    pub fn with_layout(mut self, path: impl Into<PathBuf>) -> Self {
        self.layout = Some(path.into());
        self
    }

    /// Set the binding options.
    pub fn with_binding(mut self, binding: BindingConfig) -> Self {
        self.binding = binding;
        self
    }
}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "slkdb")]
#[command(version, about = "Run Lua scripts against Warcraft III object data", long_about = None)]
pub struct Args {
    /// Directory holding the extracted archive.
    #[arg(short, long, default_value = DEFAULT_ARCHIVE_PATH)]
    pub archive: PathBuf,

    /// JSON file overriding the tables read per category.
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Global name for the object data namespace.
    #[arg(long, default_value = slkdb_lua::config::DEFAULT_GLOBAL_NAME)]
    pub global: String,

    /// Raise an error on assignment instead of ignoring it.
    #[arg(long)]
    pub reject_writes: bool,

    /// Execute a chunk and exit.
    #[arg(short = 'e', long = "execute", conflicts_with = "script")]
    pub chunk: Option<String>,

    /// Lua script to run.
    pub script: Option<PathBuf>,
}

impl Args {
    /// Convert command-line arguments to host configuration.
    pub fn into_config(self) -> Result<HostConfig> {
        let script = match (self.chunk, self.script) {
            (Some(chunk), _) => Script::Chunk(chunk),
            (None, Some(path)) => Script::File(path),
            (None, None) => {
                return Err(Error::Config(
                    "expected a script path or -e <chunk>".to_string(),
                ))
            }
        };

        let policy = if self.reject_writes {
            WritePolicy::Reject
        } else {
            WritePolicy::Discard
        };
        let binding = BindingConfig::new()
            .with_global_name(self.global)
            .with_write_policy(policy);

        let mut config = HostConfig::new(self.archive, script).with_binding(binding);
        config.layout = self.layout;
        Ok(config)
    }
}
