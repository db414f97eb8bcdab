//! SLKDB CLI - Run Lua scripts against an extracted Warcraft III archive.

pub mod config;
pub mod error;
pub mod host;

pub use config::{Args, HostConfig, Script};
pub use error::{Error, Result};
pub use host::{load_layout, open_state, run};
