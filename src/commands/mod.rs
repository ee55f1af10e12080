//! Command handlers for the scanswitch CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod config;
pub mod play;

use anyhow::Result;
use std::path::Path;

use scanswitch::Config;

/// Load the configuration from an explicit path, or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
