//! Configuration management for ninja-vscode.
//!
//! This module defines the structure of the optional `ninja-vscode.toml` file
//! and provides functionality to load and parse it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// File name looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ninja-vscode.toml";

/// Top-level configuration structure corresponding to `ninja-vscode.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Ninja build directory to query.
    pub build_path: Option<String>,
    /// Directory receiving `tasks.json` and `launch.json`.
    pub output_path: Option<String>,
    /// Build tool executable used for the target query.
    pub ninja: Option<String>,
}

/// Loads and parses the configuration from a file path.
pub fn load_config(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}
