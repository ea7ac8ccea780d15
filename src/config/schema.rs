//! Configuration schema for entrywrap
//!
//! Configuration is read from `~/.config/entrywrap/config.toml` (or the file
//! named by `ENTRYWRAP_CONFIG`). Every field has a default, so an absent file
//! and an empty file behave the same.

use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stale bytecode sweep settings
    pub sweep: SweepConfig,

    /// Search path settings
    pub search_path: SearchPathConfig,
}

/// Stale bytecode sweep settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Application root swept recursively
    pub root: PathBuf,

    /// File name suffixes marking stale compiled artifacts
    pub suffixes: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/app"),
            suffixes: vec![".pyc".to_string()],
        }
    }
}

/// Search path settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchPathConfig {
    /// Directory prepended to `PATH`
    pub bin_dir: PathBuf,

    /// Directory prepended to the module search variable
    pub module_dir: PathBuf,

    /// Name of the interpreter's module search variable
    pub module_var: String,
}

impl Default for SearchPathConfig {
    fn default() -> Self {
        Self {
            bin_dir: PathBuf::from("/venv/bin"),
            module_dir: PathBuf::from("/app"),
            module_var: "PYTHONPATH".to_string(),
        }
    }
}
