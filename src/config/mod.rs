//! Configuration management for entrywrap
//!
//! Defaults, then the TOML file, then `ENTRYWRAP_*` environment overrides.

pub mod schema;

pub use schema::{Config, SearchPathConfig, SweepConfig};

use crate::error::{WrapError, WrapResult};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "ENTRYWRAP_CONFIG";

// Overrides, applied after the config file
pub const ROOT_ENV: &str = "ENTRYWRAP_ROOT";
pub const SUFFIXES_ENV: &str = "ENTRYWRAP_SUFFIXES";
pub const BIN_DIR_ENV: &str = "ENTRYWRAP_BIN_DIR";
pub const MODULE_DIR_ENV: &str = "ENTRYWRAP_MODULE_DIR";
pub const MODULE_VAR_ENV: &str = "ENTRYWRAP_MODULE_VAR";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a config manager using `ENTRYWRAP_CONFIG` or the default path
    pub fn new() -> Self {
        let config_path = env::var_os(CONFIG_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);
        Self { config_path }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("entrywrap")
            .join("config.toml")
    }

    /// Load the file (if any) and apply overrides from the process environment
    pub fn load(&self) -> WrapResult<Config> {
        self.load_with(|key| env::var_os(key))
    }

    /// Load the file (if any) and apply overrides from `lookup`
    pub fn load_with<F>(&self, lookup: F) -> WrapResult<Config>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let invalid = |reason: String| WrapError::ConfigInvalid {
            path: self.config_path.clone(),
            reason,
        };

        let mut config = self.load_file()?;
        apply_overrides(&mut config, lookup).map_err(invalid)?;
        validate(&config).map_err(invalid)?;
        Ok(config)
    }

    /// Load the config file alone, defaulting when it does not exist
    pub fn load_file(&self) -> WrapResult<Config> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "Config file {} not found, using defaults",
                    self.config_path.display()
                );
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(WrapError::io(
                    format!("reading config from {}", self.config_path.display()),
                    e,
                ))
            }
        };

        debug!("Loaded config from {}", self.config_path.display());
        toml::from_str(&content).map_err(|e| WrapError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: e.to_string(),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `ENTRYWRAP_*` overrides; empty values are ignored
///
/// Directory overrides are taken as raw OS strings. Suffixes and the
/// variable name must be UTF-8.
fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), String>
where
    F: Fn(&str) -> Option<OsString>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let get_utf8 = |key: &str| {
        get(key)
            .map(|v| {
                v.into_string()
                    .map_err(|v| format!("{} is not valid UTF-8: {:?}", key, v))
            })
            .transpose()
    };

    if let Some(root) = get(ROOT_ENV) {
        config.sweep.root = PathBuf::from(root);
    }
    if let Some(suffixes) = get_utf8(SUFFIXES_ENV)? {
        config.sweep.suffixes = suffixes
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();
    }
    if let Some(dir) = get(BIN_DIR_ENV) {
        config.search_path.bin_dir = PathBuf::from(dir);
    }
    if let Some(dir) = get(MODULE_DIR_ENV) {
        config.search_path.module_dir = PathBuf::from(dir);
    }
    if let Some(var) = get_utf8(MODULE_VAR_ENV)? {
        config.search_path.module_var = var;
    }

    Ok(())
}

fn validate(config: &Config) -> Result<(), String> {
    if config.sweep.suffixes.is_empty() {
        return Err("sweep.suffixes must name at least one suffix".to_string());
    }
    if config.sweep.suffixes.iter().any(|s| s.is_empty()) {
        return Err(
            "sweep.suffixes contains an empty suffix, which would match every file".to_string(),
        );
    }

    let var = &config.search_path.module_var;
    if var.is_empty() || var.contains('=') || var.contains('\0') {
        return Err(format!(
            "search_path.module_var is not a valid variable name: {:?}",
            var
        ));
    }

    Ok(())
}
