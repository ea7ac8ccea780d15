//! Search path configuration
//!
//! The process environment is captured once into an [`Environment`] value,
//! edited here, and handed whole to the launcher.

use crate::config::SearchPathConfig;
use std::collections::BTreeMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use tracing::debug;

/// Executable search path variable
pub const PATH_VAR: &str = "PATH";

/// Platform path-list delimiter
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: &str = ":";

/// `dir` placed in front of `existing`
///
/// An absent or empty `existing` yields `dir` alone. Otherwise `existing`
/// follows the delimiter verbatim: not split, deduplicated or normalized.
pub fn prepend_search_path(dir: &OsStr, existing: Option<&OsStr>) -> OsString {
    let mut value = dir.to_os_string();
    if let Some(existing) = existing.filter(|v| !v.is_empty()) {
        value.push(PATH_LIST_SEPARATOR);
        value.push(existing);
    }
    value
}

/// Environment handed to the target program
///
/// Keys compare case-insensitively on Windows, where the inherited search
/// path is usually spelled `Path`. An existing key keeps its spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<OsString, OsString>,
    fold_case: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            vars: BTreeMap::new(),
            fold_case: cfg!(windows),
        }
    }
}

impl Environment {
    /// Snapshot of this process's environment
    pub fn from_process() -> Self {
        env::vars_os().collect()
    }

    #[cfg(test)]
    fn with_case_folding(mut self, fold_case: bool) -> Self {
        self.fold_case = fold_case;
        self
    }

    /// The stored spelling of `key`, if present
    fn stored_key(&self, key: &OsStr) -> Option<&OsString> {
        if self.fold_case {
            self.vars.keys().find(|k| k.eq_ignore_ascii_case(key))
        } else {
            self.vars.get_key_value(key).map(|(k, _)| k)
        }
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = self.stored_key(key.as_ref())?;
        self.vars.get(key).map(OsString::as_os_str)
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        let key = key.into();
        let key = self.stored_key(&key).cloned().unwrap_or(key);
        self.vars.insert(key, value.into());
    }

    /// Put `dir` at the front of the search path in `key`
    pub fn prepend(&mut self, key: &str, dir: &Path) {
        let value = prepend_search_path(dir.as_os_str(), self.get(key));
        debug!("{}={}", key, value.to_string_lossy());
        self.set(key, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::default();
        for (k, v) in iter {
            env.set(k, v);
        }
        env
    }
}

/// Prepend the executable and module directories
pub fn configure(env: &mut Environment, search_path: &SearchPathConfig) {
    env.prepend(PATH_VAR, &search_path.bin_dir);
    env.prepend(&search_path.module_var, &search_path.module_dir);
}
