//! The bootstrap sequence: sweep, configure, exec
//!
//! Each step completes before the next starts and none is revisited.

use crate::config::Config;
use crate::environment::{self, Environment};
use crate::error::{WrapError, WrapResult};
use crate::launch;
use crate::sweep::{self, CacheFs, StaleArtifacts};
use std::ffi::OsString;
use std::process::ExitCode;
use tracing::{debug, info};

/// Sweep the application root, then return the environment for the target
pub fn prepare<F: CacheFs + ?Sized>(fs: &F, config: &Config, mut env: Environment) -> Environment {
    let matcher = StaleArtifacts::new(config.sweep.suffixes.iter().cloned());
    let report = sweep::sweep(fs, &config.sweep.root, &matcher);
    if !report.is_clean() {
        info!(
            "Cache sweep of {} finished with {} failures",
            config.sweep.root.display(),
            report.failures.len()
        );
    }

    environment::configure(&mut env, &config.search_path);
    env
}

/// Run the full bootstrap and hand off to `argv`
///
/// An empty `argv` fails before anything is touched.
pub fn run<F: CacheFs + ?Sized>(
    fs: &F,
    config: &Config,
    env: Environment,
    argv: &[OsString],
) -> WrapResult<ExitCode> {
    if argv.is_empty() {
        return Err(WrapError::EmptyCommand);
    }

    debug!("Bootstrapping {:?}", argv);
    let env = prepare(fs, config, env);
    launch::launch(argv, &env)
}
