//! Hand-off to the target program
//!
//! On Unix the wrapper's process image is replaced via `execvp`, so the
//! target keeps our pid, stdio and signal dispositions and its exit status
//! is ours. Elsewhere the target runs as a child with inherited stdio and
//! its exit status is propagated.

use crate::environment::Environment;
use crate::error::{WrapError, WrapResult};
use std::ffi::{OsStr, OsString};
use std::process::{Command, ExitCode};
use tracing::debug;

/// Run `argv` with exactly the variables in `env`
///
/// `argv[0]` is resolved against the `PATH` in `env`. On Unix this only
/// returns on failure.
pub fn launch(argv: &[OsString], env: &Environment) -> WrapResult<ExitCode> {
    let (program, args) = argv.split_first().ok_or(WrapError::EmptyCommand)?;

    let mut command = Command::new(program);
    command.args(args).env_clear().envs(env.iter());

    debug!("Launching {:?}", argv);
    replace_image(command, program)
}

#[cfg(unix)]
fn replace_image(mut command: Command, program: &OsStr) -> WrapResult<ExitCode> {
    use std::os::unix::process::CommandExt;

    let err = command.exec();
    Err(WrapError::launch(program, err))
}

#[cfg(not(unix))]
fn replace_image(mut command: Command, program: &OsStr) -> WrapResult<ExitCode> {
    let status = command
        .status()
        .map_err(|e| WrapError::launch(program, e))?;

    let code = status.code().unwrap_or(1);
    debug!("{} exited with {}", program.to_string_lossy(), code);
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
