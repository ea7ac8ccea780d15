//! entrywrap - container entrypoint wrapper
//!
//! Sweeps stale compiled bytecode from the application root, prepends the
//! virtualenv and application directories to `PATH` and `PYTHONPATH`, then
//! replaces itself with the given command.

pub mod bootstrap;
pub mod config;
pub mod environment;
pub mod error;
pub mod launch;
pub mod sweep;

pub use error::{WrapError, WrapResult};
