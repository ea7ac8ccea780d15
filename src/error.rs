//! Error types for entrywrap
//!
//! All fallible operations return `WrapResult<T>`. Sweep problems are not
//! errors at this level; see [`crate::sweep::SweepFailure`].

use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status when the target cannot be found or launched at all
pub const EXIT_NOT_FOUND: u8 = 127;

/// Exit status when the target exists but cannot be executed
pub const EXIT_NOT_EXECUTABLE: u8 = 126;

/// Result type alias for entrywrap operations
pub type WrapResult<T> = Result<T, WrapError>;

/// All errors that stop the bootstrap
#[derive(Error, Debug)]
pub enum WrapError {
    // Launch errors
    #[error("No command given. Usage: entrywrap <command> [args...]")]
    EmptyCommand,

    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    #[error("Command not executable: {command}: {source}")]
    NotExecutable {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl WrapError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Classify a failed exec/spawn of `command`
    pub fn launch(command: &OsStr, source: io::Error) -> Self {
        let command = command.to_string_lossy().into_owned();
        match source.kind() {
            io::ErrorKind::NotFound => Self::CommandNotFound { command },
            io::ErrorKind::PermissionDenied => Self::NotExecutable { command, source },
            _ => Self::Launch { command, source },
        }
    }

    /// Process exit status reported for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotExecutable { .. } => EXIT_NOT_EXECUTABLE,
            _ => EXIT_NOT_FOUND,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CommandNotFound { .. } => {
                Some("Check the command name and that its directory is on PATH")
            }
            Self::NotExecutable { .. } => Some("Run: chmod +x <command>"),
            Self::ConfigInvalid { .. } => {
                Some("Fix the file named by ENTRYWRAP_CONFIG or unset it")
            }
            _ => None,
        }
    }
}
