//! entrywrap - container entrypoint wrapper
//!
//! Usage: `entrywrap <command> [args...]`. Every argument belongs to the
//! target command; the wrapper takes no flags of its own.

use console::{style, Term};
use entrywrap::bootstrap;
use entrywrap::config::ConfigManager;
use entrywrap::environment::Environment;
use entrywrap::error::WrapResult;
use entrywrap::sweep::DiskFs;
use std::env;
use std::ffi::OsString;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log filter directive, e.g. `entrywrap=debug`
const LOG_ENV: &str = "ENTRYWRAP_LOG";

/// `json` for JSON log lines, anything else for text
const LOG_FORMAT_ENV: &str = "ENTRYWRAP_LOG_FORMAT";

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").for_stderr().red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").for_stderr().yellow(), hint);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> WrapResult<ExitCode> {
    let argv: Vec<OsString> = env::args_os().skip(1).collect();

    let config = ConfigManager::new().load()?;
    bootstrap::run(&DiskFs, &config, Environment::from_process(), &argv)
}

// Logs go to stderr so the target's stdout stays untouched
fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("entrywrap=warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(Term::stderr().is_term())
        .with_target(false)
        .without_time();

    if env::var(LOG_FORMAT_ENV).is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}
