//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use influx_writer::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid options, missing required fields, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - a failed write in `once` mode, unreadable stdin, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Exit code for a failed run: rejected options are a configuration
    /// error, everything else happened at runtime.
    pub fn for_run_error(error: &crate::run::RunError) -> ExitCode {
        match error {
            crate::run::RunError::Agent(_) => CONFIG_ERROR,
            crate::run::RunError::Write(e) if e.is_config() => CONFIG_ERROR,
            crate::run::RunError::Write(_) | crate::run::RunError::Stdin(_) => runtime_error(),
        }
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f } => {
            if [field::URL, field::DATABASE, field::DATA].contains(f) {
                eprintln!("\nRun 'influx-writer init' to generate a configuration template.");
            } else if *f == field::TOKEN || *f == field::ORG {
                eprintln!("\nThe v2 write API needs both --token and --org.");
            }
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'influx-writer init' to generate a configuration template.");
        }
        ConfigError::InvalidVersion { .. } => {
            eprintln!("\nUse --influxdb-version v1 or v2, or leave it unset together with --legacy-v1.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr; stdout is reserved for emitted events.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
