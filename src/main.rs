//! influx-writer: InfluxDB line-protocol write agent
//!
//! Entry point for the influx-writer binary.

use std::path::Path;
use std::process::ExitCode;

use influx_writer::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match &cli.command {
        Some(Command::Init { output }) => write_template(output),
        None => match ValidatedConfig::load(&cli) {
            Ok(config) => start(config),
            Err(e) => {
                eprintln!("Configuration error: {e}");
                print_config_hint(&e);
                exit_code::CONFIG_ERROR
            }
        },
    }
}

/// Writes the configuration template for `init`.
fn write_template(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        eprintln!("Error: {e}");
        return exit_code::CONFIG_ERROR;
    }

    println!("Configuration template written to: {}", output.display());
    exit_code::SUCCESS
}

/// Sets up logging and drives the agent on a multi-threaded runtime.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn start(config: ValidatedConfig) -> ExitCode {
    setup_tracing(config.verbose);
    tracing::info!("{config}");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("Application error: {e}");
            exit_code::for_run_error(&e)
        }
    }
}
