//! Configuration layer for influx-writer.
//!
//! This module provides:
//! - The agent's stored options ([`AgentOptions`]) and their validated form ([`Configuration`])
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated binary configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the `[agent]`, `[schedule]`, `[http]` and `[writer]` tables
//! 3. **Built-in defaults** - [`AgentOptions::defaults`] and the constants in [`defaults`]
//!
//! Agent options are merged one by one, so a config file can hold the URL
//! while `--data` supplies the payload.
//!
//! # Boolean Flag Semantics
//!
//! Boolean flags (`--debug`, `--emit-events`, `--legacy-v1`, `--dry-run`) use OR semantics:
//! - If set `true` in either CLI or TOML, the result is `true`.
//! - Once set `true` in TOML, CLI cannot override to `false` (flags only enable, not disable).
//!
//! # Validation
//!
//! Agent options are validated twice: once when the agent is built, against
//! the stored text, and again on every invocation after placeholders have
//! been filled in. URL syntax is only checked when the request is built,
//! since a stored URL may itself be a template.

mod cli;
mod configuration;
pub mod defaults;
mod error;
mod options;
mod toml;
mod validated;

#[cfg(test)]
mod configuration_tests;
#[cfg(test)]
mod options_tests;

pub use cli::{Cli, Command, InfluxVersionArg, RunModeArg};
pub use configuration::{ApiVersion, Configuration};
pub use error::{ConfigError, field};
pub use options::AgentOptions;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{RunMode, ValidatedConfig, write_default_config};
