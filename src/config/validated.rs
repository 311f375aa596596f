//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the binary. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::writer::MissingVersion;

use super::cli::Cli;
use super::configuration::Configuration;
use super::defaults;
use super::error::ConfigError;
use super::options::AgentOptions;
use super::toml::TomlConfig;

/// How the agent is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Write immediately, then every interval until shutdown.
    #[default]
    Scheduled,
    /// Write once and exit.
    Once,
    /// Write once per JSON event read from stdin.
    Reactive,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scheduled => "scheduled",
            Self::Once => "once",
            Self::Reactive => "reactive",
        })
    }
}

/// Fully validated configuration ready for use by the binary.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Merged agent options, still unresolved
    pub options: AgentOptions,

    /// The merged options as validated at acceptance time
    pub configuration: Configuration,

    /// How the agent is triggered
    pub mode: RunMode,

    /// Interval between scheduled writes
    pub interval: Duration,

    /// Request timeout
    pub timeout: Duration,

    /// What the writer does without a configured version
    pub missing_version: MissingVersion,

    /// Dry-run mode (build and log requests without sending them)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing_version = match self.missing_version {
            MissingVersion::Skip => "skip",
            MissingVersion::AssumeV1 => "v1",
        };

        write!(
            f,
            "Config {{ url: {}, database: {}, influxdb_version: {}, mode: {}, interval: {}s, \
             timeout: {}s, missing_version: {}, dry_run: {} }}",
            self.configuration.url,
            self.configuration.database,
            self.configuration
                .api
                .as_ref()
                .map_or("unset", |api| api.as_str()),
            self.mode,
            self.interval.as_secs(),
            self.timeout.as_secs(),
            missing_version,
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values, which take
    /// precedence over [`AgentOptions::defaults`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The merged agent options fail validation
    /// - The run mode is unknown
    /// - Interval or timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let options = Self::merge_options(cli, toml);
        let configuration = Configuration::accept(&options)?;

        let mode = Self::resolve_mode(cli, toml)?;

        // Priority: CLI explicit > TOML > default
        let interval = positive_duration(
            "interval",
            cli.interval
                .or_else(|| toml.and_then(|t| t.schedule.interval))
                .unwrap_or(defaults::SCHEDULE_INTERVAL_SECS),
        )?;

        let timeout = positive_duration(
            "timeout",
            cli.timeout
                .or_else(|| toml.and_then(|t| t.http.timeout))
                .unwrap_or(defaults::REQUEST_TIMEOUT_SECS),
        )?;

        // Flags only enable
        let legacy_v1 = cli.legacy_v1 || toml.is_some_and(|t| t.writer.legacy_v1);
        let missing_version = if legacy_v1 {
            MissingVersion::AssumeV1
        } else {
            MissingVersion::Skip
        };

        let dry_run = cli.dry_run || toml.is_some_and(|t| t.writer.dry_run);

        Ok(Self {
            options,
            configuration,
            mode,
            interval,
            timeout,
            missing_version,
            dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn merge_options(cli: &Cli, toml: Option<&TomlConfig>) -> AgentOptions {
        let file = toml.map(|t| t.agent.clone()).unwrap_or_default();

        AgentOptions::defaults()
            .merge(file)
            .merge(cli.agent_options())
    }

    fn resolve_mode(cli: &Cli, toml: Option<&TomlConfig>) -> Result<RunMode, ConfigError> {
        if let Some(mode) = cli.mode {
            return Ok(mode.into());
        }

        match toml.and_then(|t| t.schedule.mode.as_deref()) {
            None => Ok(RunMode::default()),
            Some(mode) => parse_mode(mode),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_mode(s: &str) -> Result<RunMode, ConfigError> {
    match s {
        "scheduled" => Ok(RunMode::Scheduled),
        "once" => Ok(RunMode::Once),
        "reactive" => Ok(RunMode::Reactive),
        _ => Err(ConfigError::InvalidMode {
            value: s.to_string(),
        }),
    }
}

fn positive_duration(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(Duration::from_secs(seconds))
}
