//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Raised before any network call is attempted: either while the agent's
/// options are accepted, or while they are re-validated for an invocation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A required option is absent or blank.
    #[error("{field} is a required field")]
    MissingRequired {
        /// Name of the missing option
        field: &'static str,
    },

    /// The InfluxDB base URL is not an absolute http(s) URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// `influxdb_version` is set to something other than `v1` or `v2`.
    #[error("Invalid influxdb_version '{value}': expected v1 or v2")]
    InvalidVersion {
        /// The invalid value provided
        value: String,
    },

    /// A boolean option holds something other than `true` or `false`.
    #[error("if provided, {field} must be true or false (got '{value}')")]
    InvalidBoolean {
        /// Name of the option
        field: &'static str,
        /// The invalid value provided
        value: String,
    },

    /// `expected_receive_period_in_days` is not a positive integer.
    #[error(
        "Please provide 'expected_receive_period_in_days' to indicate how many days can pass \
         before this Agent is considered to be not working (got '{value}')"
    )]
    InvalidReceivePeriod {
        /// The invalid value provided
        value: String,
    },

    /// A value cannot be sent as an HTTP header.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// An option template failed to render against the triggering event.
    #[error("Invalid template in {field}: {reason}")]
    InvalidTemplate {
        /// Name of the option holding the template
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// `[schedule] mode` names no known run mode.
    #[error("Invalid run mode '{value}': expected scheduled, once or reactive")]
    InvalidMode {
        /// The invalid value provided
        value: String,
    },

    /// Invalid duration value (zero).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Option names used in [`ConfigError`] variants.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// InfluxDB base URL.
    pub const URL: &str = "url";
    /// Database (v1) or bucket (v2) name.
    pub const DATABASE: &str = "database";
    /// Line-protocol payload.
    pub const DATA: &str = "data";
    /// API version selector.
    pub const INFLUXDB_VERSION: &str = "influxdb_version";
    /// v2 API token.
    pub const TOKEN: &str = "token";
    /// v2 organization.
    pub const ORG: &str = "org";
    /// Verbose diagnostics flag.
    pub const DEBUG: &str = "debug";
    /// Event emission flag.
    pub const EMIT_EVENTS: &str = "emit_events";
    /// Health-check receive period.
    pub const EXPECTED_RECEIVE_PERIOD: &str = "expected_receive_period_in_days";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required option.
    #[must_use]
    pub const fn missing(field: &'static str) -> Self {
        Self::MissingRequired { field }
    }
}
