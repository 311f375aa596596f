//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;
use super::options::AgentOptions;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// The agent's options
    #[serde(default)]
    pub agent: AgentOptions,

    /// When the agent runs
    #[serde(default)]
    pub schedule: ScheduleSection,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSection,

    /// Writer behavior
    #[serde(default)]
    pub writer: WriterSection,
}

/// Scheduling configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleSection {
    /// Run mode: "scheduled", "once" or "reactive"
    pub mode: Option<String>,

    /// Seconds between scheduled writes
    pub interval: Option<u64>,
}

/// HTTP client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Writer configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriterSection {
    /// Write through the v1 API when `influxdb_version` is unset
    #[serde(default)]
    pub legacy_v1: bool,

    /// Build and log requests without sending them
    #[serde(default)]
    pub dry_run: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# influx-writer configuration file

[agent]
# InfluxDB base URL (required), e.g. http://influxdb:8086
url = ""

# Database name for v1, bucket name for v2 (required)
database = ""

# Line-protocol payload, the equivalent of curl's --data-binary (required).
# In reactive mode, {{field}} placeholders are filled from each incoming event.
# data = "campaigns_number,region=fr value=1111 1603573200000000000"
data = ""

# "v1", "v2", or leave unset. When unset, nothing is written unless
# [writer] legacy_v1 is enabled.
# influxdb_version = "v2"

# Required for v2
# token = "your-token-here"
# org = "your-org"

# Log the endpoint and the response body
debug = false

# Print {"http_status": "<code>"} to stdout after every write
emit_events = false

# Days that may pass without an emitted event before the agent counts as not working
expected_receive_period_in_days = 2

[schedule]
# "scheduled" (write every interval), "once" (write and exit),
# or "reactive" (one write per JSON event read from stdin)
mode = "scheduled"

# Seconds between scheduled writes (default: 3600)
interval = 3600

[http]
# Request timeout in seconds (default: 30)
# timeout = 30

[writer]
# Write through the v1 API when influxdb_version is unset
# legacy_v1 = false

# Build and log requests without sending them
# dry_run = false
"#
    .to_string()
}
