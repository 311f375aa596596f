//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::defaults;
use super::options::AgentOptions;

/// influx-writer: write line protocol to InfluxDB
///
/// Posts a line-protocol payload to an InfluxDB v1 or v2 write endpoint on a
/// schedule, once, or once per JSON event read from stdin.
#[derive(Debug, Parser)]
#[command(name = "influx-writer")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// InfluxDB base URL, e.g. http://influxdb:8086
    #[arg(long)]
    pub url: Option<String>,

    /// Database (v1) or bucket (v2) name
    #[arg(long)]
    pub database: Option<String>,

    /// Line-protocol payload
    #[arg(long)]
    pub data: Option<String>,

    /// InfluxDB write API version
    #[arg(long = "influxdb-version", value_enum)]
    pub influxdb_version: Option<InfluxVersionArg>,

    /// API token (v2)
    #[arg(long)]
    pub token: Option<String>,

    /// Organization (v2)
    #[arg(long)]
    pub org: Option<String>,

    /// Log the endpoint and the response body
    #[arg(long)]
    pub debug: bool,

    /// Print {"http_status": "<code>"} to stdout after every write
    #[arg(long = "emit-events")]
    pub emit_events: bool,

    /// Days without an emitted event before the agent counts as not working
    #[arg(long = "expected-receive-period", value_name = "DAYS")]
    pub expected_receive_period: Option<u32>,

    /// How the agent is triggered
    #[arg(long, value_enum)]
    pub mode: Option<RunModeArg>,

    /// Seconds between scheduled writes
    #[arg(long)]
    pub interval: Option<u64>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Write through the v1 API when no version is configured
    #[arg(long = "legacy-v1")]
    pub legacy_v1: bool,

    /// Build and log requests without sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for influx-writer
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

/// InfluxDB version argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InfluxVersionArg {
    /// `/write?db=...`
    #[value(name = "v1")]
    V1,
    /// `/api/v2/write?org=...&bucket=...`
    #[value(name = "v2")]
    V2,
}

impl InfluxVersionArg {
    /// Returns the option value for this version.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

/// Run mode argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunModeArg {
    /// Write now and then every interval
    Scheduled,
    /// Write once and exit
    Once,
    /// Write once per JSON event read from stdin
    Reactive,
}

impl From<RunModeArg> for super::RunMode {
    fn from(arg: RunModeArg) -> Self {
        match arg {
            RunModeArg::Scheduled => Self::Scheduled,
            RunModeArg::Once => Self::Once,
            RunModeArg::Reactive => Self::Reactive,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Returns the agent options given on the command line.
    ///
    /// Boolean flags only ever turn an option on; leaving a flag off keeps
    /// whatever the config file says.
    #[must_use]
    pub fn agent_options(&self) -> AgentOptions {
        let flag = |set: bool| set.then(|| "true".to_string());

        AgentOptions {
            url: self.url.clone(),
            database: self.database.clone(),
            data: self.data.clone(),
            influxdb_version: self.influxdb_version.map(|v| v.as_str().to_string()),
            token: self.token.clone(),
            org: self.org.clone(),
            debug: flag(self.debug),
            emit_events: flag(self.emit_events),
            expected_receive_period_in_days: self.expected_receive_period.map(|d| d.to_string()),
        }
    }
}
