//! Validated per-invocation configuration.

use std::fmt;
use std::num::NonZeroU32;

use super::defaults;
use super::error::{ConfigError, field};
use super::options::AgentOptions;

/// InfluxDB write API selected by `influxdb_version`.
///
/// The v2 variant carries the credentials only it needs, so a v2 target
/// without a token or organization cannot be constructed.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiVersion {
    /// `POST {url}/write?db={database}`
    V1,
    /// `POST {url}/api/v2/write?org={org}&bucket={database}&precision=ns`
    V2 {
        /// Organization name
        org: String,
        /// API token, sent as `Authorization: token {token}`
        token: String,
    },
}

impl ApiVersion {
    /// Returns the option value that selects this version.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 { .. } => "v2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Hand-written so the token never reaches a log line.
impl fmt::Debug for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("V1"),
            Self::V2 { org, .. } => f
                .debug_struct("V2")
                .field("org", org)
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// A configuration that passed validation.
///
/// Built from [`AgentOptions`] after the host has resolved any templates
/// against the triggering event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// InfluxDB base URL, used verbatim as the endpoint prefix.
    ///
    /// Only checked for presence here; the writer rejects a target that is
    /// not an absolute http(s) URL when it builds the request.
    pub url: String,

    /// Database (v1) or bucket (v2) name
    pub database: String,

    /// Line-protocol payload, sent verbatim
    pub data: String,

    /// Selected API, or `None` when `influxdb_version` is absent or empty
    pub api: Option<ApiVersion>,

    /// Log the endpoint and the response body
    pub debug: bool,

    /// Emit `{"http_status": ...}` after each response
    pub emit_events: bool,

    /// Health-check receive period; only enforced by [`Configuration::accept`]
    pub expected_receive_period_in_days: NonZeroU32,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Configuration {{ url: {}, database: {}, influxdb_version: {}, debug: {}, \
             emit_events: {}, expected_receive_period: {}d }}",
            self.url,
            self.database,
            self.api.as_ref().map_or("unset", ApiVersion::as_str),
            self.debug,
            self.emit_events,
            self.expected_receive_period_in_days,
        )
    }
}

impl Configuration {
    /// Validates options for one write invocation.
    ///
    /// `expected_receive_period_in_days` is not checked here: it only matters
    /// to health tracking, so an absent or unusable value falls back to the
    /// default instead of blocking the write.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checked in this order:
    /// - `database`, `url` or `data` is absent or blank
    /// - `emit_events` or `debug` is neither `true`, `false` nor empty
    /// - `influxdb_version` is neither `v1`, `v2` nor empty
    /// - `influxdb_version` is `v2` and `token` or `org` is blank
    pub fn from_options(options: &AgentOptions) -> Result<Self, ConfigError> {
        Self::validate(options, ReceivePeriod::Lenient)
    }

    /// Validates stored options when an agent accepts them.
    ///
    /// Same checks as [`Configuration::from_options`], plus the receive period.
    ///
    /// # Errors
    ///
    /// As [`Configuration::from_options`], and additionally
    /// [`ConfigError::InvalidReceivePeriod`] (checked right after the booleans)
    /// if `expected_receive_period_in_days` is present but not a positive integer.
    pub fn accept(options: &AgentOptions) -> Result<Self, ConfigError> {
        Self::validate(options, ReceivePeriod::Strict)
    }

    fn validate(options: &AgentOptions, period: ReceivePeriod) -> Result<Self, ConfigError> {
        let database = required(options.database.as_deref(), field::DATABASE)?;
        let url = required(options.url.as_deref(), field::URL)?;
        let data = required(options.data.as_deref(), field::DATA)?;

        let emit_events = parse_bool(options.emit_events.as_deref(), field::EMIT_EVENTS)?;
        let debug = parse_bool(options.debug.as_deref(), field::DEBUG)?;

        let raw_period = options.expected_receive_period_in_days.as_deref();
        let expected_receive_period_in_days = match period {
            ReceivePeriod::Strict => parse_receive_period(raw_period)?,
            ReceivePeriod::Lenient => {
                parse_receive_period(raw_period).unwrap_or(defaults::EXPECTED_RECEIVE_PERIOD_DAYS)
            }
        };

        let api = parse_api_version(options)?;

        Ok(Self {
            url,
            database,
            data,
            api,
            debug,
            emit_events,
            expected_receive_period_in_days,
        })
    }
}

#[derive(Clone, Copy)]
enum ReceivePeriod {
    Strict,
    Lenient,
}

/// Returns the value if it holds anything besides whitespace.
fn required(value: Option<&str>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::missing(name)),
    }
}

/// Absent and empty mean `false`.
fn parse_bool(value: Option<&str>, name: &'static str) -> Result<bool, ConfigError> {
    match value.unwrap_or_default() {
        "" | "false" => Ok(false),
        "true" => Ok(true),
        other => Err(ConfigError::InvalidBoolean {
            field: name,
            value: other.to_string(),
        }),
    }
}

fn parse_receive_period(value: Option<&str>) -> Result<NonZeroU32, ConfigError> {
    let Some(raw) = value else {
        return Ok(defaults::EXPECTED_RECEIVE_PERIOD_DAYS);
    };

    raw.trim()
        .parse::<NonZeroU32>()
        .map_err(|_| ConfigError::InvalidReceivePeriod {
            value: raw.to_string(),
        })
}

/// Absent or empty is not an error: the writer decides what to do without a version.
fn parse_api_version(options: &AgentOptions) -> Result<Option<ApiVersion>, ConfigError> {
    match options.influxdb_version.as_deref().unwrap_or_default() {
        "" => Ok(None),
        "v1" => Ok(Some(ApiVersion::V1)),
        "v2" => {
            let token = required(options.token.as_deref(), field::TOKEN)?;
            let org = required(options.org.as_deref(), field::ORG)?;
            Ok(Some(ApiVersion::V2 { org, token }))
        }
        other => Err(ConfigError::InvalidVersion {
            value: other.to_string(),
        }),
    }
}
