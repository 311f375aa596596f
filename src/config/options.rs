//! Raw agent options, as stored by the host before interpolation.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::field;

/// The agent's stored options.
///
/// Every option is kept as text, exactly as the host stores it, and may
/// contain template placeholders that are only resolved per invocation.
/// Deserialization also accepts booleans and integers so that a TOML file
/// can say `debug = true` or `expected_receive_period_in_days = 2`.
///
/// Use [`crate::config::Configuration::accept`] when storing them and
/// [`crate::config::Configuration::from_options`] before each write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentOptions {
    /// InfluxDB base URL, e.g. `http://influxdb:8086`
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Database (v1) or bucket (v2) name
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Line-protocol payload, the equivalent of curl's `--data-binary`
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// `v1`, `v2`, or empty
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub influxdb_version: Option<String>,

    /// v2 API token
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// v2 organization
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,

    /// Log the endpoint and the response body
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,

    /// Emit the response status as an event
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub emit_events: Option<String>,

    /// Days without an emitted event before the agent counts as not working
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub expected_receive_period_in_days: Option<String>,
}

impl AgentOptions {
    /// The options a freshly created agent starts with.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            url: Some(String::new()),
            database: Some(String::new()),
            data: Some(String::new()),
            influxdb_version: None,
            token: None,
            org: None,
            debug: Some("false".to_string()),
            emit_events: Some("false".to_string()),
            expected_receive_period_in_days: Some("2".to_string()),
        }
    }

    /// Overlays `overrides` on top of `self`: every option set in `overrides` wins.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            url: overrides.url.or(self.url),
            database: overrides.database.or(self.database),
            data: overrides.data.or(self.data),
            influxdb_version: overrides.influxdb_version.or(self.influxdb_version),
            token: overrides.token.or(self.token),
            org: overrides.org.or(self.org),
            debug: overrides.debug.or(self.debug),
            emit_events: overrides.emit_events.or(self.emit_events),
            expected_receive_period_in_days: overrides
                .expected_receive_period_in_days
                .or(self.expected_receive_period_in_days),
        }
    }

    /// Applies `f` to every present option, keeping absent ones absent.
    ///
    /// `f` receives the option name and its current text.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(&'static str, &str) -> Result<String, E>,
    ) -> Result<Self, E> {
        let mut map = |name: &'static str, value: &Option<String>| {
            value.as_deref().map(|v| f(name, v)).transpose()
        };

        Ok(Self {
            url: map(field::URL, &self.url)?,
            database: map(field::DATABASE, &self.database)?,
            data: map(field::DATA, &self.data)?,
            influxdb_version: map(field::INFLUXDB_VERSION, &self.influxdb_version)?,
            token: map(field::TOKEN, &self.token)?,
            org: map(field::ORG, &self.org)?,
            debug: map(field::DEBUG, &self.debug)?,
            emit_events: map(field::EMIT_EVENTS, &self.emit_events)?,
            expected_receive_period_in_days: map(
                field::EXPECTED_RECEIVE_PERIOD,
                &self.expected_receive_period_in_days,
            )?,
        })
    }
}

/// A scalar option value in any of the shapes a config file may use.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
        }
    }
}

fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}
