//! The writer.

use crate::config::{AgentOptions, ApiVersion, Configuration};
use crate::report::{Reporter, TracingReporter};
use crate::transport::HttpClient;

use super::{OutputEvent, PreparedWrite, WriteError, WriteOutcome, WriteReport, endpoint};

/// Error line reported when a write is skipped for lack of a version.
pub const MISSING_VERSION_MESSAGE: &str = "influxdb_version is missing or invalid, nothing written";

/// What to do when `influxdb_version` is absent or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingVersion {
    /// Send nothing, report an error line and return [`WriteOutcome::Skipped`].
    #[default]
    Skip,
    /// Behave like the single-version agent and write through the v1 API.
    AssumeV1,
}

/// Writes a line-protocol payload to InfluxDB.
///
/// Each call validates its configuration, then sends exactly one POST and
/// waits for one response. The writer holds no per-call state, so one
/// instance may serve concurrent invocations.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `R`: Where diagnostic lines go (defaults to [`TracingReporter`])
///
/// # Example
///
/// ```
/// use influx_writer::transport::ReqwestClient;
/// use influx_writer::writer::{MissingVersion, Writer};
///
/// let writer = Writer::new(ReqwestClient::new()).with_missing_version(MissingVersion::AssumeV1);
/// assert_eq!(writer.missing_version(), MissingVersion::AssumeV1);
/// ```
#[derive(Debug)]
pub struct Writer<H, R = TracingReporter> {
    client: H,
    reporter: R,
    missing_version: MissingVersion,
    dry_run: bool,
}

impl<H> Writer<H, TracingReporter> {
    /// Creates a writer that reports through `tracing` and skips writes without a version.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self {
            client,
            reporter: TracingReporter,
            missing_version: MissingVersion::Skip,
            dry_run: false,
        }
    }
}

impl<H, R> Writer<H, R> {
    /// Sets where diagnostic lines are reported.
    #[must_use]
    pub fn with_reporter<R2>(self, reporter: R2) -> Writer<H, R2> {
        Writer {
            client: self.client,
            reporter,
            missing_version: self.missing_version,
            dry_run: self.dry_run,
        }
    }

    /// Sets the policy for a configuration without a version.
    #[must_use]
    pub const fn with_missing_version(mut self, policy: MissingVersion) -> Self {
        self.missing_version = policy;
        self
    }

    /// Builds and reports requests without sending them.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the policy for a configuration without a version.
    #[must_use]
    pub const fn missing_version(&self) -> MissingVersion {
        self.missing_version
    }

    /// Returns true if requests are built but not sent.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the reporter.
    #[must_use]
    pub const fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Picks the API to write through, applying the missing-version policy.
    fn api_for(&self, config: &Configuration) -> Option<ApiVersion> {
        match (&config.api, self.missing_version) {
            (Some(api), _) => Some(api.clone()),
            (None, MissingVersion::AssumeV1) => Some(ApiVersion::V1),
            (None, MissingVersion::Skip) => None,
        }
    }
}

impl<H: HttpClient, R: Reporter> Writer<H, R> {
    /// Validates raw options and writes them.
    ///
    /// # Errors
    ///
    /// - [`WriteError::Config`] if the options are invalid; nothing is sent
    /// - [`WriteError::Transport`] if no response was obtained
    pub async fn write(&self, options: &AgentOptions) -> Result<WriteOutcome, WriteError> {
        let config = Configuration::from_options(options)?;
        self.write_validated(&config).await
    }

    /// Writes an already validated configuration.
    ///
    /// # Errors
    ///
    /// - [`WriteError::Config`] if the endpoint or token cannot form a request
    /// - [`WriteError::Transport`] if no response was obtained
    pub async fn write_validated(&self, config: &Configuration) -> Result<WriteOutcome, WriteError> {
        let Some(api) = self.api_for(config) else {
            self.reporter.error(MISSING_VERSION_MESSAGE);
            return Ok(WriteOutcome::Skipped);
        };

        // Logged before the target is parsed.
        if config.debug {
            self.reporter.log(&endpoint(&config.url, &config.database, &api));
        }

        let prepared = PreparedWrite::build(config, &api)?;

        if self.dry_run {
            self.reporter.log(&format!(
                "dry run: POST {} ({} bytes), not sent",
                prepared.endpoint,
                config.data.len()
            ));
            return Ok(WriteOutcome::Previewed(prepared));
        }

        let response = self.client.request(prepared.request).await?;

        self.reporter
            .log(&format!("request  status : {}", response.status.as_str()));

        let body = config.debug.then(|| response.body_lossy());
        if let Some(ref body) = body {
            self.reporter.log(&format!("response body : {body}"));
        }

        let event = config
            .emit_events
            .then(|| OutputEvent::from_status(response.status));

        Ok(WriteOutcome::Completed(WriteReport {
            status: response.status,
            body,
            event,
        }))
    }
}
