//! The agent itself.

use std::fmt;

use crate::config::{AgentOptions, ConfigError, Configuration};
use crate::health::{Clock, HealthTracker, SystemClock};
use crate::report::Reporter;
use crate::resolve::{ConfigResolver, EventPayload};
use crate::transport::HttpClient;
use crate::writer::{WriteError, WriteOutcome, Writer};

use super::EventSink;

/// An InfluxDB write agent bound to its stored options.
///
/// Invocations share nothing but the health timestamps, so `check` and
/// `receive` may run concurrently on the same agent.
///
/// # Type Parameters
///
/// - `H`: HTTP client used by the writer
/// - `R`: Reporter used by the writer and for the agent's own error lines
/// - `Z`: Option resolver
/// - `S`: Event sink
/// - `C`: Clock behind health tracking (defaults to [`SystemClock`])
pub struct Agent<H, R, Z, S, C = SystemClock> {
    options: AgentOptions,
    accepted: Configuration,
    writer: Writer<H, R>,
    resolver: Z,
    sink: S,
    health: HealthTracker<C>,
}

impl<H, R, Z, S> Agent<H, R, Z, S, SystemClock> {
    /// Accepts the stored options and builds the agent.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the stored options fail validation.
    pub fn new(
        options: AgentOptions,
        writer: Writer<H, R>,
        resolver: Z,
        sink: S,
    ) -> Result<Self, ConfigError> {
        let accepted = Configuration::accept(&options)?;

        Ok(Self {
            options,
            accepted,
            writer,
            resolver,
            sink,
            health: HealthTracker::new(),
        })
    }
}

impl<H, R, Z, S, C> Agent<H, R, Z, S, C> {
    /// Replaces the health tracker, e.g. to inject a test clock.
    #[must_use]
    pub fn with_health<C2>(self, health: HealthTracker<C2>) -> Agent<H, R, Z, S, C2> {
        Agent {
            options: self.options,
            accepted: self.accepted,
            writer: self.writer,
            resolver: self.resolver,
            sink: self.sink,
            health,
        }
    }

    /// Returns the stored (unresolved) options.
    #[must_use]
    pub const fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Returns the stored options as validated at acceptance time.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.accepted
    }

    /// Returns the writer.
    #[must_use]
    pub const fn writer(&self) -> &Writer<H, R> {
        &self.writer
    }

    /// Returns the health tracker.
    #[must_use]
    pub const fn health(&self) -> &HealthTracker<C> {
        &self.health
    }
}

impl<H, R, Z, S, C> Agent<H, R, Z, S, C>
where
    H: HttpClient,
    R: Reporter,
    Z: ConfigResolver,
    S: EventSink,
    C: Clock,
{
    /// Scheduled run: writes the stored options with no triggering event.
    ///
    /// # Errors
    ///
    /// See [`Writer::write`]; template failures are configuration errors.
    pub async fn check(&self) -> Result<WriteOutcome, WriteError> {
        self.invoke(None).await
    }

    /// Reactive run: resolves the stored options against `event` and writes.
    ///
    /// # Errors
    ///
    /// See [`Writer::write`]; template failures are configuration errors.
    pub async fn receive(&self, event: &EventPayload) -> Result<WriteOutcome, WriteError> {
        self.invoke(Some(event)).await
    }

    /// Returns true if the agent emitted an event within its receive period
    /// and has not logged an error since.
    #[must_use]
    pub fn is_working(&self) -> bool {
        self.health
            .is_working(self.accepted.expected_receive_period_in_days)
    }

    async fn invoke(&self, event: Option<&EventPayload>) -> Result<WriteOutcome, WriteError> {
        let result = match self.resolver.resolve(&self.options, event) {
            Ok(resolved) => self.writer.write(&resolved).await,
            Err(e) => Err(WriteError::Config(e)),
        };

        match &result {
            Ok(outcome) => {
                if let Some(event) = outcome.event() {
                    self.sink.emit(event.clone());
                    self.health.record_event();
                }
                // The writer already reported the skip as an error line.
                if outcome.is_skipped() {
                    self.health.record_error();
                }
            }
            Err(e) => {
                self.writer.reporter().error(&e.to_string());
                self.health.record_error();
            }
        }

        result
    }
}

impl<H, R, Z, S, C> fmt::Debug for Agent<H, R, Z, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("configuration", &self.accepted)
            .field("dry_run", &self.writer.is_dry_run())
            .field("missing_version", &self.writer.missing_version())
            .finish_non_exhaustive()
    }
}
