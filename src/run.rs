//! Application execution logic.
//!
//! This module drives the agent in the configured run mode: a single write,
//! a write every interval, or one write per JSON event read from stdin.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::time::MissedTickBehavior;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;

use influx_writer::agent::{Agent, EventSink, StdoutSink};
use influx_writer::config::{ConfigError, RunMode, ValidatedConfig};
use influx_writer::health::Clock;
use influx_writer::report::{Reporter, TracingReporter};
use influx_writer::resolve::{ConfigResolver, EventPayload, TemplateResolver};
use influx_writer::transport::{HttpClient, ReqwestClient};
use influx_writer::writer::{WriteError, Writer};

/// Type alias for the agent the binary runs.
type AppAgent = Agent<ReqwestClient, TracingReporter, TemplateResolver, StdoutSink>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The agent rejected its options.
    #[error("Failed to create agent: {0}")]
    Agent(#[source] ConfigError),

    /// The single write of `once` mode failed.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Reading events from stdin failed.
    #[error("Failed to read events from stdin: {0}")]
    Stdin(#[source] std::io::Error),
}

/// Executes the configured run mode.
///
/// # Errors
///
/// Returns an error if:
/// - The agent cannot be built from the validated options
/// - The write fails in `once` mode
/// - Stdin cannot be read in `reactive` mode
///
/// Failures of individual scheduled or reactive writes are logged and do not
/// stop the loop.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// real signal handling and stdin.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let agent = create_agent(&config).map_err(RunError::Agent)?;

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - write requests will be logged but not sent");
    }

    match config.mode {
        RunMode::Once => run_once(&agent).await,
        RunMode::Scheduled => {
            tracing::info!(
                "Scheduled mode enabled (interval: {}s)",
                config.interval.as_secs()
            );
            run_scheduled(&agent, config.interval, shutdown_signal()).await;
            Ok(())
        }
        RunMode::Reactive => {
            tracing::info!("Reactive mode enabled, reading JSON events from stdin");
            let stdin = BufReader::new(tokio::io::stdin());
            run_reactive(&agent, stdin, shutdown_signal()).await
        }
    }
}

/// Creates the agent from configuration.
fn create_agent(config: &ValidatedConfig) -> Result<AppAgent, ConfigError> {
    let writer = Writer::new(ReqwestClient::with_timeout(config.timeout))
        .with_missing_version(config.missing_version)
        .with_dry_run(config.dry_run);

    Agent::new(
        config.options.clone(),
        writer,
        TemplateResolver::new(),
        StdoutSink,
    )
}

/// Writes once. A skipped write is not an error.
async fn run_once<H, R, Z, S, C>(agent: &Agent<H, R, Z, S, C>) -> Result<(), RunError>
where
    H: HttpClient,
    R: Reporter,
    Z: ConfigResolver,
    S: EventSink,
    C: Clock,
{
    agent.check().await?;
    Ok(())
}

/// Writes immediately, then every `interval`, until `shutdown` completes.
async fn run_scheduled<H, R, Z, S, C>(
    agent: &Agent<H, R, Z, S, C>,
    interval: Duration,
    shutdown: impl Future<Output = ()>,
) where
    H: HttpClient,
    R: Reporter,
    Z: ConfigResolver,
    S: EventSink,
    C: Clock,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return;
            }

            _ = ticker.tick() => {
                // The agent has already reported any failure.
                if agent.check().await.is_err() {
                    tracing::debug!("Scheduled write failed, retrying in {}s", interval.as_secs());
                }
                tracing::debug!("Agent working: {}", agent.is_working());
            }
        }
    }
}

/// Calls `receive` once per JSON object line until EOF or `shutdown`.
///
/// Blank lines are ignored. Lines that are not JSON objects are logged and skipped.
async fn run_reactive<H, R, Z, S, C, I>(
    agent: &Agent<H, R, Z, S, C>,
    input: I,
    shutdown: impl Future<Output = ()>,
) -> Result<(), RunError>
where
    H: HttpClient,
    R: Reporter,
    Z: ConfigResolver,
    S: EventSink,
    C: Clock,
    I: AsyncBufRead + Unpin,
{
    let mut lines = LinesStream::new(input.lines());
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return Ok(());
            }

            line = lines.next() => {
                match line {
                    Some(Ok(line)) => handle_line(agent, &line).await,
                    Some(Err(e)) => return Err(RunError::Stdin(e)),
                    None => {
                        tracing::info!("Input closed, stopping...");
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Handles one line of reactive input.
async fn handle_line<H, R, Z, S, C>(agent: &Agent<H, R, Z, S, C>, line: &str)
where
    H: HttpClient,
    R: Reporter,
    Z: ConfigResolver,
    S: EventSink,
    C: Clock,
{
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    let event = match serde_json::from_str::<EventPayload>(line) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Skipping malformed event: {e}");
            return;
        }
    };

    if agent.receive(&event).await.is_err() {
        tracing::debug!("Write for incoming event failed");
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed, that signal is never observed.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
