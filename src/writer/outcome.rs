//! Results of a write invocation.

use serde::{Deserialize, Serialize};

use super::PreparedWrite;

/// The event emitted after a response when `emit_events` is on.
///
/// Serializes as `{"http_status": "204"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEvent {
    /// Response status code as a decimal string
    pub http_status: String,
}

impl OutputEvent {
    /// Creates the event for a response status.
    #[must_use]
    pub fn from_status(status: http::StatusCode) -> Self {
        Self {
            http_status: status.as_str().to_string(),
        }
    }
}

/// A response was obtained.
///
/// The status is recorded, never interpreted: a 400 is as complete a write
/// as a 204 from the writer's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Response status code
    pub status: http::StatusCode,
    /// Response body, captured only with `debug`
    pub body: Option<String>,
    /// Output event, produced only with `emit_events`
    pub event: Option<OutputEvent>,
}

/// What a write invocation did.
#[derive(Debug, Clone)]
pub enum WriteOutcome {
    /// One request was sent and answered.
    Completed(WriteReport),

    /// No version was configured, so nothing was sent.
    Skipped,

    /// Dry run: the request was built and reported but not sent.
    Previewed(PreparedWrite),
}

impl WriteOutcome {
    /// Returns the output event, if one was produced.
    #[must_use]
    pub fn event(&self) -> Option<&OutputEvent> {
        self.report().and_then(|report| report.event.as_ref())
    }

    /// Returns the report if a response was obtained.
    #[must_use]
    pub const fn report(&self) -> Option<&WriteReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Skipped | Self::Previewed(_) => None,
        }
    }

    /// Returns true if the invocation was a no-op.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}
