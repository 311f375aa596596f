//! Where emitted events go.

use std::io::Write;

use tokio::sync::mpsc;

use crate::writer::OutputEvent;

/// Receives the events the agent emits into the host pipeline.
pub trait EventSink: Send + Sync {
    /// Delivers one event.
    fn emit(&self, event: OutputEvent);
}

/// Prints each event to stdout as one JSON line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&self, event: OutputEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to serialize event: {e}");
                return;
            }
        };

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
            tracing::warn!("Failed to write event to stdout: {e}");
        }
    }
}

impl EventSink for mpsc::UnboundedSender<OutputEvent> {
    fn emit(&self, event: OutputEvent) {
        if self.send(event).is_err() {
            tracing::warn!("Event receiver dropped, event discarded");
        }
    }
}
