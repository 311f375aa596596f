//! Diagnostic channel handed to the writer.
//!
//! The writer never logs on its own behalf: it reports endpoint, status and
//! body lines through a [`Reporter`], so a host can route them into its own
//! agent log and error tracking.

use std::sync::Arc;

/// Receives the writer's diagnostic lines.
pub trait Reporter: Send + Sync {
    /// An informational line (endpoint, status, response body).
    fn log(&self, message: &str);

    /// A line that should count as an error in the host's health tracking.
    fn error(&self, message: &str);
}

/// Forwards reported lines to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn log(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn log(&self, message: &str) {
        (**self).log(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn log(&self, message: &str) {
        (**self).log(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}
