//! Error type for a write invocation.

use thiserror::Error;

use crate::config::ConfigError;
use crate::transport::TransportError;

/// Why a write invocation failed.
///
/// A configuration failure always happens before any network attempt. A
/// transport failure means no response was obtained; any HTTP status,
/// including 4xx and 5xx, is a completed write and not an error.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The configuration was rejected; nothing was sent.
    #[error("Configuration rejected: {0}")]
    Config(#[from] ConfigError),

    /// The request was attempted but no response was obtained.
    #[error("Write failed: {0}")]
    Transport(#[from] TransportError),
}

impl WriteError {
    /// Returns true if the failure happened before any network attempt.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
