//! Transport failure type.

use thiserror::Error;

/// The HTTP call could not produce a response.
///
/// Any response, whatever its status code, is not an error at this layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, DNS resolution or TLS handshake failed, or the
    /// connection dropped before the response body was read.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No response within the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// The write endpoint could not be turned into a request target.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
