//! Transport layer for the outbound InfluxDB write request.
//!
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The client seam ([`HttpClient`]) and its reqwest implementation ([`ReqwestClient`])
//! - Transport failures ([`TransportError`])

mod client;
mod error;
mod request;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod request_tests;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use client::ReqwestClient;
pub use error::TransportError;
pub use request::{HttpClient, HttpRequest, HttpResponse};
