//! The InfluxDB writer: one validated configuration in, one POST out.
//!
//! - Endpoint and request construction ([`endpoint`], [`PreparedWrite`])
//! - The writer itself ([`Writer`]) and its policy for a missing version ([`MissingVersion`])
//! - What a call produces ([`WriteOutcome`], [`WriteReport`], [`OutputEvent`])
//! - What a call can fail with ([`WriteError`])

mod endpoint;
mod error;
mod influx;
mod outcome;


pub use endpoint::{PRECISION, PreparedWrite, endpoint};
pub use error::WriteError;
pub use influx::{MISSING_VERSION_MESSAGE, MissingVersion, Writer};
pub use outcome::{OutputEvent, WriteOutcome, WriteReport};
