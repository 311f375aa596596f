//! influx-writer: InfluxDB write agent
//!
//! A library for posting a line-protocol payload to an InfluxDB v1 or v2
//! write endpoint, either on a schedule or once per incoming event, and
//! reporting the response status back to the host.

pub mod agent;
pub mod config;
pub mod health;
pub mod report;
pub mod resolve;
pub mod transport;
pub mod writer;
