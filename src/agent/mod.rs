//! The host-facing agent.
//!
//! Wires a [`crate::writer::Writer`] to the host seams: option resolution,
//! event emission and health tracking. A scheduler calls [`Agent::check`]; an
//! upstream agent's events arrive through [`Agent::receive`].

mod runner;
mod sink;


pub use runner::Agent;
pub use sink::{EventSink, StdoutSink};
