//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::num::NonZeroU32;
use std::time::Duration;

/// Days without an emitted event before the agent is considered not working.
pub const EXPECTED_RECEIVE_PERIOD_DAYS: NonZeroU32 = NonZeroU32::new(2).unwrap();

/// Interval between scheduled writes, in seconds (one hour).
pub const SCHEDULE_INTERVAL_SECS: u64 = 3600;

/// Upper bound on a single write request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// File name used by `init` when no output path is given.
pub const CONFIG_FILE_NAME: &str = "influx-writer.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}
