//! Agent health: has it produced events recently, without errors since?
//!
//! The host asks [`HealthTracker::is_working`] to decide whether the agent
//! should be flagged. The answer never depends on HTTP status codes, only on
//! when events were last emitted and when errors were last logged.

use std::num::NonZeroU32;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime};

/// Errors logged within this window before the last event still count as recent.
pub const ERROR_GRACE: Duration = Duration::from_secs(2 * 60);

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Abstraction over system time for testability.
///
/// ```
/// use influx_writer::health::{Clock, SystemClock};
///
/// let now = SystemClock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// When the agent last emitted an event and last logged an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthState {
    /// Time of the last emitted event
    pub last_event_at: Option<SystemTime>,
    /// Time of the last error
    pub last_error_at: Option<SystemTime>,
}

/// Tracks event and error timestamps for one agent.
#[derive(Debug)]
pub struct HealthTracker<C = SystemClock> {
    clock: C,
    state: Mutex<HealthState>,
}

impl HealthTracker<SystemClock> {
    /// Creates a tracker on the system clock with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for HealthTracker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> HealthTracker<C> {
    /// Creates a tracker on the given clock with no history.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: Mutex::new(HealthState::default()),
        }
    }

    /// Records that an event was emitted now.
    pub fn record_event(&self) {
        let now = self.clock.now();
        self.update(|state| state.last_event_at = Some(now));
    }

    /// Records that an error was logged now.
    pub fn record_error(&self) {
        let now = self.clock.now();
        self.update(|state| state.last_error_at = Some(now));
    }

    /// Returns the recorded timestamps.
    #[must_use]
    pub fn snapshot(&self) -> HealthState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns true if an event was emitted within the last `days` days.
    #[must_use]
    pub fn event_created_within(&self, days: NonZeroU32) -> bool {
        let Some(last_event) = self.snapshot().last_event_at else {
            return false;
        };

        let window = Duration::from_secs(u64::from(days.get()) * SECS_PER_DAY);
        self.clock
            .now()
            .checked_sub(window)
            .is_none_or(|cutoff| last_event > cutoff)
    }

    /// Returns true if an error was logged after (or shortly before) the last event.
    #[must_use]
    pub fn has_recent_errors(&self) -> bool {
        let HealthState {
            last_event_at: Some(last_event),
            last_error_at: Some(last_error),
        } = self.snapshot()
        else {
            return false;
        };

        last_event
            .checked_sub(ERROR_GRACE)
            .is_none_or(|cutoff| last_error > cutoff)
    }

    /// Returns true if the agent emitted an event within `days` days and
    /// has not logged an error since.
    #[must_use]
    pub fn is_working(&self, days: NonZeroU32) -> bool {
        self.event_created_within(days) && !self.has_recent_errors()
    }

    fn update(&self, f: impl FnOnce(&mut HealthState)) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }
}
