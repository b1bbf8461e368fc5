//! Time utilities for parkd
//!
//! Ticket timestamps and fee durations are read through the [`Clock`] trait so
//! the lot never touches the system clock directly. [`SystemClock`] is used in
//! production, [`ManualClock`] in tests.
//!
//! # Mock Time for Development
//!
//! In debug builds, [`SystemClock::from_env`] honours the `PARKD_MOCK_TIME`
//! environment variable. The clock then starts at the given time and advances
//! at the same rate as real time.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! PARKD_MOCK_TIME="2025-12-25 14:30:00" parkd --demo
//! ```

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "PARKD_MOCK_TIME";

const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the current time for the lot
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Parse a `PARKD_MOCK_TIME` value as a local time.
///
/// Returns `None` for malformed input and for local times that are ambiguous
/// or skipped by a DST change.
pub fn parse_mock_time(value: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), MOCK_TIME_FORMAT).ok()?;
    Local.from_local_datetime(&naive).single()
}

/// Wall clock, optionally shifted by a fixed offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: chrono::Duration,
}

impl SystemClock {
    /// Real local time
    pub fn new() -> Self {
        Self {
            offset: chrono::Duration::zero(),
        }
    }

    /// A clock that reads `start` now and runs at real speed from there
    pub fn starting_at(start: DateTime<Local>) -> Self {
        Self {
            offset: start.signed_duration_since(Local::now()),
        }
    }

    /// Real time, unless `PARKD_MOCK_TIME` is set in a debug build
    pub fn from_env() -> Self {
        #[cfg(debug_assertions)]
        if let Ok(value) = std::env::var(MOCK_TIME_ENV_VAR) {
            match parse_mock_time(&value) {
                Some(start) => {
                    tracing::info!(mock_time = %value, "Mock time enabled");
                    return Self::starting_at(start);
                }
                None => tracing::warn!(
                    mock_time = %value,
                    expected_format = MOCK_TIME_FORMAT,
                    "Ignoring invalid mock time"
                ),
            }
        }

        Self::new()
    }

    /// Whether this clock is shifted away from real time
    pub fn is_mocked(&self) -> bool {
        self.offset != chrono::Duration::zero()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now() + self.offset
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Starts at the current system time
    pub fn starting_now() -> Self {
        Self::new(Local::now())
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let next = chrono::Duration::from_std(by)
            .ok()
            .and_then(|delta| current.checked_add_signed(delta));
        if let Some(next) = next {
            *current = next;
        }
    }

    pub fn set(&self, to: DateTime<Local>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Whole seconds from `start` to `end`, truncated; zero if `end` is earlier.
pub fn whole_seconds_between(start: &DateTime<Local>, end: &DateTime<Local>) -> u64 {
    let secs = end.signed_duration_since(*start).num_seconds();
    u64::try_from(secs).unwrap_or(0)
}

/// Format a DateTime for display with full date and time.
pub fn format_datetime_full(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
