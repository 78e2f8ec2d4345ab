//! Time sources for ULID generation
//!
//! Provides wall-clock time in milliseconds since the Unix epoch

use chrono::Utc;
use thiserror::Error;

/// Errors reported by a time source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// The clock reads a time before 1970-01-01T00:00:00Z
    #[error("Clock reads {millis} ms, before the Unix epoch")]
    BeforeUnixEpoch { millis: i64 },
}

/// A source of the current epoch millisecond
///
/// Generators may call the clock from several threads at once.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> Result<u64, ClockError>;
}

/// Wall clock backed by `chrono::Utc::now()`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now_ms(&self) -> Result<u64, ClockError> {
        unix_time_ms()
    }
}

/// Any `Fn() -> u64` closure is an infallible clock
impl<F> Clock for F
where
    F: Fn() -> u64 + Send + Sync,
{
    #[inline]
    fn now_ms(&self) -> Result<u64, ClockError> {
        Ok(self())
    }
}

/// Get current wall-clock time in milliseconds since Unix epoch
#[inline]
pub fn unix_time_ms() -> Result<u64, ClockError> {
    let millis = Utc::now().timestamp_millis();
    u64::try_from(millis).map_err(|_| ClockError::BeforeUnixEpoch { millis })
}
