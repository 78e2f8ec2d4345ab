//! ULID generators
//!
//! Split into modules for testability:
//! - `time` - Clock capability and the system clock
//! - `wait` - Cancellable sleep between clock samples
//! - `state` - Lock-guarded (timestamp, randomness) reservations
//! - `monotonic` - Strictly increasing generation
//! - `simple` - Independent random draws

mod monotonic;
mod simple;
mod state;
pub mod time;
mod wait;

pub use monotonic::MonotonicUlidGenerator;
pub use simple::SimpleUlidGenerator;
pub use wait::CancellationToken;

use crate::config::GeneratorConfig;
use crate::error::UlidError;
use crate::ulid::{check_timestamp, Ulid};

/// Batch generation of ULIDs
///
/// Best-effort calls may return fewer than `count` items; exact calls wait for
/// the clock when needed and only come back short when cancelled. Invalid
/// arguments are rejected before any state changes.
pub trait UlidGenerator {
    /// Generate up to `count` ULIDs stamped with the current time
    fn generate(&self, count: usize) -> Result<Vec<Ulid>, UlidError>;

    /// Generate up to `count` ULIDs starting from `timestamp`
    fn generate_at(&self, count: usize, timestamp: u64) -> Result<Vec<Ulid>, UlidError>;

    /// Generate exactly `count` ULIDs unless `cancel` fires first
    ///
    /// Cancellation is not an error: the ULIDs produced so far are returned.
    fn generate_exact_with(
        &self,
        count: usize,
        timestamp: Option<u64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Ulid>, UlidError>;

    /// Generate exactly `count` ULIDs, waiting as long as it takes
    fn generate_exact(&self, count: usize) -> Result<Vec<Ulid>, UlidError> {
        self.generate_exact_with(count, None, &CancellationToken::new())
    }

    /// Generate exactly `count` ULIDs starting from `timestamp`
    fn generate_exact_at(&self, count: usize, timestamp: u64) -> Result<Vec<Ulid>, UlidError> {
        self.generate_exact_with(count, Some(timestamp), &CancellationToken::new())
    }

    /// Generate a single ULID, `None` if the current timestamp is exhausted
    fn next_ulid(&self) -> Result<Option<Ulid>, UlidError> {
        Ok(self.generate(1)?.into_iter().next())
    }
}

/// Upper bound on the up-front allocation of a batch; larger batches grow as they fill
pub(crate) const INITIAL_CAPACITY: usize = 1024;

#[inline]
pub(crate) fn validate_count(count: usize, config: &GeneratorConfig) -> Result<u32, UlidError> {
    let max = config.max_batch_size();
    match u32::try_from(count) {
        Ok(count) if count <= max => Ok(count),
        _ => Err(UlidError::InvalidCount { count, max }),
    }
}

#[inline]
pub(crate) fn validate_timestamp(timestamp: u64) -> Result<u64, UlidError> {
    check_timestamp(timestamp)?;
    Ok(timestamp)
}
