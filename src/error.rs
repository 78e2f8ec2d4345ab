use thiserror::Error;

use crate::crockford::DecodeError;
use crate::generator::time::ClockError;

/// Represents errors that can occur during ULID operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UlidError {
    /// Timestamp does not fit in 48 bits
    #[error("Timestamp {timestamp} is invalid. Maximum allowed value is {max}")]
    TimestampOutOfRange { timestamp: u64, max: u64 },
    /// Buffer cannot hold the requested bytes at the requested offset
    #[error("Buffer of {actual} bytes is too short. At least {required} bytes are required")]
    BufferTooShort { required: usize, actual: usize },
    /// Text does not have the canonical encoded length
    #[error("Encoded ULID must be {expected} characters long, got {len}")]
    InvalidLength { len: usize, expected: usize },
    /// Requested batch size exceeds the configured maximum
    #[error("Count {count} is invalid. Maximum allowed value is {max}")]
    InvalidCount { count: usize, max: u32 },
    /// Text contains characters outside the Crockford Base32 alphabet
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The time source could not produce a reading
    #[error(transparent)]
    Clock(#[from] ClockError),
}
