//! # kulid
//!
//! Universally Unique Lexicographically Sortable Identifiers.
//!
//! A ULID is a 48-bit millisecond timestamp followed by 80 bits of randomness:
//! - 📏 16 bytes, or 26 Crockford Base32 characters
//! - 📈 Text, binary and numeric forms all sort the same way
//! - 🔄 Monotonic generation, strictly increasing within a generator
//! - 🔒 Thread-safe, one short critical section per batch
//! - ⏸️ Exact batches wait out an exhausted millisecond, cancellably

#![forbid(unsafe_code)]

pub mod crockford;
mod config;
mod error;
pub mod generator;
pub mod random;
mod randomness;
mod ulid;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::{ConfigError, GeneratorConfig, GeneratorConfigBuilder};
pub use error::UlidError;
pub use generator::time::{Clock, ClockError, SystemClock};
pub use generator::{CancellationToken, MonotonicUlidGenerator, SimpleUlidGenerator, UlidGenerator};
pub use random::{RandomSource, ThreadRandom};
pub use randomness::Randomness;
pub use ulid::Ulid;

// Re-export codec types at crate root
pub use crockford::DecodeError as CrockfordDecodeError;
pub use crockford::EncodeError as CrockfordEncodeError;
pub use crockford::{decode as crockford_decode, encode as crockford_encode};
pub use crockford::{decode_u64 as crockford_decode_u64, encode_u64 as crockford_encode_u64};
