//! Configuration for ULID generators

mod builder;

use std::error::Error;
use std::fmt;
use std::time::Duration;

pub use builder::GeneratorConfigBuilder;
use builder::{DEFAULT_MAX_BATCH_SIZE, DEFAULT_RETRY_INTERVAL};

/// Errors related to `GeneratorConfig` builder validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The wait between exhaustion retries must be positive
    ZeroRetryInterval,
    /// A batch must be allowed to hold at least one item
    ZeroBatchSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroRetryInterval => write!(f, "Retry interval must be greater than zero"),
            ConfigError::ZeroBatchSize => write!(f, "Maximum batch size must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}

/// Configuration shared by ULID generators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    retry_interval: Duration,
    max_batch_size: u32,
}

impl GeneratorConfig {
    /// Create config from builder
    pub(crate) fn from_builder(b: GeneratorConfigBuilder) -> Self {
        Self {
            retry_interval: b.retry_interval,
            max_batch_size: b.max_batch_size,
        }
    }

    /// Create a new configuration builder
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Sleep between clock re-samples while waiting out an exhausted timestamp
    #[inline(always)]
    pub const fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Largest `count` accepted by a single generate call
    #[inline(always)]
    pub const fn max_batch_size(&self) -> u32 {
        self.max_batch_size
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            retry_interval: DEFAULT_RETRY_INTERVAL,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}
