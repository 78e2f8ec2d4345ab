//! GeneratorConfig builder for constructing configuration

use std::time::Duration;

use super::{ConfigError, GeneratorConfig};

/// Default configuration values
pub(super) const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(1);
pub(super) const DEFAULT_MAX_BATCH_SIZE: u32 = u32::MAX;

/// Builder for GeneratorConfig
#[derive(Debug)]
pub struct GeneratorConfigBuilder {
    pub(super) retry_interval: Duration,
    pub(super) max_batch_size: u32,
}

impl GeneratorConfigBuilder {
    /// Create a new GeneratorConfigBuilder with default values
    pub fn new() -> Self {
        Self {
            retry_interval: DEFAULT_RETRY_INTERVAL,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Set how long an exact generation sleeps before re-sampling the clock
    pub fn retry_interval(mut self, interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroRetryInterval);
        }
        self.retry_interval = interval;
        Ok(self)
    }

    /// Set the largest count a single call may request
    pub fn max_batch_size(mut self, size: u32) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        self.max_batch_size = size;
        Ok(self)
    }

    /// Build the final GeneratorConfig
    pub fn build(self) -> GeneratorConfig {
        GeneratorConfig::from_builder(self)
    }
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
