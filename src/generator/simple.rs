//! Stateless ULID generation
//!
//! Every item gets fresh randomness under one timestamp sampled per call, with no
//! ordering between items. Duplicates are dropped; exact mode draws again until
//! the requested number of distinct ULIDs exists.

use std::collections::HashSet;

use tracing::warn;

use crate::config::GeneratorConfig;
use crate::error::UlidError;
use crate::random::{RandomSource, ThreadRandom};
use crate::randomness::Randomness;
use crate::ulid::Ulid;

use super::time::{Clock, SystemClock};
use super::wait::CancellationToken;
use super::{validate_count, validate_timestamp, UlidGenerator, INITIAL_CAPACITY};

/// Generator drawing independent randomness for every ULID
#[derive(Debug, Clone)]
pub struct SimpleUlidGenerator<C = SystemClock, R = ThreadRandom> {
    clock: C,
    random: R,
    config: GeneratorConfig,
}

impl SimpleUlidGenerator {
    /// Create with the system clock, thread-local randomness and default configuration
    pub fn new() -> Self {
        Self::with_config(SystemClock, ThreadRandom, GeneratorConfig::default())
    }
}

impl Default for SimpleUlidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, R: RandomSource> SimpleUlidGenerator<C, R> {
    pub fn with_sources(clock: C, random: R) -> Self {
        Self::with_config(clock, random, GeneratorConfig::default())
    }

    pub fn with_config(clock: C, random: R, config: GeneratorConfig) -> Self {
        Self {
            clock,
            random,
            config,
        }
    }

    #[inline(always)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[inline(always)]
    pub fn random(&self) -> &R {
        &self.random
    }

    #[inline(always)]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn run(
        &self,
        count: usize,
        timestamp: Option<u64>,
        exact: Option<&CancellationToken>,
    ) -> Result<Vec<Ulid>, UlidError> {
        let count = validate_count(count, &self.config)? as usize;
        let timestamp = match timestamp {
            Some(timestamp) => validate_timestamp(timestamp)?,
            None if count == 0 => return Ok(Vec::new()),
            None => validate_timestamp(self.clock.now_ms()?)?,
        };

        let capacity = count.min(INITIAL_CAPACITY);
        let mut seen = HashSet::with_capacity(capacity);
        let mut ulids = Vec::with_capacity(capacity);
        let mut draws = 0usize;

        while ulids.len() < count {
            // Past `count` draws only duplicates are being replaced.
            if draws >= count {
                let retry = matches!(exact, Some(token) if !token.is_cancelled());
                if !retry {
                    break;
                }
            }
            draws += 1;

            let ulid = Ulid::from_parts(timestamp, Randomness::generate(&self.random))?;
            if seen.insert(ulid) {
                ulids.push(ulid);
            } else {
                warn!(%ulid, "duplicate randomness drawn");
            }
        }

        Ok(ulids)
    }
}

impl<C: Clock, R: RandomSource> UlidGenerator for SimpleUlidGenerator<C, R> {
    fn generate(&self, count: usize) -> Result<Vec<Ulid>, UlidError> {
        self.run(count, None, None)
    }

    fn generate_at(&self, count: usize, timestamp: u64) -> Result<Vec<Ulid>, UlidError> {
        self.run(count, Some(timestamp), None)
    }

    fn generate_exact_with(
        &self,
        count: usize,
        timestamp: Option<u64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Ulid>, UlidError> {
        self.run(count, timestamp, Some(cancel))
    }
}
