//! Monotonic ULID generation
//!
//! Each round takes the lock only to reserve a block of randomness, then emits
//! the block with the lock released. Concurrent calls therefore receive disjoint
//! ranges, and the ULIDs of one call increase by exactly one within a timestamp.

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::GeneratorConfig;
use crate::error::UlidError;
use crate::random::{RandomSource, ThreadRandom};
use crate::randomness::Randomness;
use crate::ulid::Ulid;

use super::state::{Decision, Issued, State};
use super::time::{Clock, SystemClock};
use super::wait::{sleep_then_sample, CancellationToken};
use super::{validate_count, validate_timestamp, UlidGenerator, INITIAL_CAPACITY};

/// What to do when the current timestamp has no randomness left
#[derive(Clone, Copy, Debug)]
enum Exhaustion<'a> {
    /// Return what has been produced so far
    Stop,
    /// Sleep, re-sample the clock and try again until cancelled
    Wait(&'a CancellationToken),
}

/// Generator whose output never decreases, even across threads
///
/// Thread-safe as long as the clock and random source are; share it behind an `Arc`.
#[derive(Debug)]
pub struct MonotonicUlidGenerator<C = SystemClock, R = ThreadRandom> {
    state: Mutex<State>,
    clock: C,
    random: R,
    config: GeneratorConfig,
}

impl MonotonicUlidGenerator {
    /// Create with the system clock, thread-local randomness and default configuration
    pub fn new() -> Self {
        Self::with_config(SystemClock, ThreadRandom, GeneratorConfig::default())
    }
}

impl Default for MonotonicUlidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, R: RandomSource> MonotonicUlidGenerator<C, R> {
    /// Create with custom sources and default configuration
    pub fn with_sources(clock: C, random: R) -> Self {
        Self::with_config(clock, random, GeneratorConfig::default())
    }

    /// Create with custom sources and configuration
    pub fn with_config(clock: C, random: R, config: GeneratorConfig) -> Self {
        Self {
            state: Mutex::new(State::default()),
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

    /// The newest ULID handed out by this generator, if any
    pub fn last_issued(&self) -> Option<Ulid> {
        let Issued {
            timestamp,
            randomness,
        } = self.state.lock().last_issued()?;
        Ulid::from_parts(timestamp, randomness).ok()
    }

    #[inline]
    fn now_ms(&self) -> Result<u64, UlidError> {
        validate_timestamp(self.clock.now_ms()?)
    }

    fn run(
        &self,
        count: usize,
        timestamp: Option<u64>,
        exhaustion: Exhaustion<'_>,
    ) -> Result<Vec<Ulid>, UlidError> {
        let count = validate_count(count, &self.config)?;
        let timestamp = timestamp.map(validate_timestamp).transpose()?;

        if count == 0 {
            return Ok(Vec::new());
        }
        let mut ulids = Vec::with_capacity((count as usize).min(INITIAL_CAPACITY));

        let mut now = match timestamp {
            Some(timestamp) => timestamp,
            None => self.now_ms()?,
        };
        let mut fresh = None;
        let mut remaining = count;

        while remaining > 0 {
            let decision = self.state.lock().reserve(now, remaining, fresh.take());
            match decision {
                Decision::Reserved(reservation) => {
                    trace!(
                        timestamp = reservation.timestamp(),
                        base = ?reservation.base(),
                        len = reservation.len(),
                        "reserved randomness block"
                    );
                    ulids.reserve(reservation.len() as usize);
                    reservation.emit_into(&mut ulids)?;
                    remaining -= reservation.len();
                }
                Decision::NeedsRandomness => {
                    fresh = Some(Randomness::generate(&self.random));
                }
                Decision::Exhausted { timestamp } => match exhaustion {
                    Exhaustion::Stop => {
                        debug!(
                            timestamp,
                            produced = ulids.len(),
                            requested = count,
                            "randomness exhausted, returning partial batch"
                        );
                        break;
                    }
                    Exhaustion::Wait(token) => {
                        trace!(timestamp, "randomness exhausted, waiting for the clock");
                        match sleep_then_sample(token, self.config.retry_interval(), || {
                            self.clock.now_ms()
                        })? {
                            Some(sampled) => now = validate_timestamp(sampled)?,
                            None => {
                                debug!(
                                    timestamp,
                                    produced = ulids.len(),
                                    requested = count,
                                    "wait cancelled, returning partial batch"
                                );
                                break;
                            }
                        }
                    }
                },
            }
        }

        Ok(ulids)
    }
}

impl<C: Clock, R: RandomSource> UlidGenerator for MonotonicUlidGenerator<C, R> {
    fn generate(&self, count: usize) -> Result<Vec<Ulid>, UlidError> {
        self.run(count, None, Exhaustion::Stop)
    }

    fn generate_at(&self, count: usize, timestamp: u64) -> Result<Vec<Ulid>, UlidError> {
        self.run(count, Some(timestamp), Exhaustion::Stop)
    }

    fn generate_exact_with(
        &self,
        count: usize,
        timestamp: Option<u64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Ulid>, UlidError> {
        self.run(count, timestamp, Exhaustion::Wait(cancel))
    }
}
