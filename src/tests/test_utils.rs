//! Shared test utilities for ULID tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::generator::time::{Clock, ClockError};
use crate::random::RandomSource;
use crate::randomness::Randomness;
use crate::ulid::Ulid;

/// Clock that starts at `initial` and moves forward 1 ms every `delay` reads
#[derive(Debug)]
pub struct ControlledClock {
    delay: u32,
    inner: Mutex<(u64, u32)>,
}

impl ControlledClock {
    pub fn new(initial: u64, delay: u32) -> Self {
        Self {
            delay,
            inner: Mutex::new((initial, 0)),
        }
    }
}

impl Clock for ControlledClock {
    fn now_ms(&self) -> Result<u64, ClockError> {
        let mut guard = self.inner.lock();
        let (epoch_milli, reads) = &mut *guard;
        let result = *epoch_milli;
        *reads += 1;
        if *reads >= self.delay {
            *reads = 0;
            *epoch_milli += 1;
        }
        Ok(result)
    }
}

/// Random source yielding the randomness `2^80 - 1 - bias` on every pair of draws
#[derive(Debug)]
pub struct PredictableRandom {
    low: u64,
    low_next: AtomicBool,
}

impl PredictableRandom {
    pub fn new(bias: u32) -> Self {
        Self {
            low: u64::MAX - bias as u64,
            low_next: AtomicBool::new(false),
        }
    }
}

impl RandomSource for PredictableRandom {
    fn next_u64(&self) -> u64 {
        if self.low_next.fetch_xor(true, Ordering::SeqCst) {
            self.low
        } else {
            Randomness::HI_MASK
        }
    }
}

/// Random source returning the same word forever
#[derive(Debug)]
pub struct ConstantRandom(pub u64);

impl RandomSource for ConstantRandom {
    fn next_u64(&self) -> u64 {
        self.0
    }
}

/// Assert that all ULIDs in the collection are unique
pub fn assert_unique_ulids(ulids: &[Ulid], expected_count: usize) {
    let set: HashSet<_> = ulids.iter().copied().collect();
    assert_eq!(
        set.len(),
        expected_count,
        "Expected {} unique ULIDs, but got {} (duplicates detected)",
        expected_count,
        set.len()
    );
}

/// Assert strict increase, by exactly one randomness step within a timestamp
pub fn assert_monotonic_batch(ulids: &[Ulid]) {
    for pair in ulids.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        assert!(next > prev, "{next} is not greater than {prev}");
        if prev.timestamp() == next.timestamp() {
            assert_eq!(
                next.randomness().to_u128() - prev.randomness().to_u128(),
                1,
                "{next} does not directly follow {prev}"
            );
        }
    }
}

/// Assert collection has expected unique count and is strictly increasing once sorted
pub fn assert_unique_and_sorted(mut ulids: Vec<Ulid>, expected_count: usize) {
    assert_unique_ulids(&ulids, expected_count);
    ulids.sort_unstable();
    for pair in ulids.windows(2) {
        assert!(pair[1] > pair[0]);
    }
}
