//! Exhaustion, waiting and cancellation tests for the monotonic generator

#[cfg(test)]
mod tests {
    use crate::tests::test_utils::{assert_monotonic_batch, ControlledClock, PredictableRandom};
    use crate::*;
    use std::thread;
    use std::time::{Duration, Instant};

    const T: u64 = 1_700_000_000_000;

    #[test]
    fn test_exhausted_timestamp_best_effort_returns_nothing() {
        let generator = MonotonicUlidGenerator::with_sources(|| T, PredictableRandom::new(0));

        let first = generator.generate(1).unwrap();
        assert_eq!(first.len(), 1);
        assert!(first[0].randomness().is_max());

        assert!(generator.generate(1).unwrap().is_empty());
        assert!(generator.generate_at(3, T - 10).unwrap().is_empty());
        assert_eq!(generator.next_ulid().unwrap(), None);
    }

    #[test]
    fn test_exhausted_timestamp_huge_best_effort_returns_nothing() {
        let generator = MonotonicUlidGenerator::with_sources(|| T, PredictableRandom::new(0));
        assert_eq!(generator.generate(1).unwrap().len(), 1);

        assert_eq!(generator.generate(u32::MAX as usize), Ok(vec![]));
        assert_eq!(generator.generate_at(u32::MAX as usize, T), Ok(vec![]));
    }

    #[test]
    fn test_huge_batch_clamped_at_max_allocates_what_it_emits() {
        // Randomness starts 4 below the maximum, so only 5 fit under T.
        let generator = MonotonicUlidGenerator::with_sources(|| T, PredictableRandom::new(4));

        let ulids = generator.generate(u32::MAX as usize).unwrap();

        assert_eq!(ulids.len(), 5);
        assert!(ulids[4].randomness().is_max());
        assert_monotonic_batch(&ulids);
    }

    #[test]
    fn test_exhausted_timestamp_exact_waits_for_clock() {
        // Reads: T, T, T (then advance), T + 1
        let generator =
            MonotonicUlidGenerator::with_sources(ControlledClock::new(T, 3), PredictableRandom::new(0));

        assert_eq!(generator.generate(1).unwrap().len(), 1);
        assert!(generator.generate(1).unwrap().is_empty());

        let ulids = generator.generate_exact(1).unwrap();
        assert_eq!(ulids.len(), 1);
        assert!(ulids[0].timestamp() > T);
    }

    #[test]
    fn test_wait_loops_while_clock_ties() {
        let config = GeneratorConfig::builder()
            .retry_interval(Duration::from_micros(100))
            .unwrap()
            .build();
        let generator = MonotonicUlidGenerator::with_config(
            ControlledClock::new(T, 25),
            PredictableRandom::new(1),
            config,
        );

        // Two ULIDs fit under each timestamp; the clock ties for 24 more reads.
        let ulids = generator.generate_exact(4).unwrap();

        assert_eq!(ulids.len(), 4);
        assert_eq!(ulids[0].timestamp(), T);
        assert_eq!(ulids[1].timestamp(), T);
        assert!(ulids[2..].iter().all(|u| u.timestamp() == T + 1));
        assert_monotonic_batch(&ulids);
    }

    #[test]
    fn test_batch_spanning_overflow_keeps_order() {
        let generator =
            MonotonicUlidGenerator::with_sources(ControlledClock::new(T, 1), PredictableRandom::new(2));

        let ulids = generator.generate_exact(10).unwrap();

        assert_eq!(ulids.len(), 10);
        assert_monotonic_batch(&ulids);
        let timestamps: Vec<u64> = ulids.iter().map(Ulid::timestamp).collect();
        assert_eq!(&timestamps[..3], &[T, T, T]);
        assert!(timestamps[3] > T);
    }

    #[test]
    fn test_cancelled_before_wait_returns_partial() {
        let generator = MonotonicUlidGenerator::with_sources(|| T, PredictableRandom::new(1));
        let token = CancellationToken::new();
        token.cancel();

        let ulids = generator.generate_exact_with(5, None, &token).unwrap();

        assert_eq!(ulids.len(), 2);
        assert_monotonic_batch(&ulids);
    }

    #[test]
    fn test_cancel_interrupts_wait() {
        let generator = MonotonicUlidGenerator::with_sources(|| T, PredictableRandom::new(0));
        assert_eq!(generator.generate(1).unwrap().len(), 1);

        let token = CancellationToken::new();
        let canceller = token.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            canceller.cancel();
        });

        let start = Instant::now();
        let ulids = generator.generate_exact_with(3, None, &token).unwrap();
        handle.join().unwrap();

        assert!(ulids.is_empty());
        assert!(start.elapsed() >= Duration::from_millis(25));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_explicit_future_timestamp_blocks_until_cancelled() {
        // The stored timestamp is ahead of the clock, so only cancellation ends the wait.
        let generator = MonotonicUlidGenerator::with_sources(|| T, PredictableRandom::new(0));
        assert_eq!(generator.generate_at(1, T + 1_000).unwrap().len(), 1);

        let token = CancellationToken::new();
        let canceller = token.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            canceller.cancel();
        });

        let ulids = generator.generate_exact_with(1, None, &token).unwrap();
        handle.join().unwrap();
        assert!(ulids.is_empty());
        assert_eq!(generator.last_issued().unwrap().timestamp(), T + 1_000);
    }
}
