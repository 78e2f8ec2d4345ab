use std::thread;
use std::time::Duration;

use kulid::{CancellationToken, MonotonicUlidGenerator, RandomSource, UlidGenerator};

/// Always draws the largest randomness, leaving no room after the first ULID
struct Saturated;

impl RandomSource for Saturated {
    fn next_u64(&self) -> u64 {
        u64::MAX
    }
}

fn main() {
    // A frozen clock never advances, so the first millisecond is all there is
    let frozen = || 1_700_000_000_000u64;
    let generator = MonotonicUlidGenerator::with_sources(frozen, Saturated);

    // Best effort returns whatever fits in the current timestamp
    let batch = generator.generate(4).unwrap();
    println!("Best effort produced {} of 4 ULIDs: {:?}", batch.len(), batch);

    let token = CancellationToken::new();
    let canceller = token.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        canceller.cancel();
    });

    // Exact generation keeps waiting for the clock until cancelled
    let ulids = generator.generate_exact_with(4, None, &token).unwrap();
    handle.join().unwrap();

    println!(
        "Exact generation returned {} of 4 ULIDs after cancellation",
        ulids.len()
    );
    if let Some(last) = generator.last_issued() {
        println!("Last issued: {last}");
    }
}
