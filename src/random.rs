//! Random sources feeding ULID randomness
//!
//! Generators only need "64 random bits on demand". Sources are shared by
//! reference across threads, so implementations must be `Send + Sync`.

use parking_lot::Mutex;
use rand::RngCore;

/// A source of 64-bit random words
pub trait RandomSource: Send + Sync {
    /// Draw the next 64 random bits
    fn next_u64(&self) -> u64;
}

/// Default source backed by `rand`'s thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    #[inline]
    fn next_u64(&self) -> u64 {
        rand::rng().next_u64()
    }
}

/// Serialises access to any single-threaded `RngCore`, e.g. a seeded `StdRng`
impl<R> RandomSource for Mutex<R>
where
    R: RngCore + Send,
{
    #[inline]
    fn next_u64(&self) -> u64 {
        self.lock().next_u64()
    }
}

impl<S> RandomSource for &S
where
    S: RandomSource + ?Sized,
{
    #[inline]
    fn next_u64(&self) -> u64 {
        (**self).next_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = Mutex::new(StdRng::seed_from_u64(42));
        let b = Mutex::new(StdRng::seed_from_u64(42));
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_thread_random_varies() {
        let source = ThreadRandom;
        let draws: Vec<u64> = (0..8).map(|_| source.next_u64()).collect();
        assert!(draws.windows(2).any(|w| w[0] != w[1]));
    }
}
