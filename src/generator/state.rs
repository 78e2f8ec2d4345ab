//! Lock-guarded state of the monotonic generator
//!
//! Holds the last issued (timestamp, randomness) pair and hands out disjoint,
//! contiguous randomness ranges. Every read and write of the pair happens in
//! [`State::reserve`] while the caller holds the generator's lock.

use crate::error::UlidError;
use crate::randomness::Randomness;
use crate::ulid::Ulid;

/// The last value handed out, inclusive end of the newest reservation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Issued {
    pub timestamp: u64,
    pub randomness: Randomness,
}

/// Generator state; uninitialized until the first reservation
#[derive(Debug, Default)]
pub struct State {
    last: Option<Issued>,
}

/// Outcome of one reservation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// A block of consecutive randomness values now belongs to the caller
    Reserved(Reservation),
    /// `now` is newer than the stored timestamp; retry with fresh randomness
    NeedsRandomness,
    /// The stored timestamp has no randomness left
    Exhausted { timestamp: u64 },
}

/// `len` consecutive randomness values starting at `base`, all under `timestamp`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reservation {
    timestamp: u64,
    base: Randomness,
    len: u32,
}

impl State {
    /// Reserve up to `count` values for `now`
    ///
    /// A `now` newer than the stored timestamp starts a fresh block at `fresh`,
    /// which the caller draws outside the lock after a `NeedsRandomness` answer.
    /// Otherwise the block continues after the last issued value under the stored
    /// timestamp, so an older `now` never moves the stored timestamp backward.
    /// A block that would run past 2^80 - 1 is cut short there.
    pub fn reserve(&mut self, now: u64, count: u32, fresh: Option<Randomness>) -> Decision {
        debug_assert!(count > 0);

        let (timestamp, base) = match self.last {
            Some(last) if now <= last.timestamp => {
                if last.randomness.is_max() {
                    return Decision::Exhausted {
                        timestamp: last.timestamp,
                    };
                }
                (last.timestamp, last.randomness.increment().0)
            }
            _ => match fresh {
                Some(randomness) => (now, randomness),
                None => return Decision::NeedsRandomness,
            },
        };

        let (end, overflow) = base.add(count - 1);
        let end = if overflow { Randomness::MAX } else { end };
        let len = (end.to_u128() - base.to_u128() + 1) as u32;

        self.last = Some(Issued {
            timestamp,
            randomness: end,
        });

        Decision::Reserved(Reservation {
            timestamp,
            base,
            len,
        })
    }

    #[inline]
    pub fn last_issued(&self) -> Option<Issued> {
        self.last
    }
}

impl Reservation {
    #[inline(always)]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    #[inline(always)]
    pub const fn base(&self) -> Randomness {
        self.base
    }

    #[inline(always)]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Append the reserved ULIDs in increasing order, starting at `base`
    pub fn emit_into(self, ulids: &mut Vec<Ulid>) -> Result<(), UlidError> {
        let mut randomness = self.base;
        for emitted in 1..=self.len {
            ulids.push(Ulid::from_parts(self.timestamp, randomness)?);
            if emitted == self.len {
                break;
            }
            let (next, overflow) = randomness.increment();
            if overflow {
                break;
            }
            randomness = next;
        }
        Ok(())
    }
}
