//! 80-bit randomness arithmetic
//!
//! The randomness component is an unsigned 80-bit integer kept as two words:
//! a high word with 16 valid bits and a full 64-bit low word. Arithmetic wraps
//! at 2^80 and reports the carry out as an overflow flag; deciding what to do
//! on overflow is left to the caller.

use std::fmt;

use crate::random::RandomSource;

/// Unsigned 80-bit randomness, `hi` holds the top 16 bits
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Randomness {
    hi: u64,
    lo: u64,
}

impl Randomness {
    /// Number of valid bits in the high word
    pub const HI_BITS: u32 = 16;

    /// Mask of the valid high-word bits
    pub const HI_MASK: u64 = (1 << Self::HI_BITS) - 1;

    /// Number of bytes in the big-endian form
    pub const BYTES: usize = 10;

    pub const MIN: Randomness = Randomness { hi: 0, lo: 0 };
    pub const MAX: Randomness = Randomness {
        hi: Self::HI_MASK,
        lo: u64::MAX,
    };

    /// Create from two words; bits of `hi` above the low 16 are discarded
    #[inline(always)]
    pub const fn new(hi: u64, lo: u64) -> Self {
        Self {
            hi: hi & Self::HI_MASK,
            lo,
        }
    }

    /// Draw 80 fresh bits: the first draw supplies the high 16 bits, the second the low 64
    #[inline]
    pub fn generate<R: RandomSource + ?Sized>(source: &R) -> Self {
        let hi = source.next_u64();
        let lo = source.next_u64();
        Self::new(hi, lo)
    }

    #[inline(always)]
    pub const fn hi(self) -> u64 {
        self.hi
    }

    #[inline(always)]
    pub const fn lo(self) -> u64 {
        self.lo
    }

    #[inline(always)]
    pub const fn is_max(self) -> bool {
        self.hi == Self::HI_MASK && self.lo == u64::MAX
    }

    /// Add one, carrying from the low word into the high word
    ///
    /// # Returns
    /// * `(Randomness, bool)` - The wrapped sum and whether it carried out of 80 bits
    #[inline]
    pub const fn increment(self) -> (Self, bool) {
        let (lo, carry) = self.lo.overflowing_add(1);
        let hi = self.hi + carry as u64;
        (Self::new(hi, lo), hi > Self::HI_MASK)
    }

    /// Add a 32-bit unsigned amount, carrying from the low word into the high word
    ///
    /// # Returns
    /// * `(Randomness, bool)` - The wrapped sum and whether it carried out of 80 bits
    #[inline]
    pub const fn add(self, n: u32) -> (Self, bool) {
        let (lo, carry) = self.lo.overflowing_add(n as u64);
        let hi = self.hi + carry as u64;
        (Self::new(hi, lo), hi > Self::HI_MASK)
    }

    /// Big-endian bytes, high word first
    #[inline]
    pub const fn to_bytes(self) -> [u8; Self::BYTES] {
        let hi = (self.hi as u16).to_be_bytes();
        let lo = self.lo.to_be_bytes();
        [
            hi[0], hi[1], lo[0], lo[1], lo[2], lo[3], lo[4], lo[5], lo[6], lo[7],
        ]
    }

    /// Read 10 big-endian bytes
    #[inline]
    pub const fn from_bytes(bytes: [u8; Self::BYTES]) -> Self {
        let hi = u16::from_be_bytes([bytes[0], bytes[1]]) as u64;
        let lo = u64::from_be_bytes([
            bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7], bytes[8], bytes[9],
        ]);
        Self { hi, lo }
    }

    #[inline(always)]
    pub const fn to_u128(self) -> u128 {
        ((self.hi as u128) << 64) | self.lo as u128
    }

    /// Keep the low 80 bits of `value`
    #[inline(always)]
    pub const fn from_u128(value: u128) -> Self {
        Self::new((value >> 64) as u64, value as u64)
    }
}

impl fmt::Debug for Randomness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Randomness({:#06x}_{:016x})", self.hi, self.lo)
    }
}
