//! The ULID value type
//!
//! A ULID is 128 bits kept as two words. The most significant word holds the
//! 48-bit millisecond timestamp shifted left by 16, OR-ed with the top 16 bits
//! of randomness; the least significant word holds the low 64 bits of
//! randomness. Ordering the words as a pair orders ULIDs by timestamp and then
//! randomness, which is also the byte order of the big-endian encoding and the
//! lexical order of the text encoding.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::crockford;
use crate::error::UlidError;
use crate::randomness::Randomness;

/// A 128-bit Universally Unique Lexicographically Sortable Identifier
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ulid {
    msb: u64,
    lsb: u64,
}

impl Ulid {
    /// Number of bits in the timestamp
    pub const TIMESTAMP_BITS: u32 = 48;

    /// Largest representable timestamp (2^48 - 1 milliseconds)
    pub const TIMESTAMP_MAX: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Symbols used for the timestamp in the text form
    pub const TIMESTAMP_ENCODED_LEN: usize = 10;

    /// Symbols used for the randomness in the text form
    pub const RANDOMNESS_ENCODED_LEN: usize = 16;

    /// Length of the text form
    pub const ENCODED_LEN: usize = Self::TIMESTAMP_ENCODED_LEN + Self::RANDOMNESS_ENCODED_LEN;

    /// Bytes used for the timestamp in the binary form
    pub const TIMESTAMP_BYTES: usize = 6;

    /// Length of the binary form
    pub const BYTES: usize = Self::TIMESTAMP_BYTES + Randomness::BYTES;

    pub const MIN: Ulid = Ulid { msb: 0, lsb: 0 };
    pub const MAX: Ulid = Ulid {
        msb: u64::MAX,
        lsb: u64::MAX,
    };

    const RANDOMNESS_SHIFT: u32 = Randomness::HI_BITS;

    /// The all-zero ULID
    #[inline(always)]
    pub const fn nil() -> Self {
        Self::MIN
    }

    /// Build from a timestamp and randomness
    ///
    /// # Returns
    /// * `Result<Ulid, UlidError>` - Error if `timestamp` exceeds 48 bits
    #[inline]
    pub fn from_parts(timestamp: u64, randomness: Randomness) -> Result<Self, UlidError> {
        check_timestamp(timestamp)?;
        Ok(Self::assemble(timestamp, randomness))
    }

    /// Build from a timestamp and randomness given as two words
    ///
    /// Only the low 16 bits of `randomness_hi` are kept.
    #[inline]
    pub fn from_randomness_words(
        timestamp: u64,
        randomness_hi: u64,
        randomness_lo: u64,
    ) -> Result<Self, UlidError> {
        Self::from_parts(timestamp, Randomness::new(randomness_hi, randomness_lo))
    }

    /// Build from a timestamp and 10 randomness bytes read from `bytes[offset..]`
    pub fn from_randomness_bytes(
        timestamp: u64,
        bytes: &[u8],
        offset: usize,
    ) -> Result<Self, UlidError> {
        check_timestamp(timestamp)?;
        let randomness = read_array::<{ Randomness::BYTES }>(bytes, offset)?;
        Ok(Self::assemble(timestamp, Randomness::from_bytes(randomness)))
    }

    /// Read the 16-byte big-endian form from `bytes[offset..]`
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Result<Self, UlidError> {
        let raw = read_array::<{ Self::BYTES }>(bytes, offset)?;
        Ok(Self::from(raw))
    }

    /// Build directly from the most and least significant words
    #[inline(always)]
    pub const fn from_words(msb: u64, lsb: u64) -> Self {
        Self { msb, lsb }
    }

    /// Parse the 26-character text form, case-insensitively
    pub fn parse(text: &str) -> Result<Self, UlidError> {
        let len = text.chars().count();
        if len != Self::ENCODED_LEN {
            return Err(UlidError::InvalidLength {
                len,
                expected: Self::ENCODED_LEN,
            });
        }
        // Non-ASCII input is rejected here, so the byte split below is on a char boundary.
        crockford::validate(text)?;

        let (timestamp_text, randomness_text) = text.split_at(Self::TIMESTAMP_ENCODED_LEN);
        let timestamp = crockford::decode_u64(timestamp_text)?;
        let randomness = crockford::decode(randomness_text)?;

        // Ten symbols carry 50 bits; the top two fall outside the 48-bit timestamp.
        Self::from_randomness_bytes(timestamp & Self::TIMESTAMP_MAX, &randomness, 0)
    }

    #[inline(always)]
    const fn assemble(timestamp: u64, randomness: Randomness) -> Self {
        Self {
            msb: (timestamp << Self::RANDOMNESS_SHIFT) | randomness.hi(),
            lsb: randomness.lo(),
        }
    }

    /// Milliseconds since the Unix epoch
    #[inline(always)]
    pub const fn timestamp(&self) -> u64 {
        self.msb >> Self::RANDOMNESS_SHIFT
    }

    #[inline(always)]
    pub const fn randomness(&self) -> Randomness {
        Randomness::new(self.msb, self.lsb)
    }

    /// Randomness as `(high 16 bits, low 64 bits)`
    #[inline(always)]
    pub const fn randomness_words(&self) -> (u64, u64) {
        (self.msb & Randomness::HI_MASK, self.lsb)
    }

    #[inline]
    pub const fn randomness_bytes(&self) -> [u8; Randomness::BYTES] {
        self.randomness().to_bytes()
    }

    #[inline(always)]
    pub const fn most_significant_bits(&self) -> u64 {
        self.msb
    }

    #[inline(always)]
    pub const fn least_significant_bits(&self) -> u64 {
        self.lsb
    }

    /// The timestamp as a UTC date-time
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp() as i64)
    }

    /// 16 bytes, big-endian, timestamp then randomness
    #[inline]
    pub const fn to_bytes(&self) -> [u8; Self::BYTES] {
        ((self.msb as u128) << 64 | self.lsb as u128).to_be_bytes()
    }

    /// Copy the 16-byte form into `buffer[offset..offset + 16]`
    pub fn write_bytes(&self, buffer: &mut [u8], offset: usize) -> Result<(), UlidError> {
        let required = offset.saturating_add(Self::BYTES);
        let actual = buffer.len();
        let target = buffer
            .get_mut(offset..required)
            .ok_or(UlidError::BufferTooShort { required, actual })?;
        target.copy_from_slice(&self.to_bytes());
        Ok(())
    }

    /// Render into a stack buffer of ASCII symbols
    pub fn encode_array(&self) -> [u8; Self::ENCODED_LEN] {
        let mut buffer = [0u8; Self::ENCODED_LEN];
        let (timestamp, randomness) = buffer.split_at_mut(Self::TIMESTAMP_ENCODED_LEN);
        crockford::encode_u64_into(self.timestamp(), timestamp);
        crockford::encode_into(&self.randomness_bytes(), randomness);
        buffer
    }
}

#[inline]
pub(crate) fn check_timestamp(timestamp: u64) -> Result<(), UlidError> {
    if timestamp > Ulid::TIMESTAMP_MAX {
        return Err(UlidError::TimestampOutOfRange {
            timestamp,
            max: Ulid::TIMESTAMP_MAX,
        });
    }
    Ok(())
}

fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u8; N], UlidError> {
    let required = offset.saturating_add(N);
    bytes
        .get(offset..required)
        .and_then(|slice| <[u8; N]>::try_from(slice).ok())
        .ok_or(UlidError::BufferTooShort {
            required,
            actual: bytes.len(),
        })
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buffer = self.encode_array();
        let text = std::str::from_utf8(&buffer).map_err(|_| fmt::Error)?;
        f.pad(text)
    }
}

impl fmt::Debug for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ulid({self})")
    }
}

impl FromStr for Ulid {
    type Err = UlidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from(u128::from_be_bytes(bytes))
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(ulid: Ulid) -> Self {
        ulid.to_bytes()
    }
}

impl TryFrom<&[u8]> for Ulid {
    type Error = UlidError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes, 0)
    }
}

impl From<u128> for Ulid {
    fn from(value: u128) -> Self {
        Self::from_words((value >> 64) as u64, value as u64)
    }
}

impl From<Ulid> for u128 {
    fn from(ulid: Ulid) -> Self {
        ((ulid.msb as u128) << 64) | ulid.lsb as u128
    }
}
