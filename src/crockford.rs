/// Crockford Base32 encoding and decoding for ULIDs
///
/// Packs 5-bit symbols across byte boundaries in a repeating 8-symbol / 5-byte
/// cycle. Decoding is case-insensitive; `I`, `L`, `O` and `U` are rejected.
use once_cell::sync::Lazy;

/// Character set for Crockford Base32 encoding (0-9, A-Z without I, L, O, U)
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Maximum number of symbols that fit in a u64 (13 * 5 = 65 bits)
pub const MAX_U64_LEN: usize = 13;

/// Lookup table for decoding symbols to their values, both cases mapped
static DECODE_MAP: Lazy<[i8; 128]> = Lazy::new(|| {
    let mut map = [-1i8; 128];
    for (i, &c) in ALPHABET.iter().enumerate() {
        map[c as usize] = i as i8;
        map[c.to_ascii_lowercase() as usize] = i as i8;
    }
    map
});

/// Extra output bytes produced by the trailing `len % 8` symbols
const BYTE_LEN_INC: [usize; 8] = [0, 0, 1, 1, 2, 3, 3, 4];

/// How one symbol position of the cycle is cut out of the input bytes.
///
/// `shift` is a right shift when positive and a left shift when negative.
/// When `advance` is set the symbol finishes the current byte; `spill_mask`
/// then selects the high bits it borrows from the next byte.
#[derive(Clone, Copy)]
struct EncodeSlot {
    mask: u8,
    shift: i8,
    advance: bool,
    spill_mask: u8,
    spill_shift: u8,
}

// aaaaa | aaabb | bbbbb | bcccc | ccccd | ddddd | ddeee | eeeee
const ENCODE_SLOTS: [EncodeSlot; 8] = [
    EncodeSlot { mask: 0xF8, shift: 3, advance: false, spill_mask: 0, spill_shift: 0 },
    EncodeSlot { mask: 0x07, shift: -2, advance: true, spill_mask: 0xC0, spill_shift: 6 },
    EncodeSlot { mask: 0x3E, shift: 1, advance: false, spill_mask: 0, spill_shift: 0 },
    EncodeSlot { mask: 0x01, shift: -4, advance: true, spill_mask: 0xF0, spill_shift: 4 },
    EncodeSlot { mask: 0x0F, shift: -1, advance: true, spill_mask: 0x80, spill_shift: 7 },
    EncodeSlot { mask: 0x7C, shift: 2, advance: false, spill_mask: 0, spill_shift: 0 },
    EncodeSlot { mask: 0x03, shift: -3, advance: true, spill_mask: 0xE0, spill_shift: 5 },
    EncodeSlot { mask: 0x1F, shift: 0, advance: true, spill_mask: 0, spill_shift: 0 },
];

/// How one symbol is OR-ed into the output bytes; mirror image of [`EncodeSlot`].
#[derive(Clone, Copy)]
struct DecodeSlot {
    mask: u8,
    shift: i8,
    advance: bool,
    spill_mask: u8,
    spill_shift: u8,
}

// 1111 1222 | 2233 3334 | 4444 5555 | 5666 6677 | 7778 8888
const DECODE_SLOTS: [DecodeSlot; 8] = [
    DecodeSlot { mask: 0x1F, shift: -3, advance: false, spill_mask: 0, spill_shift: 0 },
    DecodeSlot { mask: 0x1C, shift: 2, advance: true, spill_mask: 0x03, spill_shift: 6 },
    DecodeSlot { mask: 0x1F, shift: -1, advance: false, spill_mask: 0, spill_shift: 0 },
    DecodeSlot { mask: 0x10, shift: 4, advance: true, spill_mask: 0x0F, spill_shift: 4 },
    DecodeSlot { mask: 0x1E, shift: 1, advance: true, spill_mask: 0x01, spill_shift: 7 },
    DecodeSlot { mask: 0x1F, shift: -2, advance: false, spill_mask: 0, spill_shift: 0 },
    DecodeSlot { mask: 0x18, shift: 3, advance: true, spill_mask: 0x07, spill_shift: 5 },
    DecodeSlot { mask: 0x1F, shift: 0, advance: true, spill_mask: 0, spill_shift: 0 },
];

#[inline(always)]
const fn shifted(value: u8, shift: i8) -> u8 {
    if shift >= 0 {
        value >> shift
    } else {
        value << (-shift)
    }
}

/// Number of symbols needed to encode `byte_len` bytes
#[inline]
pub const fn encoded_len(byte_len: usize) -> usize {
    (byte_len * 8).div_ceil(5)
}

/// Number of bytes produced by decoding `symbol_len` symbols
#[inline]
pub const fn decoded_len(symbol_len: usize) -> usize {
    (symbol_len >> 3) * 5 + BYTE_LEN_INC[symbol_len & 0x07]
}

/// Encode a byte buffer into Crockford Base32 symbols
///
/// # Arguments
/// * `bytes` - The bytes to encode
///
/// # Returns
/// * `String` - `ceil(8 * bytes.len() / 5)` uppercase symbols; a trailing
///   partial symbol is zero-padded on the low end
pub fn encode(bytes: &[u8]) -> String {
    let mut buffer = vec![0u8; encoded_len(bytes.len())];
    let written = encode_into(bytes, &mut buffer);
    debug_assert_eq!(written, buffer.len());
    String::from_utf8_lossy(&buffer[..written]).into_owned()
}

/// Encode `bytes` into `out`, returning the number of symbols written
///
/// `out` must hold at least [`encoded_len`] bytes.
pub(crate) fn encode_into(bytes: &[u8], out: &mut [u8]) -> usize {
    let len = bytes.len();
    let mut src = 0;
    let mut written = 0;

    while src < len {
        let slot = ENCODE_SLOTS[written & 0x07];
        let mut index = shifted(bytes[src] & slot.mask, slot.shift);
        if slot.advance {
            src += 1;
            if slot.spill_mask != 0 && src < len {
                index |= (bytes[src] & slot.spill_mask) >> slot.spill_shift;
            }
        }
        out[written] = ALPHABET[(index & 0x1F) as usize];
        written += 1;
    }

    written
}

/// Encode the low bits of `value` into exactly `width` symbols, most significant first
///
/// Values needing fewer than `width` symbols are left-padded with `0`; bits above
/// `5 * width` are dropped.
pub fn encode_u64(value: u64, width: usize) -> Result<String, EncodeError> {
    if width > MAX_U64_LEN {
        return Err(EncodeError::InvalidWidth {
            width,
            max: MAX_U64_LEN,
        });
    }
    let mut buffer = [0u8; MAX_U64_LEN];
    encode_u64_into(value, &mut buffer[..width]);
    Ok(String::from_utf8_lossy(&buffer[..width]).into_owned())
}

/// Fill `out` with the `out.len()` lowest symbols of `value`
pub(crate) fn encode_u64_into(mut value: u64, out: &mut [u8]) {
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(value & 0x1F) as usize];
        value >>= 5;
    }
}

/// Decode Crockford Base32 text into bytes
///
/// # Returns
/// * `Result<Vec<u8>, DecodeError>` - `floor(len / 8) * 5 + [0,0,1,1,2,3,3,4][len % 8]`
///   bytes, or the first invalid character and its position
pub fn decode(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    validate(encoded)?;

    let symbols = encoded.as_bytes();
    let byte_len = decoded_len(symbols.len());
    let mut bytes = vec![0u8; byte_len];
    let mut dest = 0;

    for (seq, &c) in symbols.iter().enumerate() {
        if dest >= byte_len {
            break;
        }
        let value = DECODE_MAP[c as usize] as u8;
        let slot = DECODE_SLOTS[seq & 0x07];
        bytes[dest] |= shifted(value & slot.mask, slot.shift);
        if slot.advance {
            dest += 1;
            if slot.spill_mask != 0 && dest < byte_len {
                bytes[dest] = (value & slot.spill_mask) << slot.spill_shift;
            }
        }
    }

    Ok(bytes)
}

/// Decode at most 13 symbols into a u64, most significant symbol first
///
/// A 13-symbol input carries 65 bits; the topmost bit is shifted out.
pub fn decode_u64(encoded: &str) -> Result<u64, DecodeError> {
    let len = encoded.chars().count();
    if len > MAX_U64_LEN {
        return Err(DecodeError::TooLong {
            len,
            max: MAX_U64_LEN,
        });
    }

    let mut result: u64 = 0;
    for (position, c) in encoded.chars().enumerate() {
        result = (result << 5) | symbol_value(c, position)? as u64;
    }

    Ok(result)
}

/// Check that every character of `encoded` belongs to the alphabet
pub fn validate(encoded: &str) -> Result<(), DecodeError> {
    for (position, c) in encoded.chars().enumerate() {
        symbol_value(c, position)?;
    }
    Ok(())
}

#[inline]
fn symbol_value(character: char, position: usize) -> Result<u8, DecodeError> {
    if character.is_ascii() {
        let value = DECODE_MAP[character as usize];
        if value >= 0 {
            return Ok(value as u8);
        }
    }
    Err(DecodeError::InvalidCharacter {
        character,
        position,
    })
}

/// Errors that can occur during Crockford Base32 decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input contains a character outside the alphabet
    #[error("Invalid Crockford Base32 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// The input has more symbols than a u64 can hold
    #[error("Encoded integer of {len} symbols exceeds the maximum of {max}")]
    TooLong { len: usize, max: usize },
}

/// Errors that can occur during Crockford Base32 encoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The requested width cannot be filled from a u64
    #[error("Width {width} is invalid. Maximum allowed value is {max}")]
    InvalidWidth { width: usize, max: usize },
}
