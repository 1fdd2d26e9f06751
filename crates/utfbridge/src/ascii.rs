//! ASCII run detection and straight copies between encodings.
//!
//! The scanners read one machine word at a time (`usize` for bytes, four
//! units packed into a `u64` for UTF-16) and only drop to per-unit checks for
//! the final partial word. They are used ahead of the lane loop to skip the
//! common all-ASCII prefix and by the validity scanner.

const WORD_BYTES: usize = core::mem::size_of::<usize>();

/// High bit of every byte in a `usize`.
const ASCII_MASK: usize = usize::from_ne_bytes([0x80; WORD_BYTES]);

/// Bits that must be clear in each of four packed `u16`s for all to be ASCII.
const UTF16_ASCII_MASK: u64 = 0xFF80_FF80_FF80_FF80;

/// Number of leading bytes in `src` that are `< 0x80`.
#[must_use]
pub fn ascii_prefix_len_utf8(src: &[u8]) -> usize {
    let mut offset = 0;
    let mut words = src.chunks_exact(WORD_BYTES);
    for chunk in words.by_ref() {
        let mut bytes = [0u8; WORD_BYTES];
        bytes.copy_from_slice(chunk);
        let masked = usize::from_ne_bytes(bytes) & ASCII_MASK;
        if masked != 0 {
            return offset + leading_ascii_bytes(masked);
        }
        offset += WORD_BYTES;
    }
    let tail = words.remainder();
    offset + tail.iter().position(|&b| b >= 0x80).unwrap_or(tail.len())
}

/// Number of leading units in `src` that are `< 0x80`.
#[must_use]
pub fn ascii_prefix_len_utf16(src: &[u16]) -> usize {
    let mut offset = 0;
    let mut words = src.chunks_exact(4);
    for chunk in words.by_ref() {
        let packed = chunk
            .iter()
            .rev()
            .fold(0u64, |acc, &unit| (acc << 16) | u64::from(unit));
        let masked = packed & UTF16_ASCII_MASK;
        if masked != 0 {
            // `chunk[0]` sits in the low 16 bits.
            return offset + (masked.trailing_zeros() / 16) as usize;
        }
        offset += 4;
    }
    let tail = words.remainder();
    offset + tail.iter().position(|&u| u >= 0x80).unwrap_or(tail.len())
}

/// Text-order index of the first byte with its high bit set in a non-zero
/// masked word.
#[inline]
fn leading_ascii_bytes(masked: usize) -> usize {
    #[cfg(target_endian = "little")]
    let zeros = masked.trailing_zeros();
    #[cfg(target_endian = "big")]
    let zeros = masked.leading_zeros();
    (zeros / 8) as usize
}

/// Zero-extends ASCII bytes into UTF-16 units.
///
/// # Panics
///
/// Panics if the slices differ in length.
#[inline]
pub fn widen_ascii(src: &[u8], dst: &mut [u16]) {
    assert_eq!(src.len(), dst.len(), "widen_ascii: length mismatch");
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = u16::from(s);
    }
}

/// Truncates ASCII UTF-16 units into bytes.
///
/// # Panics
///
/// Panics if the slices differ in length.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn narrow_ascii(src: &[u16], dst: &mut [u8]) {
    assert_eq!(src.len(), dst.len(), "narrow_ascii: length mismatch");
    for (d, &s) in dst.iter_mut().zip(src) {
        debug_assert!(s < 0x80);
        *d = s as u8;
    }
}
