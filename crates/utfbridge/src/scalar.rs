//! One-scalar-at-a-time decode and encode for both encodings.
//!
//! These functions are the reference semantics of the crate: every lane
//! backend hands anything it does not recognize to them, and the scalar
//! backend uses nothing else.
//!
//! UTF-8 well-formedness follows Table 3-7 of the Unicode Standard:
//!
//! | lead      | second byte | third   | fourth  |
//! |-----------|-------------|---------|---------|
//! | `00..7F`  |             |         |         |
//! | `C2..DF`  | `80..BF`    |         |         |
//! | `E0`      | `A0..BF`    | `80..BF`|         |
//! | `E1..EC`  | `80..BF`    | `80..BF`|         |
//! | `ED`      | `80..9F`    | `80..BF`|         |
//! | `EE..EF`  | `80..BF`    | `80..BF`|         |
//! | `F0`      | `90..BF`    | `80..BF`| `80..BF`|
//! | `F1..F3`  | `80..BF`    | `80..BF`| `80..BF`|
//! | `F4`      | `80..8F`    | `80..BF`| `80..BF`|

/// U+FFFD REPLACEMENT CHARACTER.
pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// U+FFFD encoded as UTF-8.
pub const REPLACEMENT_UTF8: [u8; 3] = [0xEF, 0xBF, 0xBD];

/// Result of decoding the sequence at the start of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStep {
    /// A well-formed scalar occupying `len` code units.
    Scalar {
        /// The decoded scalar value.
        value: u32,
        /// Code units consumed.
        len: usize,
    },
    /// A malformed sequence. `len` is its maximal subpart: the code units to
    /// replace with a single U+FFFD before decoding resumes. Always ≥ 1.
    Invalid {
        /// Code units covered by the malformed subpart.
        len: usize,
    },
    /// The buffer ends inside a sequence that is well-formed so far (or is
    /// empty).
    Incomplete,
}

/// Decodes the UTF-8 sequence at the start of `src`.
#[must_use]
pub fn decode_utf8(src: &[u8]) -> DecodeStep {
    let Some(&lead) = src.first() else {
        return DecodeStep::Incomplete;
    };
    if lead < 0x80 {
        return DecodeStep::Scalar {
            value: u32::from(lead),
            len: 1,
        };
    }
    let (len, second_lo, second_hi) = match lead {
        0xC2..=0xDF => (2, 0x80, 0xBF),
        0xE0 => (3, 0xA0, 0xBF),
        0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80, 0xBF),
        0xED => (3, 0x80, 0x9F),
        0xF0 => (4, 0x90, 0xBF),
        0xF1..=0xF3 => (4, 0x80, 0xBF),
        0xF4 => (4, 0x80, 0x8F),
        _ => return DecodeStep::Invalid { len: 1 },
    };
    let mut value = u32::from(lead) & (0x7F >> len);
    for i in 1..len {
        let Some(&b) = src.get(i) else {
            return DecodeStep::Incomplete;
        };
        let (lo, hi) = if i == 1 {
            (second_lo, second_hi)
        } else {
            (0x80, 0xBF)
        };
        if !(lo..=hi).contains(&b) {
            return DecodeStep::Invalid { len: i };
        }
        value = (value << 6) | u32::from(b & 0x3F);
    }
    DecodeStep::Scalar { value, len }
}

/// Decodes the UTF-16 scalar at the start of `src`.
///
/// An unpaired surrogate is malformed with `len == 1`; the unit after a high
/// surrogate that is not a low surrogate is left for the next call.
#[must_use]
pub fn decode_utf16(src: &[u16]) -> DecodeStep {
    let Some(&unit) = src.first() else {
        return DecodeStep::Incomplete;
    };
    match unit {
        0xD800..=0xDBFF => match src.get(1) {
            None => DecodeStep::Incomplete,
            Some(&low @ 0xDC00..=0xDFFF) => DecodeStep::Scalar {
                value: combine_surrogates(unit, low),
                len: 2,
            },
            Some(_) => DecodeStep::Invalid { len: 1 },
        },
        0xDC00..=0xDFFF => DecodeStep::Invalid { len: 1 },
        _ => DecodeStep::Scalar {
            value: u32::from(unit),
            len: 1,
        },
    }
}

/// `0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)`.
#[inline]
#[must_use]
pub const fn combine_surrogates(high: u16, low: u16) -> u32 {
    0x10000 + (((high as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00)
}

/// UTF-8 width of a scalar.
#[inline]
#[must_use]
pub const fn utf8_len(value: u32) -> usize {
    if value < 0x80 {
        1
    } else if value < 0x800 {
        2
    } else if value < 0x1_0000 {
        3
    } else {
        4
    }
}

/// UTF-16 width of a scalar.
#[inline]
#[must_use]
pub const fn utf16_len(value: u32) -> usize {
    if value < 0x1_0000 { 1 } else { 2 }
}

/// Writes `value` as UTF-8 at the start of `dst`.
///
/// Returns the number of bytes written, or `None` (writing nothing) when
/// `dst` is too short. `value` must be a scalar value.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_utf8(value: u32, dst: &mut [u8]) -> Option<usize> {
    debug_assert!(value <= 0x10_FFFF && !(0xD800..=0xDFFF).contains(&value));
    let len = utf8_len(value);
    let out = dst.get_mut(..len)?;
    match len {
        1 => out[0] = value as u8,
        2 => {
            out[0] = 0xC0 | (value >> 6) as u8;
            out[1] = 0x80 | (value & 0x3F) as u8;
        }
        3 => {
            out[0] = 0xE0 | (value >> 12) as u8;
            out[1] = 0x80 | ((value >> 6) & 0x3F) as u8;
            out[2] = 0x80 | (value & 0x3F) as u8;
        }
        _ => {
            out[0] = 0xF0 | (value >> 18) as u8;
            out[1] = 0x80 | ((value >> 12) & 0x3F) as u8;
            out[2] = 0x80 | ((value >> 6) & 0x3F) as u8;
            out[3] = 0x80 | (value & 0x3F) as u8;
        }
    }
    Some(len)
}

/// Writes `value` as UTF-16 at the start of `dst`.
///
/// Returns the number of units written, or `None` (writing nothing) when
/// `dst` is too short. `value` must be a scalar value.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_utf16(value: u32, dst: &mut [u16]) -> Option<usize> {
    debug_assert!(value <= 0x10_FFFF && !(0xD800..=0xDFFF).contains(&value));
    if value < 0x1_0000 {
        *dst.first_mut()? = value as u16;
        return Some(1);
    }
    let out = dst.get_mut(..2)?;
    let offset = value - 0x1_0000;
    out[0] = 0xD800 | (offset >> 10) as u16;
    out[1] = 0xDC00 | (offset & 0x3FF) as u16;
    Some(2)
}
