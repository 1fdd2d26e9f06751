//! Validation without output.
//!
//! The scanners walk the source with the same lane test and the same
//! [`scalar`] rules as the transcoder, and count what the valid prefix would
//! occupy in the other encoding. The adjustments they report are relative to
//! the prefix length, so `prefix + adjustment` is the exact destination size.

use crate::{
    TranscodeError,
    ascii::{ascii_prefix_len_utf8, ascii_prefix_len_utf16},
    lanes::{Backend, LaneKernel, dispatch},
    scalar::{self, DecodeStep},
};

/// Counts accumulated over a valid prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Census {
    /// Source code units in the valid prefix.
    valid_up_to: usize,
    /// Code units the prefix occupies in the other encoding.
    other_len: usize,
    /// Scalar values in the prefix.
    scalars: usize,
}

impl Census {
    fn ascii(n: usize) -> Self {
        Census {
            valid_up_to: n,
            other_len: n,
            scalars: n,
        }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn adjustments(self, own_len: usize) -> (usize, i64, i64) {
        // Slice lengths never exceed `isize::MAX`, so these casts are lossless.
        let code_units = self.other_len as i64 - self.valid_up_to as i64;
        let scalars = self.scalars as i64 - own_len as i64;
        (self.valid_up_to, code_units, scalars)
    }
}

/// Returns the length of the longest valid UTF-8 prefix of `source`, the
/// UTF-16 code-unit adjustment and the scalar adjustment.
///
/// With `(valid, units_adj, scalars_adj)`, the prefix transcodes to
/// `valid + units_adj` UTF-16 units holding
/// `valid + units_adj + scalars_adj` scalars. A truncated trailing sequence
/// is not part of the valid prefix.
///
/// ```rust
/// // 'a' (1 unit), 'é' (1 unit), '😀' (2 units, 1 scalar), then a stray byte.
/// let source = b"a\xC3\xA9\xF0\x9F\x98\x80\xFF";
/// assert_eq!(utfbridge::first_invalid_utf8(source), (7, -3, -1));
/// ```
#[must_use]
pub fn first_invalid_utf8(source: &[u8]) -> (usize, i64, i64) {
    first_invalid_utf8_with(source, Backend::detect())
}

/// [`first_invalid_utf8`] with an explicit backend. An unavailable backend
/// falls back to [`Backend::detect`].
#[must_use]
pub fn first_invalid_utf8_with(source: &[u8], backend: Backend) -> (usize, i64, i64) {
    let census = census_utf8_with(source, backend);
    census.adjustments(census.other_len)
}

/// Returns the length of the longest valid UTF-16 prefix of `source`, the
/// UTF-8 byte adjustment and the scalar adjustment.
///
/// With `(valid, bytes_adj, scalars_adj)`, the prefix transcodes to
/// `valid + bytes_adj` UTF-8 bytes and holds `valid + scalars_adj` scalars.
/// A high surrogate in the last position is not part of the valid prefix.
#[must_use]
pub fn first_invalid_utf16(source: &[u16]) -> (usize, i64, i64) {
    first_invalid_utf16_with(source, Backend::detect())
}

/// [`first_invalid_utf16`] with an explicit backend.
#[must_use]
pub fn first_invalid_utf16_with(source: &[u16], backend: Backend) -> (usize, i64, i64) {
    let census = census_utf16_with(source, backend);
    census.adjustments(census.valid_up_to)
}

/// Exact number of UTF-16 units `source` transcodes to.
///
/// # Errors
///
/// [`TranscodeError::Truncated`] if `source` ends inside a sequence,
/// [`TranscodeError::InvalidData`] for any other malformation. The offset is
/// the valid prefix length.
pub fn utf16_len_for_utf8(source: &[u8]) -> Result<usize, TranscodeError> {
    complete_utf8(source).map(|census| census.other_len)
}

/// Exact number of UTF-8 bytes `source` transcodes to.
///
/// # Errors
///
/// As [`utf16_len_for_utf8`]; a trailing high surrogate is
/// [`TranscodeError::Truncated`].
pub fn utf8_len_for_utf16(source: &[u16]) -> Result<usize, TranscodeError> {
    complete_utf16(source).map(|census| census.other_len)
}

/// Number of scalar values in well-formed UTF-8.
///
/// # Errors
///
/// As [`utf16_len_for_utf8`].
pub fn scalar_count_utf8(source: &[u8]) -> Result<usize, TranscodeError> {
    complete_utf8(source).map(|census| census.scalars)
}

/// Number of scalar values in well-formed UTF-16.
///
/// # Errors
///
/// As [`utf8_len_for_utf16`].
pub fn scalar_count_utf16(source: &[u16]) -> Result<usize, TranscodeError> {
    complete_utf16(source).map(|census| census.scalars)
}

fn complete_utf8(source: &[u8]) -> Result<Census, TranscodeError> {
    let census = census_utf8_with(source, Backend::detect());
    let offset = census.valid_up_to;
    if offset == source.len() {
        return Ok(census);
    }
    match scalar::decode_utf8(&source[offset..]) {
        DecodeStep::Incomplete => Err(TranscodeError::Truncated { offset }),
        _ => Err(TranscodeError::InvalidData { offset }),
    }
}

fn complete_utf16(source: &[u16]) -> Result<Census, TranscodeError> {
    let census = census_utf16_with(source, Backend::detect());
    let offset = census.valid_up_to;
    if offset == source.len() {
        return Ok(census);
    }
    match scalar::decode_utf16(&source[offset..]) {
        DecodeStep::Incomplete => Err(TranscodeError::Truncated { offset }),
        _ => Err(TranscodeError::InvalidData { offset }),
    }
}

fn census_utf8_with(source: &[u8], backend: Backend) -> Census {
    let backend = Backend::resolve(Some(backend));
    let start = if backend == Backend::Scalar {
        Census::default()
    } else {
        Census::ascii(ascii_prefix_len_utf8(source))
    };
    dispatch!(backend, census_utf8(source, start))
}

fn census_utf16_with(source: &[u16], backend: Backend) -> Census {
    let backend = Backend::resolve(Some(backend));
    let start = if backend == Backend::Scalar {
        Census::default()
    } else {
        Census::ascii(ascii_prefix_len_utf16(source))
    };
    dispatch!(backend, census_utf16(source, start))
}

fn census_utf8<K: LaneKernel>(source: &[u8], mut census: Census) -> Census {
    loop {
        let i = census.valid_up_to;
        if let Some(lane) = source.get(i..i + K::WIDTH) {
            if K::utf8_lane_is_ascii(lane) {
                census.valid_up_to += K::WIDTH;
                census.other_len += K::WIDTH;
                census.scalars += K::WIDTH;
                continue;
            }
        }
        let DecodeStep::Scalar { value, len } = scalar::decode_utf8(&source[i..]) else {
            return census;
        };
        census.valid_up_to += len;
        census.other_len += scalar::utf16_len(value);
        census.scalars += 1;
    }
}

fn census_utf16<K: LaneKernel>(source: &[u16], mut census: Census) -> Census {
    loop {
        let i = census.valid_up_to;
        if let Some(lane) = source.get(i..i + K::WIDTH) {
            if K::utf16_lane_is_ascii(lane) {
                census.valid_up_to += K::WIDTH;
                census.other_len += K::WIDTH;
                census.scalars += K::WIDTH;
                continue;
            }
        }
        let DecodeStep::Scalar { value, len } = scalar::decode_utf16(&source[i..]) else {
            return census;
        };
        census.valid_up_to += len;
        census.other_len += scalar::utf8_len(value);
        census.scalars += 1;
    }
}
