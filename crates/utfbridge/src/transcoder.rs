//! Public transcoding entry points.

use crate::{
    OperationStatus, TranscodeOptions,
    ascii::{ascii_prefix_len_utf8, ascii_prefix_len_utf16, narrow_ascii, widen_ascii},
    bulk::{Cursor, utf8_to_utf16, utf16_to_utf8},
    lanes::{Backend, dispatch},
};

/// Transcodes UTF-8 `source` into UTF-16 `dest`.
///
/// Returns `(bytes_read, units_written, status)`. Both counts sit on scalar
/// boundaries; on [`OperationStatus::NeedMoreData`] `bytes_read` is the start
/// of the truncated trailing sequence.
///
/// With `replace_invalid`, each maximal malformed subpart becomes one
/// U+FFFD. With `is_final == false`, a sequence cut off by the end of
/// `source` suspends the call instead of being treated as malformed.
///
/// # Examples
///
/// ```rust
/// use utfbridge::{OperationStatus, transcode_utf8_to_utf16};
///
/// let mut dest = [0u16; 8];
/// // The last two bytes start a four-byte sequence.
/// let (read, written, status) = transcode_utf8_to_utf16(b"ok\xF0\x9F", &mut dest, false, false);
/// assert_eq!((read, written, status), (2, 2, OperationStatus::NeedMoreData));
/// ```
pub fn transcode_utf8_to_utf16(
    source: &[u8],
    dest: &mut [u16],
    replace_invalid: bool,
    is_final: bool,
) -> (usize, usize, OperationStatus) {
    let options = TranscodeOptions::new()
        .with_replacement(replace_invalid)
        .with_final(is_final);
    transcode_utf8_to_utf16_with(source, dest, options)
}

/// Transcodes UTF-16 `source` into UTF-8 `dest`.
///
/// Returns `(units_read, bytes_written, status)` with the same conventions as
/// [`transcode_utf8_to_utf16`]. A high surrogate as the last unit of a
/// non-final chunk suspends with [`OperationStatus::NeedMoreData`].
pub fn transcode_utf16_to_utf8(
    source: &[u16],
    dest: &mut [u8],
    replace_invalid: bool,
    is_final: bool,
) -> (usize, usize, OperationStatus) {
    let options = TranscodeOptions::new()
        .with_replacement(replace_invalid)
        .with_final(is_final);
    transcode_utf16_to_utf8_with(source, dest, options)
}

/// [`transcode_utf8_to_utf16`] driven by a [`TranscodeOptions`].
pub fn transcode_utf8_to_utf16_with(
    source: &[u8],
    dest: &mut [u16],
    options: TranscodeOptions,
) -> (usize, usize, OperationStatus) {
    let backend = options.resolved_backend();
    let mut cursor = Cursor::default();
    if backend != Backend::Scalar {
        let n = ascii_prefix_len_utf8(source).min(dest.len());
        widen_ascii(&source[..n], &mut dest[..n]);
        cursor = Cursor {
            read: n,
            written: n,
        };
    }
    let result = dispatch!(backend, utf8_to_utf16(source, dest, options, cursor));
    trace_stop("utf8->utf16", backend, result);
    result
}

/// [`transcode_utf16_to_utf8`] driven by a [`TranscodeOptions`].
pub fn transcode_utf16_to_utf8_with(
    source: &[u16],
    dest: &mut [u8],
    options: TranscodeOptions,
) -> (usize, usize, OperationStatus) {
    let backend = options.resolved_backend();
    let mut cursor = Cursor::default();
    if backend != Backend::Scalar {
        let n = ascii_prefix_len_utf16(source).min(dest.len());
        narrow_ascii(&source[..n], &mut dest[..n]);
        cursor = Cursor {
            read: n,
            written: n,
        };
    }
    let result = dispatch!(backend, utf16_to_utf8(source, dest, options, cursor));
    trace_stop("utf16->utf8", backend, result);
    result
}

#[inline]
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn trace_stop(direction: &'static str, backend: Backend, result: (usize, usize, OperationStatus)) {
    #[cfg(feature = "tracing")]
    {
        let (read, written, status) = result;
        if !status.is_done() {
            tracing::trace!(
                direction,
                ?backend,
                read,
                written,
                %status,
                "transcoding stopped"
            );
        }
    }
}
