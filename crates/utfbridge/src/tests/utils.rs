use alloc::{vec, vec::Vec};

use crate::{
    OperationStatus, TranscodeOptions, max_utf8_len, max_utf16_len, transcode_utf8_to_utf16_with,
    transcode_utf16_to_utf8_with,
};

/// Output, units read and final status of a one-shot call.
pub(crate) type Outcome<T> = (Vec<T>, usize, OperationStatus);

/// One-shot UTF-8 to UTF-16 into a destination that can never be too small.
pub(crate) fn to_utf16(src: &[u8], options: TranscodeOptions) -> Outcome<u16> {
    let mut dst = vec![0u16; max_utf16_len(src.len())];
    let (read, written, status) = transcode_utf8_to_utf16_with(src, &mut dst, options);
    dst.truncate(written);
    (dst, read, status)
}

/// One-shot UTF-16 to UTF-8 into a destination that can never be too small.
pub(crate) fn to_utf8(src: &[u16], options: TranscodeOptions) -> Outcome<u8> {
    let mut dst = vec![0u8; max_utf8_len(src.len()).expect("test input is small")];
    let (read, written, status) = transcode_utf16_to_utf8_with(src, &mut dst, options);
    dst.truncate(written);
    (dst, read, status)
}

/// Lossy UTF-16 decoding through `core`, one U+FFFD per unpaired surrogate.
pub(crate) fn std_lossy_utf16(src: &[u16]) -> Vec<u8> {
    char::decode_utf16(src.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect::<alloc::string::String>()
        .into_bytes()
}

/// Iteration count for the quickcheck properties.
pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if cfg!(feature = "test-fast") {
        100
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    };
    #[cfg(miri)]
    let tests = 10;
    tests
}
