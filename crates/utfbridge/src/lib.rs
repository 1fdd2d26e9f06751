//! Streaming UTF-8 ⇄ UTF-16 transcoding and validation into caller-owned
//! buffers.
//!
//! The engine never allocates. Every entry point takes a source slice and a
//! destination slice and reports how far it got in both, together with an
//! [`OperationStatus`]:
//!
//! - [`OperationStatus::Done`]: the whole source was consumed.
//! - [`OperationStatus::DestinationTooSmall`]: grow the destination and call
//!   again with the unread remainder.
//! - [`OperationStatus::NeedMoreData`]: the source ends inside a multi-byte
//!   sequence and the chunk was not final; prepend the unread tail to the next
//!   chunk (or use the [`stream`] adapters, which park it for you).
//! - [`OperationStatus::InvalidData`]: malformed input and replacement was not
//!   requested.
//!
//! Read and write counts always land on scalar-value boundaries.
//!
//! ```rust
//! use utfbridge::{OperationStatus, transcode_utf16_to_utf8};
//!
//! let source: Vec<u16> = "héllo 😀".encode_utf16().collect();
//! let mut dest = [0u8; 16];
//! let (read, written, status) = transcode_utf16_to_utf8(&source, &mut dest, false, true);
//! assert_eq!(status, OperationStatus::Done);
//! assert_eq!(read, source.len());
//! assert_eq!(&dest[..written], "héllo 😀".as_bytes());
//! ```
//!
//! Bulk work runs in fixed-width lanes whose width depends on the
//! [`Backend`] picked at first use; every backend produces exactly the output
//! of [`Backend::Scalar`].

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(any(test, feature = "fuzzing"))]
extern crate alloc;

pub mod ascii;
mod bulk;
mod lanes;
mod options;
pub mod scalar;
mod status;
pub mod stream;
mod transcoder;
mod validate;

#[cfg(any(test, feature = "fuzzing"))]
pub mod chunk_utils;

#[cfg(test)]
mod tests;

pub use lanes::{Backend, LaneWidth};
pub use options::TranscodeOptions;
pub use status::{OperationStatus, TranscodeError};
pub use stream::{Utf8ToUtf16Stream, Utf16ToUtf8Stream};
pub use transcoder::{
    transcode_utf8_to_utf16, transcode_utf8_to_utf16_with, transcode_utf16_to_utf8,
    transcode_utf16_to_utf8_with,
};
pub use validate::{
    first_invalid_utf8, first_invalid_utf8_with, first_invalid_utf16, first_invalid_utf16_with,
    scalar_count_utf8, scalar_count_utf16, utf8_len_for_utf16, utf16_len_for_utf8,
};

/// Upper bound on the UTF-16 units needed to transcode `utf8_len` bytes,
/// including any U+FFFD substitutions.
#[must_use]
pub const fn max_utf16_len(utf8_len: usize) -> usize {
    utf8_len
}

/// Upper bound on the UTF-8 bytes needed to transcode `utf16_len` units,
/// including any U+FFFD substitutions.
///
/// Returns `None` on overflow.
#[must_use]
pub const fn max_utf8_len(utf16_len: usize) -> Option<usize> {
    utf16_len.checked_mul(3)
}
