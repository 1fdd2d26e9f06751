//! Stateful adapters for chunked input.
//!
//! The plain entry points report a sequence cut off by the end of a
//! non-final chunk as [`OperationStatus::NeedMoreData`] and leave it to the
//! caller to prepend those units to the next chunk. The adapters here park
//! them in a few bytes of inline scratch instead, so every chunk can be
//! passed as-is:
//!
//! ```rust
//! use utfbridge::{OperationStatus, Utf8ToUtf16Stream};
//!
//! let mut stream = Utf8ToUtf16Stream::default();
//! let mut dest = [0u16; 4];
//!
//! // "€" is E2 82 AC; split it across two chunks.
//! let step = stream.convert(b"a\xE2", &mut dest, false);
//! assert_eq!(step, (2, 1, OperationStatus::NeedMoreData));
//! assert!(stream.has_pending());
//! let step = stream.convert(b"\x82\xAC", &mut dest[1..], true);
//! assert_eq!(step, (2, 1, OperationStatus::Done));
//! assert_eq!(dest[..2], [0x61, 0x20AC]);
//! ```
//!
//! `read` always counts units taken from the chunk passed to that call,
//! including units that went into the scratch. On
//! [`OperationStatus::InvalidData`] the malformed subpart is dropped and
//! `read` points just past it, so decoding can resume at `&src[read..]`.

use crate::{
    OperationStatus, TranscodeOptions,
    scalar::{self, DecodeStep, REPLACEMENT_CHARACTER, REPLACEMENT_UTF8},
    transcoder::{transcode_utf8_to_utf16_with, transcode_utf16_to_utf8_with},
};

/// Early exit from draining the scratch: `(read, written, status)`.
type Stop = (usize, usize, OperationStatus);

const NO_ROOM: Stop = (0, 0, OperationStatus::DestinationTooSmall);

/// Incremental UTF-8 to UTF-16 converter.
#[derive(Debug, Clone, Default)]
pub struct Utf8ToUtf16Stream {
    options: TranscodeOptions,
    pending: [u8; 4],
    pending_len: usize,
}

impl Utf8ToUtf16Stream {
    /// Creates a converter. `options.is_final` is ignored; each
    /// [`convert`](Self::convert) call says whether its chunk is the last.
    #[must_use]
    pub fn new(options: TranscodeOptions) -> Self {
        Self {
            options,
            pending: [0; 4],
            pending_len: 0,
        }
    }

    /// Whether a partial sequence is parked from an earlier chunk.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_len > 0
    }

    /// Drops any parked partial sequence.
    pub fn reset(&mut self) {
        self.pending_len = 0;
    }

    /// Converts the next chunk. Returns `(bytes_read, units_written, status)`.
    ///
    /// [`OperationStatus::NeedMoreData`] means all of `src` was taken and a
    /// partial sequence is parked. With `last`, a parked sequence that the
    /// chunk does not complete is malformed.
    pub fn convert(
        &mut self,
        src: &[u8],
        dst: &mut [u16],
        last: bool,
    ) -> (usize, usize, OperationStatus) {
        let (read, written) = if self.has_pending() {
            match self.drain_pending(src, dst, last) {
                Ok(progress) => progress,
                Err(stop) => return stop,
            }
        } else {
            (0, 0)
        };

        let options = self.options.with_final(last);
        let (r, w, status) =
            transcode_utf8_to_utf16_with(&src[read..], &mut dst[written..], options);
        let (pos, written) = (read + r, written + w);
        match status {
            OperationStatus::NeedMoreData => {
                let tail = &src[pos..];
                debug_assert!(tail.len() < 4);
                self.pending[..tail.len()].copy_from_slice(tail);
                self.pending_len = tail.len();
                #[cfg(feature = "tracing")]
                tracing::trace!(parked = tail.len(), "parked partial UTF-8 sequence");
                (src.len(), written, status)
            }
            OperationStatus::InvalidData => {
                let skip = match scalar::decode_utf8(&src[pos..]) {
                    DecodeStep::Invalid { len } => len,
                    _ => src.len() - pos,
                };
                (pos + skip, written, status)
            }
            OperationStatus::Done | OperationStatus::DestinationTooSmall => (pos, written, status),
        }
    }

    /// Completes (or rejects) the parked sequence with bytes from `src`.
    fn drain_pending(
        &mut self,
        src: &[u8],
        dst: &mut [u16],
        last: bool,
    ) -> Result<(usize, usize), Stop> {
        let held = self.pending_len;
        let take = src.len().min(self.pending.len() - held);
        let mut buf = self.pending;
        buf[held..held + take].copy_from_slice(&src[..take]);

        let invalid_len = match scalar::decode_utf8(&buf[..held + take]) {
            DecodeStep::Scalar { value, len } => {
                let written = scalar::encode_utf16(value, dst).ok_or(NO_ROOM)?;
                self.pending_len = 0;
                return Ok((len - held, written));
            }
            DecodeStep::Invalid { len } => len,
            DecodeStep::Incomplete if !last => {
                self.pending = buf;
                self.pending_len = held + take;
                return Err((take, 0, OperationStatus::NeedMoreData));
            }
            DecodeStep::Incomplete => held + take,
        };

        // The parked bytes were a valid prefix, so the subpart extends at
        // least to their end.
        let read = invalid_len - held;
        if !self.options.replace_invalid {
            self.pending_len = 0;
            return Err((read, 0, OperationStatus::InvalidData));
        }
        let written = scalar::encode_utf16(REPLACEMENT_CHARACTER, dst).ok_or(NO_ROOM)?;
        self.pending_len = 0;
        Ok((read, written))
    }
}

/// Incremental UTF-16 to UTF-8 converter.
#[derive(Debug, Clone, Default)]
pub struct Utf16ToUtf8Stream {
    options: TranscodeOptions,
    pending: Option<u16>,
}

impl Utf16ToUtf8Stream {
    /// Creates a converter. `options.is_final` is ignored; each
    /// [`convert`](Self::convert) call says whether its chunk is the last.
    #[must_use]
    pub fn new(options: TranscodeOptions) -> Self {
        Self {
            options,
            pending: None,
        }
    }

    /// Whether a high surrogate is parked from an earlier chunk.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any parked high surrogate.
    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Converts the next chunk. Returns `(units_read, bytes_written, status)`
    /// with the same conventions as [`Utf8ToUtf16Stream::convert`].
    pub fn convert(
        &mut self,
        src: &[u16],
        dst: &mut [u8],
        last: bool,
    ) -> (usize, usize, OperationStatus) {
        let (read, written) = match self.pending {
            Some(high) => match self.drain_pending(high, src, dst, last) {
                Ok(progress) => progress,
                Err(stop) => return stop,
            },
            None => (0, 0),
        };

        let options = self.options.with_final(last);
        let (r, w, status) =
            transcode_utf16_to_utf8_with(&src[read..], &mut dst[written..], options);
        let (pos, written) = (read + r, written + w);
        match status {
            OperationStatus::NeedMoreData => {
                debug_assert_eq!(pos + 1, src.len());
                self.pending = src.get(pos).copied();
                #[cfg(feature = "tracing")]
                tracing::trace!("parked high surrogate");
                (src.len(), written, status)
            }
            // Malformed UTF-16 is always a single unit.
            OperationStatus::InvalidData => (pos + 1, written, status),
            OperationStatus::Done | OperationStatus::DestinationTooSmall => (pos, written, status),
        }
    }

    fn drain_pending(
        &mut self,
        high: u16,
        src: &[u16],
        dst: &mut [u8],
        last: bool,
    ) -> Result<(usize, usize), Stop> {
        match src.first() {
            Some(&low @ 0xDC00..=0xDFFF) => {
                let value = scalar::combine_surrogates(high, low);
                let written = scalar::encode_utf8(value, dst).ok_or(NO_ROOM)?;
                self.pending = None;
                return Ok((1, written));
            }
            None if !last => return Err((0, 0, OperationStatus::NeedMoreData)),
            // Unpaired: the high surrogate alone is the malformed unit.
            Some(_) | None => {}
        }
        if !self.options.replace_invalid {
            self.pending = None;
            return Err((0, 0, OperationStatus::InvalidData));
        }
        let out = dst.get_mut(..REPLACEMENT_UTF8.len()).ok_or(NO_ROOM)?;
        out.copy_from_slice(&REPLACEMENT_UTF8);
        self.pending = None;
        Ok((0, REPLACEMENT_UTF8.len()))
    }
}
