//! The lane loop.
//!
//! Both directions share one shape:
//!
//! 1. [`try_ascii_lane`]: the next `WIDTH` source units are ASCII and the
//!    destination has room for them; copy the lane with one packed
//!    widen/narrow.
//! 2. [`try_fast_multibyte_lane`]: decode the lane's leading run of common
//!    sequences that end inside the lane. A sequence that crosses the lane end
//!    is left untouched, so the cursor stays at its first unit.
//! 3. [`scalar_fallback`]: decode whole scalars with [`crate::scalar`] until
//!    the cursor is past the lane that failed, applying the replacement and
//!    truncation policy, then go back to step 1.
//!
//! Fewer than `WIDTH` remaining units always take step 3. Steps 1 and 2 only
//! accept input that step 3 would decode identically, so every kernel width
//! yields the same output, counts and status.
//!
//! [`try_ascii_lane`]: try_ascii_lane_utf8
//! [`try_fast_multibyte_lane`]: try_fast_multibyte_lane_utf8
//! [`scalar_fallback`]: scalar_fallback_utf8

use crate::{
    OperationStatus, TranscodeOptions,
    lanes::LaneKernel,
    scalar::{self, DecodeStep, REPLACEMENT_CHARACTER, REPLACEMENT_UTF8},
};

/// Read/write positions threaded through one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub read: usize,
    pub written: usize,
}

/// What a lane attempt achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LaneOutcome {
    /// The whole lane was transcoded; stay in bulk mode.
    Advanced,
    /// The lane (or its remainder) needs the scalar codec. The cursor may
    /// have moved past a well-formed prefix of the lane.
    Fallback,
    /// The call ends here with the given status.
    Stop(OperationStatus),
}

/// Transcodes `src[cur.read..]` into `dst[cur.written..]`.
pub(crate) fn utf8_to_utf16<K: LaneKernel>(
    src: &[u8],
    dst: &mut [u16],
    options: TranscodeOptions,
    mut cur: Cursor,
) -> (usize, usize, OperationStatus) {
    while cur.read < src.len() {
        let lane_end = cur.read + K::WIDTH;
        if lane_end <= src.len() {
            let lane = &src[cur.read..lane_end];
            if try_ascii_lane_utf8::<K>(lane, dst, &mut cur) == LaneOutcome::Advanced
                || try_fast_multibyte_lane_utf8(lane, dst, &mut cur) == LaneOutcome::Advanced
            {
                continue;
            }
        }
        let outcome = scalar_fallback_utf8(src, dst, options, &mut cur, lane_end);
        if let LaneOutcome::Stop(status) = outcome {
            return (cur.read, cur.written, status);
        }
    }
    (cur.read, cur.written, OperationStatus::Done)
}

/// Transcodes `src[cur.read..]` into `dst[cur.written..]`.
pub(crate) fn utf16_to_utf8<K: LaneKernel>(
    src: &[u16],
    dst: &mut [u8],
    options: TranscodeOptions,
    mut cur: Cursor,
) -> (usize, usize, OperationStatus) {
    while cur.read < src.len() {
        let lane_end = cur.read + K::WIDTH;
        if lane_end <= src.len() {
            let lane = &src[cur.read..lane_end];
            if try_ascii_lane_utf16::<K>(lane, dst, &mut cur) == LaneOutcome::Advanced
                || try_fast_multibyte_lane_utf16(lane, dst, &mut cur) == LaneOutcome::Advanced
            {
                continue;
            }
        }
        let outcome = scalar_fallback_utf16(src, dst, options, &mut cur, lane_end);
        if let LaneOutcome::Stop(status) = outcome {
            return (cur.read, cur.written, status);
        }
    }
    (cur.read, cur.written, OperationStatus::Done)
}

#[inline]
fn try_ascii_lane_utf8<K: LaneKernel>(
    lane: &[u8],
    dst: &mut [u16],
    cur: &mut Cursor,
) -> LaneOutcome {
    let Some(out) = dst.get_mut(cur.written..cur.written + K::WIDTH) else {
        return LaneOutcome::Fallback;
    };
    if !K::utf8_lane_is_ascii(lane) {
        return LaneOutcome::Fallback;
    }
    K::widen_lane(lane, out);
    cur.read += K::WIDTH;
    cur.written += K::WIDTH;
    LaneOutcome::Advanced
}

#[inline]
fn try_ascii_lane_utf16<K: LaneKernel>(
    lane: &[u16],
    dst: &mut [u8],
    cur: &mut Cursor,
) -> LaneOutcome {
    let Some(out) = dst.get_mut(cur.written..cur.written + K::WIDTH) else {
        return LaneOutcome::Fallback;
    };
    if !K::utf16_lane_is_ascii(lane) {
        return LaneOutcome::Fallback;
    }
    K::narrow_lane(lane, out);
    cur.read += K::WIDTH;
    cur.written += K::WIDTH;
    LaneOutcome::Advanced
}

#[inline]
fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Decodes ASCII, two-byte and unrestricted three-byte sequences (leads
/// `E1..EC`, `EE..EF`, whose second byte may be any continuation) that lie
/// entirely inside `lane`. `E0`, `ED`, four-byte leads and anything malformed
/// end the run.
fn try_fast_multibyte_lane_utf8(lane: &[u8], dst: &mut [u16], cur: &mut Cursor) -> LaneOutcome {
    let mut i = 0;
    let mut j = cur.written;
    while i < lane.len() && j < dst.len() {
        let b0 = lane[i];
        let (unit, len) = if b0 < 0x80 {
            (u16::from(b0), 1)
        } else if (0xC2..=0xDF).contains(&b0) {
            let Some(&b1) = lane.get(i + 1) else { break };
            if !is_continuation(b1) {
                break;
            }
            ((u16::from(b0 & 0x1F) << 6) | u16::from(b1 & 0x3F), 2)
        } else if matches!(b0, 0xE1..=0xEC | 0xEE..=0xEF) {
            let (Some(&b1), Some(&b2)) = (lane.get(i + 1), lane.get(i + 2)) else {
                break;
            };
            if !is_continuation(b1) || !is_continuation(b2) {
                break;
            }
            (
                (u16::from(b0 & 0x0F) << 12) | (u16::from(b1 & 0x3F) << 6) | u16::from(b2 & 0x3F),
                3,
            )
        } else {
            break;
        };
        dst[j] = unit;
        i += len;
        j += 1;
    }
    cur.read += i;
    cur.written = j;
    if i == lane.len() {
        LaneOutcome::Advanced
    } else {
        LaneOutcome::Fallback
    }
}

/// Encodes the lane's leading run of non-surrogate units. Surrogates end the
/// run, as does a unit the destination has no room for.
#[allow(clippy::cast_possible_truncation)]
fn try_fast_multibyte_lane_utf16(lane: &[u16], dst: &mut [u8], cur: &mut Cursor) -> LaneOutcome {
    let mut i = 0;
    let mut j = cur.written;
    while let Some(&unit) = lane.get(i) {
        let out = &mut dst[j..];
        if unit < 0x80 {
            let Some(b) = out.first_mut() else { break };
            *b = unit as u8;
            j += 1;
        } else if unit < 0x800 {
            let Some(out) = out.get_mut(..2) else { break };
            out[0] = 0xC0 | (unit >> 6) as u8;
            out[1] = 0x80 | (unit & 0x3F) as u8;
            j += 2;
        } else if (0xD800..=0xDFFF).contains(&unit) {
            break;
        } else {
            let Some(out) = out.get_mut(..3) else { break };
            out[0] = 0xE0 | (unit >> 12) as u8;
            out[1] = 0x80 | ((unit >> 6) & 0x3F) as u8;
            out[2] = 0x80 | (unit & 0x3F) as u8;
            j += 3;
        }
        i += 1;
    }
    cur.read += i;
    cur.written = j;
    if i == lane.len() {
        LaneOutcome::Advanced
    } else {
        LaneOutcome::Fallback
    }
}

/// Decodes whole scalars until `cur.read >= until` or the source ends, then
/// reports [`LaneOutcome::Advanced`]. Consumes at least one scalar (or
/// malformed subpart) unless it returns [`LaneOutcome::Stop`].
fn scalar_fallback_utf8(
    src: &[u8],
    dst: &mut [u16],
    options: TranscodeOptions,
    cur: &mut Cursor,
    until: usize,
) -> LaneOutcome {
    loop {
        let rest = &src[cur.read..];
        let invalid_len = match scalar::decode_utf8(rest) {
            DecodeStep::Scalar { value, len } => {
                let Some(written) = scalar::encode_utf16(value, &mut dst[cur.written..]) else {
                    return LaneOutcome::Stop(OperationStatus::DestinationTooSmall);
                };
                cur.read += len;
                cur.written += written;
                None
            }
            DecodeStep::Invalid { len } => Some(len),
            DecodeStep::Incomplete if !options.is_final => {
                return LaneOutcome::Stop(OperationStatus::NeedMoreData);
            }
            DecodeStep::Incomplete => Some(rest.len()),
        };
        if let Some(len) = invalid_len {
            if !options.replace_invalid {
                return LaneOutcome::Stop(OperationStatus::InvalidData);
            }
            let out = &mut dst[cur.written..];
            let Some(written) = scalar::encode_utf16(REPLACEMENT_CHARACTER, out) else {
                return LaneOutcome::Stop(OperationStatus::DestinationTooSmall);
            };
            cur.read += len;
            cur.written += written;
        }
        if cur.read >= until || cur.read == src.len() {
            return LaneOutcome::Advanced;
        }
    }
}

/// UTF-16 counterpart of [`scalar_fallback_utf8`].
fn scalar_fallback_utf16(
    src: &[u16],
    dst: &mut [u8],
    options: TranscodeOptions,
    cur: &mut Cursor,
    until: usize,
) -> LaneOutcome {
    loop {
        let rest = &src[cur.read..];
        let invalid_len = match scalar::decode_utf16(rest) {
            DecodeStep::Scalar { value, len } => {
                let Some(written) = scalar::encode_utf8(value, &mut dst[cur.written..]) else {
                    return LaneOutcome::Stop(OperationStatus::DestinationTooSmall);
                };
                cur.read += len;
                cur.written += written;
                None
            }
            DecodeStep::Invalid { len } => Some(len),
            DecodeStep::Incomplete if !options.is_final => {
                return LaneOutcome::Stop(OperationStatus::NeedMoreData);
            }
            DecodeStep::Incomplete => Some(rest.len()),
        };
        if let Some(len) = invalid_len {
            if !options.replace_invalid {
                return LaneOutcome::Stop(OperationStatus::InvalidData);
            }
            let Some(out) = dst.get_mut(cur.written..cur.written + REPLACEMENT_UTF8.len()) else {
                return LaneOutcome::Stop(OperationStatus::DestinationTooSmall);
            };
            out.copy_from_slice(&REPLACEMENT_UTF8);
            cur.read += len;
            cur.written += REPLACEMENT_UTF8.len();
        }
        if cur.read >= until || cur.read == src.len() {
            return LaneOutcome::Advanced;
        }
    }
}
