//! Chunking helpers shared by the property tests and the fuzz targets.
//!
//! Unlike a text splitter these cut at arbitrary code-unit positions, so
//! chunks routinely end in the middle of a multi-byte sequence or between
//! the halves of a surrogate pair.

use alloc::vec::Vec;

/// Split `payload` into `parts` chunks of roughly equal size.
///
/// Fewer chunks are returned when `payload` is shorter than `parts`; an empty
/// payload yields no chunks.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks<T>(payload: &[T], parts: usize) -> Vec<&[T]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` at positions derived from `splits`.
///
/// Each value picks the next chunk length as `1 + split % remaining`, the
/// way the partition properties consume a quickcheck `Vec<usize>`. Whatever
/// is left after the last split becomes the final chunk.
#[must_use]
pub fn produce_splits<'a, T>(payload: &'a [T], splits: &[usize]) -> Vec<&'a [T]> {
    let mut chunks = Vec::with_capacity(splits.len() + 1);
    let mut rest = payload;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + s % rest.len());
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

/// Return a sequence of prefixes converging to `payload`.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_prefixes<T>(payload: &[T], parts: usize) -> Vec<&[T]> {
    let chunks = produce_chunks(payload, parts);
    let mut prefixes = Vec::with_capacity(chunks.len());
    let mut end = 0;
    for chunk in chunks {
        end += chunk.len();
        prefixes.push(&payload[..end]);
    }
    prefixes
}
