use alloc::{vec, vec::Vec};

use crate::chunk_utils::{produce_chunks, produce_prefixes, produce_splits};

#[test]
fn produce_helpers_example() {
    let payload = "a€b".as_bytes();
    let chunks = produce_chunks(payload, 3);
    // The euro sign is cut after its first and after its second byte.
    assert_eq!(chunks, vec![&b"a\xE2"[..], &b"\x82\xAC"[..], &b"b"[..]]);
    let prefixes = produce_prefixes(payload, 3);
    assert_eq!(prefixes, vec![&payload[..2], &payload[..4], payload]);
}

#[test]
fn produce_splits_covers_payload() {
    let payload: [u16; 5] = [0x61, 0xD83D, 0xDE00, 0x62, 0x63];
    let chunks = produce_splits(&payload, &[0, 5, 100]);
    let lens: Vec<usize> = chunks.iter().copied().map(<[u16]>::len).collect();
    assert_eq!(lens, [1, 2, 1, 1]);
    assert_eq!(chunks.concat(), payload);

    assert!(produce_splits::<u8>(&[], &[1, 2]).is_empty());
    assert_eq!(produce_splits(b"abc", &[]), vec![&b"abc"[..]]);
}

#[test]
#[should_panic(expected = "parts > 0")]
fn zero_parts_panics() {
    let _ = produce_chunks(b"abc", 0);
}
