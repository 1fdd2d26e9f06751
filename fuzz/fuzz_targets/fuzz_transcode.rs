#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};
use utfbridge::{
    Backend, OperationStatus, TranscodeOptions, Utf8ToUtf16Stream, Utf16ToUtf8Stream,
    chunk_utils::produce_splits, first_invalid_utf8_with, first_invalid_utf16_with, max_utf8_len,
    transcode_utf8_to_utf16_with, transcode_utf16_to_utf8_with,
};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Fragments that sit on the edges of the UTF-8 well-formedness table.
static EDGE_TABLE: &[&[u8]] = &[
    b"\x7F",
    b"\x80",
    b"\xBF",
    b"\xC0\x80",
    b"\xC1\xBF",
    b"\xC2\x80",
    b"\xDF\xBF",
    b"\xE0\x9F\xBF",
    b"\xE0\xA0\x80",
    b"\xED\x9F\xBF",
    b"\xED\xA0\x80",
    b"\xEF\xBF\xBD",
    b"\xF0\x8F\xBF\xBF",
    b"\xF0\x90\x80\x80",
    b"\xF4\x8F\xBF\xBF",
    b"\xF4\x90\x80\x80",
    b"\xF5",
    b"\xFF",
    b"\xE2\x82",
    b"\xF0\x9F\x98",
];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        while prefix < size.max(HEADER + 1) && prefix < max_size {
            let start = prefix;
            prefix += append_text(&mut data[prefix..], size, max_size - prefix);
            prefix += append_edge(&mut data[prefix..], max_size - prefix);
            if prefix == start {
                break;
            }
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends one fragment from `EDGE_TABLE`, if it fits.
fn append_edge(buf: &mut [u8], limit: usize) -> usize {
    let fragment = with_rng(|rng| EDGE_TABLE[rng.random_range(0..EDGE_TABLE.len())]);
    if fragment.len() > limit {
        return 0;
    }
    buf[..fragment.len()].copy_from_slice(fragment);
    fragment.len()
}

/// Appends well-formed text built by `arbitrary` from random bytes.
fn append_text(buf: &mut [u8], size: usize, limit: usize) -> usize {
    let s = with_rng(|rng| rng.random_range(1..=size.max(2) * 2).min(limit));
    let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
    let text = String::arbitrary(&mut Unstructured::new(&bytes)).unwrap_or_default();

    let len = text.len().min(limit);
    buf[..len].copy_from_slice(&text.as_bytes()[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// Split positions derived from the seed; chunks may end mid-sequence.
fn splits_from_seed(seed: u32, count: usize) -> Vec<usize> {
    let mut rng = SmallRng::seed_from_u64(u64::from(seed));
    (0..count).map(|_| rng.random_range(0..64)).collect()
}

fn utf8_to_utf16_all(src: &[u8], options: TranscodeOptions) -> (Vec<u16>, usize, OperationStatus) {
    let mut dst = vec![0u16; src.len()];
    let (read, written, status) = transcode_utf8_to_utf16_with(src, &mut dst, options);
    dst.truncate(written);
    (dst, read, status)
}

fn utf16_to_utf8_all(src: &[u16], options: TranscodeOptions) -> (Vec<u8>, usize, OperationStatus) {
    let mut dst = vec![0u8; max_utf8_len(src.len()).unwrap()];
    let (read, written, status) = transcode_utf16_to_utf8_with(src, &mut dst, options);
    dst.truncate(written);
    (dst, read, status)
}

fn transcode(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u32::from_le_bytes(data[1..5].try_into().unwrap());
    let bytes = &data[HEADER..];

    let options = TranscodeOptions::new()
        .with_replacement(flags & 1 != 0)
        .with_final(flags & 2 != 0);

    // Every backend agrees with the scalar baseline, in both directions.
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|p| u16::from_le_bytes([p[0], p[1]]))
        .collect();
    let baseline8 = utf8_to_utf16_all(bytes, options.with_backend(Backend::Scalar));
    let baseline16 = utf16_to_utf8_all(&units, options.with_backend(Backend::Scalar));
    for backend in Backend::available() {
        let options = options.with_backend(backend);
        assert_eq!(utf8_to_utf16_all(bytes, options), baseline8, "{backend:?}");
        assert_eq!(
            utf16_to_utf8_all(&units, options),
            baseline16,
            "{backend:?}"
        );
        assert_eq!(
            first_invalid_utf8_with(bytes, backend),
            first_invalid_utf8_with(bytes, Backend::Scalar)
        );
        assert_eq!(
            first_invalid_utf16_with(&units, backend),
            first_invalid_utf16_with(&units, Backend::Scalar)
        );
    }

    // Lossy output matches the standard library.
    let lossy = TranscodeOptions::new().with_replacement(true);
    let (wide, _, status) = utf8_to_utf16_all(bytes, lossy);
    assert_eq!(status, OperationStatus::Done);
    let expected: Vec<u16> = String::from_utf8_lossy(bytes).encode_utf16().collect();
    assert_eq!(wide, expected);

    // Streaming in arbitrary pieces matches the one-shot call.
    let splits = splits_from_seed(split_seed, (flags >> 2) as usize);
    let mut stream = Utf8ToUtf16Stream::new(lossy);
    let mut streamed = Vec::new();
    let chunks = produce_splits(bytes, &splits);
    for (i, chunk) in chunks.iter().enumerate() {
        let mut dst = vec![0u16; chunk.len() + 1];
        let (read, written, _) = stream.convert(chunk, &mut dst, i + 1 == chunks.len());
        assert_eq!(read, chunk.len());
        streamed.extend_from_slice(&dst[..written]);
    }
    assert_eq!(streamed, wide);

    let (narrow, _, _) = utf16_to_utf8_all(&units, lossy);
    let mut stream = Utf16ToUtf8Stream::new(lossy);
    let mut streamed = Vec::new();
    let chunks = produce_splits(&units, &splits);
    for (i, chunk) in chunks.iter().enumerate() {
        let mut dst = vec![0u8; 3 * (chunk.len() + 1)];
        let (read, written, _) = stream.convert(chunk, &mut dst, i + 1 == chunks.len());
        assert_eq!(read, chunk.len());
        streamed.extend_from_slice(&dst[..written]);
    }
    assert_eq!(streamed, narrow);
}

fuzz_target!(|data: &[u8]| transcode(data));
