//! Throughput of both directions per backend on ASCII, mixed and CJK text.
#![expect(missing_docs)]
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use utfbridge::{
    Backend, TranscodeOptions, first_invalid_utf8_with, max_utf8_len, transcode_utf8_to_utf16_with,
    transcode_utf16_to_utf8_with,
};

fn corpora() -> Vec<(&'static str, String)> {
    let ascii = "The quick brown fox jumps over the lazy dog. ".repeat(1_500);
    let mixed = "Größe naïve café, Ελληνικά, Русский, 日本語 😀 plain words. ".repeat(800);
    let cjk = "日本語のテキストと中文字符。한국어 문장입니다. ".repeat(1_500);
    vec![("ascii", ascii), ("mixed", mixed), ("cjk", cjk)]
}

fn bench_utf8_to_utf16(c: &mut Criterion) {
    let mut group = c.benchmark_group("utf8_to_utf16");
    for (name, text) in corpora() {
        let src = text.as_bytes();
        let mut dst = vec![0u16; src.len()];
        group.throughput(Throughput::Bytes(src.len() as u64));
        for backend in Backend::available() {
            let options = TranscodeOptions::new().with_backend(backend);
            let id = BenchmarkId::new(format!("{backend:?}"), name);
            group.bench_with_input(id, &src, |b, src| {
                b.iter(|| transcode_utf8_to_utf16_with(black_box(src), &mut dst, options));
            });
        }
    }
    group.finish();
}

fn bench_utf16_to_utf8(c: &mut Criterion) {
    let mut group = c.benchmark_group("utf16_to_utf8");
    for (name, text) in corpora() {
        let src: Vec<u16> = text.encode_utf16().collect();
        let mut dst = vec![0u8; max_utf8_len(src.len()).unwrap()];
        group.throughput(Throughput::Bytes(text.len() as u64));
        for backend in Backend::available() {
            let options = TranscodeOptions::new().with_backend(backend);
            let id = BenchmarkId::new(format!("{backend:?}"), name);
            group.bench_with_input(id, &src, |b, src| {
                b.iter(|| transcode_utf16_to_utf8_with(black_box(src), &mut dst, options));
            });
        }
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_invalid_utf8");
    for (name, text) in corpora() {
        group.throughput(Throughput::Bytes(text.len() as u64));
        for backend in Backend::available() {
            let id = BenchmarkId::new(format!("{backend:?}"), name);
            group.bench_with_input(id, text.as_bytes(), |b, src| {
                b.iter(|| first_invalid_utf8_with(black_box(src), backend));
            });
        }
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(2))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! {
    name = benches;
    config = criterion();
    targets = bench_utf8_to_utf16, bench_utf16_to_utf8, bench_validate
}
criterion_main!(benches);
