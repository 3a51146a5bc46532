//! Decoder benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rawline::InputDecoder;

fn decode(data: &[u8]) -> usize {
    let mut decoder = InputDecoder::new();
    data.iter()
        .filter_map(|&b| decoder.decode(b, false))
        .count()
}

fn bench_decode_plain_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    // Plain typing
    let plain_text = "echo hello world ".repeat(1000);
    group.throughput(Throughput::Bytes(plain_text.len() as u64));

    group.bench_function("plain_text", |b| {
        b.iter(|| black_box(decode(black_box(plain_text.as_bytes()))))
    });

    group.finish();
}

fn bench_decode_escape_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    // Arrow keys, home/end and delete
    let keys = "\x1b[D\x1b[C\x1b[H\x1b[F\x1b[3~\x1b[A".repeat(500);
    group.throughput(Throughput::Bytes(keys.len() as u64));

    group.bench_function("escape_sequences", |b| {
        b.iter(|| black_box(decode(black_box(keys.as_bytes()))))
    });

    group.finish();
}

criterion_group!(benches, bench_decode_plain_text, bench_decode_escape_sequences);

criterion_main!(benches);
