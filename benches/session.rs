//! Session benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rawline::{Feed, Session};

fn bench_type_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    let line = "git commit -m \"a reasonably long commit message\"\r";
    group.throughput(Throughput::Bytes(line.len() as u64));

    group.bench_function("type_line", |b| {
        b.iter(|| {
            let mut session = Session::new(Vec::with_capacity(16 * 1024));
            session.start_with_columns("$ ", 80).unwrap();
            let mut result = Feed::Pending;
            for &byte in line.as_bytes() {
                result = session.feed(byte).unwrap();
            }
            black_box(result)
        })
    });

    group.finish();
}

fn bench_scrolling_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    // Longer than the terminal, so every keystroke scrolls the window
    let text = "0123456789".repeat(50);
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("scrolling_line", |b| {
        b.iter(|| {
            let mut session = Session::new(Vec::with_capacity(64 * 1024));
            session.start_with_columns("> ", 40).unwrap();
            for &byte in text.as_bytes() {
                session.feed(byte).unwrap();
            }
            black_box(session.buffer().len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_type_line, bench_scrolling_line);

criterion_main!(benches);
