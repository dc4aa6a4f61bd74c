use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fbrepl::replace::{
    ByteReplacer, REMOVE_PUNCTUATION_PAIRS, TO_LOWER_PAIRS, WHITESPACES_AS_SPACES_PAIRS,
};

const SHORT: &[u8] = b"This! This, is a quite small-ish string. Or is it?";

fn generate_text(bytes: usize) -> Vec<u8> {
    let line = "Åskar det? Överallt! Hi. Send me some $, thank you.\tTHE END\n";
    line.as_bytes().iter().copied().cycle().take(bytes).collect()
}

fn normalizer() -> ByteReplacer {
    let mut pairs: Vec<&str> = Vec::new();
    pairs.extend_from_slice(TO_LOWER_PAIRS);
    pairs.extend_from_slice(REMOVE_PUNCTUATION_PAIRS);
    pairs.extend_from_slice(WHITESPACES_AS_SPACES_PAIRS);
    ByteReplacer::from_string_pairs(&pairs).unwrap()
}

fn bench_short_input(c: &mut Criterion) {
    let r = normalizer();
    c.bench_function("apply_short", |b| b.iter(|| r.apply(black_box(SHORT))));
}

fn bench_table(c: &mut Criterion) {
    let r = normalizer();
    let mut group = c.benchmark_group("apply_table");
    for size_mb in [1, 10] {
        let data = generate_text(size_mb * 1024 * 1024);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("sequential", format!("{}MB", size_mb)),
            &data,
            |b, data| b.iter(|| r.apply(black_box(data))),
        );
        group.bench_with_input(
            BenchmarkId::new("parallel", format!("{}MB", size_mb)),
            &data,
            |b, data| b.iter(|| r.apply_parallel(black_box(data))),
        );
    }
    group.finish();
}

fn bench_delete_only(c: &mut Criterion) {
    let data = generate_text(10 * 1024 * 1024);
    let mut group = c.benchmark_group("apply_delete");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for pairs in [
        &[".", ""][..],
        &[".", "", "!", ""][..],
        &[".", "", "!", "", "?", ""][..],
        &[".", "", "!", "", "?", "", "$", ""][..],
    ] {
        let r = ByteReplacer::from_string_pairs(pairs).unwrap();
        group.bench_with_input(
            BenchmarkId::new("chars", pairs.len() / 2),
            &data,
            |b, data| b.iter(|| r.apply(black_box(data))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_short_input, bench_table, bench_delete_only);
criterion_main!(benches);
