use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};
use fastq_stats::parse_fastq_reader;
use fastq_stats::stats::{
    run_pass, AllStatsAggregator, CompositionProfiler, QualityProfiler, SummaryCounter,
};

fn synthetic_fastq(n_reads: usize, read_len: usize) -> Vec<u8> {
    let bases = b"ACGTTGCANacgt";
    let quals = b"#5?IIFF:,";
    let mut fastq = Vec::with_capacity(n_reads * (2 * read_len + 20));
    for i in 0..n_reads {
        fastq.extend_from_slice(format!("@read{}\n", i).as_bytes());
        fastq.extend((0..read_len).map(|j| bases[(i + j) % bases.len()]));
        fastq.extend_from_slice(b"\n+\n");
        fastq.extend((0..read_len).map(|j| quals[(i * 7 + j) % quals.len()]));
        fastq.push(b'\n');
    }
    fastq
}

fn bench_passes(c: &mut Criterion) {
    let data = synthetic_fastq(20_000, 150);
    let mut group = c.benchmark_group("fastq passes");

    group.bench_function("summary", |b| {
        b.iter(|| {
            let mut reader = parse_fastq_reader(Cursor::new(&data[..])).unwrap();
            let summary = run_pass(&mut *reader, SummaryCounter::default()).unwrap();
            assert_eq!(summary.sequence_count, 20_000);
        })
    });

    group.bench_function("quality", |b| {
        b.iter(|| {
            let mut reader = parse_fastq_reader(Cursor::new(&data[..])).unwrap();
            let profile = run_pass(&mut *reader, QualityProfiler::new()).unwrap();
            assert_eq!(profile.len(), 150);
        })
    });

    group.bench_function("composition", |b| {
        b.iter(|| {
            let mut reader = parse_fastq_reader(Cursor::new(&data[..])).unwrap();
            let profile = run_pass(&mut *reader, CompositionProfiler::new()).unwrap();
            assert_eq!(profile.len(), 150);
        })
    });

    group.bench_function("all in one pass", |b| {
        b.iter(|| {
            let mut reader = parse_fastq_reader(Cursor::new(&data[..])).unwrap();
            let all = run_pass(&mut *reader, AllStatsAggregator::new()).unwrap();
            assert_eq!(all.lengths.len(), 20_000);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_passes);
criterion_main!(benches);
