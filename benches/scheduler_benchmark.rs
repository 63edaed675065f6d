//! Performance benchmarks for the balcp job scheduler
//!
//! Run with: cargo bench

use balcp::core::assign;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Synthetic job sizes with a long-tailed distribution, the common shape of
/// real directory trees: many small files, a handful of large ones.
fn long_tail_sizes(count: usize) -> Vec<u64> {
    (0..count)
        .map(|i| {
            let noise = ((i * 2_654_435_761) % 4096) as u64;
            if i % 100 == 0 {
                100 * 1024 * 1024 + noise // occasional large file
            } else {
                4096 + noise
            }
        })
        .collect()
}

fn bench_assign_by_job_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_jobs");

    for count in [1_000, 10_000, 100_000] {
        let sizes = long_tail_sizes(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &sizes, |b, sizes| {
            b.iter(|| black_box(assign(sizes, 8).unwrap()));
        });
    }

    group.finish();
}

fn bench_assign_by_worker_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_workers");
    let sizes = long_tail_sizes(50_000);

    for workers in [2, 8, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &workers,
            |b, &workers| {
                b.iter(|| black_box(assign(&sizes, workers).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_assign_by_job_count, bench_assign_by_worker_count);
criterion_main!(benches);
