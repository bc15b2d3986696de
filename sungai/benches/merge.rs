//! Benchmarks pour la fusion des tronçons

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geo::Coord;

/// Découpe une polyligne en tronçons mélangés (ordre et sens)
fn shuffled_segments(count: usize, points_per_segment: usize) -> Vec<Vec<Coord>> {
    let mut segments: Vec<Vec<Coord>> = (0..count)
        .map(|s| {
            (0..=points_per_segment)
                .map(|p| {
                    let t = (s * points_per_segment + p) as f64 * 0.001;
                    Coord {
                        x: 106.8 + t,
                        y: -6.2 + (t * 10.0).sin() * 0.01,
                    }
                })
                .collect()
        })
        .collect();

    // Permutation déterministe : inverse un tronçon sur deux et entrelace
    for (i, segment) in segments.iter_mut().enumerate() {
        if i % 2 == 1 {
            segment.reverse();
        }
    }
    let (even, odd): (Vec<_>, Vec<_>) = segments.into_iter().enumerate().partition(|(i, _)| i % 2 == 0);
    odd.into_iter().chain(even).map(|(_, s)| s).collect()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_segments");

    for count in [10usize, 100, 500] {
        let segments = shuffled_segments(count, 20);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &segments, |b, segments| {
            b.iter(|| {
                let merged = sungai::merge::merge_segments(black_box(segments.clone()));
                black_box(merged)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
