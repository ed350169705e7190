//! Benchmarks for track-spline build and query operations.
//!
//! Run with: cargo bench -p track-spline
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p track-spline -- --save-baseline main
//! 2. After changes: cargo bench -p track-spline -- --baseline main

#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nalgebra::Point3;
use track_spline::{PathTable, TravelQuery};

// =============================================================================
// Test Track Generation
// =============================================================================

/// Control points on a wobbly circle, so every segment is curved.
fn create_track(points: usize) -> Vec<Point3<f64>> {
    (0..points)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / points as f64;
            let radius = 50.0 + 5.0 * (3.0 * angle).sin();
            Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect()
}

// =============================================================================
// Build Benchmarks
// =============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build");
    let track = create_track(64);

    for density in [4, 16, 64, 200] {
        group.throughput(Throughput::Elements((track.len() * density) as u64));
        group.bench_with_input(BenchmarkId::new("looping", density), &density, |b, &d| {
            b.iter(|| PathTable::looping(black_box(&track), d));
        });
    }

    group.finish();
}

// =============================================================================
// Query Benchmarks
// =============================================================================

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("Advance");

    for density in [16, 200] {
        let table = PathTable::looping(&create_track(64), density).unwrap();
        let total = table.total_length();

        group.bench_with_input(BenchmarkId::new("single", density), &table, |b, table| {
            let mut distance = 0.0;
            b.iter(|| {
                let pose = table.advance(black_box(distance), 12.5, 1.0 / 60.0).unwrap();
                distance = pose.distance;
                pose
            });
        });

        let queries: Vec<TravelQuery> = (0..1024)
            .map(|i| TravelQuery::new(total * i as f64 / 1024.0, 10.0 + (i % 7) as f64))
            .collect();
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(BenchmarkId::new("batch_1024", density), &table, |b, table| {
            b.iter(|| table.advance_batch(black_box(&queries), 1.0 / 60.0));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_build, bench_advance);
criterion_main!(benches);
