// ABOUTME: Criterion benchmarks for the classification pipeline and batch replay
// ABOUTME: Measures per-update cost of the live session and throughput of log recomputation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! Criterion benchmarks for the Stridelog engine.
//!
//! Measures the per-update cost of the live classification pipeline and the
//! throughput of batch statistics recomputation over persisted logs.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stridelog::classifier::ActivityClassifier;
use stridelog::replay::recompute_stats;
use stridelog::{
    AccelerationSample, ActivityRecord, ClassifierConfig, LocationFix, SessionTracker,
};

/// Generate a mixed walk/run/drive record log of the given length
fn generate_records(count: usize) -> Vec<ActivityRecord> {
    let mut tracker = SessionTracker::new();
    tracker.start().unwrap();
    for index in 0..count {
        let phase = index % 300;
        let (speed, magnitude) = if phase < 100 {
            (1.5, if index % 2 == 0 { 0.35 } else { 0.9 })
        } else if phase < 200 {
            (5.8, if index % 2 == 0 { 0.65 } else { 1.1 })
        } else {
            (15.0, 0.05)
        };
        let ts = index as i64 * 1_000;
        tracker
            .process(
                LocationFix::new(45.5, -73.6 + index as f64 * 1e-5, Some(speed), ts),
                AccelerationSample::new(0.0, 0.0, magnitude, ts),
            )
            .unwrap();
    }
    tracker.stop("bench").unwrap().records
}

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    group.throughput(Throughput::Elements(1));
    group.bench_function("classify_single_observation", |b| {
        let mut classifier = ActivityClassifier::new(ClassifierConfig::default());
        let mut tick = 0_u64;
        b.iter(|| {
            tick = tick.wrapping_add(1);
            let speed = (tick % 20) as f64;
            let accel = ((tick % 7) as f64) / 10.0;
            black_box(classifier.classify(black_box(speed), black_box(accel)))
        });
    });
    group.finish();
}

fn bench_live_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    group.throughput(Throughput::Elements(1));
    group.bench_function("process_fused_update", |b| {
        let mut tracker = SessionTracker::new();
        tracker.start().unwrap();
        let mut tick = 0_i64;
        b.iter(|| {
            tick += 1;
            let fix = LocationFix::new(45.5, -73.6 + tick as f64 * 1e-6, Some(1.5), tick * 100);
            let sample =
                AccelerationSample::new(0.0, 0.0, if tick % 2 == 0 { 0.35 } else { 0.9 }, tick * 100);
            black_box(tracker.process(fix, sample).unwrap())
        });
    });
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    for size in [100_usize, 1_000, 10_000] {
        let records = generate_records(size);
        let config = ClassifierConfig::default();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("recompute_stats", size),
            &records,
            |b, records| {
                b.iter(|| black_box(recompute_stats("bench", black_box(records), &config)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_classifier, bench_live_session, bench_replay);
criterion_main!(benches);
