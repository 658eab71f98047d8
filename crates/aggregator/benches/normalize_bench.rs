//! 정규화 엔진 벤치마크
//!
//! 타임스탬프 스캐너와 라인 정규화 전체의 처리량을 측정합니다.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use logharvest_aggregator::normalize::{scan_timestamp, Normalizer};
use logharvest_core::config::parse_fixed_offset;
use logharvest_core::pipeline::FixedClock;
use logharvest_core::types::TargetMode;

/// 오프셋 없는 기본 형태
const LINE_NAIVE: &str = "2026-01-15 10:00:00 ERROR disk almost full on /var";

/// 소수부와 명시적 오프셋 포함
const LINE_FULL: &str =
    "2026-01-15T10:00:00.123456+09:00 WARNING connection pool saturated, retrying request";

/// 타임스탬프 없는 라인 (합성 경로)
const LINE_BARE: &str = "database connection established after 3 retries";

fn fixed_normalizer(target: TargetMode) -> Normalizer<FixedClock> {
    Normalizer::new(
        parse_fixed_offset("UTC").unwrap(),
        target,
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()),
    )
}

fn bench_scan_timestamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_timestamp");

    group.throughput(Throughput::Elements(1));
    group.bench_function("naive", |b| {
        b.iter(|| scan_timestamp(black_box(LINE_NAIVE)))
    });
    group.bench_function("fractional_with_offset", |b| {
        b.iter(|| scan_timestamp(black_box(LINE_FULL)))
    });
    group.bench_function("no_timestamp", |b| {
        b.iter(|| scan_timestamp(black_box(LINE_BARE)))
    });

    group.finish();
}

fn bench_normalize_line(c: &mut Criterion) {
    let normalizer = fixed_normalizer(TargetMode::Utc);

    let mut group = c.benchmark_group("normalize_line");

    group.throughput(Throughput::Elements(1));
    group.bench_with_input(BenchmarkId::new("shape", "naive"), &LINE_NAIVE, |b, &input| {
        b.iter(|| normalizer.normalize_lines(black_box(&[input])))
    });
    group.bench_with_input(BenchmarkId::new("shape", "full"), &LINE_FULL, |b, &input| {
        b.iter(|| normalizer.normalize_lines(black_box(&[input])))
    });
    group.bench_with_input(BenchmarkId::new("shape", "bare"), &LINE_BARE, |b, &input| {
        b.iter(|| normalizer.normalize_lines(black_box(&[input])))
    });

    group.finish();
}

fn bench_normalize_batch(c: &mut Criterion) {
    let normalizer = fixed_normalizer(TargetMode::Utc);
    let batch: Vec<&str> = (0..1000)
        .map(|i| match i % 3 {
            0 => LINE_NAIVE,
            1 => LINE_FULL,
            _ => LINE_BARE,
        })
        .collect();

    let mut group = c.benchmark_group("normalize_batch");

    // 1000건 반복 처리량
    group.throughput(Throughput::Elements(1000));
    group.bench_function("mixed_1000", |b| {
        b.iter(|| normalizer.normalize_lines(black_box(&batch)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scan_timestamp,
    bench_normalize_line,
    bench_normalize_batch
);
criterion_main!(benches);
