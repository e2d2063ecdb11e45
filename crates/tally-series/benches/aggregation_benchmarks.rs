//! Benchmarks for aggregation and splitting.
//!
//! Run with: cargo bench -p tally-series

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use tally_core::prelude::*;
use tally_series::{aggregate, average_of, split, SeriesPoint};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn dense_transactions(count: usize) -> Vec<Transaction> {
    let start = Instant::parse("2020-01-01").unwrap();
    (0..count)
        .map(|i| {
            let day = i64::try_from(i % 1_460).unwrap();
            let cents = i64::try_from(i % 9_973).unwrap() - 5_000;
            Transaction::new(i as u64, start.add_days(day).unwrap(), Money::from_cents(cents))
        })
        .collect()
}

/// Two transactions decades apart: almost every period is a gap.
fn sparse_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new(1, Instant::parse("1975-03-01").unwrap(), Money::from_cents(100)),
        Transaction::new(2, Instant::parse("2024-11-30").unwrap(), Money::from_cents(200)),
    ]
}

fn daily_balances(days: i64) -> Vec<SeriesPoint> {
    let start = Instant::parse("2024-01-01").unwrap();
    (0..days)
        .map(|d| SeriesPoint::new(start.add_days(d).unwrap(), Money::from_cents(100_000 + d)))
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [100usize, 1_000, 10_000] {
        let txs = dense_transactions(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("weekly", size), &txs, |b, txs| {
            b.iter(|| aggregate(black_box(txs), Frequency::WEEKLY, default_epoch()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("monthly", size), &txs, |b, txs| {
            b.iter(|| aggregate(black_box(txs), Frequency::MONTHLY, default_epoch()).unwrap());
        });
    }

    group.finish();
}

fn bench_sparse_gap_fill(c: &mut Criterion) {
    let txs = sparse_transactions();
    c.bench_function("gap_fill_daily_50_years", |b| {
        b.iter(|| {
            let buckets = aggregate(black_box(&txs), Frequency::DAILY, default_epoch()).unwrap();
            average_of(&buckets).unwrap()
        });
    });
}

fn bench_split(c: &mut Criterion) {
    let series = daily_balances(120);
    let anchor = Instant::parse("2024-02-15").unwrap();
    c.bench_function("split_120_days", |b| {
        b.iter(|| split(black_box(&series), anchor).unwrap());
    });
}

criterion_group!(benches, bench_aggregate, bench_sparse_gap_fill, bench_split);
criterion_main!(benches);
