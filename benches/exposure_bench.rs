//! Exposure Benchmarks — Hot-Path Performance Validation
//!
//! Benchmarks the settlement formula and the race aggregation pass that
//! run on every placed bet and every exposure refresh.
//!
//! Run with: cargo bench --bench exposure_bench

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use turfbook::domain::exposure::aggregate;
use turfbook::domain::payout::settle;
use turfbook::domain::slip::{build, BetSlip};
use turfbook::domain::wager::{BetDirection, Horse, LedgerPartition, SettleMode};

fn sample_slip(horse_id: u32, direction: BetDirection, mode: SettleMode, price: f64) -> BetSlip {
    BetSlip {
        partition: LedgerPartition::Local,
        race_id: Some(1),
        horse_id: Some(horse_id),
        horse_name: format!("HORSE {horse_id}"),
        bettor_name: "SMITH".to_string(),
        direction,
        mode,
        raw_amount: 25.0,
        quoted_price: price,
        tax_rate: 5.0,
        remarks: String::new(),
    }
}

fn sample_horse(id: u32) -> Horse {
    Horse {
        id,
        name: format!("HORSE {id}"),
        quoted_price: 150,
        scratch_cutoff: None,
        void_cutoff: None,
        void_deduction: None,
    }
}

/// Benchmark the fixed-payout settlement formula.
fn bench_settle_fixed(c: &mut Criterion) {
    c.bench_function("settle_fixed_payout", |b| {
        b.iter(|| {
            let _s = settle(
                BetDirection::Sale,
                SettleMode::FixedPayout,
                black_box(25.0),
                black_box(150),
            );
        });
    });
}

/// Benchmark the variable-price settlement formula.
fn bench_settle_variable(c: &mut Criterion) {
    c.bench_function("settle_variable_price", |b| {
        b.iter(|| {
            let _s = settle(
                BetDirection::Purchase,
                SettleMode::VariablePrice,
                black_box(25.0),
                black_box(350),
            );
        });
    });
}

/// Benchmark a full aggregation pass over a realistic race: 12 horses,
/// 500 transactions, mixed modes and directions.
fn bench_aggregate_race(c: &mut Criterion) {
    let horses: Vec<Horse> = (1..=12).map(sample_horse).collect();
    let now = Utc::now();
    let transactions: Vec<_> = (0..500)
        .map(|i| {
            let horse_id = (i % 12) + 1;
            let (direction, mode, price) = match i % 4 {
                0 => (BetDirection::Sale, SettleMode::FixedPayout, 50.0),
                1 => (BetDirection::Purchase, SettleMode::FixedPayout, 120.0),
                2 => (BetDirection::Sale, SettleMode::VariablePrice, 350.0),
                _ => (BetDirection::Purchase, SettleMode::VariablePrice, 800.0),
            };
            build(sample_slip(horse_id, direction, mode, price), now)
                .expect("bench slip is valid")
        })
        .collect();

    c.bench_function("aggregate_race_12h_500txn", |b| {
        b.iter(|| {
            let _snap = aggregate(black_box(1), black_box(&transactions), black_box(&horses));
        });
    });
}

criterion_group!(
    benches,
    bench_settle_fixed,
    bench_settle_variable,
    bench_aggregate_race,
);
criterion_main!(benches);
