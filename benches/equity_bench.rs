//! Benchmarks for the equity simulator and the preflop engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use holdem_advisor::cards::{parse_cards, HoleCards};
use holdem_advisor::config::SimulationConfig;
use holdem_advisor::equity::{EquitySimulator, OpponentSpec};
use holdem_advisor::preflop::{PreflopContext, PreflopEngine};
use holdem_advisor::range::OpponentRange;
use holdem_advisor::stats::ExploitAdjustment;
use holdem_advisor::Position;

fn equity_uniform_benchmark(c: &mut Criterion) {
    let sim = EquitySimulator::new(SimulationConfig::default());
    let hero = parse_cards("AhKh").unwrap();
    let board = parse_cards("Qh7c2h").unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("equity_flop_2000_vs_2_random", |b| {
        b.iter(|| {
            sim.equity(
                black_box(&hero),
                black_box(&board),
                OpponentSpec::Uniform(2),
                2000,
                &mut rng,
            )
            .unwrap()
        })
    });
}

fn equity_range_benchmark(c: &mut Criterion) {
    let sim = EquitySimulator::new(SimulationConfig::default());
    let hero = parse_cards("JdJc").unwrap();
    let board = parse_cards("9s8s2d").unwrap();
    let range = OpponentRange::from_notation("TT+, AQs+, AKo, KQs, A5s-A2s").unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("equity_flop_2000_vs_range", |b| {
        b.iter(|| {
            sim.equity(
                black_box(&hero),
                black_box(&board),
                OpponentSpec::Range(&range),
                2000,
                &mut rng,
            )
            .unwrap()
        })
    });
}

fn preflop_decision_benchmark(c: &mut Criterion) {
    let engine = PreflopEngine::default();
    let cards = parse_cards("AdQs").unwrap();
    let hole = HoleCards::from_slice(&cards).unwrap();
    let ctx = PreflopContext::from_actions(&[], Position::CO, 1.5);
    let exploit = ExploitAdjustment::neutral();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("preflop_rfi_decision", |b| {
        b.iter(|| {
            engine
                .decide(black_box(&hole), &ctx, 100.0, &exploit, &mut rng)
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    equity_uniform_benchmark,
    equity_range_benchmark,
    preflop_decision_benchmark
);
criterion_main!(benches);
