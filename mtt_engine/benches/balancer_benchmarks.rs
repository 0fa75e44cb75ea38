use chrono::Utc;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mtt_engine::{
    table::{MemoryTableFactory, PlayerId, TableId},
    tournament::{
        NoopObserver, TableDescriptor, Tournament, TournamentConfig, TurnOutcome, break_tables,
        equalize_tables, prizes_algorithm,
    },
};
use std::hint::black_box;

/// Helper to lay out `n_tables` tables of 9 seats with uneven occupancy
fn setup_tables(n_tables: usize) -> Vec<TableDescriptor> {
    (0..n_tables)
        .map(|index| {
            let id = index as TableId + 1;
            let count = 2 + index % 8;
            let players = (0..count as PlayerId).map(|seat| id * 100 + seat).collect();
            TableDescriptor::new(id, 9, players, index % 5 == 0)
        })
        .collect()
}

/// Benchmark the break pass for growing fields
fn bench_break_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("break_tables");

    for n_tables in [2, 10, 100, 1000] {
        let tables = setup_tables(n_tables);
        group.bench_with_input(BenchmarkId::from_parameter(n_tables), &tables, |b, tables| {
            b.iter(|| break_tables(black_box(tables)));
        });
    }

    group.finish();
}

/// Benchmark the equalize pass for growing fields
fn bench_equalize_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("equalize_tables");

    for n_tables in [2, 10, 100, 1000] {
        let tables = setup_tables(n_tables);
        group.bench_with_input(BenchmarkId::from_parameter(n_tables), &tables, |b, tables| {
            b.iter(|| equalize_tables(black_box(tables)));
        });
    }

    group.finish();
}

/// Benchmark payouts for a large field
fn bench_prizes(c: &mut Criterion) {
    c.bench_function("prizes_10000_entrants", |b| {
        b.iter(|| prizes_algorithm(black_box(10_000), black_box(100)));
    });
}

/// Benchmark a whole 90 player tournament with one bust per hand
fn bench_full_tournament(c: &mut Criterion) {
    c.bench_function("full_tournament_90_players", |b| {
        b.iter(|| {
            let mut t = Tournament::new(
                TournamentConfig::sit_and_go("Bench", 90, 9),
                Box::new(MemoryTableFactory::seeded(1)),
                Box::new(NoopObserver),
                Utc::now(),
            )
            .unwrap();
            for player in 1..=90 {
                t.register(player, Utc::now()).unwrap();
            }

            let mut outcome = TurnOutcome::Continue;
            while outcome == TurnOutcome::Continue {
                let table_id = t
                    .table_ids()
                    .into_iter()
                    .find(|&id| t.table(id).unwrap().player_count() >= 2)
                    .unwrap();
                let table = t.table_mut(table_id).unwrap();
                let players = table.player_ids();
                let chips = table.clear_stack(players[0]).unwrap();
                table.pay_buy_in(players[1], chips).unwrap();
                outcome = t.end_turn(table_id, Utc::now()).unwrap();
            }
            black_box(t.eliminated().len())
        });
    });
}

criterion_group!(
    benches,
    bench_break_tables,
    bench_equalize_tables,
    bench_prizes,
    bench_full_tournament
);
criterion_main!(benches);
