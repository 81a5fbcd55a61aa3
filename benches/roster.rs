use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use squid_run::core::{ParticipantId, RunRng};
use squid_run::roster::Roster;

fn filled(slots: usize) -> Roster {
    let mut roster = Roster::new();
    roster.initialize(slots, 10, &mut RunRng::new(1));
    roster
}

fn bench_initialize(c: &mut Criterion) {
    let mut rng = RunRng::new(42);
    c.bench_function("initialize_456", |b| {
        b.iter(|| {
            let mut roster = Roster::new();
            roster.initialize(black_box(456), 10, &mut rng);
            roster
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let roster = filled(456);
    c.bench_function("snapshot_456", |b| b.iter(|| black_box(roster.snapshot())));
}

fn bench_eliminate_random(c: &mut Criterion) {
    let template = filled(456);
    let mut rng = RunRng::new(7);
    c.bench_function("eliminate_random_half_456", |b| {
        b.iter_batched(
            || template.clone(),
            |mut roster| roster.eliminate_random(228, ParticipantId::PLAYER, &mut rng),
            BatchSize::SmallInput,
        );
    });
}

fn bench_split_teams(c: &mut Criterion) {
    let roster = filled(456);
    let mut rng = RunRng::new(9);
    c.bench_function("split_teams_456", |b| b.iter(|| roster.split_teams(5, &mut rng)));
}

criterion_group!(
    benches,
    bench_initialize,
    bench_snapshot,
    bench_eliminate_random,
    bench_split_teams
);
criterion_main!(benches);
