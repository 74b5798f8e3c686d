use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lifeprog::domain::models::{GameStats, Reward};
use lifeprog::services::progression::{
    award, evaluate_achievements, level_for_experience, ProgressFacts,
};

fn progression_benchmarks(c: &mut Criterion) {
    // Level lookup across the curve
    c.bench_function("level_for_experience_low", |b| {
        b.iter(|| level_for_experience(black_box(120)));
    });
    c.bench_function("level_for_experience_high", |b| {
        b.iter(|| level_for_experience(black_box(10_000_000)));
    });

    // A single award with level recomputation
    let stats = GameStats { experience: 5_000, points: 3_000, ..GameStats::default() };
    c.bench_function("award", |b| {
        b.iter(|| award(black_box(&stats), Reward::new(100, 50)));
    });

    // Full catalog scan with nothing unlocked yet
    let fresh = GameStats::default();
    let facts = ProgressFacts { total_quests: 5, completed_quests: 2, consecutive_days: 3 };
    let now = Utc::now();
    c.bench_function("evaluate_achievements_fresh", |b| {
        b.iter(|| evaluate_achievements(black_box(&fresh), black_box(&facts), now));
    });

    // Scan with most of the catalog already unlocked
    let (settled, _) = evaluate_achievements(&fresh, &facts, now);
    c.bench_function("evaluate_achievements_settled", |b| {
        b.iter(|| evaluate_achievements(black_box(&settled), black_box(&facts), now));
    });
}

criterion_group!(benches, progression_benchmarks);
criterion_main!(benches);
