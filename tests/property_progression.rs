//! Property tests for the progression engine.

use chrono::Utc;
use lifeprog::domain::models::{GameStats, Reward};
use lifeprog::services::progression::{
    self, evaluate_achievements, level_for_experience, required_experience, ProgressFacts,
};
use proptest::prelude::*;

proptest! {
    /// More experience never means a lower level.
    #[test]
    fn level_is_monotone_in_experience(e1 in 0u64..10_000_000, e2 in 0u64..10_000_000) {
        let (lo, hi) = if e1 <= e2 { (e1, e2) } else { (e2, e1) };
        prop_assert!(level_for_experience(lo) <= level_for_experience(hi));
    }

    /// Progress into a level never reaches the next level's cost, and
    /// the cumulative cost of the levels below accounts for the rest.
    #[test]
    fn level_matches_thresholds(experience in 0u64..10_000_000) {
        let level = level_for_experience(experience);
        prop_assert!(level >= 1);

        let (into_level, needed) = progression::level_progress(experience);
        prop_assert!(into_level < needed);
        prop_assert_eq!(needed, required_experience(level));

        let spent_below: u64 = (1..level).map(required_experience).sum();
        prop_assert_eq!(experience, spent_below + into_level);
    }

    /// Awards never shrink points, experience, or level.
    #[test]
    fn awards_are_monotone(
        start_exp in 0u64..1_000_000,
        start_points in 0u64..1_000_000,
        points in 0u64..100_000,
        experience in 0u64..100_000,
    ) {
        let stats = GameStats {
            level: level_for_experience(start_exp),
            experience: start_exp,
            points: start_points,
            ..GameStats::default()
        };
        let awarded = progression::award(&stats, Reward::new(points, experience));
        prop_assert!(awarded.points >= stats.points);
        prop_assert!(awarded.experience >= stats.experience);
        prop_assert!(awarded.level >= stats.level);
        prop_assert_eq!(awarded.level, level_for_experience(awarded.experience));
    }

    /// Evaluation reaches a fixed point: unlock rewards can cascade
    /// into further unlocks, but each id unlocks at most once and the
    /// cascade is bounded by the catalog size.
    #[test]
    fn evaluation_reaches_a_fixed_point(
        total in 0u64..100,
        completed_raw in 0u64..100,
        streak in 0u32..60,
    ) {
        let completed = completed_raw.min(total);
        let facts = ProgressFacts {
            total_quests: total,
            completed_quests: completed,
            consecutive_days: streak,
        };
        let now = Utc::now();

        let mut stats = GameStats::default();
        let mut all_ids: Vec<String> = Vec::new();
        let mut rounds = 0;
        loop {
            let (next, unlocked) = evaluate_achievements(&stats, &facts, now);
            stats = next;
            if unlocked.is_empty() {
                break;
            }
            all_ids.extend(unlocked.into_iter().map(|r| r.id));
            rounds += 1;
            prop_assert!(rounds <= lifeprog::domain::models::achievement::CATALOG.len());
        }

        // Stable afterwards
        let (settled, unlocked) = evaluate_achievements(&stats, &facts, now);
        prop_assert!(unlocked.is_empty());
        prop_assert_eq!(settled, stats.clone());

        // No id ever unlocks twice
        let mut deduped = all_ids.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), all_ids.len());
        prop_assert_eq!(all_ids.len(), stats.achievements.len());
    }
}
