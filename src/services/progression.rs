//! Progression engine: levels, awards, achievements, streaks.
//!
//! Pure functions over [`GameStats`] and already-fetched facts. The
//! engine performs no I/O and cannot fail; callers fetch inputs
//! through the repository ports and persist every returned record.
//!
//! # Level curve
//!
//! Advancing out of level N costs `floor(100 * 1.5^(N-1))` experience:
//! 100 XP from level 1 to 2, then 150, 225, 337, and so on. Level is
//! always recomputed from total experience, never stored independently.

use chrono::{DateTime, Utc};

use crate::domain::models::{
    achievement, AchievementRecord, GameStats, Requirement, Reward,
};

/// Reward granted when a quest is created.
pub const QUEST_CREATED_REWARD: Reward = Reward::new(50, 25);

/// Reward granted when a quest reaches 100%.
pub const QUEST_COMPLETED_REWARD: Reward = Reward::new(100, 50);

/// Experience cost of advancing out of the given level (1-based).
///
/// Total over all levels; beyond the range where `1.5^(n-1)` fits in
/// an `f64`, the cost saturates, which in practice means the loop in
/// [`level_for_experience`] always terminates.
pub fn required_experience(level: u32) -> u64 {
    let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
    (100.0 * 1.5_f64.powi(exponent)).floor() as u64
}

/// Level for a total experience value; monotonic, `level(0) == 1`.
pub fn level_for_experience(experience: u64) -> u32 {
    let (level, _) = level_and_remainder(experience);
    level
}

/// Experience accumulated inside the current level and the cost of the
/// next, for progress-bar display.
pub fn level_progress(experience: u64) -> (u64, u64) {
    let (level, into_level) = level_and_remainder(experience);
    (into_level, required_experience(level))
}

fn level_and_remainder(experience: u64) -> (u32, u64) {
    let mut level: u32 = 1;
    let mut remaining = experience;
    loop {
        let cost = required_experience(level);
        if remaining < cost || cost == 0 {
            return (level, remaining);
        }
        remaining -= cost;
        level += 1;
    }
}

/// Apply a point/experience award, recomputing the level.
pub fn award(stats: &GameStats, reward: Reward) -> GameStats {
    let experience = stats.experience.saturating_add(reward.experience);
    GameStats {
        points: stats.points.saturating_add(reward.points),
        experience,
        level: level_for_experience(experience),
        ..stats.clone()
    }
}

/// The already-fetched facts achievement requirements are checked
/// against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressFacts {
    /// Quests ever created by the user
    pub total_quests: u64,
    /// Quests at 100% progress
    pub completed_quests: u64,
    /// Current streak in days
    pub consecutive_days: u32,
}

/// Evaluate every locked catalog achievement against the facts.
///
/// Newly satisfied definitions are appended exactly once, with their
/// rewards summed and applied as a single award, so one evaluation
/// yields one score update. An unlocked id never unlocks again;
/// point- and level-gated achievements whose thresholds are crossed
/// by the batch reward itself surface on the next evaluation.
pub fn evaluate_achievements(
    stats: &GameStats,
    facts: &ProgressFacts,
    now: DateTime<Utc>,
) -> (GameStats, Vec<AchievementRecord>) {
    let mut unlocked = Vec::new();
    let mut batch_reward = Reward::default();

    for def in achievement::CATALOG {
        if stats.has_achievement(def.id) {
            continue;
        }
        let satisfied = match def.requirement {
            Requirement::TotalGoals(n) => facts.total_quests >= n,
            Requirement::GoalsCompleted(n) => facts.completed_quests >= n,
            Requirement::ConsecutiveDays(n) => facts.consecutive_days >= n,
            Requirement::PointsEarned(n) => stats.points >= n,
            Requirement::LevelReached(n) => stats.level >= n,
        };
        if satisfied {
            unlocked.push(AchievementRecord {
                id: def.id.to_string(),
                unlocked_at: now,
            });
            batch_reward.points += def.reward.points;
            batch_reward.experience += def.reward.experience;
        }
    }

    if unlocked.is_empty() {
        return (stats.clone(), unlocked);
    }

    let mut updated = award(stats, batch_reward);
    updated.achievements.extend(unlocked.iter().cloned());
    (updated, unlocked)
}

/// Advance the streak for an activity observed at `now`.
///
/// Same-day re-entry is a no-op, a one-day gap extends the streak, a
/// longer gap resets it to 1. A user never seen before starts at 1
/// explicitly rather than riding the reset branch.
pub fn update_streak(stats: &GameStats, now: DateTime<Utc>) -> GameStats {
    let streak = match stats.last_active_at {
        None => 1,
        Some(last) => match (now - last).num_days() {
            d if d <= 0 => stats.streak,
            1 => stats.streak + 1,
            _ => 1,
        },
    };
    GameStats {
        streak,
        last_active_at: Some(now),
        ..stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_experience_curve() {
        assert_eq!(required_experience(1), 100);
        assert_eq!(required_experience(2), 150);
        assert_eq!(required_experience(3), 225);
        assert_eq!(required_experience(4), 337);
    }

    #[test]
    fn test_level_for_experience() {
        assert_eq!(level_for_experience(0), 1);
        assert_eq!(level_for_experience(99), 1);
        assert_eq!(level_for_experience(100), 2);
        assert_eq!(level_for_experience(249), 2);
        assert_eq!(level_for_experience(250), 3);
    }

    #[test]
    fn test_level_progress() {
        // 120 XP: 100 spent on level 1, 20 into level 2 of 150
        assert_eq!(level_progress(120), (20, 150));
        assert_eq!(level_progress(0), (0, 100));
    }

    #[test]
    fn test_award_recomputes_level() {
        let stats = GameStats::default();
        let updated = award(&stats, Reward::new(50, 20));
        assert_eq!(updated.points, 50);
        assert_eq!(updated.experience, 20);
        assert_eq!(updated.level, 1);

        let updated = award(&updated, Reward::new(0, 80));
        assert_eq!(updated.experience, 100);
        assert_eq!(updated.level, 2);
    }

    #[test]
    fn test_first_goal_unlock() {
        let stats = GameStats::default();
        let facts = ProgressFacts { total_quests: 1, ..ProgressFacts::default() };

        let (updated, unlocked) = evaluate_achievements(&stats, &facts, Utc::now());
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "first_goal");
        assert_eq!(updated.points, 100);
        assert_eq!(updated.experience, 50);
        assert!(updated.has_achievement("first_goal"));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let stats = GameStats::default();
        let facts = ProgressFacts { total_quests: 3, ..ProgressFacts::default() };

        let (once, first) = evaluate_achievements(&stats, &facts, Utc::now());
        assert!(!first.is_empty());

        let (twice, second) = evaluate_achievements(&once, &facts, Utc::now());
        assert!(second.is_empty());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_no_goals_never_unlocks_goal_master() {
        let stats = GameStats {
            points: 1_000_000,
            level: 50,
            ..GameStats::default()
        };
        let facts = ProgressFacts::default();

        let (_, unlocked) = evaluate_achievements(&stats, &facts, Utc::now());
        assert!(unlocked.iter().all(|a| a.id != "goal_master"));
    }

    #[test]
    fn test_batch_rewards_summed_once() {
        // Facts satisfying first_goal (100/50) and goal_master (1000/500)
        let stats = GameStats::default();
        let facts = ProgressFacts { total_quests: 12, completed_quests: 10, ..ProgressFacts::default() };

        let (updated, unlocked) = evaluate_achievements(&stats, &facts, Utc::now());
        assert_eq!(unlocked.len(), 2);
        assert_eq!(updated.points, 1100);
        assert_eq!(updated.experience, 550);
        assert_eq!(updated.level, level_for_experience(550));
    }

    #[test]
    fn test_streak_first_activity() {
        let stats = GameStats::default();
        let now = Utc::now();
        let updated = update_streak(&stats, now);
        assert_eq!(updated.streak, 1);
        assert_eq!(updated.last_active_at, Some(now));
    }

    #[test]
    fn test_streak_increment_reset_and_same_day() {
        let now = Utc::now();
        let base = GameStats {
            streak: 4,
            last_active_at: Some(now - chrono::Duration::days(1)),
            ..GameStats::default()
        };
        assert_eq!(update_streak(&base, now).streak, 5);

        let stale = GameStats {
            last_active_at: Some(now - chrono::Duration::days(3)),
            ..base.clone()
        };
        assert_eq!(update_streak(&stale, now).streak, 1);

        let today = GameStats {
            last_active_at: Some(now - chrono::Duration::hours(2)),
            ..base
        };
        assert_eq!(update_streak(&today, now).streak, 4);
    }
}
