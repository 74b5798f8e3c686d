//! Achievement catalog: static definitions, requirements, and rewards.
//!
//! Achievements are one-time-unlockable milestones. The catalog is a
//! static table; per-user unlock state lives in
//! [`GameStats::achievements`](super::stats::GameStats).

use serde::{Deserialize, Serialize};

/// What a user must have done for an achievement to unlock.
///
/// Each variant carries the threshold that must be met or exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Requirement {
    /// Total quests ever created.
    TotalGoals(u64),
    /// Quests at 100% progress.
    GoalsCompleted(u64),
    /// Consecutive active days (streak).
    ConsecutiveDays(u32),
    /// Lifetime points balance.
    PointsEarned(u64),
    /// Current level.
    LevelReached(u32),
}

/// Points and experience granted when an achievement unlocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub points: u64,
    pub experience: u64,
}

impl Reward {
    pub const fn new(points: u64, experience: u64) -> Self {
        Self { points, experience }
    }
}

/// A static catalog entry describing one achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementDef {
    /// Stable identifier, unique across the catalog.
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: Requirement,
    pub reward: Reward,
}

/// The full achievement catalog.
///
/// Ids are stable: unlock records reference them by string and the
/// catalog must never reuse or rename an id.
pub const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: "first_goal",
        title: "First Step",
        description: "Create your first quest",
        icon: "🎯",
        requirement: Requirement::TotalGoals(1),
        reward: Reward::new(100, 50),
    },
    AchievementDef {
        id: "goal_master",
        title: "Goal Master",
        description: "Complete 10 quests",
        icon: "🏆",
        requirement: Requirement::GoalsCompleted(10),
        reward: Reward::new(1000, 500),
    },
    AchievementDef {
        id: "streak_week",
        title: "Steady Effort",
        description: "Stay active 7 days in a row",
        icon: "🔥",
        requirement: Requirement::ConsecutiveDays(7),
        reward: Reward::new(500, 200),
    },
    AchievementDef {
        id: "dedicated",
        title: "Dedicated",
        description: "Stay active 30 days in a row",
        icon: "⚡",
        requirement: Requirement::ConsecutiveDays(30),
        reward: Reward::new(2000, 1000),
    },
    AchievementDef {
        id: "point_collector",
        title: "Point Collector",
        description: "Earn 1000 points",
        icon: "💰",
        requirement: Requirement::PointsEarned(1000),
        reward: Reward::new(200, 100),
    },
    AchievementDef {
        id: "rising_star",
        title: "Rising Star",
        description: "Reach level 5",
        icon: "⭐",
        requirement: Requirement::LevelReached(5),
        reward: Reward::new(300, 150),
    },
    AchievementDef {
        id: "veteran",
        title: "Veteran",
        description: "Reach level 10",
        icon: "🎖️",
        requirement: Requirement::LevelReached(10),
        reward: Reward::new(1500, 750),
    },
];

/// Look up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|def| def.id == id)
}
