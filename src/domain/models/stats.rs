//! Per-user game statistics: level, experience, points, achievements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached ranking positions, refreshed by the ranker.
///
/// May be stale immediately after a peer's update; that is acceptable
/// by design (eventual consistency at the display layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    /// 1-based position in the global leaderboard scan, or `None` when
    /// the user fell outside the scanned top-N window.
    pub global: Option<u32>,
    /// 1-based position among the user and their accepted friends.
    pub friends: u32,
}

/// An unlocked achievement: catalog id plus unlock time.
///
/// Appended to [`GameStats::achievements`] exactly once per id and
/// never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub id: String,
    pub unlocked_at: DateTime<Utc>,
}

/// Progression record for one user.
///
/// Invariant: `level` always equals the level computed from
/// `experience` by the progression engine; it is recomputed on every
/// award, never mutated independently. `experience` and `points` are
/// monotonically non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub level: u32,
    pub experience: u64,
    pub points: u64,
    #[serde(default)]
    pub achievements: Vec<AchievementRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    /// Consecutive active days.
    #[serde(default)]
    pub streak: u32,
    /// Last day the user was seen; `None` means never active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_at: Option<DateTime<Utc>>,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            points: 0,
            achievements: Vec::new(),
            rank: None,
            streak: 0,
            last_active_at: None,
        }
    }
}

impl GameStats {
    /// True if the achievement with the given catalog id is unlocked.
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }
}
