//! Game statistics repository port.
//!
//! Point and experience gains go through atomic increment operations
//! rather than whole-record writes, so two near-simultaneous awards
//! against the same user cannot lose each other's deltas.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AchievementRecord, GameStats, Rank, Reward};

/// Repository interface for per-user game statistics.
///
/// Also the points-lookup capability the ranker is injected with: the
/// ranking computation only needs [`points_for`](Self::points_for) and
/// [`top_by_points`](Self::top_by_points), not the storage layout.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Create the default stats row for a new user.
    async fn create_default(&self, user_id: Uuid) -> DomainResult<()>;

    /// Get a user's stats.
    async fn get(&self, user_id: Uuid) -> DomainResult<Option<GameStats>>;

    /// Apply a point/experience award as an atomic increment, writing
    /// the level the engine computed for the new totals.
    async fn apply_award(&self, user_id: Uuid, reward: Reward, level: u32) -> DomainResult<()>;

    /// Persist an achievement evaluation result: the full updated
    /// unlock list plus the batch reward, in one statement.
    async fn record_unlocks(
        &self,
        user_id: Uuid,
        achievements: &[AchievementRecord],
        reward: Reward,
        level: u32,
    ) -> DomainResult<()>;

    /// Update the streak counter and last-active timestamp.
    async fn set_streak(
        &self,
        user_id: Uuid,
        streak: u32,
        last_active_at: DateTime<Utc>,
    ) -> DomainResult<()>;

    /// Cache a computed rank on the user's stats.
    async fn set_rank(&self, user_id: Uuid, rank: Rank) -> DomainResult<()>;

    /// Batch point lookup for the given users; missing users are skipped.
    async fn points_for(&self, user_ids: &[Uuid]) -> DomainResult<Vec<(Uuid, u64)>>;

    /// Top users by points, descending, ties broken by id ascending.
    async fn top_by_points(&self, limit: u32) -> DomainResult<Vec<(Uuid, u64)>>;
}
