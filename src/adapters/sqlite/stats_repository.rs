//! SQLite implementation of the StatsRepository.
//!
//! Award writes are `SET points = points + ?` increments so concurrent
//! awards against the same row compose instead of clobbering.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AchievementRecord, GameStats, Rank, Reward};
use crate::domain::ports::StatsRepository;

use super::{parse_optional_datetime, parse_uuid, placeholders};

#[derive(Clone)]
pub struct SqliteStatsRepository {
    pool: SqlitePool,
}

impl SqliteStatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for SqliteStatsRepository {
    async fn create_default(&self, user_id: Uuid) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT OR IGNORE INTO game_stats (user_id, level, experience, points,
               achievements, streak)
               VALUES (?, 1, 0, 0, '[]', 0)"#,
        )
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> DomainResult<Option<GameStats>> {
        let row: Option<StatsRow> = sqlx::query_as("SELECT * FROM game_stats WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn apply_award(&self, user_id: Uuid, reward: Reward, level: u32) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE game_stats
               SET points = points + ?, experience = experience + ?, level = ?
               WHERE user_id = ?"#,
        )
        .bind(reward.points as i64)
        .bind(reward.experience as i64)
        .bind(i64::from(level))
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::StatsNotFound(user_id));
        }

        Ok(())
    }

    async fn record_unlocks(
        &self,
        user_id: Uuid,
        achievements: &[AchievementRecord],
        reward: Reward,
        level: u32,
    ) -> DomainResult<()> {
        let achievements_json = serde_json::to_string(achievements)?;

        let result = sqlx::query(
            r#"UPDATE game_stats
               SET achievements = ?, points = points + ?, experience = experience + ?, level = ?
               WHERE user_id = ?"#,
        )
        .bind(&achievements_json)
        .bind(reward.points as i64)
        .bind(reward.experience as i64)
        .bind(i64::from(level))
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::StatsNotFound(user_id));
        }

        Ok(())
    }

    async fn set_streak(
        &self,
        user_id: Uuid,
        streak: u32,
        last_active_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let result =
            sqlx::query("UPDATE game_stats SET streak = ?, last_active_at = ? WHERE user_id = ?")
                .bind(i64::from(streak))
                .bind(last_active_at.to_rfc3339())
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::StatsNotFound(user_id));
        }

        Ok(())
    }

    async fn set_rank(&self, user_id: Uuid, rank: Rank) -> DomainResult<()> {
        let result =
            sqlx::query("UPDATE game_stats SET rank_global = ?, rank_friends = ? WHERE user_id = ?")
                .bind(rank.global.map(i64::from))
                .bind(i64::from(rank.friends))
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::StatsNotFound(user_id));
        }

        Ok(())
    }

    async fn points_for(&self, user_ids: &[Uuid]) -> DomainResult<Vec<(Uuid, u64)>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT user_id, points FROM game_stats WHERE user_id IN ({})",
            placeholders(user_ids.len())
        );
        let mut q = sqlx::query_as::<_, (String, i64)>(&query);
        for id in user_ids {
            q = q.bind(id.to_string());
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|(id, points)| Ok((parse_uuid(&id)?, points as u64)))
            .collect()
    }

    async fn top_by_points(&self, limit: u32) -> DomainResult<Vec<(Uuid, u64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"SELECT user_id, points FROM game_stats
               ORDER BY points DESC, user_id ASC
               LIMIT ?"#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, points)| Ok((parse_uuid(&id)?, points as u64)))
            .collect()
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    #[allow(dead_code)]
    user_id: String,
    level: i64,
    experience: i64,
    points: i64,
    achievements: String,
    rank_global: Option<i64>,
    rank_friends: Option<i64>,
    streak: i64,
    last_active_at: Option<String>,
}

impl TryFrom<StatsRow> for GameStats {
    type Error = DomainError;

    fn try_from(row: StatsRow) -> Result<Self, Self::Error> {
        let achievements: Vec<AchievementRecord> = serde_json::from_str(&row.achievements)?;

        // Both rank columns are written together; a friends rank alone
        // is still a valid cached rank (global may be outside top-N).
        let rank = row.rank_friends.map(|friends| Rank {
            global: row.rank_global.and_then(|g| u32::try_from(g).ok()),
            friends: u32::try_from(friends).unwrap_or_default(),
        });

        Ok(Self {
            level: u32::try_from(row.level).unwrap_or(1),
            experience: row.experience as u64,
            points: row.points as u64,
            achievements,
            rank,
            streak: u32::try_from(row.streak).unwrap_or_default(),
            last_active_at: parse_optional_datetime(row.last_active_at)?,
        })
    }
}
