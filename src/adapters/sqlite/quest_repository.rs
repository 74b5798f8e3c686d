//! SQLite implementation of the QuestRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Quest;
use crate::domain::ports::{QuestCounts, QuestRepository};

use super::{parse_datetime, parse_optional_datetime, parse_uuid};

#[derive(Clone)]
pub struct SqliteQuestRepository {
    pool: SqlitePool,
}

impl SqliteQuestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestRepository for SqliteQuestRepository {
    async fn create(&self, quest: &Quest) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO quests (id, user_id, title, description, category, progress,
               abandoned, due_date, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(quest.id.to_string())
        .bind(quest.user_id.to_string())
        .bind(&quest.title)
        .bind(&quest.description)
        .bind(&quest.category)
        .bind(i64::from(quest.progress))
        .bind(quest.abandoned)
        .bind(quest.due_date.map(|t| t.to_rfc3339()))
        .bind(quest.created_at.to_rfc3339())
        .bind(quest.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Quest>> {
        let row: Option<QuestRow> = sqlx::query_as("SELECT * FROM quests WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, quest: &Quest) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE quests SET title = ?, description = ?, category = ?, progress = ?,
               abandoned = ?, due_date = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&quest.title)
        .bind(&quest.description)
        .bind(&quest.category)
        .bind(i64::from(quest.progress))
        .bind(quest.abandoned)
        .bind(quest.due_date.map(|t| t.to_rfc3339()))
        .bind(quest.updated_at.to_rfc3339())
        .bind(quest.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::QuestNotFound(quest.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM quests WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::QuestNotFound(id));
        }

        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Quest>> {
        let rows: Vec<QuestRow> =
            sqlx::query_as("SELECT * FROM quests WHERE user_id = ? ORDER BY created_at DESC")
                .bind(user_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn counts_for_user(&self, user_id: Uuid) -> DomainResult<QuestCounts> {
        let (total, completed): (i64, i64) = sqlx::query_as(
            r#"SELECT COUNT(*), COUNT(CASE WHEN progress = 100 AND abandoned = 0 THEN 1 END)
               FROM quests WHERE user_id = ?"#,
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(QuestCounts { total: total as u64, completed: completed as u64 })
    }
}

#[derive(sqlx::FromRow)]
struct QuestRow {
    id: String,
    user_id: String,
    title: String,
    description: String,
    category: String,
    progress: i64,
    abandoned: bool,
    due_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<QuestRow> for Quest {
    type Error = DomainError;

    fn try_from(row: QuestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            title: row.title,
            description: row.description,
            category: row.category,
            progress: u8::try_from(row.progress.clamp(0, 100)).unwrap_or(100),
            abandoned: row.abandoned,
            due_date: parse_optional_datetime(row.due_date)?,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}
