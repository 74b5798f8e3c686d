//! SQLite implementation of the NotificationRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Notification, NotificationKind};
use crate::domain::ports::NotificationRepository;

use super::{parse_datetime, parse_uuid};

#[derive(Clone)]
pub struct SqliteNotificationRepository {
    pool: SqlitePool,
}

impl SqliteNotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepository {
    async fn create(&self, notification: &Notification) -> DomainResult<()> {
        let kind_json = serde_json::to_string(&notification.kind)?;

        sqlx::query(
            r#"INSERT INTO notifications (id, user_id, kind, read, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(notification.id.to_string())
        .bind(notification.user_id.to_string())
        .bind(&kind_json)
        .bind(notification.read)
        .bind(notification.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid, limit: u32) -> DomainResult<Vec<Notification>> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"SELECT * FROM notifications WHERE user_id = ?
               ORDER BY created_at DESC LIMIT ?"#,
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn mark_read(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("UPDATE notifications SET read = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ValidationFailed(format!("Notification not found: {id}")));
        }

        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> DomainResult<()> {
        sqlx::query("UPDATE notifications SET read = 1 WHERE user_id = ? AND read = 0")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn unread_count(&self, user_id: Uuid) -> DomainResult<u64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE user_id = ? AND read = 0")
                .bind(user_id.to_string())
                .fetch_one(&self.pool)
                .await?;

        Ok(count as u64)
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: String,
    user_id: String,
    kind: String,
    read: bool,
    created_at: String,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = DomainError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind: NotificationKind = serde_json::from_str(&row.kind)?;

        Ok(Self {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            kind,
            read: row.read,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}
