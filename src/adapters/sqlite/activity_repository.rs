//! SQLite implementation of the activity log and live stream.
//!
//! The append path both persists the entry and publishes it on an
//! in-process broadcast channel, so live feed subscribers see new
//! activity without polling the table.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Activity, ActivityKind};
use crate::domain::ports::{ActivityRepository, ActivityStream};

use super::{parse_datetime, parse_uuid, placeholders};

const BROADCAST_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct SqliteActivityRepository {
    pool: SqlitePool,
    sender: broadcast::Sender<Activity>,
}

impl SqliteActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { pool, sender }
    }
}

#[async_trait]
impl ActivityRepository for SqliteActivityRepository {
    async fn append(&self, activity: &Activity) -> DomainResult<()> {
        let kind_json = serde_json::to_string(&activity.kind)?;

        sqlx::query(
            "INSERT INTO activities (id, user_id, kind, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(activity.id.to_string())
        .bind(activity.user_id.to_string())
        .bind(&kind_json)
        .bind(activity.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        // No receivers is fine; the entry is already durable.
        let _ = self.sender.send(activity.clone());

        Ok(())
    }

    async fn recent_for_users(
        &self,
        user_ids: &[Uuid],
        limit: u32,
    ) -> DomainResult<Vec<Activity>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            r#"SELECT * FROM activities WHERE user_id IN ({})
               ORDER BY created_at DESC LIMIT ?"#,
            placeholders(user_ids.len())
        );
        let mut q = sqlx::query_as::<_, ActivityRow>(&query);
        for id in user_ids {
            q = q.bind(id.to_string());
        }
        q = q.bind(i64::from(limit));

        let rows = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }
}

impl ActivityStream for SqliteActivityRepository {
    fn subscribe(&self) -> DomainResult<broadcast::Receiver<Activity>> {
        Ok(self.sender.subscribe())
    }
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: String,
    user_id: String,
    kind: String,
    created_at: String,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = DomainError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        let kind: ActivityKind = serde_json::from_str(&row.kind)?;

        Ok(Self {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            kind,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}
