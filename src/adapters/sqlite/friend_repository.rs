//! SQLite implementation of the FriendRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{FriendRequest, FriendRequestStatus};
use crate::domain::ports::FriendRepository;

use super::{parse_datetime, parse_uuid};

#[derive(Clone)]
pub struct SqliteFriendRepository {
    pool: SqlitePool,
}

impl SqliteFriendRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendRepository for SqliteFriendRepository {
    async fn create(&self, request: &FriendRequest) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO friend_requests (id, from_user, to_user, status, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(request.id.to_string())
        .bind(request.from_user.to_string())
        .bind(request.to_user.to_string())
        .bind(request.status.as_str())
        .bind(request.created_at.to_rfc3339())
        .bind(request.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<FriendRequest>> {
        let row: Option<FriendRequestRow> =
            sqlx::query_as("SELECT * FROM friend_requests WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, request: &FriendRequest) -> DomainResult<()> {
        let result =
            sqlx::query("UPDATE friend_requests SET status = ?, updated_at = ? WHERE id = ?")
                .bind(request.status.as_str())
                .bind(request.updated_at.to_rfc3339())
                .bind(request.id.to_string())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FriendRequestNotFound(request.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM friend_requests WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FriendRequestNotFound(id));
        }

        Ok(())
    }

    async fn find_between(
        &self,
        from_user: Uuid,
        to_user: Uuid,
    ) -> DomainResult<Option<FriendRequest>> {
        let row: Option<FriendRequestRow> =
            sqlx::query_as("SELECT * FROM friend_requests WHERE from_user = ? AND to_user = ?")
                .bind(from_user.to_string())
                .bind(to_user.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn pending_for(&self, user_id: Uuid) -> DomainResult<Vec<FriendRequest>> {
        let rows: Vec<FriendRequestRow> = sqlx::query_as(
            r#"SELECT * FROM friend_requests
               WHERE to_user = ? AND status = 'pending'
               ORDER BY created_at DESC"#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn following(&self, user_id: Uuid) -> DomainResult<Vec<Uuid>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT to_user FROM friend_requests WHERE from_user = ? AND status = 'accepted'",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|(id,)| parse_uuid(&id)).collect()
    }

    async fn followers(&self, user_id: Uuid) -> DomainResult<Vec<Uuid>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT from_user FROM friend_requests WHERE to_user = ? AND status = 'accepted'",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|(id,)| parse_uuid(&id)).collect()
    }
}

#[derive(sqlx::FromRow)]
struct FriendRequestRow {
    id: String,
    from_user: String,
    to_user: String,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<FriendRequestRow> for FriendRequest {
    type Error = DomainError;

    fn try_from(row: FriendRequestRow) -> Result<Self, Self::Error> {
        let status = FriendRequestStatus::from_str(&row.status).ok_or_else(|| {
            DomainError::SerializationError(format!("Invalid request status: {}", row.status))
        })?;

        Ok(Self {
            id: parse_uuid(&row.id)?,
            from_user: parse_uuid(&row.from_user)?,
            to_user: parse_uuid(&row.to_user)?,
            status,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}
