//! SQLite implementation of the UserRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::UserProfile;
use crate::domain::ports::UserRepository;

use super::{parse_datetime, parse_uuid, placeholders};

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &UserProfile) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO users (id, display_name, email, photo_url, birth_date,
               life_expectancy, is_public, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(user.id.to_string())
        .bind(&user.display_name)
        .bind(&user.email)
        .bind(&user.photo_url)
        .bind(user.birth_date.map(|d| d.to_string()))
        .bind(i64::from(user.life_expectancy))
        .bind(user.is_public)
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<UserProfile>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn get_many(&self, ids: &[Uuid]) -> DomainResult<Vec<UserProfile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT * FROM users WHERE id IN ({}) ORDER BY display_name",
            placeholders(ids.len())
        );
        let mut q = sqlx::query_as::<_, UserRow>(&query);
        for id in ids {
            q = q.bind(id.to_string());
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update(&self, user: &UserProfile) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE users SET display_name = ?, email = ?, photo_url = ?,
               birth_date = ?, life_expectancy = ?, is_public = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&user.display_name)
        .bind(&user.email)
        .bind(&user.photo_url)
        .bind(user.birth_date.map(|d| d.to_string()))
        .bind(i64::from(user.life_expectancy))
        .bind(user.is_public)
        .bind(user.updated_at.to_rfc3339())
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }

        Ok(())
    }

    async fn search(&self, name_prefix: &str, limit: u32) -> DomainResult<Vec<UserProfile>> {
        // LIKE special characters in the prefix are escaped so a "%"
        // in a display name query cannot widen the match.
        let escaped = name_prefix
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");

        let rows: Vec<UserRow> = sqlx::query_as(
            r#"SELECT * FROM users
               WHERE is_public = 1 AND display_name LIKE ? ESCAPE '\'
               ORDER BY display_name
               LIMIT ?"#,
        )
        .bind(format!("{escaped}%"))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    display_name: String,
    email: String,
    photo_url: Option<String>,
    birth_date: Option<String>,
    life_expectancy: i64,
    is_public: bool,
    created_at: String,
    updated_at: String,
}

impl TryFrom<UserRow> for UserProfile {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let birth_date = row
            .birth_date
            .map(|s| s.parse::<NaiveDate>())
            .transpose()
            .map_err(|e| DomainError::SerializationError(e.to_string()))?;

        Ok(Self {
            id: parse_uuid(&row.id)?,
            display_name: row.display_name,
            email: row.email,
            photo_url: row.photo_url,
            birth_date,
            life_expectancy: u32::try_from(row.life_expectancy).unwrap_or_default(),
            is_public: row.is_public,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}
