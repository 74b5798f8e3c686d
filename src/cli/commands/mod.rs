//! CLI command implementations.

pub mod feed;
pub mod friend;
pub mod init;
pub mod notification;
pub mod quest;
pub mod stats;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::adapters::sqlite::initialize_database;
use crate::adapters::ConfigLoader;
use crate::domain::models::Config;

/// Shared wiring for every command: configuration plus an open,
/// migrated database pool.
pub struct AppContext {
    pub config: Config,
    pub pool: SqlitePool,
}

impl AppContext {
    /// Load configuration and open the configured database.
    pub async fn load() -> Result<Self> {
        let config = ConfigLoader::load()?;
        let db_url = format!("sqlite:{}", config.database.path);
        let pool = initialize_database(&db_url)
            .await
            .context("Failed to open database. Run `lifeprog init` first")?;
        Ok(Self { config, pool })
    }

    /// Resolve the acting user: the global `--user` flag wins,
    /// otherwise the id recorded in configuration by `lifeprog init`.
    pub fn current_user(&self, override_user: Option<Uuid>) -> Result<Uuid> {
        override_user.or(self.config.user.id).context(
            "No user configured. Run `lifeprog init --name <name>` or pass --user <id>",
        )
    }
}
