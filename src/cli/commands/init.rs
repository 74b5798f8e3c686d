//! Implementation of the `lifeprog init` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use tokio::fs;

use crate::adapters::sqlite::{
    initialize_database, SqliteActivityRepository, SqliteStatsRepository, SqliteUserRepository,
};
use crate::cli::output::{output, CommandOutput};
use crate::domain::errors::DomainError;
use crate::domain::models::{Activity, ActivityKind, Config, UserProfile};
use crate::domain::ports::{ActivityRepository, StatsRepository, UserRepository};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Display name for the new profile
    #[arg(long, short)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Birth date (YYYY-MM-DD), used for the lifespan progress bar
    #[arg(long)]
    pub birth_date: Option<NaiveDate>,

    /// Keep the profile out of search and follow requests
    #[arg(long)]
    pub private: bool,

    /// Reinitialize even if a profile is already configured
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub user_id: Option<uuid::Uuid>,
    pub database_path: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if let Some(id) = self.user_id {
            lines.push(format!("  User ID: {id}"));
            lines.push(format!("  Database: {}", self.database_path.display()));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let config_dir = PathBuf::from(".lifeprog");
    let config_path = config_dir.join("config.yaml");

    if config_path.exists() && !args.force {
        let output_data = InitOutput {
            success: false,
            message: "Already initialized. Use --force to create a new profile.".to_string(),
            user_id: None,
            database_path: config_dir.join("lifeprog.db"),
        };
        output(&output_data, json_mode);
        return Ok(());
    }

    fs::create_dir_all(&config_dir)
        .await
        .context("Failed to create .lifeprog directory")?;

    let config = Config::default();
    let db_url = format!("sqlite:{}", config.database.path);
    let pool = initialize_database(&db_url)
        .await
        .context("Failed to initialize database")?;

    let mut profile = UserProfile::new(args.name);
    if let Some(email) = args.email {
        profile = profile.with_email(email);
    }
    if let Some(birth_date) = args.birth_date {
        profile = profile.with_birth_date(birth_date);
    }
    if args.private {
        profile = profile.private();
    }
    profile.validate().map_err(DomainError::ValidationFailed)?;

    let users = SqliteUserRepository::new(pool.clone());
    let stats = SqliteStatsRepository::new(pool.clone());
    let activities = SqliteActivityRepository::new(pool);

    users.create(&profile).await?;
    stats.create_default(profile.id).await?;
    activities
        .append(&Activity::new(profile.id, ActivityKind::Joined))
        .await?;

    write_config(&config_path, &config, profile.id)
        .await
        .context("Failed to write config file")?;

    let output_data = InitOutput {
        success: true,
        message: format!("Welcome to Life Progress, {}!", profile.display_name),
        user_id: Some(profile.id),
        database_path: PathBuf::from(&config.database.path),
    };
    output(&output_data, json_mode);

    Ok(())
}

async fn write_config(
    path: &std::path::Path,
    config: &Config,
    user_id: uuid::Uuid,
) -> Result<()> {
    let contents = format!(
        concat!(
            "database:\n",
            "  path: {db_path}\n",
            "  max_connections: {max_connections}\n",
            "logging:\n",
            "  level: {log_level}\n",
            "  format: {log_format}\n",
            "user:\n",
            "  id: {user_id}\n",
        ),
        db_path = config.database.path,
        max_connections = config.database.max_connections,
        log_level = config.logging.level,
        log_format = config.logging.format,
        user_id = user_id,
    );
    fs::write(path, contents).await?;
    Ok(())
}
