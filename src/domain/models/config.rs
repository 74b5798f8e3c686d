//! Application configuration model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Main configuration structure for lifeprog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Activity feed configuration
    #[serde(default)]
    pub feed: FeedConfig,

    /// Ranking configuration
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Signed-in user
    #[serde(default)]
    pub user: UserConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to the `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".lifeprog/lifeprog.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Live activity feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedConfig {
    /// Subscription attempts before falling back to an empty feed
    #[serde(default = "default_max_attempts")]
    pub max_subscribe_attempts: u32,

    /// Base delay between attempts; grows linearly with the attempt number
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Maximum entries held in the profile lookup cache
    #[serde(default = "default_cache_capacity")]
    pub profile_cache_capacity: usize,

    /// Profile cache entry lifetime in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub profile_cache_ttl_secs: u64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_retry_delay_ms() -> u64 {
    500
}

const fn default_cache_capacity() -> usize {
    256
}

const fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_subscribe_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            profile_cache_capacity: default_cache_capacity(),
            profile_cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// Ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RankingConfig {
    /// How many users the global leaderboard scan covers
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: u32,
}

const fn default_leaderboard_limit() -> u32 {
    1000
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            leaderboard_limit: default_leaderboard_limit(),
        }
    }
}

/// The locally signed-in user.
///
/// Authentication proper is delegated to an external identity
/// provider; this is the principal the CLI acts as.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserConfig {
    /// User id, set by `lifeprog init`
    #[serde(default)]
    pub id: Option<Uuid>,
}
