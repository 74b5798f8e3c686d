//! Common test utilities for integration tests.

use lifeprog::adapters::sqlite::{
    create_migrated_test_pool, SqliteStatsRepository, SqliteUserRepository,
};
use lifeprog::domain::models::UserProfile;
use lifeprog::domain::ports::{StatsRepository, UserRepository};
use sqlx::SqlitePool;

/// Create an in-memory database with all migrations applied.
pub async fn setup_test_db() -> SqlitePool {
    create_migrated_test_pool()
        .await
        .expect("failed to create test database")
}

/// Insert a user profile with its default stats row.
pub async fn seed_user(pool: &SqlitePool, name: &str) -> UserProfile {
    let profile = UserProfile::new(name);
    SqliteUserRepository::new(pool.clone())
        .create(&profile)
        .await
        .expect("failed to create user");
    SqliteStatsRepository::new(pool.clone())
        .create_default(profile.id)
        .await
        .expect("failed to create stats");
    profile
}
