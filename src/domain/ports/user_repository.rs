//! User profile repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::UserProfile;

/// Repository interface for user profile persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user profile.
    async fn create(&self, user: &UserProfile) -> DomainResult<()>;

    /// Get a profile by id.
    async fn get(&self, id: Uuid) -> DomainResult<Option<UserProfile>>;

    /// Get several profiles at once; missing ids are skipped.
    async fn get_many(&self, ids: &[Uuid]) -> DomainResult<Vec<UserProfile>>;

    /// Update an existing profile.
    async fn update(&self, user: &UserProfile) -> DomainResult<()>;

    /// Search public profiles by display-name prefix.
    async fn search(&self, name_prefix: &str, limit: u32) -> DomainResult<Vec<UserProfile>>;
}
