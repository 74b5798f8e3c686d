//! Quest repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::Quest;

/// Aggregate quest counts for one user, the facts achievement
/// evaluation runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestCounts {
    /// All quests ever created by the user
    pub total: u64,
    /// Quests at 100% progress
    pub completed: u64,
}

/// Repository interface for quest persistence.
#[async_trait]
pub trait QuestRepository: Send + Sync {
    /// Create a new quest.
    async fn create(&self, quest: &Quest) -> DomainResult<()>;

    /// Get a quest by id.
    async fn get(&self, id: Uuid) -> DomainResult<Option<Quest>>;

    /// Update an existing quest.
    async fn update(&self, quest: &Quest) -> DomainResult<()>;

    /// Delete a quest by id.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// List all quests owned by a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Quest>>;

    /// Count total and completed quests for a user.
    async fn counts_for_user(&self, user_id: Uuid) -> DomainResult<QuestCounts>;
}
