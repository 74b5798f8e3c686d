//! Friend request repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::FriendRequest;

/// Repository interface for the follow graph.
#[async_trait]
pub trait FriendRepository: Send + Sync {
    /// Create a new friend request.
    async fn create(&self, request: &FriendRequest) -> DomainResult<()>;

    /// Get a request by id.
    async fn get(&self, id: Uuid) -> DomainResult<Option<FriendRequest>>;

    /// Update an existing request (status transitions).
    async fn update(&self, request: &FriendRequest) -> DomainResult<()>;

    /// Delete a request (unfollow removes the accepted edge).
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// Find the request from one user to another, regardless of status.
    async fn find_between(&self, from_user: Uuid, to_user: Uuid)
        -> DomainResult<Option<FriendRequest>>;

    /// Pending requests addressed to a user, newest first.
    async fn pending_for(&self, user_id: Uuid) -> DomainResult<Vec<FriendRequest>>;

    /// Ids the user follows (accepted requests they sent).
    async fn following(&self, user_id: Uuid) -> DomainResult<Vec<Uuid>>;

    /// Ids following the user (accepted requests they received).
    async fn followers(&self, user_id: Uuid) -> DomainResult<Vec<Uuid>>;
}
