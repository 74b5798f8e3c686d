//! Notification repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::Notification;

/// Repository interface for notification persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Create a notification.
    async fn create(&self, notification: &Notification) -> DomainResult<()>;

    /// Notifications for a user, newest first.
    async fn list_for_user(&self, user_id: Uuid, limit: u32) -> DomainResult<Vec<Notification>>;

    /// Mark one notification read.
    async fn mark_read(&self, id: Uuid) -> DomainResult<()>;

    /// Mark all of a user's notifications read.
    async fn mark_all_read(&self, user_id: Uuid) -> DomainResult<()>;

    /// Count unread notifications for a user.
    async fn unread_count(&self, user_id: Uuid) -> DomainResult<u64>;
}
