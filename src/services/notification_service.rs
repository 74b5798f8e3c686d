//! Notification service.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Notification, NotificationKind};
use crate::domain::ports::NotificationRepository;

/// How many notifications a listing returns at most.
pub const NOTIFICATION_LIMIT: u32 = 50;

pub struct NotificationService<N: NotificationRepository> {
    notifications: Arc<N>,
}

impl<N: NotificationRepository> NotificationService<N> {
    pub fn new(notifications: Arc<N>) -> Self {
        Self { notifications }
    }

    /// Deliver a notification to a user.
    pub async fn notify(&self, user_id: Uuid, kind: NotificationKind) -> DomainResult<Notification> {
        let notification = Notification::new(user_id, kind);
        self.notifications.create(&notification).await?;
        Ok(notification)
    }

    /// A user's notifications, newest first.
    pub async fn list(&self, user_id: Uuid) -> DomainResult<Vec<Notification>> {
        self.notifications.list_for_user(user_id, NOTIFICATION_LIMIT).await
    }

    /// Mark one notification read.
    pub async fn mark_read(&self, id: Uuid) -> DomainResult<()> {
        self.notifications.mark_read(id).await
    }

    /// Mark everything read.
    pub async fn mark_all_read(&self, user_id: Uuid) -> DomainResult<()> {
        self.notifications.mark_all_read(user_id).await
    }

    /// Unread notification count, for the badge.
    pub async fn unread_count(&self, user_id: Uuid) -> DomainResult<u64> {
        self.notifications.unread_count(user_id).await
    }
}
