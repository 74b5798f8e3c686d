//! Activity repository and live stream ports.

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::Activity;

/// Repository interface for the activity log.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Append an activity entry.
    async fn append(&self, activity: &Activity) -> DomainResult<()>;

    /// Recent activities by any of the given users, newest first.
    async fn recent_for_users(&self, user_ids: &[Uuid], limit: u32)
        -> DomainResult<Vec<Activity>>;
}

/// Live subscription seam for new activity entries.
///
/// A subscription delivers every appended activity until the receiver
/// is dropped; consumers filter to the authors they care about.
/// Implementations may fail to hand out a receiver (the hosted-store
/// equivalent of a subscription setup error), which is why this
/// returns a result: callers are expected to retry a bounded number of
/// times and then degrade gracefully.
pub trait ActivityStream: Send + Sync {
    /// Open a subscription to the activity stream.
    fn subscribe(&self) -> DomainResult<broadcast::Receiver<Activity>>;
}
