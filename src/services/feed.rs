//! Activity feed service.
//!
//! Serves a user's feed (their own and their peers' activities) and
//! manages the live subscription: subscription setup is retried a
//! bounded number of times with linearly increasing delay, then the
//! feed degrades to an empty live stream rather than failing the
//! view. Teardown is explicit; no entries are delivered after
//! [`LiveFeed::unsubscribe`].

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Activity, FeedConfig};
use crate::domain::ports::{ActivityRepository, ActivityStream, UserRepository};
use crate::services::profile_cache::ProfileCache;

/// How many attempts a live subscription gets before degrading.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Bounded linear-backoff policy for subscription setup.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay before the given retry; grows linearly with the attempt
    /// number (attempt 1 waits `base`, attempt 2 waits `2 * base`).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// One rendered feed line: the activity plus its resolved author.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub activity: Activity,
    pub author_name: String,
    pub author_photo: Option<String>,
}

/// A running live feed subscription.
///
/// Dropping or unsubscribing stops the forwarding task; no entries
/// arrive afterward.
pub struct LiveFeed {
    rx: mpsc::Receiver<Activity>,
    task: Option<JoinHandle<()>>,
    degraded: bool,
}

impl LiveFeed {
    /// Next live activity, or `None` once the feed is closed.
    pub async fn next(&mut self) -> Option<Activity> {
        self.rx.recv().await
    }

    /// True when subscription setup failed and this feed will never
    /// deliver entries (the graceful empty-state fallback).
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Tear the subscription down.
    pub fn unsubscribe(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.rx.close();
    }

    fn empty() -> Self {
        // A channel with no sender: recv() returns None immediately.
        let (_, rx) = mpsc::channel(1);
        Self { rx, task: None, degraded: true }
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub struct FeedService<A, U>
where
    A: ActivityRepository + ActivityStream,
    U: UserRepository,
{
    activities: Arc<A>,
    users: Arc<U>,
    cache: Mutex<ProfileCache>,
    policy: RetryPolicy,
}

impl<A, U> FeedService<A, U>
where
    A: ActivityRepository + ActivityStream,
    U: UserRepository,
{
    pub fn new(activities: Arc<A>, users: Arc<U>, config: &FeedConfig) -> Self {
        Self {
            activities,
            users,
            cache: Mutex::new(ProfileCache::new(
                config.profile_cache_capacity,
                Duration::from_secs(config.profile_cache_ttl_secs),
            )),
            policy: RetryPolicy {
                max_attempts: config.max_subscribe_attempts.max(1),
                base_delay: Duration::from_millis(config.retry_delay_ms),
            },
        }
    }

    /// Recent feed for a user: their own and their peers' activities,
    /// newest first, authors resolved through the bounded cache.
    pub async fn recent(
        &self,
        user_id: Uuid,
        peers: &[Uuid],
        limit: u32,
    ) -> DomainResult<Vec<FeedEntry>> {
        let mut ids = peers.to_vec();
        if !ids.contains(&user_id) {
            ids.push(user_id);
        }
        let activities = self.activities.recent_for_users(&ids, limit).await?;
        self.resolve(activities).await
    }

    /// Open a live subscription filtered to the user and their peers.
    ///
    /// Setup is attempted up to the policy's bound with linearly
    /// increasing delay between attempts; if every attempt fails the
    /// returned feed is degraded (empty) instead of an error.
    pub async fn subscribe_live(&self, user_id: Uuid, peers: &[Uuid]) -> LiveFeed {
        let mut authors: HashSet<Uuid> = peers.iter().copied().collect();
        authors.insert(user_id);

        let mut rx = None;
        for attempt in 1..=self.policy.max_attempts {
            match self.activities.subscribe() {
                Ok(receiver) => {
                    rx = Some(receiver);
                    break;
                }
                Err(err) => {
                    warn!(attempt, %err, "activity subscription attempt failed");
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.delay_for(attempt)).await;
                    }
                }
            }
        }

        let Some(rx) = rx else {
            warn!(%user_id, "live feed degraded to empty after retries");
            return LiveFeed::empty();
        };

        let (tx, out_rx) = mpsc::channel(64);
        let task = tokio::spawn(forward_filtered(rx, tx, authors));
        debug!(%user_id, "live feed subscribed");
        LiveFeed { rx: out_rx, task: Some(task), degraded: false }
    }

    /// Resolve author profiles for a batch of activities.
    async fn resolve(&self, activities: Vec<Activity>) -> DomainResult<Vec<FeedEntry>> {
        let mut cache = self.cache.lock().await;

        let missing: Vec<Uuid> = activities
            .iter()
            .map(|a| a.user_id)
            .filter(|id| cache.get(*id).is_none())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if !missing.is_empty() {
            for profile in self.users.get_many(&missing).await? {
                cache.insert(profile);
            }
        }

        Ok(activities
            .into_iter()
            .map(|activity| {
                let (author_name, author_photo) = cache.get(activity.user_id).map_or_else(
                    || ("Unknown user".to_string(), None),
                    |p| (p.display_name.clone(), p.photo_url.clone()),
                );
                FeedEntry { activity, author_name, author_photo }
            })
            .collect())
    }
}

/// Forward broadcast activities whose author is in the set, until the
/// source closes or the subscription is torn down.
async fn forward_filtered(
    mut rx: broadcast::Receiver<Activity>,
    tx: mpsc::Sender<Activity>,
    authors: HashSet<Uuid>,
) {
    loop {
        match rx.recv().await {
            Ok(activity) => {
                if authors.contains(&activity.user_id) && tx.send(activity).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "live feed lagged; skipping missed activities");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_grows_linearly() {
        let policy = RetryPolicy { max_attempts: 3, base_delay: Duration::from_millis(100) };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_empty_feed_yields_nothing() {
        let mut feed = LiveFeed::empty();
        assert!(feed.is_degraded());
        assert!(feed.next().await.is_none());
    }
}
