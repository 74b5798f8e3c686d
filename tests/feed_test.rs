//! Feed service integration: recent feeds, live subscriptions, retry,
//! and the degraded fallback.

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lifeprog::adapters::sqlite::{SqliteActivityRepository, SqliteUserRepository};
use lifeprog::domain::errors::{DomainError, DomainResult};
use lifeprog::domain::models::{Activity, ActivityKind, FeedConfig};
use lifeprog::domain::ports::{ActivityRepository, ActivityStream};
use lifeprog::services::FeedService;
use tokio::sync::broadcast;
use uuid::Uuid;

use common::{seed_user, setup_test_db};

/// Activity store whose subscription setup fails a configured number
/// of times before succeeding.
struct FlakyStream {
    sender: broadcast::Sender<Activity>,
    failures_left: AtomicU32,
}

impl FlakyStream {
    fn new(failures: u32) -> Self {
        let (sender, _) = broadcast::channel(16);
        Self { sender, failures_left: AtomicU32::new(failures) }
    }

    fn publish(&self, activity: Activity) {
        let _ = self.sender.send(activity);
    }
}

#[async_trait]
impl ActivityRepository for FlakyStream {
    async fn append(&self, activity: &Activity) -> DomainResult<()> {
        self.publish(activity.clone());
        Ok(())
    }

    async fn recent_for_users(&self, _: &[Uuid], _: u32) -> DomainResult<Vec<Activity>> {
        Ok(Vec::new())
    }
}

impl ActivityStream for FlakyStream {
    fn subscribe(&self) -> DomainResult<broadcast::Receiver<Activity>> {
        let left = self.failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.failures_left.store(left - 1, Ordering::SeqCst);
            return Err(DomainError::SubscriptionFailed {
                attempts: 1,
                reason: "stream unavailable".to_string(),
            });
        }
        Ok(self.sender.subscribe())
    }
}

fn fast_config(max_attempts: u32) -> FeedConfig {
    FeedConfig {
        max_subscribe_attempts: max_attempts,
        retry_delay_ms: 1,
        ..FeedConfig::default()
    }
}

#[tokio::test]
async fn test_recent_feed_resolves_authors_and_orders() {
    let pool = setup_test_db().await;
    let mila = seed_user(&pool, "Mila").await;
    let noah = seed_user(&pool, "Noah").await;
    let stranger = seed_user(&pool, "Stranger").await;

    let activities = Arc::new(SqliteActivityRepository::new(pool.clone()));
    for (user, title) in [(mila.id, "mine"), (noah.id, "theirs"), (stranger.id, "unrelated")] {
        activities
            .append(&Activity::new(
                user,
                ActivityKind::QuestCreated { quest_id: Uuid::new_v4(), title: title.into() },
            ))
            .await
            .expect("append failed");
    }

    let service = FeedService::new(
        activities,
        Arc::new(SqliteUserRepository::new(pool)),
        &FeedConfig::default(),
    );

    // Only Mila and her peer Noah appear; the stranger is filtered out
    let entries = service.recent(mila.id, &[noah.id], 20).await.expect("recent failed");
    assert_eq!(entries.len(), 2);
    let authors: Vec<_> = entries.iter().map(|e| e.author_name.as_str()).collect();
    assert!(authors.contains(&"Mila"));
    assert!(authors.contains(&"Noah"));
    assert!(!authors.contains(&"Stranger"));
}

#[tokio::test]
async fn test_live_feed_delivers_peer_activity_only() {
    let stream = Arc::new(FlakyStream::new(0));
    let pool = setup_test_db().await;
    let mila = seed_user(&pool, "Mila").await;
    let noah = seed_user(&pool, "Noah").await;
    let stranger = Uuid::new_v4();

    let service = FeedService::new(
        stream.clone(),
        Arc::new(SqliteUserRepository::new(pool)),
        &fast_config(3),
    );

    let mut feed = service.subscribe_live(mila.id, &[noah.id]).await;
    assert!(!feed.is_degraded());

    stream.publish(Activity::new(stranger, ActivityKind::Joined));
    stream.publish(Activity::new(noah.id, ActivityKind::Joined));

    let delivered = tokio::time::timeout(Duration::from_secs(1), feed.next())
        .await
        .expect("timed out")
        .expect("feed closed");
    assert_eq!(delivered.user_id, noah.id);
}

#[tokio::test]
async fn test_subscription_retries_until_success() {
    let stream = Arc::new(FlakyStream::new(2));
    let pool = setup_test_db().await;
    let mila = seed_user(&pool, "Mila").await;

    let service = FeedService::new(
        stream.clone(),
        Arc::new(SqliteUserRepository::new(pool)),
        &fast_config(3),
    );

    // Two failures, third attempt lands
    let feed = service.subscribe_live(mila.id, &[]).await;
    assert!(!feed.is_degraded());
    assert_eq!(stream.failures_left.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_exhausted_retries_degrade_to_empty_feed() {
    let stream = Arc::new(FlakyStream::new(10));
    let pool = setup_test_db().await;
    let mila = seed_user(&pool, "Mila").await;

    let service = FeedService::new(
        stream.clone(),
        Arc::new(SqliteUserRepository::new(pool)),
        &fast_config(3),
    );

    let mut feed = service.subscribe_live(mila.id, &[]).await;
    assert!(feed.is_degraded());
    assert!(feed.next().await.is_none());
    // Exactly max_attempts subscriptions were tried
    assert_eq!(stream.failures_left.load(Ordering::SeqCst), 7);
}

#[tokio::test]
async fn test_unsubscribe_stops_delivery() {
    let stream = Arc::new(FlakyStream::new(0));
    let pool = setup_test_db().await;
    let mila = seed_user(&pool, "Mila").await;

    let service = FeedService::new(
        stream.clone(),
        Arc::new(SqliteUserRepository::new(pool)),
        &fast_config(3),
    );

    let feed = service.subscribe_live(mila.id, &[]).await;
    feed.unsubscribe();

    // Give the forwarding task time to wind down, then publish
    tokio::time::sleep(Duration::from_millis(20)).await;
    stream.publish(Activity::new(mila.id, ActivityKind::Joined));

    // The broadcast side no longer has the aborted task's receiver
    assert_eq!(stream.sender.receiver_count(), 0);
}
