//! Ranking computation against the real stats store.

mod common;

use std::sync::Arc;

use lifeprog::adapters::sqlite::SqliteStatsRepository;
use lifeprog::domain::models::Reward;
use lifeprog::domain::ports::StatsRepository;
use lifeprog::services::Ranker;

use common::{seed_user, setup_test_db};

#[tokio::test]
async fn test_friends_rank_includes_self() {
    let pool = setup_test_db().await;
    let a = seed_user(&pool, "A").await;
    let b = seed_user(&pool, "B").await;
    let c = seed_user(&pool, "C").await;

    let stats = Arc::new(SqliteStatsRepository::new(pool));
    stats.apply_award(a.id, Reward::new(500, 0), 1).await.expect("award failed");
    stats.apply_award(b.id, Reward::new(300, 0), 1).await.expect("award failed");
    stats.apply_award(c.id, Reward::new(500, 0), 1).await.expect("award failed");

    let ranker = Ranker::new(stats);

    // A at 500 points against B(300) and C(500): tie on points resolves
    // by id, so A is first or second but always ahead of B
    let rank = ranker.compute(a.id, &[b.id, c.id]).await.expect("compute failed");
    assert!(rank.friends <= 2);

    let rank_b = ranker.compute(b.id, &[a.id, c.id]).await.expect("compute failed");
    assert_eq!(rank_b.friends, 3);
}

#[tokio::test]
async fn test_global_rank_follows_leaderboard_order() {
    let pool = setup_test_db().await;
    let a = seed_user(&pool, "A").await;
    let b = seed_user(&pool, "B").await;
    let c = seed_user(&pool, "C").await;

    let stats = Arc::new(SqliteStatsRepository::new(pool));
    stats.apply_award(a.id, Reward::new(900, 0), 1).await.expect("award failed");
    stats.apply_award(b.id, Reward::new(100, 0), 1).await.expect("award failed");
    stats.apply_award(c.id, Reward::new(500, 0), 1).await.expect("award failed");

    let ranker = Ranker::new(stats);
    assert_eq!(ranker.compute(a.id, &[]).await.expect("compute failed").global, Some(1));
    assert_eq!(ranker.compute(c.id, &[]).await.expect("compute failed").global, Some(2));
    assert_eq!(ranker.compute(b.id, &[]).await.expect("compute failed").global, Some(3));
}

#[tokio::test]
async fn test_outside_leaderboard_window_has_no_global_rank() {
    let pool = setup_test_db().await;
    let a = seed_user(&pool, "A").await;
    let b = seed_user(&pool, "B").await;

    let stats = Arc::new(SqliteStatsRepository::new(pool));
    stats.apply_award(a.id, Reward::new(500, 0), 1).await.expect("award failed");

    // Window of 1: only the leader gets a position
    let ranker = Ranker::new(stats).with_leaderboard_limit(1);
    assert_eq!(ranker.compute(a.id, &[]).await.expect("compute failed").global, Some(1));
    assert_eq!(ranker.compute(b.id, &[]).await.expect("compute failed").global, None);
}

#[tokio::test]
async fn test_refresh_persists_the_rank() {
    let pool = setup_test_db().await;
    let a = seed_user(&pool, "A").await;
    let b = seed_user(&pool, "B").await;

    let stats = Arc::new(SqliteStatsRepository::new(pool));
    stats.apply_award(a.id, Reward::new(200, 0), 1).await.expect("award failed");
    stats.apply_award(b.id, Reward::new(400, 0), 1).await.expect("award failed");

    let ranker = Ranker::new(stats.clone());
    let rank = ranker.refresh(a.id, &[b.id]).await.expect("refresh failed");
    assert_eq!(rank.global, Some(2));
    assert_eq!(rank.friends, 2);

    let cached = stats
        .get(a.id)
        .await
        .expect("get failed")
        .expect("stats missing")
        .rank
        .expect("rank missing");
    assert_eq!(cached, rank);
}
