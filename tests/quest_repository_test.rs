mod common;

use chrono::{Duration, Utc};
use lifeprog::adapters::sqlite::SqliteQuestRepository;
use lifeprog::domain::errors::DomainError;
use lifeprog::domain::models::{Quest, QuestStatus};
use lifeprog::domain::ports::QuestRepository;
use uuid::Uuid;

use common::{seed_user, setup_test_db};

#[tokio::test]
async fn test_create_and_get_quest() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool, "Mila").await;
    let repo = SqliteQuestRepository::new(pool);

    let quest = Quest::new(user.id, "Run a marathon")
        .with_description("Train three times a week")
        .with_category("health")
        .with_due_date(Utc::now() + Duration::days(90));
    repo.create(&quest).await.expect("failed to create quest");

    let retrieved = repo
        .get(quest.id)
        .await
        .expect("failed to get quest")
        .expect("quest missing");
    assert_eq!(retrieved.title, "Run a marathon");
    assert_eq!(retrieved.category, "health");
    assert_eq!(retrieved.progress, 0);
    assert!(retrieved.due_date.is_some());
    assert_eq!(retrieved.status(), QuestStatus::Active);
}

#[tokio::test]
async fn test_get_nonexistent_quest() {
    let pool = setup_test_db().await;
    let repo = SqliteQuestRepository::new(pool);

    let result = repo.get(Uuid::new_v4()).await.expect("query failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_update_quest_progress_and_abandon() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool, "Mila").await;
    let repo = SqliteQuestRepository::new(pool);

    let mut quest = Quest::new(user.id, "Read 12 books");
    repo.create(&quest).await.expect("create failed");

    quest.set_progress(60);
    repo.update(&quest).await.expect("update failed");
    let retrieved = repo.get(quest.id).await.expect("get failed").expect("missing");
    assert_eq!(retrieved.progress, 60);

    quest.abandon();
    repo.update(&quest).await.expect("update failed");
    let retrieved = repo.get(quest.id).await.expect("get failed").expect("missing");
    assert_eq!(retrieved.status(), QuestStatus::Failed);
}

#[tokio::test]
async fn test_update_missing_quest_fails() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool, "Mila").await;
    let repo = SqliteQuestRepository::new(pool);

    let quest = Quest::new(user.id, "Never persisted");
    let err = repo.update(&quest).await.expect_err("update should fail");
    assert!(matches!(err, DomainError::QuestNotFound(id) if id == quest.id));
}

#[tokio::test]
async fn test_list_for_user_newest_first() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool, "Mila").await;
    let other = seed_user(&pool, "Noah").await;
    let repo = SqliteQuestRepository::new(pool);

    for (title, offset) in [("oldest", 2), ("middle", 1), ("newest", 0)] {
        let mut quest = Quest::new(user.id, title);
        quest.created_at = Utc::now() - Duration::hours(offset);
        repo.create(&quest).await.expect("create failed");
    }
    repo.create(&Quest::new(other.id, "not mine")).await.expect("create failed");

    let quests = repo.list_for_user(user.id).await.expect("list failed");
    let titles: Vec<_> = quests.iter().map(|q| q.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_counts_exclude_abandoned_completions() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool, "Mila").await;
    let repo = SqliteQuestRepository::new(pool);

    let mut done = Quest::new(user.id, "done");
    done.set_progress(100);
    repo.create(&done).await.expect("create failed");

    let mut gave_up = Quest::new(user.id, "gave up at the finish line");
    gave_up.set_progress(100);
    gave_up.abandon();
    repo.create(&gave_up).await.expect("create failed");

    repo.create(&Quest::new(user.id, "in flight")).await.expect("create failed");

    let counts = repo.counts_for_user(user.id).await.expect("counts failed");
    assert_eq!(counts.total, 3);
    assert_eq!(counts.completed, 1);
}

#[tokio::test]
async fn test_delete_quest() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool, "Mila").await;
    let repo = SqliteQuestRepository::new(pool);

    let quest = Quest::new(user.id, "Ephemeral");
    repo.create(&quest).await.expect("create failed");
    repo.delete(quest.id).await.expect("delete failed");
    assert!(repo.get(quest.id).await.expect("get failed").is_none());

    let err = repo.delete(quest.id).await.expect_err("double delete should fail");
    assert!(matches!(err, DomainError::QuestNotFound(_)));
}
