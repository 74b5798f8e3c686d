//! Quest lifecycle service.
//!
//! Wires the pure progression engine to the repositories: each user
//! action is one sequential chain of reads, one pure computation, and
//! the writes for its results (stats, activities, notifications).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    achievement, Activity, ActivityKind, AchievementRecord, GameStats, Notification,
    NotificationKind, Quest, Reward,
};
use crate::domain::ports::{
    ActivityRepository, NotificationRepository, QuestRepository, StatsRepository,
};
use crate::services::progression::{
    self, ProgressFacts, QUEST_COMPLETED_REWARD, QUEST_CREATED_REWARD,
};

/// Notifications fire when progress first crosses one of these marks.
const PROGRESS_MILESTONES: [u8; 4] = [25, 50, 75, 100];

/// Deadline reminders cover quests due within this many days.
const DEADLINE_WINDOW_DAYS: i64 = 7;

pub struct QuestService<Q, S, A, N>
where
    Q: QuestRepository,
    S: StatsRepository,
    A: ActivityRepository,
    N: NotificationRepository,
{
    quests: Arc<Q>,
    stats: Arc<S>,
    activities: Arc<A>,
    notifications: Arc<N>,
}

impl<Q, S, A, N> QuestService<Q, S, A, N>
where
    Q: QuestRepository,
    S: StatsRepository,
    A: ActivityRepository,
    N: NotificationRepository,
{
    pub fn new(quests: Arc<Q>, stats: Arc<S>, activities: Arc<A>, notifications: Arc<N>) -> Self {
        Self { quests, stats, activities, notifications }
    }

    /// Create a quest, award the creation bonus, and evaluate
    /// achievements against the new quest counts.
    pub async fn create_quest(
        &self,
        user_id: Uuid,
        title: String,
        description: String,
        category: String,
        due_date: Option<DateTime<Utc>>,
    ) -> DomainResult<(Quest, Vec<AchievementRecord>)> {
        let mut quest = Quest::new(user_id, title)
            .with_description(description)
            .with_category(category);
        if let Some(due) = due_date {
            quest = quest.with_due_date(due);
        }
        quest.validate().map_err(DomainError::ValidationFailed)?;

        self.quests.create(&quest).await?;
        self.activities
            .append(&Activity::new(
                user_id,
                ActivityKind::QuestCreated { quest_id: quest.id, title: quest.title.clone() },
            ))
            .await?;

        let stats = self.awarded_stats(user_id, QUEST_CREATED_REWARD).await?;
        let unlocked = self.evaluate_and_persist(user_id, &stats).await?;

        info!(%user_id, quest_id = %quest.id, "quest created");
        Ok((quest, unlocked))
    }

    /// Update quest progress, clamped to 0..=100.
    ///
    /// Completion (first time progress hits 100) awards the completion
    /// bonus and re-evaluates achievements. Milestone notifications
    /// fire when progress first crosses 25/50/75/100.
    pub async fn update_progress(
        &self,
        quest_id: Uuid,
        progress: u8,
    ) -> DomainResult<(Quest, Vec<AchievementRecord>)> {
        let mut quest = self
            .quests
            .get(quest_id)
            .await?
            .ok_or(DomainError::QuestNotFound(quest_id))?;

        if quest.abandoned {
            return Err(DomainError::ValidationFailed(
                "Cannot update an abandoned quest".to_string(),
            ));
        }

        let old_progress = quest.progress;
        let new_progress = quest.set_progress(progress);
        self.quests.update(&quest).await?;

        let completed_now = new_progress == 100 && old_progress != 100;
        let kind = if completed_now {
            ActivityKind::QuestCompleted { quest_id, title: quest.title.clone() }
        } else {
            ActivityKind::QuestProgress {
                quest_id,
                title: quest.title.clone(),
                progress: new_progress,
            }
        };
        self.activities.append(&Activity::new(quest.user_id, kind)).await?;

        if let Some(milestone) = crossed_milestone(old_progress, new_progress) {
            self.notifications
                .create(&Notification::new(
                    quest.user_id,
                    NotificationKind::QuestProgress {
                        quest_id,
                        title: quest.title.clone(),
                        progress: milestone,
                    },
                ))
                .await?;
        }

        let unlocked = if completed_now {
            let stats = self.awarded_stats(quest.user_id, QUEST_COMPLETED_REWARD).await?;
            self.evaluate_and_persist(quest.user_id, &stats).await?
        } else {
            Vec::new()
        };

        debug!(%quest_id, old_progress, new_progress, "quest progress updated");
        Ok((quest, unlocked))
    }

    /// Mark a quest abandoned. Terminal.
    pub async fn abandon(&self, quest_id: Uuid) -> DomainResult<Quest> {
        let mut quest = self
            .quests
            .get(quest_id)
            .await?
            .ok_or(DomainError::QuestNotFound(quest_id))?;
        quest.abandon();
        self.quests.update(&quest).await?;
        info!(%quest_id, "quest abandoned");
        Ok(quest)
    }

    /// List a user's quests, newest first.
    pub async fn list_quests(&self, user_id: Uuid) -> DomainResult<Vec<Quest>> {
        self.quests.list_for_user(user_id).await
    }

    /// Get one quest.
    pub async fn get_quest(&self, quest_id: Uuid) -> DomainResult<Option<Quest>> {
        self.quests.get(quest_id).await
    }

    /// Record a daily login: advance the streak and evaluate the
    /// streak-gated achievements with the updated count.
    pub async fn record_login(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<(GameStats, Vec<AchievementRecord>)> {
        let stats = self.load_stats(user_id).await?;
        let updated = progression::update_streak(&stats, now);
        self.stats
            .set_streak(user_id, updated.streak, now)
            .await?;

        let unlocked = self.evaluate_and_persist(user_id, &updated).await?;
        let current = self.load_stats(user_id).await?;

        debug!(%user_id, streak = updated.streak, "login recorded");
        Ok((current, unlocked))
    }

    /// Create deadline reminders for active quests due within the
    /// reminder window, returning the notifications created.
    pub async fn check_deadlines(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Notification>> {
        let mut created = Vec::new();
        for quest in self.quests.list_for_user(user_id).await? {
            if quest.status() != crate::domain::models::QuestStatus::Active {
                continue;
            }
            if let Some(days_left) = quest.days_until_due(now) {
                if (1..=DEADLINE_WINDOW_DAYS).contains(&days_left) {
                    let notification = Notification::new(
                        user_id,
                        NotificationKind::QuestDeadline {
                            quest_id: quest.id,
                            title: quest.title.clone(),
                            days_left,
                        },
                    );
                    self.notifications.create(&notification).await?;
                    created.push(notification);
                }
            }
        }
        Ok(created)
    }

    /// Apply an award atomically and return the engine's view of the
    /// resulting stats.
    async fn awarded_stats(&self, user_id: Uuid, reward: Reward) -> DomainResult<GameStats> {
        let stats = self.load_stats(user_id).await?;
        let awarded = progression::award(&stats, reward);
        self.stats.apply_award(user_id, reward, awarded.level).await?;
        Ok(awarded)
    }

    /// Evaluate achievements for the given stats snapshot, persisting
    /// unlocks and notifying the user about each.
    async fn evaluate_and_persist(
        &self,
        user_id: Uuid,
        stats: &GameStats,
    ) -> DomainResult<Vec<AchievementRecord>> {
        let counts = self.quests.counts_for_user(user_id).await?;
        let facts = ProgressFacts {
            total_quests: counts.total,
            completed_quests: counts.completed,
            consecutive_days: stats.streak,
        };

        let (evaluated, unlocked) = progression::evaluate_achievements(stats, &facts, Utc::now());
        if unlocked.is_empty() {
            return Ok(unlocked);
        }

        let batch_reward = Reward::new(
            evaluated.points - stats.points,
            evaluated.experience - stats.experience,
        );
        self.stats
            .record_unlocks(user_id, &evaluated.achievements, batch_reward, evaluated.level)
            .await?;

        for record in &unlocked {
            let title = achievement::find(&record.id).map_or("", |def| def.title);
            self.notifications
                .create(&Notification::new(
                    user_id,
                    NotificationKind::AchievementUnlocked {
                        achievement_id: record.id.clone(),
                        title: title.to_string(),
                    },
                ))
                .await?;
            info!(%user_id, achievement = %record.id, "achievement unlocked");
        }

        Ok(unlocked)
    }

    async fn load_stats(&self, user_id: Uuid) -> DomainResult<GameStats> {
        self.stats
            .get(user_id)
            .await?
            .ok_or(DomainError::StatsNotFound(user_id))
    }
}

/// Highest milestone first crossed moving from `old` to `new`, if any.
fn crossed_milestone(old: u8, new: u8) -> Option<u8> {
    PROGRESS_MILESTONES
        .iter()
        .rev()
        .find(|&&m| old < m && new >= m)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossed_milestone() {
        assert_eq!(crossed_milestone(0, 10), None);
        assert_eq!(crossed_milestone(10, 30), Some(25));
        assert_eq!(crossed_milestone(30, 80), Some(75));
        assert_eq!(crossed_milestone(99, 100), Some(100));
        // No re-notification inside a bucket
        assert_eq!(crossed_milestone(30, 40), None);
    }
}
