//! Quest domain model.
//!
//! A quest is a user-defined objective with a progress percentage.
//! Status is derived, never stored: a quest is failed if it was
//! abandoned, completed when progress hits 100, and active otherwise.
//! `progress` is the single source of truth for completion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived lifecycle state of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Active,
    Completed,
    Failed,
}

impl QuestStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// A user-defined objective tracked from 0 to 100 percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Human-readable title
    pub title: String,
    /// Detailed description
    #[serde(default)]
    pub description: String,
    /// Free-form category label
    #[serde(default)]
    pub category: String,
    /// Completion percentage, always within 0..=100
    pub progress: u8,
    /// True once the quest was given up; terminal
    #[serde(default)]
    pub abandoned: bool,
    /// Optional deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// When this quest was created
    pub created_at: DateTime<Utc>,
    /// When this quest was last updated
    pub updated_at: DateTime<Utc>,
}

impl Quest {
    /// Create a new active quest at 0% progress.
    pub fn new(user_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: String::new(),
            category: String::new(),
            progress: 0,
            abandoned: false,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the deadline.
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Derived status: abandoned wins, then completion by progress.
    pub const fn status(&self) -> QuestStatus {
        if self.abandoned {
            QuestStatus::Failed
        } else if self.progress == 100 {
            QuestStatus::Completed
        } else {
            QuestStatus::Active
        }
    }

    pub const fn is_completed(&self) -> bool {
        matches!(self.status(), QuestStatus::Completed)
    }

    /// Set progress, clamped to 0..=100, updating the timestamp.
    ///
    /// Returns the clamped value actually stored.
    pub fn set_progress(&mut self, progress: u8) -> u8 {
        self.progress = progress.min(100);
        self.updated_at = Utc::now();
        self.progress
    }

    /// Mark the quest abandoned. Terminal; quests are never reactivated.
    pub fn abandon(&mut self) {
        self.abandoned = true;
        self.updated_at = Utc::now();
    }

    /// Days until the deadline, negative when overdue.
    pub fn days_until_due(&self, now: DateTime<Utc>) -> Option<i64> {
        self.due_date.map(|due| (due - now).num_days())
    }

    /// Validate this quest.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Quest title cannot be empty".to_string());
        }
        if self.title.len() > 255 {
            return Err("Quest title cannot exceed 255 characters".to_string());
        }
        if self.progress > 100 {
            return Err(format!("Quest progress {} exceeds 100", self.progress));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_quest_is_active() {
        let quest = Quest::new(Uuid::new_v4(), "Run a marathon");
        assert_eq!(quest.progress, 0);
        assert_eq!(quest.status(), QuestStatus::Active);
    }

    #[test]
    fn test_status_derived_from_progress() {
        let mut quest = Quest::new(Uuid::new_v4(), "Read 12 books");
        quest.set_progress(99);
        assert_eq!(quest.status(), QuestStatus::Active);
        quest.set_progress(100);
        assert_eq!(quest.status(), QuestStatus::Completed);
    }

    #[test]
    fn test_progress_clamped() {
        let mut quest = Quest::new(Uuid::new_v4(), "Overflow");
        assert_eq!(quest.set_progress(250), 100);
        assert_eq!(quest.progress, 100);
    }

    #[test]
    fn test_abandoned_wins_over_progress() {
        let mut quest = Quest::new(Uuid::new_v4(), "Give up");
        quest.set_progress(100);
        quest.abandon();
        assert_eq!(quest.status(), QuestStatus::Failed);
    }

    #[test]
    fn test_days_until_due() {
        let now = Utc::now();
        let quest = Quest::new(Uuid::new_v4(), "Deadline").with_due_date(now + Duration::days(3));
        assert_eq!(quest.days_until_due(now), Some(3));

        let quest = Quest::new(Uuid::new_v4(), "No deadline");
        assert_eq!(quest.days_until_due(now), None);
    }

    #[test]
    fn test_validation() {
        let quest = Quest::new(Uuid::new_v4(), "");
        assert!(quest.validate().is_err());

        let quest = Quest::new(Uuid::new_v4(), "Valid");
        assert!(quest.validate().is_ok());
    }
}
