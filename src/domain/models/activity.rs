//! Activity feed entries.
//!
//! Each entry is a closed, tagged variant carrying exactly the fields
//! its kind needs; display text is derived, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened, with the fields that kind of event needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityKind {
    QuestCreated { quest_id: Uuid, title: String },
    QuestProgress { quest_id: Uuid, title: String, progress: u8 },
    QuestCompleted { quest_id: Uuid, title: String },
    Joined,
}

/// One entry in a user's activity stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    /// The acting user
    pub user_id: Uuid,
    pub kind: ActivityKind,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(user_id: Uuid, kind: ActivityKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }

    /// Human-readable feed line for this entry.
    pub fn content(&self) -> String {
        match &self.kind {
            ActivityKind::QuestCreated { title, .. } => {
                format!("set a new quest: {title}")
            }
            ActivityKind::QuestProgress { title, progress, .. } => {
                format!("reached {progress}% on quest: {title}")
            }
            ActivityKind::QuestCompleted { title, .. } => {
                format!("completed quest: {title}")
            }
            ActivityKind::Joined => "joined Life Progress!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_lines() {
        let user = Uuid::new_v4();
        let quest = Uuid::new_v4();

        let a = Activity::new(
            user,
            ActivityKind::QuestProgress { quest_id: quest, title: "Learn Rust".into(), progress: 50 },
        );
        assert_eq!(a.content(), "reached 50% on quest: Learn Rust");

        let a = Activity::new(user, ActivityKind::Joined);
        assert_eq!(a.content(), "joined Life Progress!");
    }

    #[test]
    fn test_kind_serde_tagging() {
        let kind = ActivityKind::QuestCreated { quest_id: Uuid::new_v4(), title: "T".into() };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "quest_created");
    }
}
