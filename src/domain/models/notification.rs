//! User notifications.
//!
//! Like activities, notification payloads are closed tagged variants
//! rather than open key-value bags, so every kind carries exactly the
//! fields it needs and titles/bodies are derived consistently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification payload, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationKind {
    FriendRequest { from: Uuid, from_name: String },
    FriendAccepted { by: Uuid, by_name: String },
    AchievementUnlocked { achievement_id: String, title: String },
    QuestProgress { quest_id: Uuid, title: String, progress: u8 },
    QuestDeadline { quest_id: Uuid, title: String, days_left: i64 },
    Cheer { from: Uuid, from_name: String, message: String },
}

/// A notification delivered to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    /// The recipient
    pub user_id: Uuid,
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: Uuid, kind: NotificationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Short heading for display.
    pub const fn title(&self) -> &'static str {
        match &self.kind {
            NotificationKind::FriendRequest { .. } => "New friend request",
            NotificationKind::FriendAccepted { .. } => "Friend request accepted",
            NotificationKind::AchievementUnlocked { .. } => "Achievement unlocked",
            NotificationKind::QuestProgress { .. } => "Quest progress",
            NotificationKind::QuestDeadline { .. } => "Quest deadline approaching",
            NotificationKind::Cheer { .. } => "Cheer received",
        }
    }

    /// Full message body for display.
    pub fn body(&self) -> String {
        match &self.kind {
            NotificationKind::FriendRequest { from_name, .. } => {
                format!("{from_name} sent you a friend request")
            }
            NotificationKind::FriendAccepted { by_name, .. } => {
                format!("{by_name} accepted your friend request")
            }
            NotificationKind::AchievementUnlocked { title, .. } => {
                format!("You unlocked \"{title}\"")
            }
            NotificationKind::QuestProgress { title, progress, .. } => match *progress {
                100 => format!("Quest \"{title}\" is complete!"),
                p if p >= 75 => format!("Quest \"{title}\" is {p}% done"),
                p if p >= 50 => format!("Quest \"{title}\" passed the halfway mark"),
                _ => format!("Quest \"{title}\" is making steady progress"),
            },
            NotificationKind::QuestDeadline { title, days_left, .. } => {
                format!("Quest \"{title}\" is due in {days_left} day(s)")
            }
            NotificationKind::Cheer { from_name, message, .. } => {
                format!("{from_name}: {message}")
            }
        }
    }
}
