//! Domain models for the lifeprog system.

pub mod achievement;
pub mod activity;
pub mod config;
pub mod friend;
pub mod notification;
pub mod quest;
pub mod stats;
pub mod user;

pub use achievement::{AchievementDef, Requirement, Reward, CATALOG};
pub use activity::{Activity, ActivityKind};
pub use config::{Config, DatabaseConfig, FeedConfig, LoggingConfig, RankingConfig, UserConfig};
pub use friend::{FriendRequest, FriendRequestStatus};
pub use notification::{Notification, NotificationKind};
pub use quest::{Quest, QuestStatus};
pub use stats::{AchievementRecord, GameStats, Rank};
pub use user::{UserProfile, DEFAULT_LIFE_EXPECTANCY};
