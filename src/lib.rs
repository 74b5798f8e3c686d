//! Life Progress - gamified goal tracking
//!
//! Treat real life like a game: define quests, earn experience and
//! points for working on them, keep a daily streak, unlock
//! achievements, follow friends, and compare rankings.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, repository ports, and errors
//! - **Service Layer** (`services`): the progression engine and the
//!   orchestration services built on it
//! - **Adapter Layer** (`adapters`): SQLite persistence and
//!   configuration loading
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{ConfigError, ConfigLoader};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Activity, ActivityKind, AchievementRecord, Config, FriendRequest, FriendRequestStatus,
    GameStats, Notification, NotificationKind, Quest, QuestStatus, Rank, Reward, UserProfile,
};
pub use domain::ports::{
    ActivityRepository, ActivityStream, FriendRepository, NotificationRepository, QuestRepository,
    StatsRepository, UserRepository,
};
pub use services::{FeedService, FriendService, NotificationService, QuestService, Ranker};
