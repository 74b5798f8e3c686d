//! Service layer: the progression engine and the orchestration
//! services that wire it to the repository ports.

pub mod feed;
pub mod friend_service;
pub mod notification_service;
pub mod profile_cache;
pub mod progression;
pub mod quest_service;
pub mod ranking;

pub use feed::{FeedEntry, FeedService, LiveFeed, RetryPolicy};
pub use friend_service::FriendService;
pub use notification_service::NotificationService;
pub use profile_cache::ProfileCache;
pub use progression::ProgressFacts;
pub use quest_service::QuestService;
pub use ranking::Ranker;
