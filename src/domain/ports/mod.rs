//! Repository ports: the abstract document-store contract the domain
//! depends on. Implementations live in `adapters`.

pub mod activity_repository;
pub mod friend_repository;
pub mod notification_repository;
pub mod quest_repository;
pub mod stats_repository;
pub mod user_repository;

pub use activity_repository::{ActivityRepository, ActivityStream};
pub use friend_repository::FriendRepository;
pub use notification_repository::NotificationRepository;
pub use quest_repository::{QuestCounts, QuestRepository};
pub use stats_repository::StatsRepository;
pub use user_repository::UserRepository;
