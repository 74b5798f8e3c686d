//! Domain errors for the lifeprog system.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors that can occur in the lifeprog system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Quest not found: {0}")]
    QuestNotFound(Uuid),

    #[error("Game stats not found for user: {0}")]
    StatsNotFound(Uuid),

    #[error("Friend request not found: {0}")]
    FriendRequestNotFound(Uuid),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Profile is private: {0}")]
    PrivateProfile(Uuid),

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The database schema does not match what the code expects.
    ///
    /// The sqlite analog of a "missing index for this query shape"
    /// error from a hosted store: a configuration problem, not a
    /// transient failure. Surfaced with an actionable remedy.
    #[error("Store misconfigured: {0}. Run `lifeprog init` to create or migrate the database")]
    StoreMisconfigured(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Subscription failed after {attempts} attempts: {reason}")]
    SubscriptionFailed { attempts: u32, reason: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        let msg = err.to_string();
        // sqlite reports schema drift as "no such table" / "no such column".
        if msg.contains("no such table") || msg.contains("no such column") {
            Self::StoreMisconfigured(msg)
        } else {
            Self::DatabaseError(msg)
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
