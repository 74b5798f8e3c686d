//! Friend relationships as an asymmetric follow graph.
//!
//! Following is requested, then accepted or rejected by the target.
//! Accepted and rejected are terminal; there is no un-reject. The
//! accepted edges where a user is the requester form their "following"
//! set, which is also the peer set for friends ranking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a friend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendRequestStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Only `pending -> accepted` and `pending -> rejected` are legal.
    pub const fn can_transition_to(&self, new_status: Self) -> bool {
        matches!(
            (self, new_status),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected)
        )
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A directed follow request from `from_user` to `to_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: Uuid,
    /// The requester (follower once accepted)
    pub from_user: Uuid,
    /// The target (followee once accepted)
    pub to_user: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FriendRequest {
    /// Create a new pending request.
    pub fn new(from_user: Uuid, to_user: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            from_user,
            to_user,
            status: FriendRequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transition to a new status, enforcing the state machine.
    pub fn transition_to(&mut self, new_status: FriendRequestStatus) -> Result<(), String> {
        if !self.status.can_transition_to(new_status) {
            return Err(format!(
                "Cannot transition friend request from {} to {}",
                self.status.as_str(),
                new_status.as_str()
            ));
        }
        self.status = new_status;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let req = FriendRequest::new(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(req.status, FriendRequestStatus::Pending);
        assert!(!req.status.is_terminal());
    }

    #[test]
    fn test_accept_and_reject_are_terminal() {
        let mut req = FriendRequest::new(Uuid::new_v4(), Uuid::new_v4());
        req.transition_to(FriendRequestStatus::Accepted).unwrap();
        assert!(req.status.is_terminal());

        // No further transitions from a terminal state
        assert!(req.transition_to(FriendRequestStatus::Rejected).is_err());
        assert!(req.transition_to(FriendRequestStatus::Pending).is_err());
    }

    #[test]
    fn test_rejected_cannot_be_accepted() {
        let mut req = FriendRequest::new(Uuid::new_v4(), Uuid::new_v4());
        req.transition_to(FriendRequestStatus::Rejected).unwrap();
        assert!(req.transition_to(FriendRequestStatus::Accepted).is_err());
    }
}
