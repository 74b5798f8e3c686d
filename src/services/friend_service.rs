//! Friend (follow) service.
//!
//! Requests flow through the `pending -> accepted | rejected` state
//! machine; accepted edges define the follow graph and the peer set
//! used for friends ranking.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    FriendRequest, FriendRequestStatus, Notification, NotificationKind, UserProfile,
};
use crate::domain::ports::{FriendRepository, NotificationRepository, UserRepository};

pub struct FriendService<F, U, N>
where
    F: FriendRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    friends: Arc<F>,
    users: Arc<U>,
    notifications: Arc<N>,
}

impl<F, U, N> FriendService<F, U, N>
where
    F: FriendRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    pub fn new(friends: Arc<F>, users: Arc<U>, notifications: Arc<N>) -> Self {
        Self { friends, users, notifications }
    }

    /// Send a follow request to another user.
    ///
    /// Rejected for self-requests, private target profiles, and when a
    /// request between the pair already exists in any state.
    pub async fn send_request(&self, from_user: Uuid, to_user: Uuid) -> DomainResult<FriendRequest> {
        if from_user == to_user {
            return Err(DomainError::ValidationFailed(
                "Cannot send a friend request to yourself".to_string(),
            ));
        }

        let target = self
            .users
            .get(to_user)
            .await?
            .ok_or(DomainError::UserNotFound(to_user))?;
        if !target.is_public {
            return Err(DomainError::PrivateProfile(to_user));
        }

        if let Some(existing) = self.friends.find_between(from_user, to_user).await? {
            return Err(DomainError::ValidationFailed(format!(
                "A request to this user already exists ({})",
                existing.status.as_str()
            )));
        }

        let request = FriendRequest::new(from_user, to_user);
        self.friends.create(&request).await?;

        let sender = self.profile_name(from_user).await?;
        self.notifications
            .create(&Notification::new(
                to_user,
                NotificationKind::FriendRequest { from: from_user, from_name: sender },
            ))
            .await?;

        info!(%from_user, %to_user, "friend request sent");
        Ok(request)
    }

    /// Accept a pending request addressed to `acting_user`.
    pub async fn accept(&self, request_id: Uuid, acting_user: Uuid) -> DomainResult<FriendRequest> {
        self.resolve(request_id, acting_user, FriendRequestStatus::Accepted).await
    }

    /// Reject a pending request addressed to `acting_user`.
    pub async fn reject(&self, request_id: Uuid, acting_user: Uuid) -> DomainResult<FriendRequest> {
        self.resolve(request_id, acting_user, FriendRequestStatus::Rejected).await
    }

    async fn resolve(
        &self,
        request_id: Uuid,
        acting_user: Uuid,
        status: FriendRequestStatus,
    ) -> DomainResult<FriendRequest> {
        let mut request = self
            .friends
            .get(request_id)
            .await?
            .ok_or(DomainError::FriendRequestNotFound(request_id))?;

        if request.to_user != acting_user {
            return Err(DomainError::ValidationFailed(
                "Only the request's recipient can resolve it".to_string(),
            ));
        }

        let from = request.status;
        request
            .transition_to(status)
            .map_err(|_| DomainError::InvalidStateTransition {
                from: from.as_str().to_string(),
                to: status.as_str().to_string(),
            })?;
        self.friends.update(&request).await?;

        if status == FriendRequestStatus::Accepted {
            let accepter = self.profile_name(acting_user).await?;
            self.notifications
                .create(&Notification::new(
                    request.from_user,
                    NotificationKind::FriendAccepted { by: acting_user, by_name: accepter },
                ))
                .await?;
        }

        info!(%request_id, status = status.as_str(), "friend request resolved");
        Ok(request)
    }

    /// Remove an accepted follow edge.
    pub async fn unfollow(&self, from_user: Uuid, to_user: Uuid) -> DomainResult<()> {
        let request = self
            .friends
            .find_between(from_user, to_user)
            .await?
            .filter(|r| r.status == FriendRequestStatus::Accepted)
            .ok_or(DomainError::ValidationFailed(
                "Not following this user".to_string(),
            ))?;
        self.friends.delete(request.id).await
    }

    /// Send an encouragement message to a followed user.
    pub async fn cheer(
        &self,
        from_user: Uuid,
        to_user: Uuid,
        message: String,
    ) -> DomainResult<()> {
        if message.trim().is_empty() {
            return Err(DomainError::ValidationFailed(
                "Cheer message cannot be empty".to_string(),
            ));
        }
        self.friends
            .find_between(from_user, to_user)
            .await?
            .filter(|r| r.status == FriendRequestStatus::Accepted)
            .ok_or_else(|| {
                DomainError::ValidationFailed("You can only cheer users you follow".to_string())
            })?;

        let sender = self.profile_name(from_user).await?;
        self.notifications
            .create(&Notification::new(
                to_user,
                NotificationKind::Cheer { from: from_user, from_name: sender, message },
            ))
            .await?;
        info!(%from_user, %to_user, "cheer sent");
        Ok(())
    }

    /// Pending requests addressed to the user.
    pub async fn pending_requests(&self, user_id: Uuid) -> DomainResult<Vec<FriendRequest>> {
        self.friends.pending_for(user_id).await
    }

    /// Profiles of the users this user follows.
    pub async fn following(&self, user_id: Uuid) -> DomainResult<Vec<UserProfile>> {
        let ids = self.friends.following(user_id).await?;
        self.users.get_many(&ids).await
    }

    /// Profiles of the users following this user.
    pub async fn followers(&self, user_id: Uuid) -> DomainResult<Vec<UserProfile>> {
        let ids = self.friends.followers(user_id).await?;
        self.users.get_many(&ids).await
    }

    /// The accepted peer id set for ranking and feeds.
    pub async fn peer_ids(&self, user_id: Uuid) -> DomainResult<Vec<Uuid>> {
        self.friends.following(user_id).await
    }

    async fn profile_name(&self, user_id: Uuid) -> DomainResult<String> {
        Ok(self
            .users
            .get(user_id)
            .await?
            .map_or_else(|| "Unknown user".to_string(), |u| u.display_name))
    }
}
