//! Relative ranking among a user and a bounded peer set.
//!
//! Ordering is points descending with ties broken by id ascending, so
//! ranks are stable for equal scores. The global rank comes from a
//! bounded top-N leaderboard scan; a user outside that window has no
//! global rank (`None`).

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Rank;
use crate::domain::ports::StatsRepository;

/// Default size of the global leaderboard scan.
pub const LEADERBOARD_LIMIT: u32 = 1000;

/// 1-based position of `user_id` in a points list, ties broken by id.
///
/// The list does not need to be sorted; returns `None` when the user
/// is not present.
pub fn rank_within(user_id: Uuid, entries: &[(Uuid, u64)]) -> Option<u32> {
    let mut sorted: Vec<&(Uuid, u64)> = entries.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted
        .iter()
        .position(|(id, _)| *id == user_id)
        .map(|pos| pos as u32 + 1)
}

/// Computes and caches ranks through an injected points-lookup
/// capability; the ranker never sees how scores are stored.
pub struct Ranker<S: StatsRepository> {
    stats: Arc<S>,
    leaderboard_limit: u32,
}

impl<S: StatsRepository> Ranker<S> {
    pub fn new(stats: Arc<S>) -> Self {
        Self {
            stats,
            leaderboard_limit: LEADERBOARD_LIMIT,
        }
    }

    pub const fn with_leaderboard_limit(mut self, limit: u32) -> Self {
        self.leaderboard_limit = limit;
        self
    }

    /// Compute the user's global and friends rank.
    ///
    /// `peers` is the accepted-friend id set; the user themself is
    /// always included in the friends ordering.
    pub async fn compute(&self, user_id: Uuid, peers: &[Uuid]) -> DomainResult<Rank> {
        let leaderboard = self.stats.top_by_points(self.leaderboard_limit).await?;
        let global = rank_within(user_id, &leaderboard);

        let mut ids: Vec<Uuid> = peers.to_vec();
        if !ids.contains(&user_id) {
            ids.push(user_id);
        }
        let friend_points = self.stats.points_for(&ids).await?;
        let friends = rank_within(user_id, &friend_points)
            .ok_or(DomainError::StatsNotFound(user_id))?;

        debug!(%user_id, ?global, friends, "computed rank");
        Ok(Rank { global, friends })
    }

    /// Compute and persist the user's rank, returning it.
    pub async fn refresh(&self, user_id: Uuid, peers: &[Uuid]) -> DomainResult<Rank> {
        let rank = self.compute(user_id, peers).await?;
        self.stats.set_rank(user_id, rank).await?;
        Ok(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(n: u8) -> Uuid {
        Uuid::from_bytes([n; 16])
    }

    #[test]
    fn test_rank_within_orders_by_points_desc() {
        let entries = vec![(uuid(1), 500), (uuid(2), 300), (uuid(3), 700)];
        assert_eq!(rank_within(uuid(3), &entries), Some(1));
        assert_eq!(rank_within(uuid(1), &entries), Some(2));
        assert_eq!(rank_within(uuid(2), &entries), Some(3));
    }

    #[test]
    fn test_tie_broken_by_id_ascending() {
        // A (01..) and C (03..) tie on 500; A's id sorts first
        let a = uuid(1);
        let b = uuid(2);
        let c = uuid(3);
        let entries = vec![(a, 500), (b, 300), (c, 500)];
        assert_eq!(rank_within(a, &entries), Some(1));
        assert_eq!(rank_within(c, &entries), Some(2));
        assert_eq!(rank_within(b, &entries), Some(3));
    }

    #[test]
    fn test_absent_user_has_no_rank() {
        let entries = vec![(uuid(1), 500)];
        assert_eq!(rank_within(uuid(9), &entries), None);
    }
}
