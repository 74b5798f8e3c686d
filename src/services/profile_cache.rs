//! Bounded profile lookup cache.
//!
//! Feeds resolve author names and photos for every entry they render.
//! Rather than an ambient shared map of fetched users, this is an
//! explicit size- and TTL-bounded cache handed to whichever component
//! needs it. When full, the entry closest to expiry is evicted.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::domain::models::UserProfile;

/// Size- and TTL-bounded cache of user profiles.
#[derive(Debug)]
pub struct ProfileCache {
    entries: HashMap<Uuid, (UserProfile, Instant)>,
    capacity: usize,
    ttl: Duration,
}

impl ProfileCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Get a cached profile if present and not expired.
    pub fn get(&self, id: Uuid) -> Option<&UserProfile> {
        self.entries
            .get(&id)
            .filter(|(_, inserted)| inserted.elapsed() < self.ttl)
            .map(|(profile, _)| profile)
    }

    /// Insert a profile, evicting expired entries first and then the
    /// oldest entry if still at capacity.
    pub fn insert(&mut self, profile: UserProfile) {
        let now = Instant::now();
        self.entries.retain(|_, (_, inserted)| now.duration_since(*inserted) < self.ttl);

        if self.entries.len() >= self.capacity && !self.entries.contains_key(&profile.id) {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, (_, inserted))| *inserted)
                .map(|(id, _)| *id)
            {
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(profile.id, (profile, now));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> UserProfile {
        UserProfile::new(name)
    }

    #[test]
    fn test_get_after_insert() {
        let mut cache = ProfileCache::new(8, Duration::from_secs(60));
        let user = profile("Noor");
        let id = user.id;
        cache.insert(user);
        assert_eq!(cache.get(id).map(|u| u.display_name.as_str()), Some("Noor"));
    }

    #[test]
    fn test_capacity_bounded() {
        let mut cache = ProfileCache::new(2, Duration::from_secs(60));
        let first = profile("a");
        let first_id = first.id;
        cache.insert(first);
        cache.insert(profile("b"));
        cache.insert(profile("c"));

        assert_eq!(cache.len(), 2);
        // The oldest entry was evicted
        assert!(cache.get(first_id).is_none());
    }

    #[test]
    fn test_expired_entries_not_returned() {
        let mut cache = ProfileCache::new(8, Duration::ZERO);
        let user = profile("gone");
        let id = user.id;
        cache.insert(user);
        assert!(cache.get(id).is_none());
    }

    #[test]
    fn test_reinsert_refreshes_existing() {
        let mut cache = ProfileCache::new(1, Duration::from_secs(60));
        let user = profile("only");
        let id = user.id;
        cache.insert(user.clone());
        cache.insert(user);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(id).is_some());
    }
}
