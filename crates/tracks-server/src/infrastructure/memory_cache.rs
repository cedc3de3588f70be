//! In-memory track cache.
//!
//! Tracks are kept in insertion order, so `GET /tracks` lists them in the
//! order they were cached.  The lock is an async `tokio::sync::RwLock`: many
//! connection tasks read at once and writers never block a runtime thread.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracks_core::Track;

use crate::application::TrackCache;

/// A [`TrackCache`] held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryTrackCache {
    tracks: RwLock<IndexMap<String, Track>>,
}

impl InMemoryTrackCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a track, keyed by its id.
    pub async fn insert(&self, track: Track) -> Option<Track> {
        self.tracks.write().await.insert(track.id.clone(), track)
    }

    /// Adds or replaces every track in `tracks`.
    pub async fn extend(&self, tracks: impl IntoIterator<Item = Track>) {
        let mut guard = self.tracks.write().await;
        for track in tracks {
            guard.insert(track.id.clone(), track);
        }
    }

    pub async fn len(&self) -> usize {
        self.tracks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tracks.read().await.is_empty()
    }
}

#[async_trait]
impl TrackCache for InMemoryTrackCache {
    async fn cached_values(&self) -> Vec<Track> {
        self.tracks.read().await.values().cloned().collect()
    }

    async fn get(&self, id: &str) -> Option<Track> {
        self.tracks.read().await.get(id).cloned()
    }

    async fn exists(&self, id: &str) -> bool {
        self.tracks.read().await.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_replaces_track_with_same_id() {
        // Arrange
        let cache = InMemoryTrackCache::new();
        cache.insert(Track::new("a", "Old")).await;

        // Act
        let previous = cache.insert(Track::new("a", "New")).await;

        // Assert
        assert_eq!(previous.map(|t| t.name), Some("Old".to_string()));
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("a").await.map(|t| t.name), Some("New".to_string()));
    }

    #[tokio::test]
    async fn test_cached_values_keep_insertion_order() {
        let cache = InMemoryTrackCache::new();
        cache
            .extend([Track::new("z", "Z"), Track::new("m", "M"), Track::new("a", "A")])
            .await;

        let ids: Vec<String> = cache.cached_values().await.into_iter().map(|t| t.id).collect();

        assert_eq!(ids, vec!["z", "m", "a"]);
    }

    #[tokio::test]
    async fn test_exists_and_get_for_missing_id() {
        let cache = InMemoryTrackCache::new();
        assert!(cache.is_empty().await);
        assert!(!cache.exists("nope").await);
        assert!(cache.get("nope").await.is_none());
    }
}
