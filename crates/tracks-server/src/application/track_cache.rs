//! Read-only view of the track cache consumed by the HTTP routes.

use async_trait::async_trait;
use tracks_core::Track;

/// Lookup surface of the track cache.
///
/// Implementations must be shareable across connection tasks.
#[async_trait]
pub trait TrackCache: Send + Sync {
    /// Returns every cached track.
    async fn cached_values(&self) -> Vec<Track>;

    /// Returns the cached track for `id`, if any.
    async fn get(&self, id: &str) -> Option<Track>;

    /// Whether `id` is cached.
    ///
    /// Not used by the routes: `GET /tracks/:id` deliberately skips the
    /// existence check and answers an unknown id with a `null` payload.  For
    /// code that fills or inspects the cache.
    async fn exists(&self, id: &str) -> bool {
        self.get(id).await.is_some()
    }
}
