//! Route handlers for the track lookup surface.
//!
//! | Method | Path          | Status | Payload                         |
//! |--------|---------------|--------|---------------------------------|
//! | GET    | `/tracks`     | 200    | every cached track              |
//! | GET    | `/tracks/:id` | 200    | the cached track, or `null`     |
//! | other  | `/tracks...`  | 405    | `ERROR` envelope                |
//! | any    | anything else | 404    | `ERROR` envelope                |
//!
//! `GET /tracks/:id` does not check that the id exists: an unknown id yields a
//! `SUCCESS` envelope whose payload is `null`.  Clients already depend on that
//! shape, so it is kept.
//!
//! Everything here is free of socket I/O so the routes can be tested against
//! an in-memory cache.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::application::track_cache::TrackCache;
use crate::domain::StandardResponse;

/// A resolved route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// `GET /tracks`
    CachedTracks,
    /// `GET /tracks/:id`, with the id percent-decoded.
    Track(Cow<'a, str>),
}

/// Why a request could not be routed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route for {0}")]
    NotFound(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(String),
}

impl RouteError {
    pub fn status_code(&self) -> u16 {
        match self {
            RouteError::NotFound(_) => 404,
            RouteError::MethodNotAllowed(_) => 405,
        }
    }
}

/// Status code plus envelope, ready to be written by the infrastructure layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: StandardResponse,
}

impl HttpReply {
    pub fn ok(body: StandardResponse) -> Self {
        Self { status: 200, body }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: StandardResponse::error(message),
        }
    }
}

/// Matches `method` and the request target against the known routes.
///
/// The query string is ignored and a single trailing slash is accepted.
/// The `:id` segment is percent-decoded, so `/tracks/a%20b` looks up `a b`.
///
/// # Errors
///
/// [`RouteError::NotFound`] for unknown paths (including ids that do not
/// decode to UTF-8) and [`RouteError::MethodNotAllowed`] for non-GET requests
/// to a known path.
pub fn resolve_route<'a>(method: &str, target: &'a str) -> Result<Route<'a>, RouteError> {
    let path = target.split_once('?').map_or(target, |(path, _)| path);
    let trimmed = path.strip_suffix('/').unwrap_or(path);

    let route = match trimmed.strip_prefix("/tracks") {
        Some("") => Route::CachedTracks,
        Some(rest) => match rest.strip_prefix('/') {
            // Split on the raw path first: an encoded `%2F` belongs to the id.
            Some(id) if !id.is_empty() && !id.contains('/') => {
                match percent_decode_str(id).decode_utf8() {
                    Ok(id) => Route::Track(id),
                    Err(_) => return Err(RouteError::NotFound(path.to_string())),
                }
            }
            _ => return Err(RouteError::NotFound(path.to_string())),
        },
        None => return Err(RouteError::NotFound(path.to_string())),
    };

    if method != "GET" {
        return Err(RouteError::MethodNotAllowed(method.to_string()));
    }
    Ok(route)
}

/// `GET /tracks`
pub async fn get_cached_tracks(cache: &dyn TrackCache) -> HttpReply {
    let tracks = cache.cached_values().await;
    debug!(count = tracks.len(), "serving cached tracks");
    success(&tracks)
}

/// `GET /tracks/:id`
pub async fn get_track(cache: &dyn TrackCache, id: &str) -> HttpReply {
    let track = cache.get(id).await;
    debug!(id, found = track.is_some(), "serving track");
    success(&track)
}

/// Routes and answers one request.
pub async fn handle_request(cache: &dyn TrackCache, method: &str, target: &str) -> HttpReply {
    match resolve_route(method, target) {
        Ok(Route::CachedTracks) => get_cached_tracks(cache).await,
        Ok(Route::Track(id)) => get_track(cache, &id).await,
        Err(e) => HttpReply::error(e.status_code(), e.to_string()),
    }
}

fn success<T: Serialize>(payload: &T) -> HttpReply {
    match serde_json::to_value(payload) {
        Ok(value) => HttpReply::ok(StandardResponse::success(value)),
        Err(e) => {
            error!("failed to serialize payload: {e}");
            HttpReply::error(500, "internal serialization error")
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusResponse;
    use crate::infrastructure::memory_cache::InMemoryTrackCache;
    use serde_json::Value;
    use tracks_core::Track;

    async fn cache_with(tracks: &[Track]) -> InMemoryTrackCache {
        let cache = InMemoryTrackCache::new();
        cache.extend(tracks.iter().cloned()).await;
        cache
    }

    #[test]
    fn test_resolve_list_route() {
        assert_eq!(resolve_route("GET", "/tracks"), Ok(Route::CachedTracks));
        assert_eq!(resolve_route("GET", "/tracks/"), Ok(Route::CachedTracks));
        assert_eq!(resolve_route("GET", "/tracks?limit=5"), Ok(Route::CachedTracks));
    }

    #[test]
    fn test_resolve_track_route() {
        assert_eq!(resolve_route("GET", "/tracks/abc"), Ok(Route::Track("abc".into())));
        assert_eq!(resolve_route("GET", "/tracks/abc?x=1"), Ok(Route::Track("abc".into())));
    }

    #[test]
    fn test_resolve_percent_decodes_track_id() {
        assert_eq!(resolve_route("GET", "/tracks/a%20b"), Ok(Route::Track("a b".into())));
        assert_eq!(resolve_route("GET", "/tracks/a%2Fb"), Ok(Route::Track("a/b".into())));
        assert_eq!(resolve_route("GET", "/tracks/caf%C3%A9"), Ok(Route::Track("café".into())));
    }

    #[test]
    fn test_resolve_rejects_id_that_is_not_utf8() {
        assert!(matches!(
            resolve_route("GET", "/tracks/%FF"),
            Err(RouteError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_unknown_paths() {
        for target in ["/", "/track", "/tracksx", "/tracks/a/b", "/albums/1"] {
            assert!(
                matches!(resolve_route("GET", target), Err(RouteError::NotFound(_))),
                "{target} must not resolve"
            );
        }
    }

    #[test]
    fn test_resolve_rejects_non_get_methods() {
        let result = resolve_route("POST", "/tracks");
        assert_eq!(result, Err(RouteError::MethodNotAllowed("POST".to_string())));
        assert_eq!(result.unwrap_err().status_code(), 405);
    }

    #[tokio::test]
    async fn test_list_route_returns_all_tracks_in_insertion_order() {
        // Arrange
        let cache = cache_with(&[Track::new("b", "Second"), Track::new("a", "First")]).await;

        // Act
        let reply = handle_request(&cache, "GET", "/tracks").await;

        // Assert
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body.status, StatusResponse::Success);
        let ids: Vec<&str> = reply
            .body
            .payload
            .as_array()
            .expect("array payload")
            .iter()
            .filter_map(|t| t["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_list_route_on_empty_cache_returns_empty_array() {
        let cache = InMemoryTrackCache::new();
        let reply = handle_request(&cache, "GET", "/tracks").await;
        assert_eq!(reply.body.payload, Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn test_track_route_returns_the_track() {
        let cache = cache_with(&[Track::new("a", "First").with_album("Album")]).await;

        let reply = handle_request(&cache, "GET", "/tracks/a").await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body.payload["name"], "First");
        assert_eq!(reply.body.payload["album"], "Album");
    }

    #[tokio::test]
    async fn test_unknown_track_is_success_with_null_payload() {
        let cache = cache_with(&[Track::new("a", "First")]).await;

        let reply = handle_request(&cache, "GET", "/tracks/missing").await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body.status, StatusResponse::Success);
        assert!(reply.body.payload.is_null());
    }

    #[tokio::test]
    async fn test_track_route_looks_up_decoded_id() {
        let cache = cache_with(&[Track::new("a b", "Spaced")]).await;

        let reply = handle_request(&cache, "GET", "/tracks/a%20b").await;

        assert_eq!(reply.body.payload["name"], "Spaced");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_error_envelope() {
        let cache = InMemoryTrackCache::new();

        let reply = handle_request(&cache, "GET", "/albums").await;

        assert_eq!(reply.status, 404);
        assert_eq!(reply.body.status, StatusResponse::Error);
        assert_eq!(reply.body.message.as_deref(), Some("no route for /albums"));
    }
}
