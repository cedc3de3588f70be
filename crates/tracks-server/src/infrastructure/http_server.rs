//! HTTP server: warp filter tree and listener lifecycle.
//!
//! This module is responsible for:
//!
//! 1. Building the warp filter that hands every request's method and path to
//!    the application layer ([`handle_request`]).
//! 2. Rendering the resulting [`HttpReply`] as a pretty-printed JSON response,
//!    with the configured CORS origin attached.
//! 3. Binding the listener and running it until the shutdown signal resolves.
//!
//! Request parsing, header limits and connection management are left to warp
//! (and hyper underneath).  Routing stays in the application layer so that
//! 404/405 answers carry the same `ERROR` envelope as everything else.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use warp::http::{Method, StatusCode};
use warp::path::FullPath;
use warp::reply::Response;
use warp::{Filter, Reply};

use crate::application::{handle_request, HttpReply, TrackCache};
use crate::domain::ServerSettings;

// ── Public API ────────────────────────────────────────────────────────────────

/// Builds the complete filter tree for the tracks service.
///
/// The filter never rejects: unknown paths and methods are answered by the
/// application layer with an `ERROR` envelope.
///
/// # Parameters
///
/// - `cache`          – Track cache shared by every request.
/// - `allowed_origin` – Value for `Access-Control-Allow-Origin`; `None` omits
///   the header.
pub fn routes(
    cache: Arc<dyn TrackCache>,
    allowed_origin: Option<String>,
) -> impl Filter<Extract = (Response,), Error = Infallible> + Clone {
    warp::method()
        .and(warp::path::full())
        .and(with_cache(cache))
        .then(
            |method: Method, path: FullPath, cache: Arc<dyn TrackCache>| async move {
                // `FullPath` excludes the query string and is still
                // percent-encoded; the route resolver decodes the id segment.
                let reply = handle_request(cache.as_ref(), method.as_str(), path.as_str()).await;
                info!(
                    method = %method,
                    path = path.as_str(),
                    status = reply.status,
                    "request served"
                );
                reply
            },
        )
        .map(move |reply: HttpReply| render(reply, allowed_origin.as_deref()))
}

/// Binds the listener described by `settings` without starting to serve.
///
/// Returns the bound address (useful when binding port 0) and the server
/// future.  The future completes once `shutdown` resolves and in-flight
/// requests have been answered.
///
/// # Parameters
///
/// - `settings` – Bind address and CORS origin.
/// - `cache`    – Track cache shared by every request.
/// - `shutdown` – Resolves when the server should stop accepting connections.
///
/// # Errors
///
/// Returns an error if the address is in use or cannot be bound.
pub fn bind<S>(
    settings: ServerSettings,
    cache: Arc<dyn TrackCache>,
    shutdown: S,
) -> anyhow::Result<(SocketAddr, impl Future<Output = ()>)>
where
    S: Future<Output = ()> + Send + 'static,
{
    let bind_addr = settings.bind_addr;
    warp::serve(routes(cache, settings.allowed_origin))
        .try_bind_with_graceful_shutdown(bind_addr, shutdown)
        .with_context(|| format!("failed to bind HTTP listener on {bind_addr}"))
}

/// Binds the listener and serves requests until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn run_server<S>(
    settings: ServerSettings,
    cache: Arc<dyn TrackCache>,
    shutdown: S,
) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let (addr, server) = bind(settings, cache, shutdown)?;
    info!("HTTP server listening on {addr}");

    server.await;

    info!("HTTP server stopped");
    Ok(())
}

// ── Filters and rendering ─────────────────────────────────────────────────────

fn with_cache(
    cache: Arc<dyn TrackCache>,
) -> impl Filter<Extract = (Arc<dyn TrackCache>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&cache))
}

/// Turns an application reply into a warp response.
fn render(reply: HttpReply, allowed_origin: Option<&str>) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = match reply.body.to_json_pretty() {
        Ok(body) => warp::reply::with_status(
            warp::reply::with_header(body, "content-type", "application/json"),
            status,
        )
        .into_response(),
        Err(e) => {
            error!("failed to render response envelope: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    };

    if let Some(origin) = allowed_origin {
        response =
            warp::reply::with_header(response, "access-control-allow-origin", origin).into_response();
    }
    // Every route is GET-only; a 405 must say so.
    if status == StatusCode::METHOD_NOT_ALLOWED {
        response = warp::reply::with_header(response, "allow", "GET").into_response();
    }
    response
}

// ── Tests ─────────────────────────────────────────────────────────────────────
