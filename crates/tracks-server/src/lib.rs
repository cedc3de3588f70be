//! tracks-server library crate.
//!
//! A read-only HTTP surface over a cache of tracks, configured through the
//! persistent configuration store in `tracks-core`.
//!
//! # Architecture
//!
//! ```text
//! HTTP client (JSON)
//!         ↕
//! [tracks-server]
//!   ├── domain/           StandardResponse envelope, ServerSettings
//!   ├── application/      TrackCache trait, route handlers
//!   └── infrastructure/
//!         ├── http_server/  warp filters, listener with graceful shutdown
//!         └── memory_cache/ In-memory TrackCache
//! ```
//!
//! # Layer rules
//!
//! - `domain` performs no network I/O and has no async code.
//! - `application` depends on `domain` and `tracks-core` only.
//! - `infrastructure` depends on all other layers plus `tokio` and `warp`.
//!
//! Shared state is passed in explicitly: `main` builds the config store, the
//! settings and the cache once, and hands references to the server.

/// Domain layer: response envelope and settings types.
pub mod domain;

/// Application layer: cache abstraction and route handlers.
pub mod application;

/// Infrastructure layer: HTTP listener and in-memory cache.
pub mod infrastructure;
