//! Infrastructure layer for tracks-server.
//!
//! - **`memory_cache`** – Tokio-locked in-memory [`TrackCache`](crate::application::TrackCache).
//! - **`http_server`**  – warp filter tree, response rendering, listener lifecycle.
//!
//! Routing decisions live in the application layer; this layer only speaks
//! HTTP and owns the listener.

pub mod http_server;
pub mod memory_cache;

pub use http_server::{bind, routes, run_server};
pub use memory_cache::InMemoryTrackCache;
