//! Application layer for tracks-server.
//!
//! Knows *what* each route returns, but not how bytes reach the socket.
//!
//! - **`track_cache`**      – The [`TrackCache`] abstraction the routes read
//!   from.  Population and eviction belong to whoever implements it.
//! - **`track_controller`** – Maps a request method and path to a status code
//!   and a [`crate::domain::StandardResponse`] envelope.

pub mod track_cache;
pub mod track_controller;

pub use track_cache::TrackCache;
pub use track_controller::{handle_request, resolve_route, HttpReply, Route, RouteError};
