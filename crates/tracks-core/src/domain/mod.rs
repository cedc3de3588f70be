//! Domain entities shared between the core and the server.
//!
//! These types carry data only: no I/O, no async, no caching policy.

pub mod track;

pub use track::Track;
