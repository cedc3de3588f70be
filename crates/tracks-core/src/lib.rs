//! # tracks-core
//!
//! Shared library for the tracks service containing the persistent
//! configuration store and the domain entities served over HTTP.
//!
//! This crate performs only blocking local file I/O (the config file) and has
//! no dependency on async runtimes or sockets.
//!
//! # Architecture overview
//!
//! - **`config`** – The configuration store.  A JSON document is loaded from a
//!   single backing file, reconciled against caller-registered defaults
//!   (missing top-level keys and missing nested keys one level deep are
//!   filled in), written back to disk, and then served from memory.
//!
//! - **`domain`** – Plain data types shared by the server crate, most
//!   importantly [`Track`].
//!
//! # Typical startup sequence
//!
//! ```rust,no_run
//! use tracks_core::{ConfigStore, ConfigValue};
//!
//! let mut store = ConfigStore::new("config.json");
//! store
//!     .register_default("http", ConfigValue::object([("port", ConfigValue::from(4567u64))]))
//!     .expect("object defaults are accepted");
//! store.initialize().expect("first initialization");
//! assert!(store.get("http").is_some());
//! ```

pub mod config;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `tracks_core::ConfigStore` instead of `tracks_core::config::store::ConfigStore`.
pub use config::{
    codec::{decode, encode},
    defaults::{reconcile, DefaultsRegistry},
    error::{CodecError, ConfigError},
    store::{ConfigStore, StoreState},
    value::{ConfigDocument, ConfigValue, ValueKind},
};
pub use domain::track::Track;
