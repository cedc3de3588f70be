//! Domain layer for tracks-server.
//!
//! Pure types with no networking and no async: the JSON response envelope
//! and the server settings derived from the configuration store.

pub mod response;
pub mod settings;

pub use response::{StandardResponse, StatusResponse};
pub use settings::{ServerSettings, SettingsError};
