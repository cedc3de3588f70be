//! Server settings backed by the configuration store.
//!
//! The server keeps its own settings in the same JSON file the store manages.
//! [`register_defaults`] must run before the store is initialized so that a
//! first start writes a complete file:
//!
//! ```json
//! {
//!   "http": {
//!     "bind_address": "0.0.0.0",
//!     "port": 4567
//!   },
//!   "cors": [
//!     "*"
//!   ]
//! }
//! ```
//!
//! [`ServerSettings::from_store`] then reads the reconciled values back out.
//! Building the struct once at startup keeps the rest of the server free of
//! config lookups.

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tracks_core::{ConfigError, ConfigStore, ConfigValue};

/// Top-level key of the HTTP listener section.
pub const HTTP_SECTION: &str = "http";
/// Top-level key of the allowed CORS origins array.
pub const CORS_KEY: &str = "cors";

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4567;

/// Errors turning stored config values into [`ServerSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A required value is absent or has the wrong type.
    #[error("missing or non-{expected} config value '{key}'")]
    Missing { key: String, expected: &'static str },

    /// A value is present but cannot be used.
    #[error("invalid config value '{key}': {reason}")]
    Invalid { key: String, reason: String },
}

/// Runtime settings for the HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address the listener binds to.
    pub bind_addr: SocketAddr,
    /// Value sent as `Access-Control-Allow-Origin`, if any origin is configured.
    pub allowed_origin: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::from([0, 0, 0, 0]), DEFAULT_PORT),
            allowed_origin: Some("*".to_string()),
        }
    }
}

/// Registers the server's config defaults on `store`.
///
/// # Errors
///
/// Only fails if a default were a scalar, which would be a bug here.
pub fn register_defaults(store: &mut ConfigStore) -> Result<(), ConfigError> {
    store.register_default(
        HTTP_SECTION,
        ConfigValue::object([
            ("bind_address", ConfigValue::from(DEFAULT_BIND_ADDRESS)),
            ("port", ConfigValue::from(u64::from(DEFAULT_PORT))),
        ]),
    )?;
    store.register_default(CORS_KEY, ConfigValue::array(["*"]))?;
    Ok(())
}

impl ServerSettings {
    /// Reads settings from an initialized store.
    ///
    /// `port_override` (from the command line) wins over the stored port.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when `http.bind_address` is not an IP
    /// address or `http.port` is not a valid TCP port.
    pub fn from_store(store: &ConfigStore, port_override: Option<u16>) -> Result<Self, SettingsError> {
        let bind_address = store
            .get_str_in(HTTP_SECTION, "bind_address")
            .ok_or_else(|| SettingsError::Missing {
                key: "http.bind_address".to_string(),
                expected: "string",
            })?;
        let ip: IpAddr = bind_address.parse().map_err(|_| SettingsError::Invalid {
            key: "http.bind_address".to_string(),
            reason: format!("'{bind_address}' is not an IP address"),
        })?;

        let port = match port_override {
            Some(port) => port,
            None => {
                let raw = store
                    .get_u64_in(HTTP_SECTION, "port")
                    .ok_or_else(|| SettingsError::Missing {
                        key: "http.port".to_string(),
                        expected: "integer",
                    })?;
                u16::try_from(raw).map_err(|_| SettingsError::Invalid {
                    key: "http.port".to_string(),
                    reason: format!("{raw} is out of range for a TCP port"),
                })?
            }
        };

        // Only one origin fits in the header; a stored `*` anywhere wins.
        let allowed_origin = store.get_array(CORS_KEY).and_then(|origins| {
            if origins.iter().any(|o| o == "*") {
                Some("*".to_string())
            } else {
                origins.first().cloned()
            }
        });

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            allowed_origin,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
