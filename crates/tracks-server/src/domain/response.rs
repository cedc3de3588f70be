//! The standard JSON envelope wrapped around every HTTP response body.
//!
//! ```json
//! {
//!   "status": "SUCCESS",
//!   "payload": [ ... ]
//! }
//! ```
//!
//! Error envelopes carry a human-readable `message` and a `null` payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome marker at the top of every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusResponse {
    Success,
    Error,
}

/// Response envelope: `{status, message?, payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardResponse {
    pub status: StatusResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// `null` when there is nothing to return.
    #[serde(default)]
    pub payload: Value,
}

impl StandardResponse {
    /// Wraps `payload` in a `SUCCESS` envelope.
    pub fn success(payload: Value) -> Self {
        Self {
            status: StatusResponse::Success,
            message: None,
            payload,
        }
    }

    /// Builds an `ERROR` envelope with a `null` payload.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: StatusResponse::Error,
            message: Some(message.into()),
            payload: Value::Null,
        }
    }

    /// Serializes the envelope as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json` error if the payload cannot be serialized.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
