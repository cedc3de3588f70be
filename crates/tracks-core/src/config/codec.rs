//! Stateless JSON codec for [`ConfigDocument`].
//!
//! [`decode`] and [`encode`] are the only places that know the document is
//! stored as JSON.  Decoding applies the array normalization the file format
//! requires: every array, at any depth, becomes an array of strings.
//!
//! | JSON element       | Stored as        |
//! |--------------------|------------------|
//! | `"text"`           | `"text"`         |
//! | `1`, `1.5`         | `"1"`, `"1.5"`   |
//! | `true`             | `"true"`         |
//! | `null`             | `"null"`         |
//! | `{"a":1}`, `[1]`   | compact JSON text |
//!
//! Object members whose value is `null` are dropped, since the value model has
//! no null.

use serde_json::Value;
use tracing::debug;

use super::error::CodecError;
use super::value::{ConfigDocument, ConfigValue};

/// Parses JSON text into a document.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for invalid JSON and
/// [`CodecError::NotAnObject`] when the top-level value is not an object.
pub fn decode(text: &str) -> Result<ConfigDocument, CodecError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(document_from_map(map)),
        other => Err(CodecError::NotAnObject {
            found: json_kind(&other),
        }),
    }
}

/// Serializes a document as pretty-printed JSON with 2-space indentation.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode(document: &ConfigDocument) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(document)?)
}

fn document_from_map(map: serde_json::Map<String, Value>) -> ConfigDocument {
    let mut document = ConfigDocument::new();
    for (key, value) in map {
        match config_value(value) {
            Some(value) => {
                document.insert(key, value);
            }
            None => debug!(key = %key, "dropping null config member"),
        }
    }
    document
}

fn config_value(value: Value) -> Option<ConfigValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(ConfigValue::Bool(b)),
        Value::Number(n) => Some(ConfigValue::Number(n)),
        Value::String(s) => Some(ConfigValue::String(s)),
        Value::Array(items) => Some(ConfigValue::Array(
            items.into_iter().map(element_to_string).collect(),
        )),
        Value::Object(map) => Some(ConfigValue::Object(document_from_map(map))),
    }
}

fn element_to_string(element: Value) -> String {
    match element {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
