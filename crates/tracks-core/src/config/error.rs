//! Error types for the configuration store.
//!
//! Only [`ConfigError::InvalidDefaultKind`] and
//! [`ConfigError::AlreadyInitialized`] are ever returned to the caller as
//! hard failures.  Every I/O and content problem is recovered inside the store
//! and kept as a diagnostic (see `ConfigStore::diagnostics`).

use std::path::PathBuf;

use thiserror::Error;

use super::value::ValueKind;

/// Errors produced while converting between JSON text and a document.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The text is valid JSON but the top-level value is not an object.
    #[error("top-level value must be an object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Error type for configuration store operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A default was registered with a scalar value.
    #[error("default for '{key}' must be an object or an array, got {kind}")]
    InvalidDefaultKind { key: String, kind: ValueKind },

    /// The backing file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is non-empty but could not be decoded.
    #[error("malformed config file {path}: {source}")]
    MalformedContent {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// The document could not be written to the backing file.
    #[error("failed to write config file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be encoded.
    #[error("failed to encode config document: {0}")]
    Encode(#[source] CodecError),

    /// An object default met a stored value of another kind.
    #[error("default for '{key}' is an object but the stored value is {found}")]
    TypeMismatch { key: String, found: ValueKind },

    /// `initialize` was called on an already initialized store.
    #[error("config store is already initialized")]
    AlreadyInitialized,
}
