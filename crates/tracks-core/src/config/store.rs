//! The configuration store: a JSON file reconciled against registered defaults.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ── register_default()* ── initialize() ──► Initialized
//!                                            │
//!                                            ├─ read file (missing / empty → defaults only)
//!                                            ├─ decode + reconcile with defaults
//!                                            └─ persist full document
//! ```
//!
//! After initialization the document is served from memory; `get`/`put` never
//! touch the disk.  `persist` writes the current document back explicitly.
//!
//! # Failure policy
//!
//! A missing, unreadable, or malformed config file must never stop the
//! service from starting.  Such failures are logged, recorded in
//! [`ConfigStore::diagnostics`], and the store carries on with the defaults.
//! Write failures are handled the same way; the in-memory document stays
//! authoritative.
//!
//! The store does no locking.  Callers that share it across tasks must
//! serialize access themselves.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use super::codec;
use super::defaults::{reconcile, DefaultsRegistry};
use super::error::ConfigError;
use super::value::{ConfigDocument, ConfigValue};

/// Whether [`ConfigStore::initialize`] has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Defaults may be registered; the document is empty.
    Uninitialized,
    /// The document is live.
    Initialized,
}

/// Persistent configuration document with default-value overlay.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    defaults: DefaultsRegistry,
    document: ConfigDocument,
    state: StoreState,
    diagnostics: Vec<ConfigError>,
}

impl ConfigStore {
    /// Creates a store backed by `path`.  The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            defaults: DefaultsRegistry::new(),
            document: ConfigDocument::new(),
            state: StoreState::Uninitialized,
            diagnostics: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn defaults(&self) -> &DefaultsRegistry {
        &self.defaults
    }

    /// Registers a default object or array for `key`.
    ///
    /// # Parameters
    ///
    /// - `key`   – Top-level key in the config document.
    /// - `value` – Default for that key; must be an object or an array.
    ///   Registering the same key again replaces the earlier default.
    ///
    /// Registering after [`initialize`](Self::initialize) only updates the
    /// registry; the live document is not reconciled again.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDefaultKind`] for scalar values.
    pub fn register_default(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Result<(), ConfigError> {
        let key = key.into();
        if self.state == StoreState::Initialized {
            debug!(key = %key, "default registered after initialization has no effect on the live document");
        }
        self.defaults.register(key, value.into())
    }

    /// Loads the backing file, reconciles it with the defaults, persists the
    /// result, and returns the live document.
    ///
    /// Read, decode and write failures do not fail this call; they are logged
    /// and appended to [`diagnostics`](Self::diagnostics).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyInitialized`] if called more than once.
    pub fn initialize(&mut self) -> Result<&ConfigDocument, ConfigError> {
        if self.state == StoreState::Initialized {
            return Err(ConfigError::AlreadyInitialized);
        }

        // Read problems are recorded inside `load_existing`; from here on a
        // missing and an unusable file look the same.
        let document = match self.load_existing() {
            Some(mut document) => {
                // Reconcile only fills gaps. User values always win, and a
                // mismatched shape is reported instead of overwritten.
                let mismatches = reconcile(&mut document, &self.defaults);
                self.diagnostics.extend(mismatches);
                document
            }
            None => {
                warn!(path = %self.path.display(), "config not found, loading defaults");
                self.defaults.to_document()
            }
        };

        // The document must be live before persisting: `persist` writes
        // `self.document`, and a failed write must leave a usable store.
        self.document = document;
        self.state = StoreState::Initialized;
        self.persist();

        info!(
            path = %self.path.display(),
            keys = self.document.len(),
            diagnostics = self.diagnostics.len(),
            "configuration initialized"
        );
        Ok(&self.document)
    }

    /// Returns the current value for `key` without touching the disk.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.document.get(key)
    }

    /// Sets `key` in memory, returning the previous value.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Option<ConfigValue> {
        self.document.insert(key, value)
    }

    /// Removes `key` from memory, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.document.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.document.contains_key(key)
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn get_object(&self, key: &str) -> Option<&ConfigDocument> {
        self.get(key).and_then(ConfigValue::as_object)
    }

    pub fn get_array(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(ConfigValue::as_array)
    }

    /// Looks up `section.key` as a string.
    pub fn get_str_in(&self, section: &str, key: &str) -> Option<&str> {
        self.get_object(section)?.get(key)?.as_str()
    }

    /// Looks up `section.key` as an unsigned integer.
    pub fn get_u64_in(&self, section: &str, key: &str) -> Option<u64> {
        self.get_object(section)?.get(key)?.as_u64()
    }

    /// Errors recovered from so far, oldest first.
    pub fn diagnostics(&self) -> &[ConfigError] {
        &self.diagnostics
    }

    /// Writes the full document to the backing file.
    ///
    /// A failure is logged and recorded as a diagnostic, never returned.
    pub fn persist(&mut self) {
        match self.try_persist() {
            Ok(()) => debug!(path = %self.path.display(), "configuration saved"),
            Err(e) => {
                error!("error while saving configuration: {e}");
                self.diagnostics.push(e);
            }
        }
    }

    /// Writes the full document to the backing file, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Encode`] or [`ConfigError::FileWrite`].
    pub fn try_persist(&self) -> Result<(), ConfigError> {
        let content = codec::encode(&self.document).map_err(ConfigError::Encode)?;

        // A bare file name has an empty parent; there is nothing to create.
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::FileWrite {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, content).map_err(|source| ConfigError::FileWrite {
            path: self.path.clone(),
            source,
        })
    }

    /// Reads and decodes the backing file.
    ///
    /// `None` means "start from defaults": the file is missing, empty,
    /// unreadable, or malformed.
    fn load_existing(&mut self) -> Option<ConfigDocument> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(source) => {
                let err = ConfigError::FileRead {
                    path: self.path.clone(),
                    source,
                };
                error!("error while loading configuration: {err}");
                self.diagnostics.push(err);
                return None;
            }
        };

        if content.trim().is_empty() {
            return None;
        }

        match codec::decode(&content) {
            Ok(document) => Some(document),
            Err(source) => {
                let err = ConfigError::MalformedContent {
                    path: self.path.clone(),
                    source,
                };
                warn!("ignoring configuration file: {err}");
                self.diagnostics.push(err);
                None
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
