//! Registered default values and reconciliation against a loaded document.
//!
//! # Reconciliation rules
//!
//! For every registered default `key → default`:
//!
//! | Stored value at `key` | Default kind | Result                                   |
//! |-----------------------|--------------|------------------------------------------|
//! | absent                | any          | default inserted verbatim                |
//! | object                | object       | missing nested keys inserted (one level) |
//! | not an object         | object       | skipped, `TypeMismatch` recorded         |
//! | anything              | array        | left untouched                           |
//!
//! Keys that have no registered default are never modified or removed.

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::error::ConfigError;
use super::value::{ConfigDocument, ConfigValue};

/// The set of defaults registered before the store is initialized.
///
/// Only object and array values are accepted.
#[derive(Debug, Clone, Default)]
pub struct DefaultsRegistry {
    entries: IndexMap<String, ConfigValue>,
}

impl DefaultsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` as the default for `key`, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDefaultKind`] if `value` is a scalar.  The
    /// registry is left unchanged in that case.
    pub fn register(&mut self, key: impl Into<String>, value: ConfigValue) -> Result<(), ConfigError> {
        let key = key.into();
        if !value.is_container() {
            return Err(ConfigError::InvalidDefaultKind {
                key,
                kind: value.kind(),
            });
        }
        self.entries.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns an owned copy of the defaults as a fresh document.
    pub fn to_document(&self) -> ConfigDocument {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Fills keys missing from `document` using `defaults`.
///
/// Returns one [`ConfigError::TypeMismatch`] for every object default whose
/// stored counterpart is not an object; those keys are left as they are.
pub fn reconcile(document: &mut ConfigDocument, defaults: &DefaultsRegistry) -> Vec<ConfigError> {
    let mut mismatches = Vec::new();

    for (key, default) in defaults.iter() {
        if !document.contains_key(key) {
            debug!(key, "inserting missing default");
            document.insert(key, default.clone());
            continue;
        }

        // Array defaults are only ever inserted when the key is absent.
        let ConfigValue::Object(default_fields) = default else {
            continue;
        };
        let Some(existing) = document.get_mut(key) else {
            continue;
        };

        match existing {
            ConfigValue::Object(fields) => {
                for (nested_key, nested_default) in default_fields.iter() {
                    if !fields.contains_key(nested_key) {
                        debug!(key, nested_key, "inserting missing nested default");
                        fields.insert(nested_key, nested_default.clone());
                    }
                }
            }
            other => {
                let mismatch = ConfigError::TypeMismatch {
                    key: key.to_string(),
                    found: other.kind(),
                };
                warn!("skipping reconciliation: {mismatch}");
                mismatches.push(mismatch);
            }
        }
    }

    mismatches
}

// ── Tests ─────────────────────────────────────────────────────────────────────
