//! JSON encoding layer used by the containers.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{KeyValueStore, MemoryStore, PersistenceError};

/// Total JSON load/save over a shared [`KeyValueStore`].
///
/// None of these methods fail from the caller's point of view. Backend and
/// serde errors are logged at `warn` and treated as "no data" on load and
/// "write skipped" on save.
#[derive(Clone)]
pub struct JsonStore {
    backend: Arc<dyn KeyValueStore>,
}

impl JsonStore {
    /// Wrap a backend.
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A store that forgets everything at process exit.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Load and decode the value stored under `key`.
    ///
    /// Returns `None` if the key is missing, unreadable, or does not decode
    /// as `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_load(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "Discarding unreadable persisted value");
            None
        })
    }

    /// Like [`load`](Self::load), but reports a present-but-corrupt record
    /// separately so callers can clean it up.
    pub(crate) fn try_load<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, PersistenceError> {
        let Some(raw) = self.backend.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| PersistenceError::Serialization {
                key: key.to_owned(),
                source,
            })
    }

    /// Encode `value` and write it under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(|source| PersistenceError::Serialization {
                key: key.to_owned(),
                source,
            })
            .and_then(|raw| self.backend.set_item(key, &raw));

        match result {
            Ok(()) => debug!(key, "Persisted snapshot"),
            Err(e) => warn!(key, error = %e, "Skipping write, store unavailable"),
        }
    }

    /// Delete the value under `key`.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            warn!(key, error = %e, "Failed to remove persisted value");
        }
    }
}

impl fmt::Debug for JsonStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonStore")
            .field("backend", &self.backend)
            .finish()
    }
}
