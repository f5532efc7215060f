//! Persistent store adapter.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] is the host's durable string store (`getItem`/`setItem`
//!   semantics). It reports failures as [`PersistenceError`].
//! - [`JsonStore`] sits on top and is what containers use. It encodes values
//!   as JSON and swallows every failure: a missing, unreadable or corrupt
//!   record reads as absent, and a failed write is logged and skipped.
//!
//! One client run owns its store; there is no locking across processes.
//! Two processes sharing a data directory overwrite each other's snapshots
//! (last write wins per key).

mod file;
mod json;
mod memory;

pub use file::FileStore;
pub use json::JsonStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage key for the cart line list.
pub const CART_KEY: &str = "cart";

/// Storage key for the wishlist entries.
pub const WISHLIST_KEY: &str = "wishlist";

/// Storage key for the logged-in user record.
pub const SESSION_KEY: &str = "wishshop_user";

/// Errors raised by a [`KeyValueStore`] backend.
///
/// These never reach containers; [`JsonStore`] logs and absorbs them.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Filesystem read or write failed.
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded or decoded.
    #[error("serialization error on {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend state is unusable (e.g. a poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A synchronous string-keyed durable store.
///
/// Implementations take `&self` and use interior mutability so one store
/// can be shared by every container through [`JsonStore`].
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the raw value for `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Insert or replace the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), PersistenceError>;
}
