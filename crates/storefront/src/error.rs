//! Crate-level error type.
//!
//! Containers do not return this: their failures are either validation
//! errors ([`SessionError`]) or degraded silently. It covers startup and the
//! admin write path, where a caller has to know something went wrong.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::session::SessionError;
use crate::store::PersistenceError;

/// Any failure surfaced by the storefront library.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The local store could not be opened.
    #[error("Storage error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The catalog could not be opened or rejected a write.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Login or registration failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Result alias for storefront operations.
pub type Result<T, E = StorefrontError> = std::result::Result<T, E>;
