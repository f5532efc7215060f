//! Integration tests for WishShop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wishshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - State surviving a restart on the file store
//! - `session` - Login and registration rules through the bootstrap context
//! - `catalog` - Local catalog file, category filtering, admin writes
//! - `storefront_flow` - A shopper's end-to-end run
//!
//! Every test runs against a fresh temporary directory; nothing needs to be
//! running.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use wishshop_core::{Price, ProductDraft};
use wishshop_storefront::config::CatalogSource;
use wishshop_storefront::{StoreContext, StorefrontConfig};

/// A temporary data directory plus catalog file.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    /// Create an empty environment.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Create an environment whose catalog file holds `documents`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_catalog(documents: &serde_json::Value) -> Self {
        let env = Self::new();
        std::fs::write(
            env.catalog_file(),
            serde_json::to_string_pretty(documents).expect("encode catalog"),
        )
        .expect("write catalog");
        env
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.root().join("state")
    }

    #[must_use]
    pub fn catalog_file(&self) -> PathBuf {
        self.root().join("products.json")
    }

    /// Configuration pointing at this environment's directories.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: self.data_dir(),
            catalog: CatalogSource::Local {
                path: self.catalog_file(),
            },
            ..StorefrontConfig::default()
        }
    }

    /// Open a context, as a fresh client run would.
    ///
    /// # Panics
    ///
    /// Panics if the context cannot be opened.
    #[allow(clippy::expect_used)]
    pub async fn open(&self) -> StoreContext {
        StoreContext::open(&self.config())
            .await
            .expect("open store context")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A valid product draft.
#[must_use]
pub fn draft(name: &str, category: &str, cents: u64, stock: u32) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: format!("{name} for integration tests"),
        price: Price::from_cents(cents),
        category: category.to_string(),
        image: "/images/ii.png".to_string(),
        images: Vec::new(),
        stock,
        colors: vec!["black".to_string(), "white".to_string()],
        specifications: None,
    }
}
