//! Product catalog access.
//!
//! # Architecture
//!
//! - [`ProductCatalog`] and [`CatalogWriter`] are the seam to the external
//!   catalog. Implementations return typed errors.
//! - [`ProductQuery`] is the facade the rest of the state layer reads
//!   through. It never fails: catalog errors are logged and degrade to an
//!   empty list or `None`.
//! - Catalog documents are validated into [`Product`] at the boundary (see
//!   [`ProductDocument`]); invalid documents are skipped, not surfaced.
//!
//! # Backends
//!
//! - [`LocalCatalog`]: in-memory, optionally backed by a JSON file
//! - [`FirestoreCatalog`]: Cloud Firestore REST API
//! - [`CatalogBackend`]: runtime choice between the two

mod categories;
mod document;
pub mod firestore;
mod local;

pub use categories::{CategorySummary, DEFAULT_CATEGORY_IMAGE, category_image, summarize};
pub use document::{DocumentError, PLACEHOLDER_IMAGE, ProductDocument, validate_draft};
pub use firestore::FirestoreCatalog;
pub use local::LocalCatalog;

use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{instrument, warn};

use wishshop_core::{Product, ProductDraft, ProductId};

/// Errors raised by catalog backends.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing the catalog file failed.
    #[error("catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be validated into a product.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// No product with this id.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// The catalog is misconfigured or unreachable.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the product catalog.
pub trait ProductCatalog: Send + Sync {
    /// Every product, newest first.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// One product, or `None` if no document has this id.
    fn get_by_id(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send;

    /// Products whose category equals `category` exactly.
    fn list_by_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// Admin writes. The catalog assigns ids and timestamps.
pub trait CatalogWriter: Send + Sync {
    fn add_product(
        &self,
        draft: ProductDraft,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Replace the editable fields of an existing product.
    ///
    /// Fails with `CatalogError::NotFound` if the id is unknown.
    fn update_product(
        &self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Delete a product. Returns `false` if there was nothing to delete.
    fn delete_product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<bool, CatalogError>> + Send;
}

// =============================================================================
// CatalogBackend
// =============================================================================

/// The catalog chosen at startup.
#[derive(Debug, Clone)]
pub enum CatalogBackend {
    Local(LocalCatalog),
    Firestore(FirestoreCatalog),
}

impl From<LocalCatalog> for CatalogBackend {
    fn from(catalog: LocalCatalog) -> Self {
        Self::Local(catalog)
    }
}

impl From<FirestoreCatalog> for CatalogBackend {
    fn from(catalog: FirestoreCatalog) -> Self {
        Self::Firestore(catalog)
    }
}

impl ProductCatalog for CatalogBackend {
    async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Local(c) => c.list_all().await,
            Self::Firestore(c) => c.list_all().await,
        }
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        match self {
            Self::Local(c) => c.get_by_id(id).await,
            Self::Firestore(c) => c.get_by_id(id).await,
        }
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Local(c) => c.list_by_category(category).await,
            Self::Firestore(c) => c.list_by_category(category).await,
        }
    }
}

impl CatalogWriter for CatalogBackend {
    async fn add_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        match self {
            Self::Local(c) => c.add_product(draft).await,
            Self::Firestore(c) => c.add_product(draft).await,
        }
    }

    async fn update_product(
        &self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> Result<Product, CatalogError> {
        match self {
            Self::Local(c) => c.update_product(id, draft).await,
            Self::Firestore(c) => c.update_product(id, draft).await,
        }
    }

    async fn delete_product(&self, id: &ProductId) -> Result<bool, CatalogError> {
        match self {
            Self::Local(c) => c.delete_product(id).await,
            Self::Firestore(c) => c.delete_product(id).await,
        }
    }
}

// =============================================================================
// ProductQuery
// =============================================================================

/// Read-only facade over a [`ProductCatalog`].
///
/// Reads degrade instead of failing, so a catalog outage shows up as an
/// empty page rather than an error. Nothing is cached; every call goes to
/// the catalog.
#[derive(Debug, Clone)]
pub struct ProductQuery<C = CatalogBackend> {
    catalog: C,
}

impl<C: ProductCatalog> ProductQuery<C> {
    #[must_use]
    pub const fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// The wrapped catalog.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Every product, newest first. Empty on failure.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Vec<Product> {
        self.catalog.list_all().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to list products");
            Vec::new()
        })
    }

    /// One product. `None` when it does not exist or the catalog fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_by_id(&self, id: &ProductId) -> Option<Product> {
        self.catalog.get_by_id(id).await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to fetch product");
            None
        })
    }

    /// Products in `category`, compared exactly and case-sensitively.
    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: &str) -> Vec<Product> {
        self.catalog
            .list_by_category(category)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to list products by category");
                Vec::new()
            })
    }

    /// One summary per distinct category, in first-seen order.
    pub async fn categories(&self) -> Vec<CategorySummary> {
        summarize(&self.list_all().await)
    }
}

impl<C: ProductCatalog + CatalogWriter> ProductQuery<C> {
    /// Add a product.
    ///
    /// # Errors
    ///
    /// Unlike reads, writes surface catalog failures to the caller.
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        self.catalog.add_product(draft).await
    }

    /// Replace the editable fields of `id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown id, or the backend's
    /// error.
    pub async fn update_product(
        &self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> Result<Product, CatalogError> {
        self.catalog.update_product(id, draft).await
    }

    /// Delete `id`. Returns whether anything was deleted.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn delete_product(&self, id: &ProductId) -> Result<bool, CatalogError> {
        self.catalog.delete_product(id).await
    }
}
