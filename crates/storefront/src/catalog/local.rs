//! In-memory catalog, optionally backed by a JSON file.
//!
//! The file is an array of product documents in the bulk upload format, so
//! `imageUrl`, numeric strings and missing ids are all accepted. Documents
//! without an id get a fresh UUID on load. Writes rewrite the whole file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use wishshop_core::{Product, ProductDraft, ProductId};

use super::{CatalogError, CatalogWriter, ProductCatalog, ProductDocument};

/// Catalog held in process memory.
///
/// Clones share the same product list.
#[derive(Debug, Clone, Default)]
pub struct LocalCatalog {
    inner: Arc<LocalCatalogInner>,
}

#[derive(Debug, Default)]
struct LocalCatalogInner {
    products: RwLock<Vec<Product>>,
    path: Option<PathBuf>,
}

impl LocalCatalog {
    /// An empty catalog that is never saved.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog seeded with `products`, never saved.
    #[must_use]
    pub fn with_products(mut products: Vec<Product>) -> Self {
        sort_newest_first(&mut products);
        Self {
            inner: Arc::new(LocalCatalogInner {
                products: RwLock::new(products),
                path: None,
            }),
        }
    }

    /// Load the catalog from `path` and save writes back to it.
    ///
    /// A missing file is an empty catalog; it is created on the first write.
    /// Invalid documents are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file exists but cannot be read, and
    /// `CatalogError::Parse` if it is not a JSON array.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let products = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => parse_documents(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Catalog file not found, starting empty");
                Vec::new()
            }
            Err(source) => return Err(CatalogError::Io { path, source }),
        };

        info!(path = %path.display(), products = products.len(), "Catalog loaded");
        Ok(Self {
            inner: Arc::new(LocalCatalogInner {
                products: RwLock::new(products),
                path: Some(path),
            }),
        })
    }

    /// The backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.inner.path.as_deref()
    }

    async fn save(&self, products: &[Product]) -> Result<(), CatalogError> {
        let Some(path) = &self.inner.path else {
            return Ok(());
        };
        let io_err = |source| CatalogError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(products)?;
        let tmp = path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp).await.map_err(io_err)?;
        file.write_all(json.as_bytes()).await.map_err(io_err)?;
        file.sync_all().await.map_err(io_err)?;
        drop(file);
        tokio::fs::rename(&tmp, path).await.map_err(io_err)?;

        debug!(path = %path.display(), products = products.len(), "Catalog saved");
        Ok(())
    }
}

impl ProductCatalog for LocalCatalog {
    async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.inner.products.read().await.clone())
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.inner.products.read().await;
        Ok(products.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let products = self.inner.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }
}

impl CatalogWriter for LocalCatalog {
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn add_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let now = Utc::now();
        let product = draft.into_product(ProductId::new(Uuid::new_v4().to_string()), now, now);

        let mut products = self.inner.products.write().await;
        products.insert(0, product.clone());
        if let Err(e) = self.save(&products).await {
            products.remove(0);
            return Err(e);
        }

        info!(product_id = %product.id, "Product added");
        Ok(product)
    }

    #[instrument(skip(self, draft), fields(product_id = %id))]
    async fn update_product(
        &self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> Result<Product, CatalogError> {
        let mut products = self.inner.products.write().await;
        let slot = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        let created_at = slot.created_at.unwrap_or_else(Utc::now);
        let updated = draft.into_product(id.clone(), created_at, Utc::now());
        let previous = std::mem::replace(slot, updated.clone());

        if let Err(e) = self.save(&products).await {
            if let Some(slot) = products.iter_mut().find(|p| &p.id == id) {
                *slot = previous;
            }
            return Err(e);
        }

        info!("Product updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_product(&self, id: &ProductId) -> Result<bool, CatalogError> {
        let mut products = self.inner.products.write().await;
        let Some(index) = products.iter().position(|p| &p.id == id) else {
            return Ok(false);
        };

        let removed = products.remove(index);
        if let Err(e) = self.save(&products).await {
            products.insert(index, removed);
            return Err(e);
        }

        info!("Product deleted");
        Ok(true)
    }
}

fn parse_documents(contents: &str) -> Result<Vec<Product>, CatalogError> {
    let documents: Vec<Value> = serde_json::from_str(contents)?;
    let mut products = Vec::with_capacity(documents.len());

    for (index, value) in documents.into_iter().enumerate() {
        let fallback_id = Uuid::new_v4().to_string();
        match ProductDocument::from_json(value).and_then(|doc| doc.into_product(Some(&fallback_id)))
        {
            Ok(product) => products.push(product),
            Err(e) => warn!(index, error = %e, "Skipping invalid product document"),
        }
    }

    sort_newest_first(&mut products);
    Ok(products)
}

/// Newest first; undated products keep their relative order after dated ones.
fn sort_newest_first(products: &mut [Product]) {
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
