//! Cloud Firestore catalog over the REST API.
//!
//! Reads issue the three query shapes the storefront needs: the whole
//! collection ordered by `createdAt` descending, a single document get, and
//! an equality filter on `category`, also newest first. Requests
//! authenticate with the web API key only, so the collection's security
//! rules decide what is readable.

mod convert;

pub use convert::{
    Document, RunQueryResponse, UPDATE_MASK, category_query, decode_value, draft_fields,
    fields_to_json, list_query,
};

use std::sync::Arc;

use chrono::Utc;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};
use url::Url;

use wishshop_core::{Product, ProductDraft, ProductId};

use super::{CatalogError, CatalogWriter, ProductCatalog};
use crate::config::FirestoreConfig;

/// Error bodies are truncated to this many characters in logs and errors.
const MAX_ERROR_BODY: usize = 500;

/// Firestore-backed catalog.
///
/// Cheap to clone; clones share one HTTP connection pool.
#[derive(Clone)]
pub struct FirestoreCatalog {
    inner: Arc<FirestoreCatalogInner>,
}

struct FirestoreCatalogInner {
    client: reqwest::Client,
    /// `.../projects/<project>/databases/(default)/documents`
    documents_url: Url,
    collection: String,
    config: FirestoreConfig,
}

impl std::fmt::Debug for FirestoreCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreCatalog")
            .field("documents_url", &self.inner.documents_url.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl FirestoreCatalog {
    /// Create a client for the configured project and collection.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` if the base URL is not a valid
    /// absolute URL.
    pub fn new(config: &FirestoreConfig) -> Result<Self, CatalogError> {
        let documents_url = Url::parse(&format!(
            "{}/projects/{}/databases/(default)/documents",
            config.base_url.trim_end_matches('/'),
            config.project_id
        ))
        .map_err(|e| CatalogError::Unavailable(format!("invalid Firestore URL: {e}")))?;

        Ok(Self {
            inner: Arc::new(FirestoreCatalogInner {
                client: reqwest::Client::new(),
                documents_url,
                collection: config.collection.clone(),
                config: config.clone(),
            }),
        })
    }

    /// URL of `:runQuery` on the database root.
    fn run_query_url(&self) -> Url {
        let mut url = self.inner.documents_url.clone();
        let path = format!("{}:runQuery", url.path());
        url.set_path(&path);
        self.with_key(url)
    }

    /// URL of the collection, or of one document in it.
    fn document_url(&self, id: Option<&ProductId>) -> Result<Url, CatalogError> {
        let mut url = self.inner.documents_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| CatalogError::Unavailable("Firestore URL cannot be a base".into()))?;
            segments.push(&self.inner.collection);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(self.with_key(url))
    }

    fn with_key(&self, mut url: Url) -> Url {
        url.query_pairs_mut()
            .append_pair("key", self.inner.config.api_key.expose_secret());
        url
    }

    /// Send a request and return the body.
    ///
    /// `Ok(None)` means the resource does not exist (404).
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Option<String>, CatalogError> {
        let mut request = self.inner.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            debug!(%method, "Firestore resource not found");
            return Ok(None);
        }

        if !status.is_success() {
            let body: String = text.chars().take(MAX_ERROR_BODY).collect();
            tracing::error!(
                status = %status,
                body = %body,
                "Firestore returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Some(text))
    }

    async fn run_query(&self, query: &Value) -> Result<Vec<Product>, CatalogError> {
        let text = self
            .send(Method::POST, self.run_query_url(), Some(query))
            .await?
            .ok_or_else(|| CatalogError::Unavailable("database not found".to_string()))?;

        let rows: Vec<RunQueryResponse> = serde_json::from_str(&text)?;
        let products = rows
            .into_iter()
            .filter_map(|row| row.document)
            .filter_map(|document| {
                let name = document.name.clone();
                document
                    .into_product()
                    .inspect_err(|e| {
                        warn!(document = %name, error = %e, "Skipping invalid product document");
                    })
                    .ok()
            })
            .collect();
        Ok(products)
    }

    async fn fetch_document(&self, id: &ProductId) -> Result<Option<Document>, CatalogError> {
        let Some(text) = self
            .send(Method::GET, self.document_url(Some(id))?, None)
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&text)?))
    }
}

impl ProductCatalog for FirestoreCatalog {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        self.run_query(&list_query(&self.inner.collection)).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        match self.fetch_document(id).await? {
            Some(document) => Ok(Some(document.into_product()?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        self.run_query(&category_query(&self.inner.collection, category))
            .await
    }
}

impl CatalogWriter for FirestoreCatalog {
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn add_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let now = Utc::now();
        let body = json!({ "fields": draft_fields(&draft, Some(now), now) });

        let text = self
            .send(Method::POST, self.document_url(None)?, Some(&body))
            .await?
            .ok_or_else(|| CatalogError::Unavailable("collection not found".to_string()))?;
        let document: Document = serde_json::from_str(&text)?;
        let product = document.into_product()?;

        info!(product_id = %product.id, "Product added");
        Ok(product)
    }

    #[instrument(skip(self, draft), fields(product_id = %id))]
    async fn update_product(
        &self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> Result<Product, CatalogError> {
        let body = json!({ "fields": draft_fields(&draft, None, Utc::now()) });

        let mut url = self.document_url(Some(id))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("currentDocument.exists", "true");
            for path in UPDATE_MASK {
                query.append_pair("updateMask.fieldPaths", path);
            }
        }

        let text = self
            .send(Method::PATCH, url, Some(&body))
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let document: Document = serde_json::from_str(&text)?;
        let product = document.into_product()?;

        info!("Product updated");
        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_product(&self, id: &ProductId) -> Result<bool, CatalogError> {
        let mut url = self.document_url(Some(id))?;
        url.query_pairs_mut()
            .append_pair("currentDocument.exists", "true");

        let deleted = self.send(Method::DELETE, url, None).await?.is_some();
        if deleted {
            info!("Product deleted");
        }
        Ok(deleted)
    }
}
