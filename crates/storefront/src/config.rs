//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## General
//! - `WISHSHOP_DATA_DIR` - Directory for persisted client state (default: `.wishshop`)
//! - `WISHSHOP_CATALOG` - Catalog backend, `local` or `firestore` (default: `local`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (default: `development`)
//!
//! ## Local catalog
//! - `WISHSHOP_CATALOG_FILE` - Product file (default: `data/products.json`)
//!
//! ## Firestore catalog
//! - `FIRESTORE_PROJECT_ID` - Google Cloud project id (required)
//! - `FIRESTORE_API_KEY` - Web API key (required)
//! - `FIRESTORE_COLLECTION` - Products collection (default: `products`)
//! - `FIRESTORE_BASE_URL` - REST endpoint, e.g. an emulator (default: `https://firestore.googleapis.com/v1`)

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

pub const DEFAULT_DATA_DIR: &str = ".wishshop";
pub const DEFAULT_CATALOG_FILE: &str = "data/products.json";
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_FIRESTORE_COLLECTION: &str = "products";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the persisted cart, wishlist and session
    pub data_dir: PathBuf,
    /// Where products come from
    pub catalog: CatalogSource,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: String,
}

/// The configured catalog backend.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// JSON product file on disk.
    Local { path: PathBuf },
    /// Cloud Firestore collection.
    Firestore(FirestoreConfig),
}

/// Firestore REST configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: SecretString,
    pub collection: String,
    /// REST root, without the `/projects/...` suffix
    pub base_url: String,
}

impl std::fmt::Debug for FirestoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreConfig")
            .field("project_id", &self.project_id)
            .field("api_key", &"[REDACTED]")
            .field("collection", &self.collection)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FirestoreConfig {
    /// Configuration for `project_id` with default collection and endpoint.
    #[must_use]
    pub fn new(project_id: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            project_id: project_id.into(),
            api_key,
            collection: DEFAULT_FIRESTORE_COLLECTION.to_string(),
            base_url: DEFAULT_FIRESTORE_BASE_URL.to_string(),
        }
    }

    fn from_lookup(env: &Lookup<'_>) -> Result<Self, ConfigError> {
        let api_key = get_required(env, "FIRESTORE_API_KEY")?;
        validate_secret_strength(&api_key, "FIRESTORE_API_KEY")?;

        Ok(Self {
            project_id: get_required(env, "FIRESTORE_PROJECT_ID")?,
            api_key: SecretString::from(api_key),
            collection: get_or_default(env, "FIRESTORE_COLLECTION", DEFAULT_FIRESTORE_COLLECTION),
            base_url: get_or_default(env, "FIRESTORE_BASE_URL", DEFAULT_FIRESTORE_BASE_URL),
        })
    }
}

impl Default for StorefrontConfig {
    /// Local catalog, default paths, no Sentry.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog: CatalogSource::Local {
                path: PathBuf::from(DEFAULT_CATALOG_FILE),
            },
            sentry_dsn: None,
            sentry_environment: "development".to_string(),
        }
    }
}

type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the Firestore API key looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog = match get_or_default(env, "WISHSHOP_CATALOG", "local")
            .to_ascii_lowercase()
            .as_str()
        {
            "local" => CatalogSource::Local {
                path: PathBuf::from(get_or_default(
                    env,
                    "WISHSHOP_CATALOG_FILE",
                    DEFAULT_CATALOG_FILE,
                )),
            },
            "firestore" => CatalogSource::Firestore(FirestoreConfig::from_lookup(env)?),
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "WISHSHOP_CATALOG".to_string(),
                    format!("expected `local` or `firestore`, got `{other}`"),
                ));
            }
        };

        Ok(Self {
            data_dir: PathBuf::from(get_or_default(env, "WISHSHOP_DATA_DIR", DEFAULT_DATA_DIR)),
            catalog,
            sentry_dsn: get_optional(env, "SENTRY_DSN"),
            sentry_environment: get_or_default(env, "SENTRY_ENVIRONMENT", "development"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_optional(env: &Lookup<'_>, key: &str) -> Option<String> {
    env(key).filter(|v| !v.trim().is_empty())
}

fn get_required(env: &Lookup<'_>, key: &str) -> Result<String, ConfigError> {
    get_optional(env, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_or_default(env: &Lookup<'_>, key: &str, default: &str) -> String {
    get_optional(env, key).unwrap_or_else(|| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject placeholder values and low-entropy keys.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
