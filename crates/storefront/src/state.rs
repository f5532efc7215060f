//! Bootstrap context owning every container.
//!
//! One `StoreContext` exists per client run. It is built once, rehydrates
//! the cart, wishlist and session from a shared [`JsonStore`], and is passed
//! by `&mut` to whatever drives the UI.

use tracing::info;

use crate::cart::CartContainer;
use crate::catalog::{CatalogBackend, FirestoreCatalog, LocalCatalog, ProductCatalog, ProductQuery};
use crate::config::{CatalogSource, StorefrontConfig};
use crate::error::Result;
use crate::session::{IdentityProvider, MockIdentityProvider, SessionContainer};
use crate::store::{FileStore, JsonStore};
use crate::wishlist::WishlistContainer;

/// Cart, wishlist, session and product facade for one client run.
#[derive(Debug)]
pub struct StoreContext<P = MockIdentityProvider, C = CatalogBackend> {
    cart: CartContainer,
    wishlist: WishlistContainer,
    session: SessionContainer<P>,
    products: ProductQuery<C>,
}

impl StoreContext {
    /// Open the configured data directory and catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created, the local
    /// catalog file is unreadable, or the Firestore URL is invalid.
    pub async fn open(config: &StorefrontConfig) -> Result<Self> {
        let store = JsonStore::new(FileStore::open(&config.data_dir)?);
        let catalog = match &config.catalog {
            CatalogSource::Local { path } => CatalogBackend::from(LocalCatalog::open(path).await?),
            CatalogSource::Firestore(firestore) => {
                CatalogBackend::from(FirestoreCatalog::new(firestore)?)
            }
        };

        info!(
            data_dir = %config.data_dir.display(),
            catalog = catalog_kind(&catalog),
            "Store context opened"
        );
        Ok(Self::from_parts(store, MockIdentityProvider::new(), catalog))
    }
}

impl<P: IdentityProvider, C: ProductCatalog> StoreContext<P, C> {
    /// Assemble a context from explicit parts, rehydrating the containers.
    pub fn from_parts(store: JsonStore, provider: P, catalog: C) -> Self {
        Self {
            cart: CartContainer::new(store.clone()),
            wishlist: WishlistContainer::new(store.clone()),
            session: SessionContainer::new(store, provider),
            products: ProductQuery::new(catalog),
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &CartContainer {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartContainer {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistContainer {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistContainer {
        &mut self.wishlist
    }

    #[must_use]
    pub const fn session(&self) -> &SessionContainer<P> {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut SessionContainer<P> {
        &mut self.session
    }

    /// The product read facade.
    #[must_use]
    pub const fn products(&self) -> &ProductQuery<C> {
        &self.products
    }
}

const fn catalog_kind(catalog: &CatalogBackend) -> &'static str {
    match catalog {
        CatalogBackend::Local(_) => "local",
        CatalogBackend::Firestore(_) => "firestore",
    }
}
