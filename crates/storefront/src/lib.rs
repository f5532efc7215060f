//! WishShop storefront state layer.
//!
//! Client-side state for a small shop: a cart, a wishlist and a login
//! session, each persisted write-through to a key/value store and rehydrated
//! on start, plus a read facade over the product catalog.
//!
//! [`StoreContext`] wires these together from a [`StorefrontConfig`].
//!
//! ```rust,ignore
//! use wishshop_storefront::{StoreContext, StorefrontConfig};
//!
//! let config = StorefrontConfig::from_env()?;
//! let mut ctx = StoreContext::open(&config).await?;
//!
//! if let Some(product) = ctx.products().get_by_id(&"abc".into()).await {
//!     ctx.cart_mut().add_to_cart(&product, 1, None);
//! }
//! println!("total: {}", ctx.cart().total());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod store;
pub mod wishlist;

pub use cart::CartContainer;
pub use catalog::{CatalogBackend, ProductQuery};
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use session::SessionContainer;
pub use state::StoreContext;
pub use wishlist::WishlistContainer;
