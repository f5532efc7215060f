//! Wishlist container.

use tracing::debug;

use wishshop_core::{Product, ProductId};

use crate::store::{JsonStore, WISHLIST_KEY};

/// Saved products, unique by id, in the order they were added.
///
/// Entries are full product snapshots. Membership checks are a linear scan;
/// wishlists stay in the tens to low hundreds of entries.
#[derive(Debug)]
pub struct WishlistContainer {
    items: Vec<Product>,
    store: JsonStore,
}

impl WishlistContainer {
    /// Create the wishlist, rehydrating entries from the store.
    ///
    /// Duplicate ids in a persisted snapshot are collapsed to the first
    /// occurrence.
    pub fn new(store: JsonStore) -> Self {
        let persisted: Vec<Product> = store.load(WISHLIST_KEY).unwrap_or_default();
        let mut items: Vec<Product> = Vec::with_capacity(persisted.len());
        for product in persisted {
            if !items.iter().any(|p| p.id == product.id) {
                items.push(product);
            }
        }
        debug!(items = items.len(), "Wishlist rehydrated");
        Self { items, store }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `product_id` is saved.
    #[must_use]
    pub fn is_wishlisted(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == product_id)
    }

    /// Save `product` unless it is already present.
    ///
    /// Re-adding neither duplicates nor moves the existing entry, and does
    /// not refresh its snapshot.
    pub fn add_to_wishlist(&mut self, product: &Product) {
        if self.is_wishlisted(&product.id) {
            return;
        }
        self.items.push(product.clone());
        self.persist();
    }

    /// Drop `product_id` if present.
    pub fn remove_from_wishlist(&mut self, product_id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|p| &p.id != product_id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Add if absent, remove if present. Returns whether the product is
    /// wishlisted afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.is_wishlisted(&product.id) {
            self.remove_from_wishlist(&product.id);
            false
        } else {
            self.add_to_wishlist(product);
            true
        }
    }

    /// Empty the wishlist.
    pub fn clear_wishlist(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn persist(&self) {
        self.store.save(WISHLIST_KEY, &self.items);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wishshop_core::Price;

    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: "desc".to_string(),
            price: Price::from_cents(1000),
            category: "Books".to_string(),
            image: "/images/ii.png".to_string(),
            images: vec![],
            stock: 1,
            colors: vec![],
            specifications: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn new_wishlist(backend: &MemoryStore) -> WishlistContainer {
        WishlistContainer::new(JsonStore::new(backend.clone()))
    }

    fn ids(wishlist: &WishlistContainer) -> Vec<&str> {
        wishlist.items().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_add_is_idempotent_and_keeps_position() {
        let mut wishlist = new_wishlist(&MemoryStore::new());
        wishlist.add_to_wishlist(&product("a"));
        wishlist.add_to_wishlist(&product("b"));
        let once = ids(&wishlist).join(",");

        wishlist.add_to_wishlist(&product("a"));
        assert_eq!(ids(&wishlist).join(","), once);
        assert_eq!(wishlist.len(), 2);
    }

    #[test]
    fn test_readd_keeps_original_snapshot() {
        let mut wishlist = new_wishlist(&MemoryStore::new());
        wishlist.add_to_wishlist(&product("a"));

        let mut changed = product("a");
        changed.name = "New name".to_string();
        wishlist.add_to_wishlist(&changed);

        assert_eq!(wishlist.items().first().unwrap().name, "Product a");
    }

    #[test]
    fn test_remove_and_query() {
        let mut wishlist = new_wishlist(&MemoryStore::new());
        wishlist.add_to_wishlist(&product("a"));
        assert!(wishlist.is_wishlisted(&ProductId::new("a")));

        wishlist.remove_from_wishlist(&ProductId::new("a"));
        assert!(!wishlist.is_wishlisted(&ProductId::new("a")));

        // Removing something absent is a no-op.
        wishlist.remove_from_wishlist(&ProductId::new("zzz"));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut wishlist = new_wishlist(&MemoryStore::new());
        let p = product("a");
        assert!(wishlist.toggle(&p));
        assert!(!wishlist.toggle(&p));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_order_survives_restart() {
        let backend = MemoryStore::new();
        {
            let mut wishlist = new_wishlist(&backend);
            for id in ["c", "a", "b"] {
                wishlist.add_to_wishlist(&product(id));
            }
        }

        let wishlist = new_wishlist(&backend);
        assert_eq!(ids(&wishlist), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let backend = MemoryStore::new();
        let mut wishlist = new_wishlist(&backend);
        wishlist.add_to_wishlist(&product("a"));
        wishlist.clear_wishlist();

        assert_eq!(backend.get_item(WISHLIST_KEY).unwrap().as_deref(), Some("[]"));
        assert!(new_wishlist(&backend).is_empty());
    }

    #[test]
    fn test_rehydrate_collapses_duplicates() {
        let backend = MemoryStore::new();
        let store = JsonStore::new(backend.clone());
        store.save(WISHLIST_KEY, &vec![product("a"), product("b"), product("a")]);

        let wishlist = new_wishlist(&backend);
        assert_eq!(ids(&wishlist), vec!["a", "b"]);
    }
}
