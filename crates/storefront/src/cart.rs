//! Cart container.
//!
//! Lines are keyed by `(product id, selected color)` when adding, but
//! [`remove_from_cart`](CartContainer::remove_from_cart) and
//! [`update_quantity`](CartContainer::update_quantity) address a product id
//! and therefore act on every color variant of it. Callers depend on that
//! coarser behavior; keep the two keys distinct.
//!
//! Totals are always derived from the line list and never stored, including
//! in the persisted snapshot.

use rust_decimal::Decimal;
use tracing::debug;

use wishshop_core::{CartLineItem, Product, ProductId};

use crate::store::{CART_KEY, JsonStore};

/// The client's shopping cart.
///
/// Every mutation writes the full line list through to the store.
#[derive(Debug)]
pub struct CartContainer {
    lines: Vec<CartLineItem>,
    store: JsonStore,
}

impl CartContainer {
    /// Create the cart, rehydrating lines from the store.
    ///
    /// Missing or unreadable data yields an empty cart. Lines persisted with
    /// a zero quantity are dropped.
    pub fn new(store: JsonStore) -> Self {
        let mut lines: Vec<CartLineItem> = store.load(CART_KEY).unwrap_or_default();
        lines.retain(|line| line.quantity > 0);
        debug!(lines = lines.len(), "Cart rehydrated");
        Self { lines, store }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price * quantity` over all lines, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLineItem::line_total)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .unwrap_or(Decimal::MAX)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Units of `product_id` in the cart, across all colors.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u64 {
        self.lines
            .iter()
            .filter(|line| &line.product_id == product_id)
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Find the line for `(product_id, color)`.
    #[must_use]
    pub fn line(&self, product_id: &ProductId, color: Option<&str>) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.matches(product_id, color))
    }

    /// Add `quantity` units of `product` in `color`.
    ///
    /// A zero quantity is ignored. An existing line with the same key
    /// accumulates; otherwise a new line snapshots the product's name, price
    /// and image as they are now.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32, color: Option<&str>) {
        if quantity == 0 {
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&product.id, color))
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLineItem::snapshot(
                product,
                quantity,
                color.map(str::to_owned),
            ));
        }
        self.persist();
    }

    /// Remove every line for `product_id`, whatever its color.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| &line.product_id != product_id);
        self.persist();
    }

    /// Set the quantity of every line for `product_id`.
    ///
    /// Not additive. `quantity <= 0` removes the product like
    /// [`remove_from_cart`](Self::remove_from_cart). Stock limits are the
    /// caller's responsibility.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        for line in self
            .lines
            .iter_mut()
            .filter(|line| &line.product_id == product_id)
        {
            line.quantity = quantity;
        }
        self.persist();
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.persist();
    }

    fn persist(&self) {
        self.store.save(CART_KEY, &self.lines);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wishshop_core::Price;

    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};

    fn product(id: &str, cents: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents),
            category: "Electronics".to_string(),
            image: format!("/images/{id}.jpg"),
            images: Vec::new(),
            stock: 10,
            colors: vec!["red".to_string(), "blue".to_string()],
            specifications: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn new_cart(backend: &MemoryStore) -> CartContainer {
        CartContainer::new(JsonStore::new(backend.clone()))
    }

    #[test]
    fn test_same_key_accumulates() {
        let mut cart = new_cart(&MemoryStore::new());
        let p = product("p1", 1999);

        cart.add_to_cart(&p, 2, None);
        cart.add_to_cart(&p, 3, None);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().unwrap().quantity, 5);
        assert_eq!(cart.total(), p.price.times(5));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_color_is_part_of_add_key_but_not_remove_key() {
        let mut cart = new_cart(&MemoryStore::new());
        let p = product("p1", 1000);

        cart.add_to_cart(&p, 1, Some("red"));
        cart.add_to_cart(&p, 1, Some("blue"));
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.line(&p.id, Some("red")).unwrap().quantity, 1);

        cart.remove_from_cart(&p.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_quantity_add_is_ignored() {
        let backend = MemoryStore::new();
        let mut cart = new_cart(&backend);
        cart.add_to_cart(&product("p1", 100), 0, None);

        assert!(cart.is_empty());
        assert_eq!(backend.get_item(CART_KEY).unwrap(), None);
    }

    #[test]
    fn test_update_quantity_sets_not_adds() {
        let mut cart = new_cart(&MemoryStore::new());
        let p = product("p1", 250);
        cart.add_to_cart(&p, 4, None);

        cart.update_quantity(&p.id, 2);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), Decimal::new(500, 2));
    }

    #[test]
    fn test_update_quantity_applies_to_every_variant() {
        let mut cart = new_cart(&MemoryStore::new());
        let p = product("p1", 100);
        cart.add_to_cart(&p, 1, Some("red"));
        cart.add_to_cart(&p, 5, Some("blue"));

        cart.update_quantity(&p.id, 3);
        assert!(cart.lines().iter().all(|line| line.quantity == 3));
        assert_eq!(cart.quantity_of(&p.id), 6);
    }

    #[test]
    fn test_quantity_floor_removes_line() {
        let mut cart = new_cart(&MemoryStore::new());
        let a = product("a", 100);
        let b = product("b", 100);
        cart.add_to_cart(&a, 1, None);
        cart.add_to_cart(&b, 1, None);

        cart.update_quantity(&a.id, 0);
        assert!(cart.line(&a.id, None).is_none());

        cart.update_quantity(&b.id, -5);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let mut cart = new_cart(&MemoryStore::new());
        cart.add_to_cart(&product("a", 100), 1, None);
        cart.update_quantity(&ProductId::new("ghost"), 7);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_snapshot_fields_do_not_follow_catalog() {
        let mut cart = new_cart(&MemoryStore::new());
        let mut p = product("p1", 1000);
        cart.add_to_cart(&p, 1, None);

        p.price = Price::from_cents(5000);
        p.name = "Renamed".to_string();
        cart.add_to_cart(&p, 1, None);

        let line = cart.line(&p.id, None).unwrap();
        assert_eq!(line.price, Price::from_cents(1000));
        assert_eq!(line.name, "Product p1");
        assert_eq!(cart.total(), Decimal::new(2000, 2));
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = new_cart(&MemoryStore::new());
        cart.add_to_cart(&product("a", 100), 2, None);
        cart.clear_cart();
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_restart_recomputes_totals() {
        let backend = MemoryStore::new();
        let (total, count) = {
            let mut cart = new_cart(&backend);
            cart.add_to_cart(&product("a", 1999), 2, Some("red"));
            cart.add_to_cart(&product("b", 500), 3, None);
            (cart.total(), cart.item_count())
        };

        let cart = new_cart(&backend);
        assert_eq!(cart.total(), total);
        assert_eq!(cart.item_count(), count);
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_rehydrate_ignores_foreign_fields_and_zero_lines() {
        let backend = MemoryStore::new();
        backend
            .set_item(
                CART_KEY,
                r#"[
                    {"productId":"a","quantity":2,"name":"A","price":"1.50","imageUrl":"/a.jpg","total":999},
                    {"productId":"b","quantity":0,"name":"B","price":"3.00","imageUrl":"/b.jpg"}
                ]"#,
            )
            .unwrap();

        let cart = new_cart(&backend);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), Decimal::new(300, 2));
    }

    #[test]
    fn test_huge_total_saturates() {
        let mut cart = new_cart(&MemoryStore::new());
        let mut expensive = product("p1", 0);
        expensive.price = Price::new(Decimal::from_i128_with_scale(10_i128.pow(20), 0)).unwrap();
        let mut other = product("p2", 0);
        other.price = Price::new(Decimal::MAX).unwrap();

        cart.add_to_cart(&expensive, 1, None);
        cart.update_quantity(&expensive.id, 10_000_000_000);
        assert_eq!(cart.lines().first().unwrap().quantity, u32::MAX);
        assert_eq!(cart.total(), Decimal::MAX);

        cart.clear_cart();
        cart.add_to_cart(&other, 1, None);
        cart.add_to_cart(&expensive, 1, None);
        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let backend = MemoryStore::new();
        backend.set_item(CART_KEY, "not json at all").unwrap();
        assert!(new_cart(&backend).is_empty());
    }
}
