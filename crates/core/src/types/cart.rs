//! Cart line item type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// One row in the cart: a product/color pair and its quantity.
///
/// `name`, `price` and `image_url` are snapshot fields copied from the
/// product when the line was created. They do not follow later catalog
/// changes, so the line keeps showing the price quoted at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    /// Always positive while the line exists.
    pub quantity: u32,
    pub name: String,
    pub price: Price,
    pub image_url: String,
}

impl CartLineItem {
    /// Snapshot `product` into a new line.
    #[must_use]
    pub fn snapshot(product: &Product, quantity: u32, selected_color: Option<String>) -> Self {
        Self {
            product_id: product.id.clone(),
            selected_color,
            quantity,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image.clone(),
        }
    }

    /// Whether this line is the one keyed by `(product_id, color)`.
    ///
    /// Two absent colors match each other.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, color: Option<&str>) -> bool {
        &self.product_id == product_id && self.selected_color.as_deref() == color
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}
