//! Catalog product types.
//!
//! Products are owned by the external catalog. The state layer only holds
//! snapshots of them (wishlist entries, cart line display fields) and never
//! writes them back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A sellable product as returned by the catalog.
///
/// `stock == 0` is valid data; callers decide whether to block cart
/// increases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog-assigned stable identifier.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Free-text classification label, matched case-sensitively.
    pub category: String,
    /// Main display image path.
    pub image: String,
    /// Additional display images, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Units available.
    pub stock: u32,
    /// Selectable color labels, not validated against a palette.
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    /// Catalog-assigned creation time; drives newest-first listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether `quantity` units can be held in a cart.
    #[must_use]
    pub const fn can_fulfil(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }

    /// Whether `color` is one of the product's selectable colors.
    ///
    /// Products without a color list accept no color selection.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// The fields an admin edits, without id or timestamps.
    #[must_use]
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category.clone(),
            image: self.image.clone(),
            images: self.images.clone(),
            stock: self.stock,
            colors: self.colors.clone(),
            specifications: self.specifications.clone(),
        }
    }
}

/// Product fields supplied by the admin forms.
///
/// The catalog assigns `id`, `createdAt` and `updatedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub stock: u32,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
}

impl ProductDraft {
    /// Turn the draft into a product with catalog-assigned metadata.
    #[must_use]
    pub fn into_product(
        self,
        id: ProductId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            images: self.images,
            stock: self.stock,
            colors: self.colors,
            specifications: self.specifications,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }
}
