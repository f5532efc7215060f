//! Loosely-typed catalog documents and their validation into [`Product`].
//!
//! The catalog is a schemaless document store. Anything read from it passes
//! through [`ProductDocument::into_product`] before reaching the containers,
//! and documents that fail are logged and skipped by the caller.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use wishshop_core::{Price, Product, ProductDraft, ProductId};

/// Image shown when a document carries none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Why a document could not become a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("document is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("invalid stock: {0}")]
    InvalidStock(String),

    /// A field holds the wrong JSON type.
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// A product document as stored, before validation.
///
/// Numbers may arrive as JSON numbers or numeric strings. `imageUrl` is
/// accepted as an alias of `image`, the field name used by the bulk upload
/// format.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub stock: Option<Value>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub specifications: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductDocument {
    /// Read a document from an untyped JSON object.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Malformed` if a field has the wrong type.
    pub fn from_json(value: Value) -> Result<Self, DocumentError> {
        serde_json::from_value(value).map_err(|e| DocumentError::Malformed(e.to_string()))
    }

    /// Validate into a [`Product`].
    ///
    /// `id` is used when the document body has no `id` field (document
    /// stores usually keep it in the document path instead).
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if `id`, `name`, `price`, `category` or
    /// `stock` is missing, or if price/stock are negative or not numeric.
    pub fn into_product(self, id: Option<&str>) -> Result<Product, DocumentError> {
        let id = self
            .id
            .as_deref()
            .or(id)
            .filter(|id| !id.is_empty())
            .map(ProductId::new)
            .ok_or(DocumentError::MissingField("id"))?;
        let name = non_empty(self.name).ok_or(DocumentError::MissingField("name"))?;
        let category = non_empty(self.category).ok_or(DocumentError::MissingField("category"))?;
        let price = parse_price(self.price.ok_or(DocumentError::MissingField("price"))?)?;
        let stock = parse_stock(self.stock.ok_or(DocumentError::MissingField("stock"))?)?;

        Ok(Product {
            id,
            name,
            description: self.description.unwrap_or_default(),
            price,
            category,
            image: non_empty(self.image).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned()),
            images: self.images.unwrap_or_default(),
            stock,
            colors: self.colors.unwrap_or_default(),
            specifications: self.specifications,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Admin-form rules for a product draft.
///
/// Returns every violation rather than stopping at the first, so the form
/// can show them together. An empty list means the draft is acceptable.
#[must_use]
pub fn validate_draft(draft: &ProductDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.name.trim().chars().count() < 2 {
        errors.push("name must be at least 2 characters".to_string());
    }
    if draft.description.trim().chars().count() < 10 {
        errors.push("description must be at least 10 characters".to_string());
    }
    if draft.price == Price::ZERO {
        errors.push("price must be a positive number".to_string());
    }
    if draft.category.trim().is_empty() {
        errors.push("category is required".to_string());
    }
    if draft.image.trim().is_empty() {
        errors.push("image is required".to_string());
    }
    errors
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_price(value: Value) -> Result<Price, DocumentError> {
    match value {
        Value::Number(n) => {
            let amount = n
                .as_f64()
                .ok_or_else(|| DocumentError::InvalidPrice(n.to_string()))?;
            Price::from_f64(amount).map_err(|e| DocumentError::InvalidPrice(e.to_string()))
        }
        Value::String(s) => s
            .trim()
            .parse::<rust_decimal::Decimal>()
            .map_err(|e| DocumentError::InvalidPrice(format!("{s:?}: {e}")))
            .and_then(|d| Price::new(d).map_err(|e| DocumentError::InvalidPrice(e.to_string()))),
        other => Err(DocumentError::InvalidPrice(other.to_string())),
    }
}

fn parse_stock(value: Value) -> Result<u32, DocumentError> {
    let parsed = match &value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| DocumentError::InvalidStock(value.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> ProductDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_complete_document() {
        let product = doc(json!({
            "id": "abc",
            "name": "Headphones",
            "description": "Over-ear",
            "price": 129.99,
            "category": "Electronics",
            "image": "/images/headphones.jpg",
            "images": ["/images/headphone.jpg"],
            "stock": 4,
            "colors": ["black"],
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .into_product(None)
        .unwrap();

        assert_eq!(product.id.as_str(), "abc");
        assert_eq!(product.price, Price::from_cents(12999));
        assert_eq!(product.images.len(), 1);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_id_from_path_and_upload_aliases() {
        let product = doc(json!({
            "name": "Shoes",
            "price": "59.5",
            "category": "Sports",
            "imageUrl": "/images/runningShoes.jpg",
            "stock": "12"
        }))
        .into_product(Some("doc-7"))
        .unwrap();

        assert_eq!(product.id.as_str(), "doc-7");
        assert_eq!(product.image, "/images/runningShoes.jpg");
        assert_eq!(product.stock, 12);
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_missing_image_uses_placeholder() {
        let product = doc(json!({"name": "X", "price": 1, "category": "Other", "stock": 0}))
            .into_product(Some("x"))
            .unwrap();
        assert_eq!(product.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_missing_required_fields() {
        let base = json!({"name": "X", "price": 1, "category": "Other", "stock": 0});
        for field in ["name", "price", "category", "stock"] {
            let mut value = base.clone();
            value.as_object_mut().unwrap().remove(field);
            assert_eq!(
                doc(value).into_product(Some("x")),
                Err(DocumentError::MissingField(field))
            );
        }
        assert_eq!(
            doc(base).into_product(None),
            Err(DocumentError::MissingField("id"))
        );
    }

    #[test]
    fn test_wrong_field_type_is_malformed() {
        let err = ProductDocument::from_json(json!({"name": 42})).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }

    #[test]
    fn test_rejects_negative_numbers() {
        let negative_price = doc(json!({"name": "X", "price": -1, "category": "C", "stock": 1}));
        assert!(matches!(
            negative_price.into_product(Some("x")),
            Err(DocumentError::InvalidPrice(_))
        ));

        let negative_stock = doc(json!({"name": "X", "price": 1, "category": "C", "stock": -2}));
        assert!(matches!(
            negative_stock.into_product(Some("x")),
            Err(DocumentError::InvalidStock(_))
        ));
    }

    #[test]
    fn test_validate_draft_collects_all_errors() {
        let draft = ProductDraft {
            name: "A".to_string(),
            description: "short".to_string(),
            price: Price::ZERO,
            category: String::new(),
            image: String::new(),
            images: vec![],
            stock: 0,
            colors: vec![],
            specifications: None,
        };
        assert_eq!(validate_draft(&draft).len(), 5);

        let ok = ProductDraft {
            name: "Desk Lamp".to_string(),
            description: "Warm light, dimmable".to_string(),
            price: Price::from_cents(2500),
            category: "Home & Garden".to_string(),
            image: "/images/lamp.jpg".to_string(),
            ..draft
        };
        assert!(validate_draft(&ok).is_empty());
    }
}
