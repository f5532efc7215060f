//! Catalog product management.
//!
//! Product files are JSON objects with the admin form's fields:
//!
//! ```json
//! {
//!   "name": "Running Shoes",
//!   "description": "Lightweight trainers for daily runs",
//!   "price": 79.99,
//!   "category": "Sports",
//!   "image": "/images/runningShoes.jpg",
//!   "stock": 12,
//!   "colors": ["white", "black"]
//! }
//! ```

use std::path::Path;

use tracing::{error, info};

use wishshop_core::{ProductDraft, ProductId};
use wishshop_storefront::StoreContext;
use wishshop_storefront::catalog::validate_draft;

use super::CommandError;
use crate::render;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Read and validate a product file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any field
/// fails the admin form's rules.
pub async fn read_draft(path: &Path) -> Result<ProductDraft, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let draft: ProductDraft = serde_json::from_str(&content)?;

    let errors = validate_draft(&draft);
    if !errors.is_empty() {
        error!("Product validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(CommandError::InvalidProduct(errors).into());
    }
    Ok(draft)
}

pub async fn add(ctx: &StoreContext, file: &Path) -> CommandResult {
    let draft = read_draft(file).await?;
    let product = ctx.products().add_product(draft).await?;
    info!(product_id = %product.id, "Product created");
    render::product_detail(&product, 0, false);
    Ok(())
}

pub async fn update(ctx: &StoreContext, id: &ProductId, file: &Path) -> CommandResult {
    let draft = read_draft(file).await?;
    let product = ctx.products().update_product(id, draft).await?;
    render::product_detail(&product, ctx.cart().quantity_of(id), ctx.wishlist().is_wishlisted(id));
    Ok(())
}

/// Delete `id`. Cart lines and wishlist entries holding it are left alone;
/// they are snapshots.
pub async fn delete(ctx: &StoreContext, id: &ProductId) -> CommandResult {
    if !ctx.products().delete_product(id).await? {
        return Err(CommandError::ProductNotFound(id.clone()).into());
    }
    info!(product_id = %id, "Product deleted");
    Ok(())
}
