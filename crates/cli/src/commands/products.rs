//! Catalog browsing commands.

use wishshop_core::{Product, ProductId};
use wishshop_storefront::StoreContext;

use super::CommandError;
use crate::render;

/// Fetch a product or fail with [`CommandError::ProductNotFound`].
///
/// Catalog outages also surface as not found, since the facade degrades
/// them to `None`.
pub async fn fetch(ctx: &StoreContext, id: &ProductId) -> Result<Product, CommandError> {
    ctx.products()
        .get_by_id(id)
        .await
        .ok_or_else(|| CommandError::ProductNotFound(id.clone()))
}

pub async fn list(ctx: &StoreContext) {
    render::products(&ctx.products().list_all().await);
}

/// Show one product with its cart and wishlist status.
pub async fn show(ctx: &StoreContext, id: &ProductId) -> Result<(), CommandError> {
    let product = fetch(ctx, id).await?;
    render::product_detail(
        &product,
        ctx.cart().quantity_of(id),
        ctx.wishlist().is_wishlisted(id),
    );
    Ok(())
}

pub async fn category(ctx: &StoreContext, name: &str) {
    let products = ctx.products().list_by_category(name).await;
    if products.is_empty() {
        tracing::info!(category = %name, "No products in category");
    }
    render::products(&products);
}

pub async fn categories(ctx: &StoreContext) {
    render::categories(&ctx.products().categories().await);
}
