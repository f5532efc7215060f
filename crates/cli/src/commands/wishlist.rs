//! Wishlist commands.

use tracing::info;

use wishshop_core::ProductId;
use wishshop_storefront::StoreContext;

use super::{CommandError, products};
use crate::render;

pub fn show(ctx: &StoreContext) {
    render::wishlist(ctx.wishlist());
}

pub async fn add(ctx: &mut StoreContext, id: &ProductId) -> Result<(), CommandError> {
    let product = products::fetch(ctx, id).await?;
    ctx.wishlist_mut().add_to_wishlist(&product);
    render::wishlist(ctx.wishlist());
    Ok(())
}

/// Remove by id. Works for products that have since left the catalog.
pub fn remove(ctx: &mut StoreContext, id: &ProductId) {
    ctx.wishlist_mut().remove_from_wishlist(id);
    render::wishlist(ctx.wishlist());
}

pub async fn toggle(ctx: &mut StoreContext, id: &ProductId) -> Result<(), CommandError> {
    let product = products::fetch(ctx, id).await?;
    let saved = ctx.wishlist_mut().toggle(&product);
    info!(product_id = %id, saved, "Wishlist toggled");
    render::wishlist(ctx.wishlist());
    Ok(())
}

pub fn clear(ctx: &mut StoreContext) {
    ctx.wishlist_mut().clear_wishlist();
    info!("Wishlist cleared");
}
