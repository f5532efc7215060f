//! Cart commands.
//!
//! The cart container accepts any quantity. Stock and color checks happen
//! here, against the product as the catalog currently reports it.

use tracing::info;

use wishshop_core::{Product, ProductId};
use wishshop_storefront::StoreContext;

use super::{CommandError, products};
use crate::render;

pub fn show(ctx: &StoreContext) {
    render::cart(ctx.cart());
}

/// Add `quantity` units of `id` in `color`.
pub async fn add(
    ctx: &mut StoreContext,
    id: &ProductId,
    quantity: u32,
    color: Option<&str>,
) -> Result<(), CommandError> {
    let product = products::fetch(ctx, id).await?;
    check_add(&product, ctx.cart().quantity_of(id), quantity, color)?;

    ctx.cart_mut().add_to_cart(&product, quantity, color);
    info!(product_id = %id, quantity, color, "Added to cart");
    render::cart(ctx.cart());
    Ok(())
}

/// Set the quantity of every line for `id`.
pub async fn update(
    ctx: &mut StoreContext,
    id: &ProductId,
    quantity: i64,
) -> Result<(), CommandError> {
    if quantity > 0 {
        let product = products::fetch(ctx, id).await?;
        let variants = ctx
            .cart()
            .lines()
            .iter()
            .filter(|line| &line.product_id == id)
            .count();
        check_update(&product, variants, quantity)?;
    }

    ctx.cart_mut().update_quantity(id, quantity);
    render::cart(ctx.cart());
    Ok(())
}

pub fn remove(ctx: &mut StoreContext, id: &ProductId) {
    ctx.cart_mut().remove_from_cart(id);
    render::cart(ctx.cart());
}

pub fn clear(ctx: &mut StoreContext) {
    ctx.cart_mut().clear_cart();
    info!("Cart cleared");
}

fn check_add(
    product: &Product,
    in_cart: u64,
    quantity: u32,
    color: Option<&str>,
) -> Result<(), CommandError> {
    if let Some(color) = color
        && !product.offers_color(color)
    {
        return Err(CommandError::ColorUnavailable {
            name: product.name.clone(),
            color: color.to_string(),
        });
    }

    if in_cart + u64::from(quantity) > u64::from(product.stock) {
        return Err(out_of_stock(product));
    }
    Ok(())
}

/// `quantity` is applied to each of `variants` lines, so the product total
/// becomes `quantity * variants`.
fn check_update(product: &Product, variants: usize, quantity: i64) -> Result<(), CommandError> {
    let variants = i64::try_from(variants.max(1)).unwrap_or(i64::MAX);
    if quantity.saturating_mul(variants) > i64::from(product.stock) {
        return Err(out_of_stock(product));
    }
    Ok(())
}

fn out_of_stock(product: &Product) -> CommandError {
    CommandError::OutOfStock {
        name: product.name.clone(),
        available: product.stock,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wishshop_core::Price;

    use super::*;

    fn product(stock: u32, colors: &[&str]) -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Sneaker".to_string(),
            description: String::new(),
            price: Price::from_cents(5000),
            category: "Sports".to_string(),
            image: String::new(),
            images: vec![],
            stock,
            colors: colors.iter().map(ToString::to_string).collect(),
            specifications: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_add_within_stock() {
        assert!(check_add(&product(3, &[]), 1, 2, None).is_ok());
    }

    #[test]
    fn test_add_beyond_stock() {
        let err = check_add(&product(3, &[]), 2, 2, None).unwrap_err();
        assert!(matches!(err, CommandError::OutOfStock { available: 3, .. }));
    }

    #[test]
    fn test_add_to_sold_out_product() {
        assert!(check_add(&product(0, &[]), 0, 1, None).is_err());
    }

    #[test]
    fn test_add_checks_color() {
        let p = product(5, &["red", "blue"]);
        assert!(check_add(&p, 0, 1, Some("red")).is_ok());
        assert!(matches!(
            check_add(&p, 0, 1, Some("green")),
            Err(CommandError::ColorUnavailable { .. })
        ));
        assert!(check_add(&product(5, &[]), 0, 1, Some("red")).is_err());
    }

    #[test]
    fn test_update_counts_every_variant() {
        let p = product(6, &["red", "blue"]);
        assert!(check_update(&p, 2, 3).is_ok());
        assert!(check_update(&p, 2, 4).is_err());
        // Not yet in the cart: judged as a single line.
        assert!(check_update(&p, 0, 6).is_ok());
    }
}
