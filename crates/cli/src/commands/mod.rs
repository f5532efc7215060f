//! Subcommand implementations.
//!
//! Each command reads through [`StoreContext`](wishshop_storefront::StoreContext)
//! and prints through [`crate::render`]. Checks the containers leave to the
//! presentation layer, such as stock limits and color choice, live here.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod products;
pub mod wishlist;

use thiserror::Error;

use wishshop_core::ProductId;

/// Errors raised by command-level checks.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No product with this id in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The requested quantity exceeds stock.
    #[error("Only {available} of {name} in stock")]
    OutOfStock { name: String, available: u32 },

    /// The product is not sold in this color.
    #[error("{name} is not available in {color}")]
    ColorUnavailable { name: String, color: String },

    /// A product file failed validation.
    #[error("Invalid product: {}", .0.join("; "))]
    InvalidProduct(Vec<String>),
}
