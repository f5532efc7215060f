//! Terminal output.
//!
//! Everything the CLI prints to stdout goes through here; logs go to stderr.

#![allow(clippy::print_stdout)]

use wishshop_core::{Product, User};
use wishshop_storefront::CartContainer;
use wishshop_storefront::WishlistContainer;
use wishshop_storefront::catalog::CategorySummary;

const NAME_WIDTH: usize = 32;

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }

    for product in products {
        println!(
            "{:<36}  {:<NAME_WIDTH$}  {:>10}  {:<16}  {}",
            product.id,
            truncate(&product.name, NAME_WIDTH),
            product.price.to_string(),
            product.category,
            stock_label(product),
        );
    }
}

pub fn product_detail(product: &Product, in_cart: u64, wishlisted: bool) {
    println!("{}", product.name);
    println!("  id:          {}", product.id);
    println!("  price:       {}", product.price);
    println!("  category:    {}", product.category);
    println!("  stock:       {}", stock_label(product));
    if !product.colors.is_empty() {
        println!("  colors:      {}", product.colors.join(", "));
    }
    println!("  image:       {}", product.image);
    if let Some(specifications) = &product.specifications {
        println!("  specs:       {specifications}");
    }
    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }
    println!();
    println!(
        "  in cart: {in_cart}   wishlist: {}",
        if wishlisted { "saved" } else { "-" }
    );
}

pub fn categories(categories: &[CategorySummary]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }
    for category in categories {
        println!(
            "{:<12}  {:<24}  {:>4} products  {}",
            category.id, category.name, category.product_count, category.image
        );
    }
}

pub fn cart(cart: &CartContainer) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for line in cart.lines() {
        let color = line.selected_color.as_deref().unwrap_or("-");
        println!(
            "{:<36}  {:<NAME_WIDTH$}  {:<10}  {:>4} x {:>10}  = ${:.2}",
            line.product_id,
            truncate(&line.name, NAME_WIDTH),
            color,
            line.quantity,
            line.price.to_string(),
            line.line_total(),
        );
    }
    println!();
    println!("{} items, total ${:.2}", cart.item_count(), cart.total());
}

pub fn wishlist(wishlist: &WishlistContainer) {
    if wishlist.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }
    products(wishlist.items());
}

pub fn user(user: Option<&User>) {
    match user {
        Some(user) => println!("Logged in as {} <{}> (id {})", user.name, user.email, user.id),
        None => println!("Not logged in."),
    }
}

fn stock_label(product: &Product) -> String {
    if product.in_stock() {
        format!("{} in stock", product.stock)
    } else {
        "out of stock".to_string()
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
