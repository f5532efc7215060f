//! Category summaries derived from the product list.

use serde::Serialize;

use wishshop_core::Product;

/// Image for categories without an entry in the image table.
pub const DEFAULT_CATEGORY_IMAGE: &str = "/images/ii.png";

/// One category as shown on the category index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    /// Positional id, `category-1` for the first category seen.
    pub id: String,
    pub name: String,
    pub product_count: usize,
    pub image: String,
}

/// Display image for a category name.
///
/// Lookup is exact; unknown names get [`DEFAULT_CATEGORY_IMAGE`].
#[must_use]
pub fn category_image(name: &str) -> &'static str {
    match name {
        "Smartwatch" => "/images/Smartwatch.jpg",
        "Smart Watch" => "/images/Smart watch1.jpg",
        "Headphones" => "/images/headphones.jpg",
        "Headphone" => "/images/headphone.jpg",
        "Running Shoes" | "Clothing" => "/images/runningShoes.jpg",
        "Sports" => "/images/runningShoes2.jpg",
        _ => DEFAULT_CATEGORY_IMAGE,
    }
}

/// Group `products` by category, keeping the order categories first appear.
#[must_use]
pub fn summarize(products: &[Product]) -> Vec<CategorySummary> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for product in products {
        match counts.iter_mut().find(|(name, _)| *name == product.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((product.category.as_str(), 1)),
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(index, (name, product_count))| CategorySummary {
            id: format!("category-{}", index + 1),
            name: name.to_string(),
            product_count,
            image: category_image(name).to_string(),
        })
        .collect()
}
