//! Local catalog file, category filtering and admin writes.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wishshop_core::ProductId;
use wishshop_integration_tests::{TestEnv, draft};
use wishshop_storefront::catalog::DEFAULT_CATEGORY_IMAGE;

fn seed() -> serde_json::Value {
    json!([
        {"id": "w1", "name": "Smart Watch", "description": "Tracks steps", "price": 199.99,
         "category": "Smartwatch", "image": "/images/Smartwatch.jpg", "stock": 5,
         "createdAt": "2024-03-01T00:00:00Z"},
        {"id": "h1", "name": "Headphones", "description": "Over-ear", "price": 89.5,
         "category": "Headphones", "image": "/images/headphones.jpg", "stock": 0,
         "createdAt": "2024-04-01T00:00:00Z"},
        {"id": "h2", "name": "Earbuds", "description": "In-ear", "price": "49.00",
         "category": "headphones", "imageUrl": "/images/headphone.jpg", "stock": 12,
         "createdAt": "2024-05-01T00:00:00Z"},
        {"id": "bad", "name": "No price", "category": "Headphones", "stock": 1},
        {"id": "neg", "name": "Negative", "price": 5, "category": "Other", "stock": -1}
    ])
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_invalid_documents_are_skipped() {
    let env = TestEnv::with_catalog(&seed());
    let ctx = env.open().await;

    let ids: Vec<String> = ctx
        .products()
        .list_all()
        .await
        .into_iter()
        .map(|p| p.id.into_inner())
        .collect();
    assert_eq!(ids, vec!["h2", "h1", "w1"]);
    assert!(ctx.products().get_by_id(&ProductId::new("bad")).await.is_none());
}

#[tokio::test]
async fn test_category_match_is_exact() {
    let env = TestEnv::with_catalog(&seed());
    let ctx = env.open().await;

    let headphones = ctx.products().list_by_category("Headphones").await;
    assert_eq!(headphones.len(), 1);
    assert_eq!(headphones.first().unwrap().id.as_str(), "h1");

    assert!(ctx.products().list_by_category("Head").await.is_empty());
    assert!(ctx.products().list_by_category("").await.is_empty());
}

#[tokio::test]
async fn test_category_summaries() {
    let env = TestEnv::with_catalog(&seed());
    let ctx = env.open().await;

    let categories = ctx.products().categories().await;
    let summary: Vec<(&str, &str, usize)> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str(), c.product_count))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("category-1", "headphones", 1),
            ("category-2", "Headphones", 1),
            ("category-3", "Smartwatch", 1),
        ]
    );
    assert_eq!(categories.first().unwrap().image, DEFAULT_CATEGORY_IMAGE);
}

#[tokio::test]
async fn test_missing_catalog_file_is_empty() {
    let env = TestEnv::new();
    let ctx = env.open().await;
    assert!(ctx.products().list_all().await.is_empty());
    assert!(ctx.products().categories().await.is_empty());
}

// =============================================================================
// Admin writes
// =============================================================================

#[tokio::test]
async fn test_admin_writes_persist_to_catalog_file() {
    let env = TestEnv::with_catalog(&seed());
    let id = {
        let ctx = env.open().await;
        let product = ctx
            .products()
            .add_product(draft("Trail Shoes", "Running Shoes", 12000, 4))
            .await
            .unwrap();

        let mut changes = product.to_draft();
        changes.stock = 7;
        ctx.products().update_product(&product.id, changes).await.unwrap();

        assert!(
            ctx.products()
                .delete_product(&ProductId::new("w1"))
                .await
                .unwrap()
        );
        product.id
    };

    let ctx = env.open().await;
    let product = ctx.products().get_by_id(&id).await.unwrap();
    assert_eq!(product.stock, 7);
    assert_eq!(ctx.products().list_all().await.first().unwrap().id, id);
    assert!(ctx.products().get_by_id(&ProductId::new("w1")).await.is_none());
}

#[tokio::test]
async fn test_deleting_a_product_leaves_snapshots() {
    let env = TestEnv::with_catalog(&seed());
    let mut ctx = env.open().await;
    let watch = ctx.products().get_by_id(&ProductId::new("w1")).await.unwrap();

    ctx.cart_mut().add_to_cart(&watch, 1, None);
    ctx.wishlist_mut().add_to_wishlist(&watch);
    ctx.products().delete_product(&watch.id).await.unwrap();

    let ctx = env.open().await;
    assert_eq!(ctx.cart().quantity_of(&watch.id), 1);
    assert!(ctx.wishlist().is_wishlisted(&watch.id));
}
