//! Tests for StaticCatalogProvider

use tokio_test::{assert_err, assert_ok};

use shared::{Product, SearchQuery, SharedError};
use crate::services::static_catalog::StaticCatalogProvider;
use crate::traits::CatalogSearchProvider;

fn numbered(count: u64) -> StaticCatalogProvider {
    StaticCatalogProvider::new((0..count).map(|id| Product::new(id, format!("Item {id}"))).collect())
}

#[tokio::test]
async fn test_pages_slice_in_order() {
    let provider = numbered(23);

    let first = assert_ok!(provider.search(&SearchQuery::new("", 0, 10)).await).products;
    let third = assert_ok!(provider.search(&SearchQuery::new("", 2, 10)).await).products;
    let beyond = assert_ok!(provider.search(&SearchQuery::new("", 5, 10)).await).products;

    assert_eq!(first.len(), 10);
    assert_eq!(first[0].title, "Item 0");
    assert_eq!(third.len(), 3);
    assert_eq!(third[0].title, "Item 20");
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn test_filter_is_case_insensitive_substring() {
    let provider = StaticCatalogProvider::sample();

    let shirts = provider.search(&SearchQuery::new("SHIRT", 0, 10)).await.unwrap().products;
    let titles: Vec<_> = shirts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Linen Shirt", "Oxford Shirt"]);

    let none = provider.search(&SearchQuery::new("submarine", 0, 10)).await.unwrap().products;
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_filtered_results_paginate() {
    let provider = StaticCatalogProvider::sample();
    let first = provider.search(&SearchQuery::new("hat", 0, 1)).await.unwrap().products;
    let second = provider.search(&SearchQuery::new("hat", 1, 1)).await.unwrap().products;

    assert_eq!(first[0].title, "Sun Hat");
    assert_eq!(second[0].title, "Bucket Hat");
}

#[test]
fn test_from_json() {
    let provider = assert_ok!(StaticCatalogProvider::from_json(
        r#"[{ "id": "1", "title": "Mug", "image_ref": "mug.png", "variants": [{ "title": "Blue" }] }]"#,
    ));
    assert_eq!(provider.len(), 1);

    let error = assert_err!(StaticCatalogProvider::from_json("{ not json"));
    assert!(matches!(error, SharedError::Deserialization { .. }));
}
