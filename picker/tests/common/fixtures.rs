//! Test fixtures and data for picker tests
//!
//! Consistent catalog data used across all test suites.

#![allow(dead_code)] // Each test binary uses a different subset

use shared::{Product, ProductId, Variant, VariantRef};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Standard configuration values
    pub const PAGE_SIZE: u32 = 10;
    pub const MAX_ROWS: usize = 4;

    /// `count` plain products with ids `start..start + count`
    pub fn numbered(start: u64, count: u64) -> Vec<Product> {
        (start..start + count)
            .map(|id| Product::new(id, format!("Product {id}")))
            .collect()
    }

    /// Product A with three variants v1, v2, v3
    pub fn product_a() -> Product {
        Product::new("A", "Product A").with_variants(vec![
            Variant::new("v1", "Variant 1"),
            Variant::new("v2", "Variant 2"),
            Variant::new("v3", "Variant 3"),
        ])
    }

    /// Product B without variants
    pub fn product_b() -> Product {
        Product::new("B", "Product B")
    }

    pub fn product_c() -> Product {
        Product::new("C", "Product C").with_variants(vec![Variant::titled("Only")])
    }

    pub fn id(raw: &str) -> ProductId {
        ProductId::from(raw)
    }

    pub fn variant(id: &str) -> VariantRef {
        VariantRef::Id(id.to_string())
    }

    /// Products returned for a search on "shoe"
    pub fn shoes() -> Vec<Product> {
        vec![
            Product::new(501u64, "Trail Shoe"),
            Product::new(502u64, "Court Shoe"),
        ]
    }

    /// Products returned for a search on "shirt"
    pub fn shirts() -> Vec<Product> {
        vec![
            Product::new(601u64, "Linen Shirt"),
            Product::new(602u64, "Oxford Shirt"),
        ]
    }
}
