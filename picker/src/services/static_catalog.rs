//! In-memory catalog provider
//!
//! Holds the whole catalog and filters and slices it locally, the way a
//! shell without a search endpoint would.

use std::sync::Arc;
use async_trait::async_trait;

use shared::{CatalogFailure, CatalogPage, Product, SearchQuery, SharedError, SharedResult, Variant};
use crate::traits::CatalogSearchProvider;

#[derive(Debug, Clone, Default)]
pub struct StaticCatalogProvider {
    products: Arc<Vec<Product>>,
}

impl StaticCatalogProvider {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
        }
    }

    /// Load a catalog from a JSON array of products
    pub fn from_json(json: &str) -> SharedResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json).map_err(|e| SharedError::Deserialization {
            message: e.to_string(),
        })?;
        Ok(Self::new(products))
    }

    /// Small built-in catalog for demos
    pub fn sample() -> Self {
        let sized = |prefix: &str| {
            ["S", "M", "L"]
                .iter()
                .map(|size| Variant::new(format!("{prefix}-{}", size.to_lowercase()), *size))
                .collect::<Vec<_>>()
        };

        Self::new(vec![
            Product::new(1u64, "Fjord Rain Jacket").with_variants(sized("jacket")),
            Product::new(2u64, "Linen Shirt").with_variants(sized("shirt")),
            Product::new(3u64, "Oxford Shirt").with_variants(sized("oxford")),
            Product::new(4u64, "Trail Running Shoe").with_variants(vec![
                Variant::new("shoe-42", "EU 42"),
                Variant::new("shoe-43", "EU 43"),
                Variant::new("shoe-44", "EU 44"),
            ]),
            Product::new(5u64, "Canvas Tote"),
            Product::new(6u64, "Wool Beanie").with_variants(vec![
                Variant::new("beanie-grey", "Grey"),
                Variant::new("beanie-navy", "Navy"),
            ]),
            Product::new(7u64, "Leather Belt").with_variants(sized("belt")),
            Product::new(8u64, "Ceramic Mug"),
            Product::new(9u64, "Denim Jacket").with_variants(sized("denim")),
            Product::new(10u64, "Slip-on Shoe").with_variants(vec![Variant::new("slip-41", "EU 41")]),
            Product::new(11u64, "Sun Hat"),
            Product::new(12u64, "Bucket Hat").with_variants(vec![Variant::titled("One Size")]),
        ])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Case-insensitive title filter followed by the requested page slice
    pub fn page(&self, query: &SearchQuery) -> Vec<Product> {
        let needle = query.text.to_lowercase();
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);

        self.products
            .iter()
            .filter(|product| needle.is_empty() || product.title.to_lowercase().contains(&needle))
            .skip(offset)
            .take(query.page_size as usize)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogSearchProvider for StaticCatalogProvider {
    async fn search(&self, query: &SearchQuery) -> Result<CatalogPage, CatalogFailure> {
        Ok(self.page(query).into())
    }
}
