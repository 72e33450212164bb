//! Test helpers and builder patterns for picker tests
//!
//! Convenient helpers to reduce test boilerplate around controllers and
//! their mocked catalog providers.

#![allow(dead_code)] // Each test binary uses a different subset

use std::time::Duration;
use async_trait::async_trait;

use picker::*;
use shared::{CatalogFailure, CatalogPage, Product, ProductId, SearchQuery};
use super::fixtures::TestFixtures;

/// Builder for test controllers with a mocked catalog provider
pub struct ControllerBuilder {
    config: PickerConfig,
    provider: MockCatalogSearchProvider,
}

impl ControllerBuilder {
    /// Create a builder with test defaults and no provider expectations
    pub fn new() -> Self {
        Self {
            config: PickerConfig::default().with_page_size(TestFixtures::PAGE_SIZE),
            provider: MockCatalogSearchProvider::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.config = self.config.with_page_size(page_size);
        self
    }

    pub fn with_throttle(mut self, interval: Duration) -> Self {
        self.config = self.config.with_throttle_interval(interval);
        self
    }

    /// Configure the provider mock with a setup function
    pub fn with_provider<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockCatalogSearchProvider),
    {
        setup(&mut self.provider);
        self
    }

    /// Serve `catalog` for every query, sliced page by page, ignoring the text
    pub fn serving(self, catalog: Vec<Product>) -> Self {
        self.with_provider(move |provider| {
            provider
                .expect_search()
                .returning(move |query| Ok(TestHelpers::slice(&catalog, query).into()))
                .times(0..);
        })
    }

    pub fn build(self) -> SearchSelectionController<MockCatalogSearchProvider> {
        SearchSelectionController::new(self.provider, self.config).unwrap()
    }
}

/// Provider whose requests never complete
pub struct StalledCatalog;

#[async_trait]
impl CatalogSearchProvider for StalledCatalog {
    async fn search(&self, _query: &SearchQuery) -> Result<CatalogPage, CatalogFailure> {
        std::future::pending().await
    }
}

/// Common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// One page of `catalog` as a provider would return it
    pub fn slice(catalog: &[Product], query: &SearchQuery) -> Vec<Product> {
        catalog
            .iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .cloned()
            .collect()
    }

    /// Ids of the products currently in the result window
    pub fn result_ids<P: CatalogSearchProvider + 'static>(controller: &SearchSelectionController<P>) -> Vec<ProductId> {
        controller.results().iter().map(|p| p.id.clone()).collect()
    }

    /// Open the picker and wait for the first page
    pub async fn open_and_settle<P: CatalogSearchProvider + 'static>(controller: &mut SearchSelectionController<P>) {
        controller.open();
        controller.settle().await;
    }

    /// Ids in a confirmed selection, in order
    pub fn selected_ids(selection: &[shared::SelectedProduct]) -> Vec<ProductId> {
        selection.iter().map(|s| s.product.id.clone()).collect()
    }
}
