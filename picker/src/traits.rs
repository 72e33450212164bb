//! Picker trait definitions for dependency injection

use async_trait::async_trait;

use shared::{CatalogFailure, CatalogPage, SearchQuery, SelectedProduct};

/// Remote, paginated, keyword-filterable product search.
///
/// No total count is reported: a page that returned fewer than
/// `query.page_size` records, skipped ones included, marks the end of the
/// results.
#[mockall::automock]
#[async_trait]
pub trait CatalogSearchProvider: Send + Sync {
    /// Fetch one page of products matching `query.text`
    async fn search(&self, query: &SearchQuery) -> Result<CatalogPage, CatalogFailure>;
}

/// Receiver of the picker's final outcome
#[mockall::automock]
pub trait SelectionConsumer {
    /// Called once with the confirmed selection, in first-selected order
    fn on_confirm(&mut self, selection: Vec<SelectedProduct>);

    /// Called once when the picker is dismissed without confirming
    fn on_cancel(&mut self);
}
