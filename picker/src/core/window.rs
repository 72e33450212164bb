//! The fetched result window and its pagination cursor
//!
//! Pure state, no I/O: the controller feeds provider pages in and reads the
//! cursor back out.

use std::collections::HashSet;

use shared::{CatalogPage, Product, ProductId, SearchQuery};

/// Ordered, append-only view of the products fetched for one search text
#[derive(Debug, Clone, Default)]
pub struct ResultWindow {
    text: Option<String>,
    products: Vec<Product>,
    seen: HashSet<ProductId>,
    next_page: u32,
    exhausted: bool,
}

impl ResultWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text the current contents were fetched for; `None` before the first page
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn belongs_to(&self, text: &str) -> bool {
        self.text.as_deref() == Some(text)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        if !self.seen.contains(id) {
            return None;
        }
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Query for the page after the last applied one
    pub fn next_query(&self, page_size: u32) -> Option<SearchQuery> {
        let text = self.text.as_ref()?;
        if self.exhausted {
            return None;
        }
        Some(SearchQuery::new(text.clone(), self.next_page, page_size))
    }

    /// Apply one provider page. Page 0 replaces the contents, later pages
    /// append. Products already present are skipped. Returns how many were
    /// added.
    pub fn apply_page(&mut self, query: &SearchQuery, page: CatalogPage) -> usize {
        if query.page == 0 {
            self.clear_for(&query.text);
        }

        let returned = page.returned();
        let mut added = 0;
        for product in page.products {
            if self.seen.insert(product.id.clone()) {
                self.products.push(product);
                added += 1;
            }
        }

        self.next_page = query.page.saturating_add(1);
        self.exhausted = returned < query.page_size as usize;
        added
    }

    fn clear_for(&mut self, text: &str) {
        self.text = Some(text.to_string());
        self.products.clear();
        self.seen.clear();
        self.next_page = 0;
        self.exhausted = false;
    }
}

/// Whether the last visible row is within `threshold` rows of the end of
/// the list, i.e. the shell should pull the next page.
pub fn near_end(visible_end: usize, len: usize, threshold: usize) -> bool {
    visible_end.saturating_add(threshold) >= len
}
