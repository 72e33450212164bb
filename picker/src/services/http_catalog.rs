//! HTTP catalog search provider

use std::time::{Duration, Instant};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use shared::{CatalogFailure, CatalogPage, PLACEHOLDER_IMAGE, Product, ProductId, SearchQuery, Variant};
use crate::error::{PickerError, PickerResult};
use crate::traits::CatalogSearchProvider;
use crate::types::{CatalogEndpoint, QueryStyle};

/// Catalog provider backed by a remote `/products/search` endpoint
pub struct HttpCatalogProvider {
    client: reqwest::Client,
    search_url: Url,
    api_key: Option<String>,
    query_style: QueryStyle,
}

impl HttpCatalogProvider {
    /// Create a provider; `timeout` bounds every request end to end
    pub fn new(endpoint: CatalogEndpoint, timeout: Duration) -> PickerResult<Self> {
        let mut search_url = endpoint.base_url.clone();
        search_url
            .path_segments_mut()
            .map_err(|_| PickerError::InvalidConfig {
                field: "catalog_url".to_string(),
                value: endpoint.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(["products", "search"]);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PickerError::InvalidConfig {
                field: "http_client".to_string(),
                value: e.to_string(),
            })?;

        Ok(Self {
            client,
            search_url,
            api_key: endpoint.api_key,
            query_style: endpoint.query_style,
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Query string pairs for one page request
    pub fn query_pairs(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        match self.query_style {
            QueryStyle::Offset => vec![
                ("q", query.text.clone()),
                ("limit", query.page_size.to_string()),
                ("skip", query.offset().to_string()),
            ],
            QueryStyle::Page => vec![
                ("search", query.text.clone()),
                ("page", (u64::from(query.page) + 1).to_string()),
                ("limit", query.page_size.to_string()),
            ],
        }
    }
}

#[async_trait]
impl CatalogSearchProvider for HttpCatalogProvider {
    async fn search(&self, query: &SearchQuery) -> Result<CatalogPage, CatalogFailure> {
        let request_start = Instant::now();

        let mut request = self
            .client
            .get(self.search_url.clone())
            .query(&self.query_pairs(query));
        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        let response = request.send().await.map_err(map_transport_error)?;

        if !response.status().is_success() {
            return match response.status().as_u16() {
                401 | 403 => Err(CatalogFailure::Unauthorized),
                429 => Err(CatalogFailure::RateLimited),
                code => Err(CatalogFailure::ServerError(code)),
            };
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CatalogFailure::InvalidResponse(format!("Failed to parse response: {e}")))?;
        let page = parse_products(&body)?;

        debug!(
            "Catalog returned {} products ({} skipped) for '{}' page {} in {}ms",
            page.products.len(),
            page.skipped,
            query.text,
            query.page,
            request_start.elapsed().as_millis()
        );
        Ok(page)
    }
}

fn map_transport_error(error: reqwest::Error) -> CatalogFailure {
    if error.is_timeout() {
        CatalogFailure::Timeout
    } else {
        CatalogFailure::Network(error.to_string())
    }
}

/// Decode a search response: either a bare product array or an object with
/// a `products` array. Malformed records are skipped so the page still
/// advances the cursor.
pub fn parse_products(body: &Value) -> Result<CatalogPage, CatalogFailure> {
    let items = match body {
        Value::Array(items) => items,
        _ => body
            .get("products")
            .and_then(Value::as_array)
            .ok_or_else(|| CatalogFailure::InvalidResponse("No products in response".to_string()))?,
    };
    let mut page = CatalogPage::default();
    for item in items {
        match parse_product(item) {
            Ok(product) => page.products.push(product),
            Err(e) => {
                warn!("Skipping catalog record: {}", e);
                page.skipped += 1;
            }
        }
    }
    Ok(page)
}

fn parse_product(item: &Value) -> Result<Product, CatalogFailure> {
    let id = item
        .get("id")
        .and_then(id_text)
        .ok_or_else(|| CatalogFailure::InvalidResponse("Product without id".to_string()))?;
    let title = item
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogFailure::InvalidResponse(format!("Product {id} without title")))?;

    let image_ref = item
        .pointer("/image/src")
        .or_else(|| item.get("thumbnail"))
        .or_else(|| item.pointer("/images/0"))
        .and_then(Value::as_str)
        .unwrap_or(PLACEHOLDER_IMAGE);

    let variants = item
        .get("variants")
        .and_then(Value::as_array)
        .map(|variants| variants.iter().filter_map(parse_variant).collect())
        .unwrap_or_default();

    Ok(Product {
        id: ProductId::new(id),
        title: title.to_string(),
        image_ref: image_ref.to_string(),
        variants,
    })
}

fn parse_variant(item: &Value) -> Option<Variant> {
    let title = item.get("title").and_then(Value::as_str)?;
    Some(Variant {
        id: item.get("id").and_then(id_text),
        title: title.to_string(),
    })
}

/// Ids come as JSON numbers or strings depending on the catalog
fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
