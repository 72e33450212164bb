//! Catalog data model shared by providers, the picker and the row form

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Title given to the synthetic variant of a product that has none.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Variant";

/// Image used when the catalog has no picture for a product.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/50";

/// Opaque catalog product identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identity of a variant within its product: the id when the catalog
/// provides one, the title otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantRef {
    Id(String),
    Title(String),
}

impl fmt::Display for VariantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantRef::Id(id) => write!(f, "#{id}"),
            VariantRef::Title(title) => write!(f, "{title}"),
        }
    }
}

impl std::str::FromStr for VariantRef {
    type Err = std::convert::Infallible;

    /// `#42` names a variant by id, anything else by title.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('#') {
            Some(id) => Ok(VariantRef::Id(id.to_string())),
            None => Ok(VariantRef::Title(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
}

impl Variant {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
        }
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
        }
    }

    /// Placeholder offered for products without variants
    pub fn placeholder() -> Self {
        Self::titled(DEFAULT_VARIANT_TITLE)
    }

    pub fn key(&self) -> VariantRef {
        match &self.id {
            Some(id) => VariantRef::Id(id.clone()),
            None => VariantRef::Title(self.title.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub image_ref: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_ref: PLACEHOLDER_IMAGE.to_string(),
            variants: Vec::new(),
        }
    }

    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    /// Variants a user can pick from, in catalog order.
    pub fn selectable_variants(&self) -> Vec<Variant> {
        if self.variants.is_empty() {
            vec![Variant::placeholder()]
        } else {
            self.variants.clone()
        }
    }

    pub fn find_variant(&self, key: &VariantRef) -> Option<Variant> {
        self.selectable_variants().into_iter().find(|v| &v.key() == key)
    }
}

/// One page request against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub page: u32,
    pub page_size: u32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            text: text.into(),
            page,
            page_size,
        }
    }

    /// Zero-based index of the first item of this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }
}

/// One page of provider results.
///
/// `skipped` counts records the catalog sent that could not be decoded.
/// They still count toward the page size, so a bad record does not end
/// pagination early.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub skipped: usize,
}

impl CatalogPage {
    pub fn new(products: Vec<Product>, skipped: usize) -> Self {
        Self { products, skipped }
    }

    /// Records the catalog returned for this page, decoded or not
    pub fn returned(&self) -> usize {
        self.products.len() + self.skipped
    }
}

impl From<Vec<Product>> for CatalogPage {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products, 0)
    }
}

/// A confirmed product together with the variants picked for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedProduct {
    pub product: Product,
    pub variants: Vec<Variant>,
}

/// Identifier of one picker session, attached to its log events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps log lines readable
        let full = self.0.simple().to_string();
        write!(f, "picker_{}", &full[..8])
    }
}
