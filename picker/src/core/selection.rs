//! Multi-select state: products in first-selected order, each with an
//! insertion-ordered set of variants

use indexmap::IndexMap;

use shared::{Product, ProductId, SelectedProduct, Variant, VariantRef};
use crate::types::{ProductToggle, VariantToggle};

#[derive(Debug, Clone)]
struct SelectionEntry {
    product: Product,
    variants: IndexMap<VariantRef, Variant>,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    entries: IndexMap<ProductId, SelectionEntry>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `product` seeded with its first variant, or drop it and all
    /// its variants if it was already selected.
    pub fn toggle_product(&mut self, product: &Product) -> ProductToggle {
        if self.remove(&product.id) {
            return ProductToggle::Deselected;
        }

        let mut variants = IndexMap::new();
        if let Some(first) = product.selectable_variants().into_iter().next() {
            variants.insert(first.key(), first);
        }
        self.entries.insert(
            product.id.clone(),
            SelectionEntry {
                product: product.clone(),
                variants,
            },
        );
        ProductToggle::Selected
    }

    /// Flip one variant of an already selected product. An empty variant set
    /// does not deselect the product.
    pub fn toggle_variant(&mut self, product_id: &ProductId, key: &VariantRef) -> VariantToggle {
        let Some(entry) = self.entries.get_mut(product_id) else {
            return VariantToggle::Ignored;
        };
        if entry.variants.shift_remove(key).is_some() {
            return VariantToggle::Deselected;
        }
        match entry.product.find_variant(key) {
            Some(variant) => {
                entry.variants.insert(key.clone(), variant);
                VariantToggle::Selected
            }
            None => VariantToggle::Ignored,
        }
    }

    /// Drop a product and its variants. Returns whether it was selected.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        // shift_remove keeps the remaining products in selection order
        self.entries.shift_remove(product_id).is_some()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.contains_key(product_id)
    }

    pub fn variants(&self, product_id: &ProductId) -> Option<Vec<Variant>> {
        self.entries
            .get(product_id)
            .map(|entry| entry.variants.values().cloned().collect())
    }

    pub fn is_variant_selected(&self, product_id: &ProductId, key: &VariantRef) -> bool {
        self.entries
            .get(product_id)
            .is_some_and(|entry| entry.variants.contains_key(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned copy of the selection in first-selected order
    pub fn snapshot(&self) -> Vec<SelectedProduct> {
        self.entries
            .values()
            .map(|entry| SelectedProduct {
                product: entry.product.clone(),
                variants: entry.variants.values().cloned().collect(),
            })
            .collect()
    }
}
