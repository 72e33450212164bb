//! The product-row form that receives confirmed picker selections
//!
//! Plain view state: every method mirrors one user action and leaves the
//! rows exactly as that action describes.

use serde::Serialize;
use tracing::{debug, warn};

use shared::{Discount, Product, SelectedProduct, Variant, VariantRef};
use crate::core::reorder::move_item;
use crate::error::{PickerError, PickerResult};
use crate::traits::SelectionConsumer;
use crate::types::RowId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowVariant {
    pub variant: Variant,
    pub discount: Option<Discount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: RowId,
    pub product: Option<Product>,
    pub discount: Option<Discount>,
    pub variants: Vec<RowVariant>,
    pub show_discount: bool,
    pub show_variants: bool,
}

impl ProductRow {
    fn empty() -> Self {
        Self {
            id: RowId::new(),
            product: None,
            discount: None,
            variants: Vec::new(),
            show_discount: false,
            show_variants: false,
        }
    }

    fn bind(&mut self, selected: SelectedProduct) {
        self.variants = selected
            .variants
            .into_iter()
            .map(|variant| RowVariant { variant, discount: None })
            .collect();
        self.product = Some(selected.product);
    }

    fn variant_index(&self, key: &VariantRef) -> Option<usize> {
        self.variants.iter().position(|v| &v.variant.key() == key)
    }
}

/// Ordered list of product rows, capped at `max_rows`
#[derive(Debug, Clone, Serialize)]
pub struct ProductRows {
    rows: Vec<ProductRow>,
    max_rows: usize,
    #[serde(skip)]
    editing: Option<RowId>,
}

impl ProductRows {
    /// Create the form with its first, empty row
    pub fn new(max_rows: usize) -> Self {
        Self {
            rows: vec![ProductRow::empty()],
            max_rows: max_rows.max(1),
            editing: None,
        }
    }

    pub fn rows(&self) -> &[ProductRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.max_rows
    }

    pub fn row(&self, id: RowId) -> Option<&ProductRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn editing(&self) -> Option<RowId> {
        self.editing
    }

    pub fn add_row(&mut self) -> PickerResult<RowId> {
        if self.is_full() {
            return Err(PickerError::RowLimitReached { max: self.max_rows });
        }
        let row = ProductRow::empty();
        let id = row.id;
        self.rows.push(row);
        Ok(id)
    }

    pub fn remove_row(&mut self, id: RowId) -> PickerResult<()> {
        let index = self.index_of(id)?;
        if self.rows.len() == 1 {
            return Err(PickerError::LastRowRequired);
        }
        self.rows.remove(index);
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(())
    }

    /// Mark the row the next confirmed selection is bound to
    pub fn begin_edit(&mut self, id: RowId) -> PickerResult<()> {
        self.index_of(id)?;
        self.editing = Some(id);
        Ok(())
    }

    pub fn set_discount(&mut self, id: RowId, discount: Option<Discount>) -> PickerResult<()> {
        self.row_mut(id)?.discount = discount;
        Ok(())
    }

    pub fn set_variant_discount(&mut self, id: RowId, key: &VariantRef, discount: Option<Discount>) -> PickerResult<()> {
        let row = self.row_mut(id)?;
        let index = row.variant_index(key).ok_or_else(|| PickerError::RowNotFound {
            id: format!("{id}/{key}"),
        })?;
        row.variants[index].discount = discount;
        Ok(())
    }

    pub fn toggle_discount_editor(&mut self, id: RowId) -> PickerResult<bool> {
        let row = self.row_mut(id)?;
        row.show_discount = !row.show_discount;
        Ok(row.show_discount)
    }

    pub fn toggle_variants_visible(&mut self, id: RowId) -> PickerResult<bool> {
        let row = self.row_mut(id)?;
        row.show_variants = !row.show_variants;
        Ok(row.show_variants)
    }

    /// Drop one variant from a bound row. Returns whether it was present.
    pub fn remove_variant(&mut self, id: RowId, key: &VariantRef) -> PickerResult<bool> {
        let row = self.row_mut(id)?;
        match row.variant_index(key) {
            Some(index) => {
                row.variants.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn reorder_rows(&mut self, from: usize, to: Option<usize>) {
        let rows = std::mem::take(&mut self.rows);
        self.rows = move_item(rows, from, to);
    }

    pub fn reorder_variants(&mut self, id: RowId, from: usize, to: Option<usize>) -> PickerResult<()> {
        let row = self.row_mut(id)?;
        let variants = std::mem::take(&mut row.variants);
        row.variants = move_item(variants, from, to);
        Ok(())
    }

    fn index_of(&self, id: RowId) -> PickerResult<usize> {
        self.rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| PickerError::RowNotFound { id: id.to_string() })
    }

    fn row_mut(&mut self, id: RowId) -> PickerResult<&mut ProductRow> {
        let index = self.index_of(id)?;
        Ok(&mut self.rows[index])
    }
}

impl SelectionConsumer for ProductRows {
    /// Bind the first product to the row being edited and open new rows
    /// right after it for the rest, while capacity lasts.
    fn on_confirm(&mut self, selection: Vec<SelectedProduct>) {
        let Some(editing) = self.editing.take() else {
            warn!("Selection confirmed with no row being edited, ignoring {} products", selection.len());
            return;
        };
        let Ok(index) = self.index_of(editing) else {
            warn!("Row {} disappeared while the picker was open", editing);
            return;
        };

        let mut products = selection.into_iter();
        let Some(first) = products.next() else {
            debug!("Empty selection confirmed for row {}", editing);
            return;
        };
        self.rows[index].bind(first);

        let mut insert_at = index + 1;
        for selected in products {
            if self.is_full() {
                warn!(
                    "Row limit {} reached, dropping selected product {}",
                    self.max_rows, selected.product.id
                );
                continue;
            }
            let mut row = ProductRow::empty();
            row.bind(selected);
            self.rows.insert(insert_at, row);
            insert_at += 1;
        }
    }

    fn on_cancel(&mut self) {
        self.editing = None;
    }
}
