//! Product picker library
//!
//! A searchable, paginated, multi-select catalog picker and the product-row
//! form it feeds, with pluggable catalog search providers.

pub mod controller;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use controller::SearchSelectionController;
pub use crate::core::{ProductRow, ProductRows, RowVariant};
pub use error::{PickerError, PickerResult};
pub use traits::*;
pub use types::*;
pub use services::*;
