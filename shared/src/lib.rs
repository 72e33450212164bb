//! Shared types for the product picker
//!
//! Catalog data model, discounts, error types and the tracing bootstrap used
//! by every crate in the workspace.

pub mod discount;
pub mod errors;
pub mod logging;
pub mod types;

pub use discount::*;
pub use errors::*;
pub use types::*;
