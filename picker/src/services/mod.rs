//! Catalog search provider implementations

pub mod http_catalog;
pub mod static_catalog;

#[cfg(test)]
pub mod tests;

pub use http_catalog::*;
pub use static_catalog::*;
