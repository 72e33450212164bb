//! Shared error types for the product picker workspace

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Invalid discount: {reason}")]
    InvalidDiscount { reason: String },

    #[error("Deserialization failed: {message}")]
    Deserialization { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;

/// Reasons a catalog search request can fail.
///
/// All of these are transient from the picker's point of view: the request
/// may be re-issued without rebuilding anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("catalog rejected the credentials")]
    Unauthorized,

    #[error("catalog rate limit exceeded")]
    RateLimited,

    #[error("catalog server error: HTTP {0}")]
    ServerError(u16),

    #[error("invalid catalog response: {0}")]
    InvalidResponse(String),
}
