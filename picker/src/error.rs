//! Picker error types

use thiserror::Error;
use shared::{CatalogFailure, ProductId, SharedError};

/// Result type for picker operations
pub type PickerResult<T> = Result<T, PickerError>;

/// Picker error types.
///
/// None of these end a controller session; they describe one failed
/// operation and leave prior state intact.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PickerError {
    #[error("Catalog provider unavailable: {reason}")]
    ProviderUnavailable { reason: CatalogFailure },

    #[error("Product {id} is not in the result window")]
    UnknownProduct { id: ProductId },

    #[error("At most {max} product rows are allowed")]
    RowLimitReached { max: usize },

    #[error("The last product row cannot be removed")]
    LastRowRequired,

    #[error("Product row not found: {id}")]
    RowNotFound { id: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Invalid discount: {reason}")]
    InvalidDiscount { reason: String },
}

impl PickerError {
    /// Whether re-invoking the failed operation can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PickerError::ProviderUnavailable {
                reason: CatalogFailure::Network(_)
                    | CatalogFailure::Timeout
                    | CatalogFailure::RateLimited
                    | CatalogFailure::ServerError(_)
            }
        )
    }
}

impl From<CatalogFailure> for PickerError {
    fn from(reason: CatalogFailure) -> Self {
        PickerError::ProviderUnavailable { reason }
    }
}

impl From<SharedError> for PickerError {
    fn from(error: SharedError) -> Self {
        match error {
            SharedError::InvalidConfig { field, value } => PickerError::InvalidConfig { field, value },
            SharedError::InvalidDiscount { reason } => PickerError::InvalidDiscount { reason },
            SharedError::Deserialization { message } => PickerError::ProviderUnavailable {
                reason: CatalogFailure::InvalidResponse(message),
            },
        }
    }
}
