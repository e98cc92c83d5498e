//! Errors surfaced to the user when a swap cannot be computed

use crate::core::validation::{Field, ValidationErrors};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SwapError {
    /// No price snapshot has been loaded yet.
    #[error("Currency rate database is not ready, try again shortly")]
    StoreNotReady,

    /// A selected currency has no price in the current snapshot.
    #[error("Can not find price for selected currency: {currency}")]
    MissingPrice { field: Field, currency: String },

    #[error("Invalid swap request: {0}")]
    Validation(ValidationErrors),
}

impl From<ValidationErrors> for SwapError {
    fn from(errors: ValidationErrors) -> Self {
        SwapError::Validation(errors)
    }
}
