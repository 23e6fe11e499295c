//! User-correctable input errors.

use thiserror::Error;

/// Result type used by the draft accumulator and the order validator.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A single user-facing reason why a draft operation or submission was refused.
///
/// Only one of these is ever reported at a time; the `Display` string is the
/// message shown to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No product was selected, or the requested quantity was not positive.
    #[error("select a product and enter a valid quantity")]
    InvalidSelection,

    #[error("must select a client")]
    MissingClient,

    #[error("must add at least one product")]
    NoLineItems,

    /// A line item carries a non-positive id, quantity or a zero price.
    #[error("invalid product data")]
    InvalidLineItem,

    /// The selected client is not in the loaded client list.
    #[error("selected client is invalid")]
    UnknownClient,

    /// The selected seller is not in the loaded seller list.
    #[error("selected seller is invalid")]
    UnknownSeller,

    #[error("some products are unavailable")]
    UnavailableProducts,

    #[error("insufficient stock for some products")]
    InsufficientStock,

    /// The total overflowed or was not strictly positive.
    #[error("error computing order total")]
    InvalidTotal,
}

impl ValidationError {
    /// Stable machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidSelection => "invalid_selection",
            ValidationError::MissingClient => "missing_client",
            ValidationError::NoLineItems => "no_line_items",
            ValidationError::InvalidLineItem => "invalid_line_item",
            ValidationError::UnknownClient => "unknown_client",
            ValidationError::UnknownSeller => "unknown_seller",
            ValidationError::UnavailableProducts => "unavailable_products",
            ValidationError::InsufficientStock => "insufficient_stock",
            ValidationError::InvalidTotal => "invalid_total",
        }
    }
}
