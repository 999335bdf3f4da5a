//! Cart service errors.

use storefront::prices::PriceError;
use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Please sign in to add items to cart")]
    Unauthenticated,

    #[error("Invalid product")]
    MissingProduct,

    #[error("Quantity must be at least 1")]
    InvalidQuantity(u32),

    #[error("cart request failed")]
    Api(#[from] ApiError),

    #[error("cart totals are out of range")]
    Price(#[from] PriceError),
}

impl CartError {
    /// Notice text, with `fallback` for server failures without a message.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            CartError::Api(source) => source.user_message(fallback),
            CartError::Price(_) => fallback.to_string(),
            CartError::Unauthenticated
            | CartError::MissingProduct
            | CartError::InvalidQuantity(_) => self.to_string(),
        }
    }
}
