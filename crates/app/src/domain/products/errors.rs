//! Products service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid product")]
    MissingProduct,

    #[error("product request failed")]
    Api(#[from] ApiError),
}

impl ProductError {
    /// Notice text, with `fallback` for server failures without a message.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ProductError::Api(source) => source.user_message(fallback),
            ProductError::MissingProduct => self.to_string(),
        }
    }
}
