//! Shop service errors.

use storefront::filters::FilterError;
use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("product listing failed")]
    Api(#[from] ApiError),
}

impl ShopError {
    /// Notice text for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ShopError::Api(source) => source.user_message("Failed to load products"),
            ShopError::Filter(_) | ShopError::InvalidPageSize => self.to_string(),
        }
    }
}
