//! Feedback service errors.

use storefront::feedback::ReviewError;
use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Please sign in to leave a review")]
    Unauthenticated,

    #[error(transparent)]
    Invalid(#[from] ReviewError),

    #[error("deletion was not confirmed")]
    Declined,

    #[error("feedback request failed")]
    Api(#[from] ApiError),
}

impl FeedbackError {
    /// Notice text, with `fallback` for server failures without a message.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FeedbackError::Api(source) => source.user_message(fallback),
            FeedbackError::Unauthenticated
            | FeedbackError::Invalid(_)
            | FeedbackError::Declined => self.to_string(),
        }
    }
}
