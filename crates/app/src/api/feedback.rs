//! Feedback endpoints.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use storefront::{
    feedback::{Feedback, FeedbackId, RatingSummary},
    products::ProductId,
};
use tracing::debug;

use super::{ApiError, Envelope, HttpTransport, Listing, Page};

/// A page of reviews.
pub type FeedbackPage = Page<Feedback>;

/// Body of `POST /api/feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    /// Reviewed product.
    pub product_id: ProductId,

    /// Stars, 1..=5.
    pub rating: u8,

    /// Trimmed comment.
    pub comment: String,
}

/// Body of `PUT /api/feedback/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackUpdate {
    /// Stars, 1..=5.
    pub rating: u8,

    /// Trimmed comment.
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct HttpFeedbackApi {
    transport: HttpTransport,
}

impl HttpFeedbackApi {
    #[must_use]
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl FeedbackApi for HttpFeedbackApi {
    async fn list_feedback(
        &self,
        product: ProductId,
        page: u32,
        limit: u32,
    ) -> Result<FeedbackPage, ApiError> {
        debug!(%product, page, limit, "listing reviews");

        let listing: Listing<Feedback> = self
            .transport
            .get(
                &format!("/api/feedback/product/{product}"),
                &[("page", page.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        Ok(listing.into())
    }

    async fn rating_summary(&self, product: ProductId) -> Result<RatingSummary, ApiError> {
        debug!(%product, "fetching rating summary");

        let summary: Envelope<RatingSummary> = self
            .transport
            .get(&format!("/api/feedback/rating/{product}"), &[])
            .await?;

        Ok(summary.into_inner())
    }

    async fn create_feedback(&self, feedback: NewFeedback) -> Result<(), ApiError> {
        debug!(product = %feedback.product_id, rating = feedback.rating, "creating review");

        self.transport.post("/api/feedback", &feedback).await
    }

    async fn update_feedback(
        &self,
        id: FeedbackId,
        update: FeedbackUpdate,
    ) -> Result<(), ApiError> {
        debug!(%id, rating = update.rating, "updating review");

        self.transport
            .put(&format!("/api/feedback/{id}"), &update)
            .await
    }

    async fn delete_feedback(&self, id: FeedbackId) -> Result<(), ApiError> {
        debug!(%id, "deleting review");

        self.transport.delete(&format!("/api/feedback/{id}")).await
    }
}

#[automock]
#[async_trait]
pub trait FeedbackApi: Send + Sync {
    /// `GET /api/feedback/product/{productId}?page&limit`
    async fn list_feedback(
        &self,
        product: ProductId,
        page: u32,
        limit: u32,
    ) -> Result<FeedbackPage, ApiError>;

    /// `GET /api/feedback/rating/{productId}`
    async fn rating_summary(&self, product: ProductId) -> Result<RatingSummary, ApiError>;

    /// `POST /api/feedback`
    async fn create_feedback(&self, feedback: NewFeedback) -> Result<(), ApiError>;

    /// `PUT /api/feedback/{id}`
    async fn update_feedback(&self, id: FeedbackId, update: FeedbackUpdate) -> Result<(), ApiError>;

    /// `DELETE /api/feedback/{id}`
    async fn delete_feedback(&self, id: FeedbackId) -> Result<(), ApiError>;
}
