//! Feedback service.
//!
//! Reviews and the rating summary are fetched together. Every write reloads
//! both from the first page. Writes are checked locally before anything is
//! sent: a rejected draft never reaches the network.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    feedback::{Feedback, FeedbackId, RatingSummary, ReviewDraft, split_own_review},
    notices::Notice,
    pagination::Pagination,
    products::ProductId,
    views::FeedbackView,
};
use tracing::{info, warn};

use crate::{
    api::{
        FeedbackApi,
        feedback::{FeedbackUpdate, NewFeedback},
    },
    domain::feedback::errors::FeedbackError,
    notices::{Confirm, Notifier},
    store::Store,
};

/// Reviews per page unless configured otherwise.
pub const DEFAULT_REVIEWS_PER_PAGE: u32 = 10;

const LOAD_FAILURE: &str = "Failed to load reviews";

/// Reviews section state for one product.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductReviews {
    /// Aggregate rating.
    pub summary: RatingSummary,

    /// The signed-in user's review, kept out of `others`.
    pub own: Option<Feedback>,

    /// Everyone else's reviews on this page.
    pub others: Vec<Feedback>,

    /// Review list pagination.
    pub pagination: Option<Pagination>,
}

impl ProductReviews {
    /// View model for rendering.
    #[must_use]
    pub fn view(&self) -> FeedbackView {
        FeedbackView::new(&self.summary, self.own.as_ref(), &self.others)
    }
}

pub struct SyncedFeedbackService {
    api: Arc<dyn FeedbackApi>,
    store: Store,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    per_page: u32,
}

impl fmt::Debug for SyncedFeedbackService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncedFeedbackService")
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}

impl SyncedFeedbackService {
    #[must_use]
    pub fn new(
        api: Arc<dyn FeedbackApi>,
        store: Store,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        per_page: u32,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
            confirm,
            per_page: per_page.max(1),
        }
    }

    fn reject(&self, error: FeedbackError, fallback: &str) -> FeedbackError {
        warn!(%error, "review action failed");

        self.notifier.notify(Notice::error(error.user_message(fallback)));

        error
    }

    async fn fetch(&self, product: &ProductId, page: u32) -> Result<ProductReviews, FeedbackError> {
        let (reviews, summary) = tokio::join!(
            self.api.list_feedback(product.clone(), page, self.per_page),
            self.api.rating_summary(product.clone()),
        );

        let reviews = reviews?;
        let summary = summary?;
        let (own, others) = split_own_review(reviews.items, self.store.user().as_ref());

        info!(%product, reviews = others.len(), own = own.is_some(), "reviews loaded");

        Ok(ProductReviews {
            summary,
            own,
            others,
            pagination: reviews.pagination,
        })
    }

    /// Scan review pages for the viewer's own review.
    async fn find_own(&self, product: &ProductId) -> Result<Option<Feedback>, FeedbackError> {
        let Some(viewer) = self.store.user() else {
            return Ok(None);
        };

        let mut page = 1;

        loop {
            let listing = self
                .api
                .list_feedback(product.clone(), page, self.per_page)
                .await?;
            let last_page = listing.pagination.map_or(page, |p| p.total_pages);

            if listing.items.is_empty() {
                return Ok(None);
            }

            if let Some(own) = listing.items.into_iter().find(|review| review.is_by(&viewer)) {
                return Ok(Some(own));
            }

            if page >= last_page {
                return Ok(None);
            }

            page += 1;
        }
    }

    async fn reload(&self, product: &ProductId) -> Result<ProductReviews, FeedbackError> {
        self.fetch(product, 1)
            .await
            .map_err(|error| self.reject(error, LOAD_FAILURE))
    }
}

#[async_trait]
impl FeedbackService for SyncedFeedbackService {
    async fn load(&self, product: ProductId, page: u32) -> Result<ProductReviews, FeedbackError> {
        self.fetch(&product, page.max(1))
            .await
            .map_err(|error| self.reject(error, LOAD_FAILURE))
    }

    async fn own_review(&self, product: ProductId) -> Result<Option<Feedback>, FeedbackError> {
        if !self.store.is_authenticated() {
            return Err(self.reject(FeedbackError::Unauthenticated, ""));
        }

        self.find_own(&product)
            .await
            .map_err(|error| self.reject(error, LOAD_FAILURE))
    }

    async fn submit(
        &self,
        product: ProductId,
        draft: ReviewDraft,
    ) -> Result<ProductReviews, FeedbackError> {
        if !self.store.is_authenticated() {
            return Err(self.reject(FeedbackError::Unauthenticated, ""));
        }

        let review = draft
            .validate()
            .map_err(|error| self.reject(error.into(), ""))?;

        let existing = self
            .find_own(&product)
            .await
            .map_err(|error| self.reject(error, LOAD_FAILURE))?;

        let (result, success, failure) = match existing.map(|own| own.id) {
            Some(id) => (
                self.api
                    .update_feedback(
                        id,
                        FeedbackUpdate {
                            rating: review.rating,
                            comment: review.comment,
                        },
                    )
                    .await,
                "Review updated",
                "Failed to update review",
            ),
            None => (
                self.api
                    .create_feedback(NewFeedback {
                        product_id: product.clone(),
                        rating: review.rating,
                        comment: review.comment,
                    })
                    .await,
                "Review submitted",
                "Failed to submit review",
            ),
        };

        result.map_err(|source| self.reject(source.into(), failure))?;

        self.notifier.notify(Notice::success(success));

        self.reload(&product).await
    }

    async fn delete(
        &self,
        product: ProductId,
        review: FeedbackId,
    ) -> Result<ProductReviews, FeedbackError> {
        if !self.store.is_authenticated() {
            return Err(self.reject(FeedbackError::Unauthenticated, ""));
        }

        if !self
            .confirm
            .confirm("Are you sure you want to delete your review?")
            .await
        {
            info!(%review, "review deletion declined");

            return Err(FeedbackError::Declined);
        }

        self.api
            .delete_feedback(review)
            .await
            .map_err(|source| self.reject(source.into(), "Failed to delete review"))?;

        self.notifier.notify(Notice::success("Review deleted"));

        self.reload(&product).await
    }
}

#[automock]
#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// Reviews page plus rating summary, with the viewer's own review split
    /// out.
    async fn load(&self, product: ProductId, page: u32) -> Result<ProductReviews, FeedbackError>;

    /// The signed-in viewer's review of `product`, searched across every
    /// page.
    async fn own_review(&self, product: ProductId) -> Result<Option<Feedback>, FeedbackError>;

    /// Validate and send a review: an edit when the viewer already reviewed
    /// the product, a create otherwise. Reloads on success.
    async fn submit(
        &self,
        product: ProductId,
        draft: ReviewDraft,
    ) -> Result<ProductReviews, FeedbackError>;

    /// Delete a review after confirmation. Reloads on success.
    async fn delete(
        &self,
        product: ProductId,
        review: FeedbackId,
    ) -> Result<ProductReviews, FeedbackError>;
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use storefront::{
        feedback::{ReviewError, Reviewer},
        users::{User, UserId},
    };
    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockFeedbackApi, feedback::FeedbackPage},
        notices::{MockConfirm, MockNotifier},
        store::AppState,
    };

    use super::*;

    fn review(id: &str, user: &str, rating: u8) -> Feedback {
        Feedback {
            id: FeedbackId::new(id),
            product_id: ProductId::new("p1"),
            user: Reviewer::Populated(User {
                id: UserId::new(user),
                name: Some(format!("User {user}")),
            }),
            rating,
            comment: format!("Review {id}"),
            created_at: None,
            updated_at: None,
        }
    }

    fn signed_in_as(user: &str) -> Store {
        Store::new(AppState {
            authenticated: true,
            user: Some(UserId::new(user)),
            ..AppState::default()
        })
    }

    /// First page holds f1 by u1 and f2 by u2. `pages` counts every first
    /// page read: the own-review lookup plus the reload.
    fn expect_reload(api: &mut MockFeedbackApi, pages: usize) {
        api.expect_list_feedback()
            .withf(|product, page, limit| product.as_str() == "p1" && *page == 1 && *limit == 10)
            .times(pages)
            .returning(|_, _, _| {
                Ok(FeedbackPage {
                    items: vec![review("f1", "u1", 4), review("f2", "u2", 5)],
                    pagination: None,
                })
            });
        api.expect_rating_summary()
            .times(1)
            .returning(|_| Ok(RatingSummary::default()));
    }

    fn notifier_expecting(message: &'static str) -> MockNotifier {
        let mut notifier = MockNotifier::new();

        notifier
            .expect_notify()
            .withf(move |notice| notice.message == message)
            .times(1)
            .returning(|_| ());

        notifier
    }

    fn no_confirm() -> Arc<MockConfirm> {
        let mut confirm = MockConfirm::new();
        confirm.expect_confirm().never();

        Arc::new(confirm)
    }

    #[tokio::test]
    async fn load_splits_out_own_review() -> TestResult {
        let mut api = MockFeedbackApi::new();
        expect_reload(&mut api, 1);

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            signed_in_as("u2"),
            Arc::new(notifier),
            no_confirm(),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        let reviews = service.load(ProductId::new("p1"), 1).await?;

        assert_eq!(
            reviews.own.map(|review| review.id),
            Some(FeedbackId::new("f2"))
        );
        assert_eq!(reviews.others.len(), 1);
        assert!(reviews.others.iter().all(|review| review.id.as_str() != "f2"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_rating_blocks_submission() {
        let mut api = MockFeedbackApi::new();
        api.expect_create_feedback().never();
        api.expect_list_feedback().never();

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            signed_in_as("u1"),
            Arc::new(notifier_expecting("Please select a rating")),
            no_confirm(),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        let draft = ReviewDraft {
            rating: 0,
            comment: "Nice".to_string(),
        };

        let result = service.submit(ProductId::new("p1"), draft).await;

        assert!(
            matches!(result, Err(FeedbackError::Invalid(ReviewError::MissingRating))),
            "expected MissingRating, got {result:?}"
        );
    }

    #[tokio::test]
    async fn blank_comment_blocks_submission() {
        let mut api = MockFeedbackApi::new();
        api.expect_create_feedback().never();
        api.expect_list_feedback().never();

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            signed_in_as("u1"),
            Arc::new(notifier_expecting("Please write a comment")),
            no_confirm(),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        let draft = ReviewDraft {
            rating: 4,
            comment: "   ".to_string(),
        };

        assert!(
            service.submit(ProductId::new("p1"), draft).await.is_err(),
            "blank comment should be rejected"
        );
    }

    #[tokio::test]
    async fn signed_out_submission_is_rejected() {
        let mut api = MockFeedbackApi::new();
        api.expect_create_feedback().never();
        api.expect_list_feedback().never();

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            Store::default(),
            Arc::new(notifier_expecting("Please sign in to leave a review")),
            no_confirm(),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        let draft = ReviewDraft {
            rating: 5,
            comment: "Great".to_string(),
        };

        let result = service.submit(ProductId::new("p1"), draft).await;

        assert!(
            matches!(result, Err(FeedbackError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_posts_trimmed_review_then_reloads() -> TestResult {
        let mut api = MockFeedbackApi::new();

        api.expect_create_feedback()
            .withf(|feedback| {
                feedback.product_id.as_str() == "p1"
                    && feedback.rating == 5
                    && feedback.comment == "Great"
            })
            .times(1)
            .returning(|_| Ok(()));
        api.expect_update_feedback().never();
        expect_reload(&mut api, 2);

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            signed_in_as("u9"),
            Arc::new(notifier_expecting("Review submitted")),
            no_confirm(),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        let draft = ReviewDraft {
            rating: 5,
            comment: "  Great ".to_string(),
        };

        let reviews = service.submit(ProductId::new("p1"), draft).await?;

        assert_eq!(reviews.others.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn existing_review_is_edited_not_duplicated() -> TestResult {
        let mut api = MockFeedbackApi::new();

        api.expect_update_feedback()
            .withf(|id, update| id.as_str() == "f2" && update.rating == 3)
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_create_feedback().never();
        expect_reload(&mut api, 2);

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            signed_in_as("u2"),
            Arc::new(notifier_expecting("Review updated")),
            no_confirm(),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        let draft = ReviewDraft::from_feedback(&review("f2", "u2", 3));

        service.submit(ProductId::new("p1"), draft).await?;

        Ok(())
    }

    #[tokio::test]
    async fn declined_delete_issues_no_request() {
        let mut api = MockFeedbackApi::new();
        api.expect_delete_feedback().never();
        api.expect_list_feedback().never();

        let mut confirm = MockConfirm::new();
        confirm.expect_confirm().times(1).returning(|_| false);

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            signed_in_as("u2"),
            Arc::new(notifier),
            Arc::new(confirm),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        let result = service
            .delete(ProductId::new("p1"), FeedbackId::new("f2"))
            .await;

        assert!(
            matches!(result, Err(FeedbackError::Declined)),
            "expected Declined, got {result:?}"
        );
    }

    #[tokio::test]
    async fn confirmed_delete_reloads() -> TestResult {
        let mut api = MockFeedbackApi::new();

        api.expect_delete_feedback()
            .withf(|id| id.as_str() == "f2")
            .times(1)
            .returning(|_| Ok(()));
        expect_reload(&mut api, 1);

        let mut confirm = MockConfirm::new();
        confirm.expect_confirm().times(1).returning(|_| true);

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            signed_in_as("u2"),
            Arc::new(notifier_expecting("Review deleted")),
            Arc::new(confirm),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        service
            .delete(ProductId::new("p1"), FeedbackId::new("f2"))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn server_rejection_is_surfaced() {
        let mut api = MockFeedbackApi::new();

        api.expect_create_feedback().times(1).returning(|_| {
            Err(ApiError::Status {
                status: StatusCode::CONFLICT,
                message: Some("You have already reviewed this product".to_string()),
            })
        });
        api.expect_list_feedback()
            .times(1)
            .returning(|_, _, _| Ok(FeedbackPage::default()));
        api.expect_rating_summary().never();

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            signed_in_as("u1"),
            Arc::new(notifier_expecting("You have already reviewed this product")),
            no_confirm(),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        let draft = ReviewDraft {
            rating: 4,
            comment: "Again".to_string(),
        };

        assert!(
            service.submit(ProductId::new("p1"), draft).await.is_err(),
            "duplicate review should fail"
        );
    }

    #[tokio::test]
    async fn own_review_on_a_later_page_is_edited() -> TestResult {
        let mut api = MockFeedbackApi::new();

        api.expect_list_feedback()
            .withf(|_, page, _| *page == 2)
            .times(1)
            .returning(|_, page, _| {
                Ok(FeedbackPage {
                    items: vec![review("f3", "u3", 2)],
                    pagination: Some(Pagination {
                        current_page: page,
                        total_pages: 2,
                        total_items: 3,
                    }),
                })
            });
        api.expect_list_feedback()
            .withf(|_, page, _| *page == 1)
            .times(2)
            .returning(|_, page, _| {
                Ok(FeedbackPage {
                    items: vec![review("f1", "u1", 4), review("f2", "u2", 5)],
                    pagination: Some(Pagination {
                        current_page: page,
                        total_pages: 2,
                        total_items: 3,
                    }),
                })
            });
        api.expect_rating_summary()
            .times(1)
            .returning(|_| Ok(RatingSummary::default()));
        api.expect_update_feedback()
            .withf(|id, update| id.as_str() == "f3" && update.rating == 4)
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_create_feedback().never();

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            signed_in_as("u3"),
            Arc::new(notifier_expecting("Review updated")),
            no_confirm(),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        let draft = ReviewDraft {
            rating: 4,
            comment: "Grew on me".to_string(),
        };

        service.submit(ProductId::new("p1"), draft).await?;

        Ok(())
    }

    #[tokio::test]
    async fn own_review_lookup_stops_at_last_page() -> TestResult {
        let mut api = MockFeedbackApi::new();

        api.expect_list_feedback()
            .times(1)
            .returning(|_, _, _| {
                Ok(FeedbackPage {
                    items: vec![review("f1", "u1", 4)],
                    pagination: None,
                })
            });
        api.expect_rating_summary().never();

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let service = SyncedFeedbackService::new(
            Arc::new(api),
            signed_in_as("u7"),
            Arc::new(notifier),
            no_confirm(),
            DEFAULT_REVIEWS_PER_PAGE,
        );

        assert!(service.own_review(ProductId::new("p1")).await?.is_none());

        Ok(())
    }
}
