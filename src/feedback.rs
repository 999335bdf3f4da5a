//! Feedback
//!
//! Product reviews and their rating summary. A user has at most one review
//! per product; the server enforces it, the client only has to find it.

use std::collections::BTreeMap;

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    ids::TypedId,
    products::ProductId,
    users::{User, UserId},
};

/// Feedback Id
pub type FeedbackId = TypedId<Feedback>;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// Review validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// No stars selected.
    #[error("Please select a rating")]
    MissingRating,

    /// Rating outside 1..=5.
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange(u8),

    /// Empty comment.
    #[error("Please write a comment")]
    EmptyComment,
}

/// Author of a review: populated user or bare id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Reviewer {
    /// Populated user document.
    Populated(User),

    /// User id only.
    Id(UserId),
}

impl Reviewer {
    /// Author id.
    #[must_use]
    pub fn id(&self) -> &UserId {
        match self {
            Reviewer::Populated(user) => &user.id,
            Reviewer::Id(id) => id,
        }
    }

    /// Author display name, falling back to "Anonymous".
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Reviewer::Populated(User {
                name: Some(name), ..
            }) if !name.trim().is_empty() => name.as_str(),
            Reviewer::Populated(_) | Reviewer::Id(_) => "Anonymous",
        }
    }
}

/// A product review.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Server id.
    #[serde(rename = "_id")]
    pub id: FeedbackId,

    /// Reviewed product.
    #[serde(alias = "product")]
    pub product_id: ProductId,

    /// Author.
    #[serde(alias = "userId")]
    pub user: Reviewer,

    /// Stars, 1..=5.
    pub rating: u8,

    /// Review text.
    pub comment: String,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<Timestamp>,

    /// Last edit time.
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Feedback {
    /// Whether the review was written by `user`.
    #[must_use]
    pub fn is_by(&self, user: &UserId) -> bool {
        self.user.id() == user
    }
}

/// Aggregate rating for a product.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Mean rating.
    #[serde(default, alias = "average")]
    pub average_rating: Decimal,

    /// Number of reviews.
    #[serde(default, alias = "total", alias = "count")]
    pub total_reviews: u32,

    /// Review count per star value.
    #[serde(default, alias = "ratingDistribution")]
    pub distribution: BTreeMap<String, u32>,
}

impl RatingSummary {
    /// Number of reviews with exactly `stars` stars.
    #[must_use]
    pub fn count(&self, stars: u8) -> u32 {
        self.distribution
            .get(&stars.to_string())
            .copied()
            .unwrap_or_default()
    }

    /// Share of reviews per star value from 5 down to 1, as whole
    /// percentages.
    #[must_use]
    pub fn percentages(&self) -> [(u8, u32, Decimal); 5] {
        let total = Decimal::from(self.total_reviews);

        [5, 4, 3, 2, 1].map(|stars| {
            let count = self.count(stars);
            let percent = if total.is_zero() {
                Decimal::ZERO
            } else {
                (Decimal::from(count) * Decimal::ONE_HUNDRED / total)
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            };

            (stars, count, percent)
        })
    }

    /// Average rounded to one decimal, e.g. `4.3`.
    #[must_use]
    pub fn rounded_average(&self) -> Decimal {
        self.average_rating
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Review form contents before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewDraft {
    /// Selected stars, 0 when none.
    pub rating: u8,

    /// Comment text.
    pub comment: String,
}

impl ReviewDraft {
    /// Draft pre-filled from an existing review for editing.
    #[must_use]
    pub fn from_feedback(feedback: &Feedback) -> Self {
        Self {
            rating: feedback.rating,
            comment: feedback.comment.clone(),
        }
    }

    /// Validate into a submittable review.
    ///
    /// # Errors
    ///
    /// Returns a [`ReviewError`] for a missing or out-of-range rating, or an
    /// empty comment.
    pub fn validate(&self) -> Result<ValidReview, ReviewError> {
        if self.rating == 0 {
            return Err(ReviewError::MissingRating);
        }

        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ReviewError::RatingOutOfRange(self.rating));
        }

        let comment = self.comment.trim();

        if comment.is_empty() {
            return Err(ReviewError::EmptyComment);
        }

        Ok(ValidReview {
            rating: self.rating,
            comment: comment.to_string(),
        })
    }
}

/// A review that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReview {
    /// Stars, 1..=5.
    pub rating: u8,

    /// Trimmed, non-empty comment.
    pub comment: String,
}

/// Split the viewer's own review out of a fetched page.
///
/// Returns the viewer's review (if present) and the remaining reviews in
/// their original order.
#[must_use]
pub fn split_own_review(
    reviews: Vec<Feedback>,
    viewer: Option<&UserId>,
) -> (Option<Feedback>, Vec<Feedback>) {
    let Some(viewer) = viewer else {
        return (None, reviews);
    };

    let mut own = None;
    let mut others = Vec::with_capacity(reviews.len());

    for review in reviews {
        if own.is_none() && review.is_by(viewer) {
            own = Some(review);
        } else {
            others.push(review);
        }
    }

    (own, others)
}

#[cfg(test)]
pub(crate) mod tests {
    use testresult::TestResult;

    use super::*;

    pub(crate) fn review(id: &str, user: &str, rating: u8) -> Feedback {
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

    #[test]
    fn zero_rating_is_rejected() {
        let draft = ReviewDraft {
            rating: 0,
            comment: "Great".to_string(),
        };

        assert_eq!(draft.validate(), Err(ReviewError::MissingRating));
    }

    #[test]
    fn blank_comment_is_rejected() {
        let draft = ReviewDraft {
            rating: 4,
            comment: "   ".to_string(),
        };

        assert_eq!(draft.validate(), Err(ReviewError::EmptyComment));
    }

    #[test]
    fn ratings_above_five_are_rejected() {
        let draft = ReviewDraft {
            rating: 6,
            comment: "Great".to_string(),
        };

        assert_eq!(draft.validate(), Err(ReviewError::RatingOutOfRange(6)));
    }

    #[test]
    fn valid_draft_trims_comment() -> TestResult {
        let draft = ReviewDraft {
            rating: 5,
            comment: "  Great shoes \n".to_string(),
        };

        let review = draft.validate()?;

        assert_eq!(review.rating, 5);
        assert_eq!(review.comment, "Great shoes");

        Ok(())
    }

    #[test]
    fn own_review_is_split_out() {
        let reviews = vec![review("f1", "u1", 4), review("f2", "u2", 5), review("f3", "u3", 2)];

        let (own, others) = split_own_review(reviews, Some(&UserId::new("u2")));

        assert_eq!(own.map(|review| review.id), Some(FeedbackId::new("f2")));
        assert_eq!(others.len(), 2);
        assert!(others.iter().all(|review| !review.is_by(&UserId::new("u2"))));
    }

    #[test]
    fn anonymous_viewer_sees_everything() {
        let reviews = vec![review("f1", "u1", 4)];

        let (own, others) = split_own_review(reviews, None);

        assert!(own.is_none());
        assert_eq!(others.len(), 1);
    }

    #[test]
    fn deserializes_review_with_bare_user() -> TestResult {
        let feedback: Feedback = serde_json::from_str(
            r#"{"_id": "f1", "productId": "p1", "user": "u1", "rating": 3, "comment": "ok"}"#,
        )?;

        assert_eq!(feedback.user.id(), &UserId::new("u1"));
        assert_eq!(feedback.user.display_name(), "Anonymous");

        Ok(())
    }

    #[test]
    fn distribution_percentages_sum_to_about_one_hundred() -> TestResult {
        let summary: RatingSummary = serde_json::from_str(
            r#"{"averageRating": 3.6667, "totalReviews": 3, "distribution": {"5": 1, "4": 1, "2": 1}}"#,
        )?;

        let percentages = summary.percentages();
        let sum: Decimal = percentages.iter().map(|(_, _, percent)| *percent).sum();

        assert_eq!(summary.rounded_average(), Decimal::new(37, 1));
        assert_eq!(summary.count(3), 0);
        assert!(
            (Decimal::from(99)..=Decimal::from(101)).contains(&sum),
            "sum was {sum}"
        );

        Ok(())
    }

    #[test]
    fn empty_summary_has_zero_percentages() {
        let summary = RatingSummary::default();

        assert!(
            summary
                .percentages()
                .iter()
                .all(|(_, count, percent)| *count == 0 && percent.is_zero())
        );
    }
}
