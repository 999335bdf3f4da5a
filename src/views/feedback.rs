use std::io;

use rust_decimal::Decimal;
use tabled::builder::Builder;

use crate::feedback::{Feedback, FeedbackId, RatingSummary};

use super::{ViewError, stars, write_table};

/// One bar of the rating distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRow {
    /// Star value, 5 down to 1.
    pub stars: u8,

    /// Reviews with this value.
    pub count: u32,

    /// Whole-percent share of all reviews.
    pub percent: Decimal,
}

/// A rendered review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewView {
    /// Review id.
    pub id: FeedbackId,

    /// Author display name.
    pub author: String,

    /// Star string, e.g. `★★★★☆`.
    pub stars: String,

    /// Review text.
    pub comment: String,

    /// Creation date as `YYYY-MM-DD`.
    pub date: Option<String>,

    /// Whether the viewer wrote it and may edit or delete it.
    pub own: bool,
}

impl ReviewView {
    fn new(feedback: &Feedback, own: bool) -> Self {
        Self {
            id: feedback.id.clone(),
            author: feedback.user.display_name().to_string(),
            stars: stars(feedback.rating),
            comment: feedback.comment.clone(),
            date: feedback
                .created_at
                .map(|created_at| created_at.strftime("%Y-%m-%d").to_string()),
            own,
        }
    }
}

/// Reviews section of a product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    /// Average rounded to one decimal.
    pub average: Decimal,

    /// Number of reviews.
    pub total_reviews: u32,

    /// Distribution from 5 stars down to 1.
    pub distribution: Vec<RatingRow>,

    /// The viewer's own review, shown first.
    pub own_review: Option<ReviewView>,

    /// Everyone else's reviews.
    pub reviews: Vec<ReviewView>,
}

impl FeedbackView {
    /// Build the section from a summary plus the viewer's own review and
    /// the rest.
    #[must_use]
    pub fn new(summary: &RatingSummary, own: Option<&Feedback>, others: &[Feedback]) -> Self {
        Self {
            average: summary.rounded_average(),
            total_reviews: summary.total_reviews,
            distribution: summary
                .percentages()
                .into_iter()
                .map(|(stars, count, percent)| RatingRow {
                    stars,
                    count,
                    percent,
                })
                .collect(),
            own_review: own.map(|review| ReviewView::new(review, true)),
            reviews: others
                .iter()
                .map(|review| ReviewView::new(review, false))
                .collect(),
        }
    }

    /// Write the summary, distribution, and review list.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ViewError> {
        writeln!(
            out,
            "{} out of 5 ({} reviews)",
            self.average, self.total_reviews
        )?;

        let mut distribution = Builder::default();

        for row in &self.distribution {
            distribution.push_record([
                stars(row.stars).as_str(),
                row.count.to_string().as_str(),
                format!("{}%", row.percent).as_str(),
            ]);
        }

        write_table(&mut out, distribution)?;

        if self.own_review.is_none() && self.reviews.is_empty() {
            writeln!(out, "No reviews yet")?;

            return Ok(());
        }

        let mut reviews = Builder::default();

        reviews.push_record(["Id", "Author", "Rating", "Date", "Comment"]);

        for review in self.own_review.iter().chain(&self.reviews) {
            let author = if review.own {
                format!("{} (you)", review.author)
            } else {
                review.author.clone()
            };

            reviews.push_record([
                review.id.as_str(),
                author.as_str(),
                review.stars.as_str(),
                review.date.as_deref().unwrap_or("-"),
                review.comment.as_str(),
            ]);
        }

        write_table(&mut out, reviews)
    }
}
