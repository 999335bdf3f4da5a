use std::io;

use clap::{Args, Subcommand};
use storefront::{feedback::ReviewDraft, products::ProductId};
use storefront_app::{context::AppContext, domain::feedback::FeedbackError};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct ReviewsCommand {
    #[command(subcommand)]
    command: ReviewsSubcommand,
}

impl ReviewsCommand {
    pub(crate) fn assume_yes(&self) -> bool {
        matches!(self.command, ReviewsSubcommand::Delete { yes: true, .. })
    }
}

#[derive(Debug, Subcommand)]
enum ReviewsSubcommand {
    /// List a product's reviews.
    List {
        /// Product id
        product_id: String,

        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Write or edit your review.
    Submit {
        /// Product id
        product_id: String,

        /// Stars, 1 to 5
        #[arg(long, short, default_value_t = 0)]
        rating: u8,

        /// Review text
        #[arg(long, short, default_value = "")]
        comment: String,
    },

    /// Delete your review.
    Delete {
        /// Product id
        product_id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub(crate) async fn run(
    command: ReviewsCommand,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let reviews = match command.command {
        ReviewsSubcommand::List { product_id, page } => {
            ctx.feedback.load(ProductId::new(product_id), page).await?
        }
        ReviewsSubcommand::Submit {
            product_id,
            rating,
            comment,
        } => {
            ctx.feedback
                .submit(ProductId::new(product_id), ReviewDraft { rating, comment })
                .await?
        }
        ReviewsSubcommand::Delete { product_id, .. } => {
            let product = ProductId::new(product_id);
            let own = ctx
                .feedback
                .own_review(product.clone())
                .await?
                .ok_or(CliError::NoReview)?;

            match ctx.feedback.delete(product, own.id).await {
                Ok(reviews) => reviews,
                Err(FeedbackError::Declined) => {
                    writeln!(out, "Review kept")?;

                    return Ok(());
                }
                Err(error) => return Err(error.into()),
            }
        }
    };

    reviews.view().write_to(out)?;

    Ok(())
}
