use std::io;

use clap::Args;
use jiff::Timestamp;
use storefront::{products::ProductId, views::ProductInfo};
use storefront_app::context::AppContext;

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Shop product id
    id: String,
}

pub(crate) async fn run(
    args: ProductArgs,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let id = ProductId::new(args.id);
    let product = ctx.products.product_detail(id.clone()).await?;

    ProductInfo::new(&product, &ctx.assets, Timestamp::now())?.write_to(&mut *out)?;

    // The product is still worth showing when its reviews fail to load; the
    // failure has already been reported as a notice.
    if let Ok(reviews) = ctx.feedback.load(id, 1).await {
        reviews.view().write_to(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use storefront_app::domain::{feedback::ProductReviews, products::ProductError};
    use testresult::TestResult;

    use crate::cli::test::{TestContext, rendered};

    use super::*;

    #[tokio::test]
    async fn renders_detail_and_reviews() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.products
            .expect_product_detail()
            .withf(|id| id.as_str() == "s1")
            .times(1)
            .returning(|_| {
                serde_json::from_str(
                    r#"{"_id": "s1", "name": "Cordless Drill", "price": 80, "discount": 25, "brand": "Bosch", "stock": 2}"#,
                )
                .map_err(|error| ProductError::Api(error.into()))
            });
        ctx.feedback
            .expect_load()
            .times(1)
            .returning(|_, _| Ok(ProductReviews::default()));

        let ctx = ctx.build();
        let mut out = Vec::new();

        run(ProductArgs { id: "s1".to_string() }, &ctx, &mut out).await?;

        let output = rendered(out);

        assert!(output.contains("$60.00 (was $80.00)"), "output was {output}");
        assert!(output.contains("Only 2 left in stock"), "output was {output}");
        assert!(output.contains("No reviews yet"), "output was {output}");

        Ok(())
    }
}
