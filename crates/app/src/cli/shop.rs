use std::io;

use clap::Args;
use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront::{
    filters::{FilterChange, SortOption},
    views::ShopView,
};
use storefront_app::{context::AppContext, domain::shop::DEFAULT_PAGE_SIZE};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct ShopArgs {
    /// Search term
    #[arg(long, short)]
    search: Option<String>,

    /// Lowest price
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Highest price
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Sort option, e.g. `price_asc` or `createdAt_desc`
    #[arg(long, default_value_t = SortOption::NEWEST)]
    sort: SortOption,

    /// Page number
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Products per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    limit: u32,
}

impl ShopArgs {
    fn changes(&self) -> Vec<FilterChange> {
        let mut changes = Vec::with_capacity(4);

        if let Some(search) = &self.search {
            changes.push(FilterChange::Search(search.clone()));
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            changes.push(FilterChange::PriceRange {
                min: self.min_price,
                max: self.max_price,
            });
        }

        changes.push(FilterChange::Sort(self.sort));
        changes.push(FilterChange::Page(self.page));

        changes
    }
}

pub(crate) async fn run(
    args: ShopArgs,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    ctx.shop.set_page_size(args.limit).await?;

    if !ctx.shop.apply_all(args.changes()).await? {
        ctx.shop.load().await?;
    }

    let Some(page) = ctx.shop.view().await.loaded().cloned() else {
        return Ok(());
    };

    ShopView::new(
        &page.items,
        page.pagination.as_ref(),
        &ctx.assets,
        Timestamp::now(),
    )?
    .write_to(out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use storefront_app::api::products::ShopProductsPage;
    use testresult::TestResult;

    use crate::cli::test::{TestContext, rendered};

    use super::*;

    fn args(search: Option<&str>, page: u32) -> ShopArgs {
        ShopArgs {
            search: search.map(str::to_string),
            min_price: None,
            max_price: None,
            sort: SortOption::NEWEST,
            page,
            limit: 12,
        }
    }

    #[tokio::test]
    async fn search_renders_results() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.shop_api
            .expect_search_shop_products()
            .withf(|query| query.get("q") == Some("drill") && query.get("page") == Some("2"))
            .times(1)
            .returning(|_| {
                Ok(ShopProductsPage {
                    items: vec![serde_json::from_str(
                        r#"{"_id": "s1", "name": "Cordless Drill", "price": 80, "stock": 10}"#,
                    )?],
                    pagination: None,
                })
            });

        let ctx = ctx.build();
        let mut out = Vec::new();

        run(args(Some("drill"), 2), &ctx, &mut out).await?;

        let output = rendered(out);

        assert!(output.contains("Cordless Drill"), "output was {output}");
        assert!(output.contains("$80.00"), "output was {output}");

        Ok(())
    }

    #[tokio::test]
    async fn default_filters_still_load_once() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.shop_api
            .expect_list_shop_products()
            .times(1)
            .returning(|_| Ok(ShopProductsPage::default()));

        let ctx = ctx.build();
        let mut out = Vec::new();

        run(args(None, 1), &ctx, &mut out).await?;

        assert!(rendered(out).contains("No products found"));

        Ok(())
    }
}
