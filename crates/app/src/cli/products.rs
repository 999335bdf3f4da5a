use std::io;

use clap::Args;
use jiff::Timestamp;
use storefront::{
    filters::SortOption,
    views::{ProductBanner, ProductCard},
};
use storefront_app::{api::products::CatalogQuery, context::AppContext};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Sort option, e.g. `price_desc`
    #[arg(long, default_value_t = SortOption::NEWEST)]
    sort: SortOption,

    /// Number of products
    #[arg(long, default_value_t = 8)]
    limit: u32,
}

pub(crate) async fn run(
    args: ProductsArgs,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let products = ctx
        .products
        .catalog(CatalogQuery {
            sort: args.sort,
            limit: args.limit,
        })
        .await?;

    let now = Timestamp::now();

    if let Some(banner) = ProductBanner::featured(&products, &ctx.assets, now)? {
        writeln!(out, "{}", banner.headline)?;
    }

    for product in &products {
        ProductCard::new(product, &ctx.assets, now)?.write_to(&mut *out)?;
    }

    Ok(())
}
