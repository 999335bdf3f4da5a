use std::io;

use clap::{Parser, Subcommand};
use storefront::views::ViewError;
use storefront_app::{
    config::{ClientConfig, LoggingConfig},
    context::AppContext,
    domain::{
        carts::CartError, feedback::FeedbackError, products::ProductError, shop::ShopError,
    },
};
use thiserror::Error;

mod cart;
mod product;
mod products;
mod reviews;
mod shop;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) client: ClientConfig,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

impl Cli {
    /// Load configuration from `.env` and CLI arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        let _env = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Browse the shop with filters.
    Shop(shop::ShopArgs),

    /// Show a product with its reviews.
    Product(product::ProductArgs),

    /// Show catalog highlights.
    Products(products::ProductsArgs),

    /// Manage your cart.
    Cart(cart::CartCommand),

    /// Read and write reviews.
    Reviews(reviews::ReviewsCommand),
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Shop(#[from] ShopError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Feedback(#[from] FeedbackError),

    #[error("failed to render output")]
    View(#[from] ViewError),

    #[error("failed to write output")]
    Io(#[from] io::Error),

    #[error("you have not reviewed this product")]
    NoReview,
}

impl Commands {
    /// Whether confirmations should be skipped.
    pub(crate) fn assume_yes(&self) -> bool {
        matches!(self, Commands::Reviews(command) if command.assume_yes())
    }

    pub(crate) async fn run(
        self,
        ctx: &AppContext,
        out: &mut impl io::Write,
    ) -> Result<(), CliError> {
        match self {
            Commands::Shop(args) => shop::run(args, ctx, out).await,
            Commands::Product(args) => product::run(args, ctx, out).await,
            Commands::Products(args) => products::run(args, ctx, out).await,
            Commands::Cart(command) => cart::run(command, ctx, out).await,
            Commands::Reviews(command) => reviews::run(command, ctx, out).await,
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Arc;

    use storefront::assets::AssetBase;
    use storefront_app::{
        api::MockProductsApi,
        context::AppContext,
        domain::{
            carts::MockCartsService, feedback::MockFeedbackService,
            products::MockProductsService, shop::ShopService,
        },
        notices::MockNotifier,
        store::Store,
    };

    /// Context whose services expect nothing unless configured.
    pub(crate) struct TestContext {
        pub(crate) products: MockProductsService,
        pub(crate) shop_api: MockProductsApi,
        pub(crate) carts: MockCartsService,
        pub(crate) feedback: MockFeedbackService,
    }

    impl TestContext {
        pub(crate) fn new() -> Self {
            Self {
                products: MockProductsService::new(),
                shop_api: MockProductsApi::new(),
                carts: MockCartsService::new(),
                feedback: MockFeedbackService::new(),
            }
        }

        pub(crate) fn build(self) -> AppContext {
            let mut notifier = MockNotifier::new();
            notifier.expect_notify().returning(|_| ());

            AppContext {
                store: Store::default(),
                assets: AssetBase::new("http://shop.test"),
                products: Arc::new(self.products),
                shop: Arc::new(ShopService::new(
                    Arc::new(self.shop_api),
                    Arc::new(notifier),
                    12,
                )),
                carts: Arc::new(self.carts),
                feedback: Arc::new(self.feedback),
            }
        }
    }

    pub(crate) fn rendered(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap_or_default()
    }
}
