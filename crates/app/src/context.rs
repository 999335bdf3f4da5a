//! App Context

use std::{fmt, sync::Arc};

use storefront::{assets::AssetBase, users::UserId};
use thiserror::Error;

use crate::{
    api::{ApiError, HttpCartApi, HttpFeedbackApi, HttpProductsApi, HttpTransport},
    config::ClientConfig,
    domain::{
        carts::{CartsService, SyncedCartsService},
        feedback::{DEFAULT_REVIEWS_PER_PAGE, FeedbackService, SyncedFeedbackService},
        products::{CatalogProductsService, ProductsService},
        shop::{DEFAULT_PAGE_SIZE, ShopService},
    },
    notices::{Confirm, Notifier},
    store::{AppState, Store},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build API client")]
    Api(#[source] ApiError),
}

#[derive(Clone)]
pub struct AppContext {
    pub store: Store,
    pub assets: AssetBase,
    pub products: Arc<dyn ProductsService>,
    pub shop: Arc<ShopService>,
    pub carts: Arc<dyn CartsService>,
    pub feedback: Arc<dyn FeedbackService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("store", &self.store)
            .field("assets", &self.assets)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_config(
        config: &ClientConfig,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Result<Self, AppInitError> {
        let transport = HttpTransport::new(&config.api()).map_err(AppInitError::Api)?;

        let store = Store::new(AppState {
            authenticated: config.is_authenticated(),
            user: config
                .user_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(UserId::new),
            ..AppState::default()
        });

        let products_api = Arc::new(HttpProductsApi::new(transport.clone()));

        Ok(Self {
            assets: AssetBase::new(config.asset_url()),
            products: Arc::new(CatalogProductsService::new(
                products_api.clone(),
                Arc::clone(&notifier),
            )),
            shop: Arc::new(ShopService::new(
                products_api,
                Arc::clone(&notifier),
                DEFAULT_PAGE_SIZE,
            )),
            carts: Arc::new(SyncedCartsService::new(
                Arc::new(HttpCartApi::new(transport.clone())),
                store.clone(),
                Arc::clone(&notifier),
            )),
            feedback: Arc::new(SyncedFeedbackService::new(
                Arc::new(HttpFeedbackApi::new(transport)),
                store.clone(),
                notifier,
                confirm,
                DEFAULT_REVIEWS_PER_PAGE,
            )),
            store,
        })
    }
}
