//! Shop listing service.
//!
//! Owns the filter record and page size for the shop page. Changing either
//! refetches the listing; applying a change that leaves both untouched does
//! not.

use std::{fmt, sync::Arc};

use storefront::{
    filters::{FilterChange, ShopFilters},
    notices::Notice,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    api::{ProductsApi, products::ShopProductsPage},
    domain::{shop::errors::ShopError, view_state::ViewState},
    notices::Notifier,
};

/// Products per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

#[derive(Debug)]
struct ShopState {
    filters: ShopFilters,
    page_size: u32,
    view: ViewState<ShopProductsPage>,
}

pub struct ShopService {
    api: Arc<dyn ProductsApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ShopState>,
}

impl fmt::Debug for ShopService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopService").finish_non_exhaustive()
    }
}

impl ShopService {
    #[must_use]
    pub fn new(api: Arc<dyn ProductsApi>, notifier: Arc<dyn Notifier>, page_size: u32) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(ShopState {
                filters: ShopFilters::default(),
                page_size: page_size.max(1),
                view: ViewState::Idle,
            }),
        }
    }

    pub async fn filters(&self) -> ShopFilters {
        self.state.lock().await.filters.clone()
    }

    pub async fn page_size(&self) -> u32 {
        self.state.lock().await.page_size
    }

    /// Current listing state.
    pub async fn view(&self) -> ViewState<ShopProductsPage> {
        self.state.lock().await.view.clone()
    }

    /// Apply one filter change, refetching when it changed anything.
    ///
    /// Returns whether a refetch happened.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Filter`] for an invalid change, or
    /// [`ShopError::Api`] when the refetch fails.
    pub async fn apply(&self, change: FilterChange) -> Result<bool, ShopError> {
        self.apply_all([change]).await
    }

    /// Apply several changes in order with at most one refetch.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Filter`] for the first invalid change, or
    /// [`ShopError::Api`] when the refetch fails.
    pub async fn apply_all(
        &self,
        changes: impl IntoIterator<Item = FilterChange> + Send,
    ) -> Result<bool, ShopError> {
        let changed = {
            let mut state = self.state.lock().await;
            let mut filters = state.filters.clone();
            let mut changed = false;

            for change in changes {
                changed |= filters.apply(change).map_err(|error| self.reject(error.into()))?;
            }

            state.filters = filters;

            changed
        };

        if changed {
            self.load().await?;
        }

        Ok(changed)
    }

    /// Change the page size; a new size resets to page 1 and refetches.
    /// Before the first load nothing is shown yet, so nothing is refetched.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::InvalidPageSize`] for zero, or
    /// [`ShopError::Api`] when the refetch fails.
    pub async fn set_page_size(&self, page_size: u32) -> Result<bool, ShopError> {
        if page_size == 0 {
            return Err(self.reject(ShopError::InvalidPageSize));
        }

        let shown = {
            let mut state = self.state.lock().await;

            if state.page_size == page_size {
                return Ok(false);
            }

            state.page_size = page_size;
            state.filters.reset_page();

            !matches!(state.view, ViewState::Idle)
        };

        if shown {
            self.load().await?;
        }

        Ok(shown)
    }

    /// Fetch the listing for the current filters, using the search endpoint
    /// when a search term is set.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Api`] when the request fails.
    pub async fn load(&self) -> Result<ShopProductsPage, ShopError> {
        let query = {
            let mut state = self.state.lock().await;
            state.view = ViewState::Loading;

            state.filters.to_query(state.page_size)
        };

        let result = if query.is_search() {
            self.api.search_shop_products(query).await
        } else {
            self.api.list_shop_products(query).await
        };

        let mut state = self.state.lock().await;

        match result {
            Ok(page) => {
                info!(products = page.items.len(), "shop listing loaded");

                state.view = ViewState::Loaded(page.clone());

                Ok(page)
            }
            Err(source) => {
                let error = ShopError::from(source);
                state.view = ViewState::Failed(error.user_message());

                Err(self.reject(error))
            }
        }
    }

    fn reject(&self, error: ShopError) -> ShopError {
        warn!(%error, "shop request failed");

        self.notifier.notify(Notice::error(error.user_message()));

        error
    }
}
