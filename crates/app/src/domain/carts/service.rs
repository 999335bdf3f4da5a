//! Carts service.
//!
//! The server owns the cart. Every successful mutation is followed by
//! exactly one full `GET /api/cart`; mutation response bodies are never
//! applied to local state, and nothing is changed optimistically.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    cart::{CartItemId, CartViewModel},
    notices::Notice,
    products::ProductId,
};
use tracing::{info, warn};

use crate::{
    api::{
        ApiError, CartApi,
        cart::{AddToCartRequest, UpdateCartItemRequest},
    },
    domain::carts::errors::CartError,
    notices::Notifier,
    store::Store,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CartAction {
    Add,
    Update,
    Remove,
    Clear,
}

impl CartAction {
    fn success(self) -> &'static str {
        match self {
            CartAction::Add => "Added to cart",
            CartAction::Update => "Cart updated",
            CartAction::Remove => "Item removed from cart",
            CartAction::Clear => "Cart cleared",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            CartAction::Add => "Failed to add item to cart",
            CartAction::Update => "Failed to update cart",
            CartAction::Remove => "Failed to remove item from cart",
            CartAction::Clear => "Failed to clear cart",
        }
    }
}

const FETCH_FAILURE: &str = "Failed to load cart";

#[derive(Clone)]
pub struct SyncedCartsService {
    api: Arc<dyn CartApi>,
    store: Store,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for SyncedCartsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncedCartsService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl SyncedCartsService {
    #[must_use]
    pub fn new(api: Arc<dyn CartApi>, store: Store, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            store,
            notifier,
        }
    }

    fn reject(&self, error: CartError) -> CartError {
        warn!(%error, "cart action rejected");

        self.notifier.notify(Notice::error(error.to_string()));

        error
    }

    async fn refetch(&self) -> Result<CartViewModel, CartError> {
        let result = match self.api.get_cart().await {
            Ok(cart) => CartViewModel::from_cart(&cart).map_err(CartError::from),
            Err(source) => Err(source.into()),
        };

        match result {
            Ok(cart) => {
                info!(items = cart.item_count(), "cart refetched");

                self.store.set_cart(cart.clone());

                Ok(cart)
            }
            Err(error) => {
                warn!(%error, "cart refetch failed");

                self.notifier
                    .notify(Notice::error(error.user_message(FETCH_FAILURE)));

                Err(error)
            }
        }
    }

    /// Run a mutation, then resynchronise from the server. Success is only
    /// reported once the refetched cart is published.
    async fn mutate(
        &self,
        action: CartAction,
        result: Result<(), ApiError>,
    ) -> Result<CartViewModel, CartError> {
        if let Err(source) = result {
            warn!(?action, error = %source, "cart mutation failed");

            self.notifier
                .notify(Notice::error(source.user_message(action.failure())));

            return Err(source.into());
        }

        let cart = self.refetch().await?;

        self.notifier.notify(Notice::success(action.success()));

        Ok(cart)
    }
}

#[async_trait]
impl CartsService for SyncedCartsService {
    async fn fetch_cart(&self) -> Result<CartViewModel, CartError> {
        if !self.store.is_authenticated() {
            let empty = CartViewModel::default();
            self.store.set_cart(empty.clone());

            return Ok(empty);
        }

        self.refetch().await
    }

    async fn add_to_cart(
        &self,
        product: ProductId,
        quantity: u32,
    ) -> Result<CartViewModel, CartError> {
        if !self.store.is_authenticated() {
            return Err(self.reject(CartError::Unauthenticated));
        }

        if product.is_blank() {
            return Err(self.reject(CartError::MissingProduct));
        }

        if quantity < 1 {
            return Err(self.reject(CartError::InvalidQuantity(quantity)));
        }

        let result = self
            .api
            .add_item(AddToCartRequest {
                product_id: product,
                quantity,
            })
            .await;

        self.mutate(CartAction::Add, result).await
    }

    async fn update_quantity(
        &self,
        item: CartItemId,
        quantity: u32,
    ) -> Result<CartViewModel, CartError> {
        if quantity < 1 {
            return Err(self.reject(CartError::InvalidQuantity(quantity)));
        }

        let result = self
            .api
            .update_item(UpdateCartItemRequest {
                item_id: item,
                quantity,
            })
            .await;

        self.mutate(CartAction::Update, result).await
    }

    async fn remove_from_cart(&self, item: CartItemId) -> Result<CartViewModel, CartError> {
        let result = self.api.remove_item(item).await;

        self.mutate(CartAction::Remove, result).await
    }

    async fn clear_cart(&self) -> Result<CartViewModel, CartError> {
        let result = self.api.clear().await;

        self.mutate(CartAction::Clear, result).await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Fetch the cart and publish it to the store. Without a session the
    /// cart is empty and no request is made.
    async fn fetch_cart(&self) -> Result<CartViewModel, CartError>;

    /// Add `quantity` units of `product`; requires a session.
    async fn add_to_cart(&self, product: ProductId, quantity: u32)
    -> Result<CartViewModel, CartError>;

    /// Set a line's quantity; quantities below 1 are rejected locally.
    async fn update_quantity(
        &self,
        item: CartItemId,
        quantity: u32,
    ) -> Result<CartViewModel, CartError>;

    /// Remove a line.
    async fn remove_from_cart(&self, item: CartItemId) -> Result<CartViewModel, CartError>;

    /// Remove every line.
    async fn clear_cart(&self) -> Result<CartViewModel, CartError>;
}
