//! Cart endpoints.
//!
//! Mutations discard their response body; callers refetch the cart instead.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use storefront::{
    cart::{Cart, CartItemId},
    products::ProductId,
};
use tracing::debug;

use super::{ApiError, Envelope, HttpTransport};

/// Body of `POST /api/cart/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    /// Product to add.
    pub product_id: ProductId,

    /// Units to add.
    pub quantity: u32,
}

/// Body of `PUT /api/cart/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    /// Line to change.
    pub item_id: CartItemId,

    /// New quantity.
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct HttpCartApi {
    transport: HttpTransport,
}

impl HttpCartApi {
    #[must_use]
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CartApi for HttpCartApi {
    async fn get_cart(&self) -> Result<Cart, ApiError> {
        debug!("fetching cart");

        let cart: Envelope<Cart> = self.transport.get("/api/cart", &[]).await?;

        Ok(cart.into_inner())
    }

    async fn add_item(&self, request: AddToCartRequest) -> Result<(), ApiError> {
        debug!(product = %request.product_id, quantity = request.quantity, "adding cart item");

        self.transport.post("/api/cart/add", &request).await
    }

    async fn update_item(&self, request: UpdateCartItemRequest) -> Result<(), ApiError> {
        debug!(item = %request.item_id, quantity = request.quantity, "updating cart item");

        self.transport.put("/api/cart/update", &request).await
    }

    async fn remove_item(&self, item: CartItemId) -> Result<(), ApiError> {
        debug!(%item, "removing cart item");

        self.transport
            .delete(&format!("/api/cart/item/{item}"))
            .await
    }

    async fn clear(&self) -> Result<(), ApiError> {
        debug!("clearing cart");

        self.transport.delete("/api/cart/clear").await
    }
}

#[automock]
#[async_trait]
pub trait CartApi: Send + Sync {
    /// `GET /api/cart`
    async fn get_cart(&self) -> Result<Cart, ApiError>;

    /// `POST /api/cart/add`
    async fn add_item(&self, request: AddToCartRequest) -> Result<(), ApiError>;

    /// `PUT /api/cart/update`
    async fn update_item(&self, request: UpdateCartItemRequest) -> Result<(), ApiError>;

    /// `DELETE /api/cart/item/{itemId}`
    async fn remove_item(&self, item: CartItemId) -> Result<(), ApiError>;

    /// `DELETE /api/cart/clear`
    async fn clear(&self) -> Result<(), ApiError>;
}
