//! Products service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    notices::Notice,
    products::{Product, ProductId, ShopProduct},
};
use tracing::warn;

use crate::{
    api::{ProductsApi, products::CatalogQuery},
    domain::products::errors::ProductError,
    notices::Notifier,
};

#[derive(Clone)]
pub struct CatalogProductsService {
    api: Arc<dyn ProductsApi>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for CatalogProductsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogProductsService").finish_non_exhaustive()
    }
}

impl CatalogProductsService {
    #[must_use]
    pub fn new(api: Arc<dyn ProductsApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    fn reject(&self, error: ProductError, fallback: &str) -> ProductError {
        warn!(%error, "product request failed");

        self.notifier.notify(Notice::error(error.user_message(fallback)));

        error
    }
}

#[async_trait]
impl ProductsService for CatalogProductsService {
    async fn product_detail(&self, id: ProductId) -> Result<ShopProduct, ProductError> {
        if id.is_blank() {
            return Err(self.reject(ProductError::MissingProduct, "Invalid product"));
        }

        self.api
            .get_shop_product(id)
            .await
            .map_err(|source| self.reject(source.into(), "Failed to load product"))
    }

    async fn catalog(&self, query: CatalogQuery) -> Result<Vec<Product>, ProductError> {
        self.api
            .list_products(query)
            .await
            .map_err(|source| self.reject(source.into(), "Failed to load products"))
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Shop product for the detail page.
    async fn product_detail(&self, id: ProductId) -> Result<ShopProduct, ProductError>;

    /// Catalog products for the home rails and banner.
    async fn catalog(&self, query: CatalogQuery) -> Result<Vec<Product>, ProductError>;
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockProductsApi},
        notices::MockNotifier,
    };

    use super::*;

    #[tokio::test]
    async fn blank_id_is_rejected_locally() {
        let mut api = MockProductsApi::new();
        api.expect_get_shop_product().never();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|notice| notice.message == "Invalid product")
            .times(1)
            .returning(|_| ());

        let service = CatalogProductsService::new(Arc::new(api), Arc::new(notifier));

        let result = service.product_detail(ProductId::new("")).await;

        assert!(
            matches!(result, Err(ProductError::MissingProduct)),
            "expected MissingProduct, got {result:?}"
        );
    }

    #[tokio::test]
    async fn detail_is_fetched_by_id() -> TestResult {
        let mut api = MockProductsApi::new();

        api.expect_get_shop_product()
            .withf(|id| id.as_str() == "s1")
            .times(1)
            .returning(|_| {
                Ok(serde_json::from_str(
                    r#"{"_id": "s1", "name": "Drill", "price": 80, "stock": 3}"#,
                )?)
            });

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let service = CatalogProductsService::new(Arc::new(api), Arc::new(notifier));

        let product = service.product_detail(ProductId::new("s1")).await?;

        assert_eq!(product.stock(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn not_found_surfaces_server_message() {
        let mut api = MockProductsApi::new();

        api.expect_get_shop_product().times(1).returning(|_| {
            Err(ApiError::Status {
                status: StatusCode::NOT_FOUND,
                message: Some("Product not found".to_string()),
            })
        });

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|notice| notice.is_error() && notice.message == "Product not found")
            .times(1)
            .returning(|_| ());

        let service = CatalogProductsService::new(Arc::new(api), Arc::new(notifier));

        assert!(
            service.product_detail(ProductId::new("nope")).await.is_err(),
            "missing product should fail"
        );
    }
}
