//! Product endpoints.

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    filters::{ShopQuery, SortOption},
    products::{Product, ProductId, ShopProduct},
};
use tracing::debug;

use super::{ApiError, Envelope, HttpTransport, Listing, Page};

/// A page of shop products.
pub type ShopProductsPage = Page<ShopProduct>;

/// Query for the generic catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Sort option.
    pub sort: SortOption,

    /// Maximum number of products.
    pub limit: u32,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            sort: SortOption::NEWEST,
            limit: 8,
        }
    }
}

impl CatalogQuery {
    /// Query string pairs.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let (sort_by, sort_order) = self.sort.decompose();

        vec![
            ("sortBy", sort_by.to_string()),
            ("sortOrder", sort_order.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct HttpProductsApi {
    transport: HttpTransport,
}

impl HttpProductsApi {
    #[must_use]
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    async fn shop_listing(
        &self,
        path: &str,
        query: &ShopQuery,
    ) -> Result<ShopProductsPage, ApiError> {
        let listing: Listing<ShopProduct> = self.transport.get(path, query.params()).await?;

        Ok(listing.into())
    }
}

#[async_trait]
impl ProductsApi for HttpProductsApi {
    async fn list_products(&self, query: CatalogQuery) -> Result<Vec<Product>, ApiError> {
        debug!(sort = %query.sort, limit = query.limit, "listing catalog products");

        let listing: Listing<Product> = self
            .transport
            .get("/api/products", &query.params())
            .await?;

        Ok(Page::from(listing).items)
    }

    async fn list_shop_products(&self, query: ShopQuery) -> Result<ShopProductsPage, ApiError> {
        debug!(params = ?query.params(), "listing shop products");

        self.shop_listing("/api/shop-products/list", &query).await
    }

    async fn search_shop_products(&self, query: ShopQuery) -> Result<ShopProductsPage, ApiError> {
        debug!(params = ?query.params(), "searching shop products");

        self.shop_listing("/api/shop-products/search", &query).await
    }

    async fn get_shop_product(&self, id: ProductId) -> Result<ShopProduct, ApiError> {
        debug!(%id, "fetching shop product");

        let product: Envelope<ShopProduct> = self
            .transport
            .get(&format!("/api/shop-products/detail/{id}"), &[])
            .await?;

        Ok(product.into_inner())
    }
}

#[automock]
#[async_trait]
pub trait ProductsApi: Send + Sync {
    /// `GET /api/products`: catalog products for the home rails and banner.
    async fn list_products(&self, query: CatalogQuery) -> Result<Vec<Product>, ApiError>;

    /// `GET /api/shop-products/list`: filtered, paged shop products.
    async fn list_shop_products(&self, query: ShopQuery) -> Result<ShopProductsPage, ApiError>;

    /// `GET /api/shop-products/search`: like the listing, with a search term.
    async fn search_shop_products(&self, query: ShopQuery) -> Result<ShopProductsPage, ApiError>;

    /// `GET /api/shop-products/detail/{id}`
    async fn get_shop_product(&self, id: ProductId) -> Result<ShopProduct, ApiError>;
}
