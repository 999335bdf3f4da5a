//! Products

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{ids::TypedId, pricing};

/// Product Id
pub type ProductId = TypedId<Product>;

/// Products with at most this many units left are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Products created within this window are flagged as new.
pub const NEW_PRODUCT_WINDOW: SignedDuration = SignedDuration::from_hours(24 * 30);

/// A catalog product as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server id.
    #[serde(rename = "_id", default)]
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Shelf price in major units.
    pub price: Decimal,

    /// Discount percentage, `0..=100`.
    #[serde(default)]
    pub discount: Decimal,

    /// Category name.
    #[serde(default)]
    pub category: Option<String>,

    /// Brand name.
    #[serde(default)]
    pub brand: Option<String>,

    /// Long description.
    #[serde(default)]
    pub description: String,

    /// Relative image paths, first is the primary image.
    #[serde(default)]
    pub images: Vec<String>,

    /// Units in stock.
    #[serde(default, alias = "stock", alias = "stockQuantity")]
    pub quantity: u32,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Product {
    /// Price after discount, rounded to cents.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        pricing::discounted_price(self.price, self.discount)
    }

    /// Whether a non-zero discount applies.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        !pricing::clamp_discount(self.discount).is_zero()
    }

    /// Whether any units are available.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Primary image path, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Badge derived from stock and age. Stock badges take precedence.
    #[must_use]
    pub fn badge(&self, now: Timestamp) -> Option<ProductBadge> {
        if self.quantity == 0 {
            return Some(ProductBadge::OutOfStock);
        }

        if self.quantity <= LOW_STOCK_THRESHOLD {
            return Some(ProductBadge::LowStock(self.quantity));
        }

        self.created_at
            .filter(|created_at| {
                let age = now.duration_since(*created_at);

                age >= SignedDuration::ZERO && age <= NEW_PRODUCT_WINDOW
            })
            .map(|_| ProductBadge::New)
    }
}

/// A product carrying shop inventory metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopProduct {
    /// Catalog fields.
    #[serde(flatten)]
    pub product: Product,

    /// Manufacturer model name.
    #[serde(default)]
    pub model: Option<String>,

    /// Stock keeping unit.
    #[serde(default)]
    pub sku: Option<String>,
}

impl ShopProduct {
    /// Units in stock.
    #[must_use]
    pub fn stock(&self) -> u32 {
        self.product.quantity
    }
}

/// Product badge shown on cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductBadge {
    /// No units left.
    OutOfStock,

    /// Few units left.
    LowStock(u32),

    /// Recently added.
    New,
}

impl ProductBadge {
    /// Badge label.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            ProductBadge::OutOfStock => "Out of stock".to_string(),
            ProductBadge::LowStock(left) => format!("Only {left} left"),
            ProductBadge::New => "New".to_string(),
        }
    }
}

/// A cart line's product: either populated by the server or a bare id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    /// Full product document.
    Populated(Box<Product>),

    /// Product id only.
    Id(ProductId),
}

impl ProductRef {
    /// Referenced product id.
    #[must_use]
    pub fn id(&self) -> &ProductId {
        match self {
            ProductRef::Populated(product) => &product.id,
            ProductRef::Id(id) => id,
        }
    }

    /// Populated product, if the server expanded it.
    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        match self {
            ProductRef::Populated(product) => Some(product),
            ProductRef::Id(_) => None,
        }
    }
}
