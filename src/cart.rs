//! Cart
//!
//! The server owns the cart. [`CartViewModel`] is the client's derived view
//! of it and is rebuilt from a full [`Cart`] payload every time.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    ids::TypedId,
    prices::PriceError,
    pricing::{self, CartTotals},
    products::{ProductId, ProductRef},
};

/// Cart Item Id
pub type CartItemId = TypedId<CartItem>;

/// A cart line as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartItem {
    /// Server id of the line.
    #[serde(rename = "_id")]
    pub id: CartItemId,

    /// Referenced product.
    pub product: ProductRef,

    /// Units of the product, at least 1.
    pub quantity: u32,

    /// Unit price captured when the item was added.
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl CartItem {
    /// Unit price used for totals: the snapshot, else the product's current
    /// discounted price, else zero.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.price
            .or_else(|| self.product.product().map(crate::products::Product::discounted_price))
            .unwrap_or(Decimal::ZERO)
    }
}

/// The authoritative cart payload.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Cart {
    /// Lines in server order.
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// A single line of the cart view-model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Cart item id, used for update/remove.
    pub item_id: CartItemId,

    /// Referenced product id.
    pub product_id: ProductId,

    /// Product name.
    pub name: String,

    /// Primary image path.
    pub image: Option<String>,

    /// Unit price.
    pub unit_price: Decimal,

    /// Units.
    pub quantity: u32,

    /// Units in stock, when the product was populated.
    pub available: Option<u32>,
}

impl CartLine {
    /// `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::OutOfRange`] when the product overflows.
    pub fn line_total(&self) -> Result<Decimal, PriceError> {
        pricing::line_total(self.unit_price, self.quantity)
    }
}

impl From<&CartItem> for CartLine {
    fn from(item: &CartItem) -> Self {
        let product = item.product.product();

        Self {
            item_id: item.id.clone(),
            product_id: item.product.id().clone(),
            name: product.map_or_else(|| "Unavailable product".to_string(), |p| p.name.clone()),
            image: product.and_then(|p| p.primary_image().map(str::to_string)),
            unit_price: item.unit_price(),
            quantity: item.quantity,
            available: product.map(|p| p.quantity),
        }
    }
}

/// Client-visible cart: lines plus derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartViewModel {
    lines: Vec<CartLine>,
    totals: CartTotals,
}

impl CartViewModel {
    /// Rebuild the view-model from an authoritative cart.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::OutOfRange`] when the server's prices overflow
    /// the totals.
    pub fn from_cart(cart: &Cart) -> Result<Self, PriceError> {
        let lines: Vec<CartLine> = cart.items.iter().map(CartLine::from).collect();
        let totals = CartTotals::from_lines(
            lines
                .iter()
                .map(|line| (line.unit_price, line.quantity)),
        )?;

        Ok(Self { lines, totals })
    }

    /// Lines in server order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Derived totals.
    #[must_use]
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.totals.item_count
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find a line by cart item id.
    #[must_use]
    pub fn line(&self, item_id: &CartItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.item_id == item_id)
    }
}
