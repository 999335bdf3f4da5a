use std::io;

use jiff::Timestamp;
use rust_decimal::Decimal;
use tabled::builder::Builder;

use crate::{
    assets::AssetBase,
    prices::format_price,
    pricing::clamp_discount,
    products::{Product, ProductId},
};

use super::{ViewError, write_table};

/// Product card shown in grids and rails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Product id, for navigation and add-to-cart.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Price to pay.
    pub price: String,

    /// Struck-through shelf price when discounted.
    pub original_price: Option<String>,

    /// Discount badge, e.g. `25% OFF`.
    pub discount_badge: Option<String>,

    /// Stock or new badge.
    pub badge: Option<String>,

    /// Absolute URL of the primary image.
    pub image: Option<String>,

    /// Whether any units are available.
    pub in_stock: bool,
}

impl ProductCard {
    /// Build a card for `product` as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Price`] when a price cannot be formatted.
    pub fn new(product: &Product, assets: &AssetBase, now: Timestamp) -> Result<Self, ViewError> {
        let discounted = product.is_discounted();

        Ok(Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: format_price(product.discounted_price())?,
            original_price: if discounted {
                Some(format_price(product.price)?)
            } else {
                None
            },
            discount_badge: discounted.then(|| discount_label(product.discount)),
            badge: product.badge(now).map(|badge| badge.label()),
            image: product.primary_image().map(|path| assets.image_url(path)),
            in_stock: product.in_stock(),
        })
    }

    /// Price cell text: `$75.00 (was $100.00)` when discounted.
    #[must_use]
    pub fn price_text(&self) -> String {
        match &self.original_price {
            Some(original) => format!("{} (was {original})", self.price),
            None => self.price.clone(),
        }
    }

    /// Badges joined for a single cell.
    #[must_use]
    pub fn badges_text(&self) -> String {
        [self.discount_badge.as_deref(), self.badge.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Write the card as a two-column table.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ViewError> {
        let mut builder = Builder::default();

        builder.push_record(["Product", self.name.as_str()]);
        builder.push_record(["Price", self.price_text().as_str()]);

        let badges = self.badges_text();

        if !badges.is_empty() {
            builder.push_record(["Badges", badges.as_str()]);
        }

        if let Some(image) = &self.image {
            builder.push_record(["Image", image.as_str()]);
        }

        write_table(&mut out, builder)
    }
}

pub(super) fn discount_label(discount: Decimal) -> String {
    format!("{}% OFF", clamp_discount(discount).normalize())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::tests::product;

    use super::*;

    fn assets() -> AssetBase {
        AssetBase::new("http://localhost:5000")
    }

    #[test]
    fn discounted_card_shows_both_prices_and_badge() -> TestResult {
        let card = ProductCard::new(&product("p1", 100, 25, 20), &assets(), Timestamp::UNIX_EPOCH)?;

        assert_eq!(card.price, "$75.00");
        assert_eq!(card.original_price.as_deref(), Some("$100.00"));
        assert_eq!(card.discount_badge.as_deref(), Some("25% OFF"));
        assert_eq!(
            card.image.as_deref(),
            Some("http://localhost:5000/uploads/p1.jpg")
        );

        Ok(())
    }

    #[test]
    fn full_price_card_has_no_strike_through() -> TestResult {
        let card = ProductCard::new(&product("p1", 40, 0, 20), &assets(), Timestamp::UNIX_EPOCH)?;

        assert_eq!(card.price, "$40.00");
        assert_eq!(card.original_price, None);
        assert_eq!(card.discount_badge, None);
        assert_eq!(card.price_text(), "$40.00");

        Ok(())
    }

    #[test]
    fn low_stock_badge_is_listed() -> TestResult {
        let card = ProductCard::new(&product("p1", 100, 10, 2), &assets(), Timestamp::UNIX_EPOCH)?;

        assert_eq!(card.badges_text(), "10% OFF, Only 2 left");

        Ok(())
    }

    #[test]
    fn fractional_discounts_keep_their_digits() {
        assert_eq!(discount_label(Decimal::new(125, 1)), "12.5% OFF");
        assert_eq!(discount_label(Decimal::new(2500, 2)), "25% OFF");
    }

    #[test]
    fn writes_table() -> TestResult {
        let card = ProductCard::new(&product("p1", 100, 25, 20), &assets(), Timestamp::UNIX_EPOCH)?;
        let mut out = Vec::new();

        card.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("$75.00 (was $100.00)"));
        assert!(rendered.contains("25% OFF"));

        Ok(())
    }
}
