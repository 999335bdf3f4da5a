use jiff::Timestamp;

use crate::{assets::AssetBase, products::Product};

use super::{ProductCard, ViewError, product_card::discount_label};

/// Hero banner promoting a single product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductBanner {
    /// Banner headline.
    pub headline: String,

    /// Promoted product.
    pub card: ProductCard,
}

impl ProductBanner {
    /// Pick the in-stock product with the deepest discount. With no
    /// discounts the first in-stock product is featured instead.
    ///
    /// Returns `None` when nothing is in stock.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Price`] when a price cannot be formatted.
    pub fn featured(
        products: &[Product],
        assets: &AssetBase,
        now: Timestamp,
    ) -> Result<Option<Self>, ViewError> {
        let in_stock = || products.iter().filter(|product| product.in_stock());

        // `max_by_key` keeps the last of equal keys; reverse to prefer the first.
        let deepest = in_stock()
            .filter(|product| product.is_discounted())
            .rev()
            .max_by_key(|product| product.discount);

        let (product, headline) = match deepest {
            Some(product) => (
                product,
                format!(
                    "Up to {} off {}",
                    discount_label(product.discount).trim_end_matches(" OFF"),
                    product.name
                ),
            ),
            None => match in_stock().next() {
                Some(product) => (product, format!("Featured: {}", product.name)),
                None => return Ok(None),
            },
        };

        Ok(Some(Self {
            headline,
            card: ProductCard::new(product, assets, now)?,
        }))
    }
}
