use std::io;

use jiff::Timestamp;
use tabled::builder::Builder;

use crate::{assets::AssetBase, pagination::Pagination, products::ShopProduct};

use super::{PaginationBar, ProductCard, ViewError, write_table};

/// Shop page: product grid plus pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopView {
    /// Cards in server order.
    pub cards: Vec<ProductCard>,

    /// Pagination control.
    pub pagination: PaginationBar,

    /// Items across all pages.
    pub total_items: u64,
}

impl ShopView {
    /// Build the shop page from a listing.
    ///
    /// Without a pagination block the listing is treated as a single page.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Price`] when a price cannot be formatted.
    pub fn new(
        products: &[ShopProduct],
        pagination: Option<&Pagination>,
        assets: &AssetBase,
        now: Timestamp,
    ) -> Result<Self, ViewError> {
        let pagination = pagination.copied().unwrap_or_else(|| {
            Pagination::single_page(u64::try_from(products.len()).unwrap_or(u64::MAX))
        });

        Ok(Self {
            cards: products
                .iter()
                .map(|product| ProductCard::new(&product.product, assets, now))
                .collect::<Result<_, _>>()?,
            pagination: PaginationBar::from_pagination(&pagination),
            total_items: pagination.total_items,
        })
    }

    /// Result line, e.g. `Showing 12 of 48 products`.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.cards.is_empty() {
            return "No products found".to_string();
        }

        format!(
            "Showing {} of {} products",
            self.cards.len(),
            self.total_items
        )
    }

    /// Write the grid, summary, and pagination bar.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ViewError> {
        writeln!(out, "{}", self.summary())?;

        if self.cards.is_empty() {
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Id", "Product", "Price", "Badges"]);

        for card in &self.cards {
            builder.push_record([
                card.id.as_str(),
                card.name.as_str(),
                card.price_text().as_str(),
                card.badges_text().as_str(),
            ]);
        }

        write_table(&mut out, builder)?;

        writeln!(out, "{}", self.pagination)?;

        Ok(())
    }
}
