use std::io;

use jiff::Timestamp;
use tabled::builder::Builder;

use crate::{
    assets::AssetBase,
    products::{LOW_STOCK_THRESHOLD, ShopProduct},
    quantity::QuantityStepper,
};

use super::{ProductCard, ViewError, write_table};

/// Product detail view with its quantity picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    /// Price block and badges.
    pub card: ProductCard,

    /// Brand name.
    pub brand: Option<String>,

    /// Model name.
    pub model: Option<String>,

    /// Category name.
    pub category: Option<String>,

    /// Long description.
    pub description: String,

    /// Gallery image URLs.
    pub gallery: Vec<String>,

    /// Stock line, e.g. `Only 3 left in stock`.
    pub stock_label: String,

    /// Quantity picker bounded by stock.
    pub stepper: QuantityStepper,
}

impl ProductInfo {
    /// Build the detail view for a shop product.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Price`] when a price cannot be formatted.
    pub fn new(
        product: &ShopProduct,
        assets: &AssetBase,
        now: Timestamp,
    ) -> Result<Self, ViewError> {
        let stock = product.stock();

        Ok(Self {
            card: ProductCard::new(&product.product, assets, now)?,
            brand: product.product.brand.clone(),
            model: product.model.clone(),
            category: product.product.category.clone(),
            description: product.product.description.clone(),
            gallery: product
                .product
                .images
                .iter()
                .map(|path| assets.image_url(path))
                .collect(),
            stock_label: stock_label(stock),
            stepper: QuantityStepper::new(stock),
        })
    }

    /// Whether the add-to-cart control is enabled.
    #[must_use]
    pub fn can_add_to_cart(&self) -> bool {
        self.stepper.available() > 0
    }

    /// Write the detail view.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ViewError> {
        let mut builder = Builder::default();

        builder.push_record(["Product", self.card.name.as_str()]);
        builder.push_record(["Price", self.card.price_text().as_str()]);

        for (label, value) in [
            ("Brand", &self.brand),
            ("Model", &self.model),
            ("Category", &self.category),
        ] {
            if let Some(value) = value {
                builder.push_record([label, value.as_str()]);
            }
        }

        let badges = self.card.badges_text();

        if !badges.is_empty() {
            builder.push_record(["Badges", badges.as_str()]);
        }

        builder.push_record(["Stock", self.stock_label.as_str()]);

        if !self.description.is_empty() {
            builder.push_record(["Description", self.description.as_str()]);
        }

        for image in &self.gallery {
            builder.push_record(["Image", image.as_str()]);
        }

        write_table(&mut out, builder)
    }
}

fn stock_label(stock: u32) -> String {
    match stock {
        0 => "Out of stock".to_string(),
        left if left <= LOW_STOCK_THRESHOLD => format!("Only {left} left in stock"),
        available => format!("In stock ({available} available)"),
    }
}
