//! Views
//!
//! Render models for the storefront's UI components. Each model is derived
//! from domain data, holds display-ready strings and control states, and can
//! write itself as a text table.

use std::io;

use tabled::{builder::Builder, settings::Style};
use thiserror::Error;

use crate::prices::PriceError;

mod banner;
mod cart;
mod feedback;
mod pagination;
mod product_card;
mod product_info;
mod shop;

pub use banner::ProductBanner;
pub use cart::{CartLineView, CartView};
pub use feedback::{FeedbackView, RatingRow, ReviewView};
pub use pagination::{PageLink, PaginationBar};
pub use product_card::ProductCard;
pub use product_info::ProductInfo;
pub use shop::ShopView;

/// Errors raised while building or writing a view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// An amount could not be formatted.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Writing the output failed.
    #[error("IO error")]
    Io(#[from] io::Error),
}

fn write_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ViewError> {
    let mut table = builder.build();
    table.with(Style::rounded());

    writeln!(out, "{table}")?;

    Ok(())
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));

    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
