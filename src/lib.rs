//! Storefront
//!
//! Storefront is the client-side core of a small e-commerce shop: catalog and
//! cart models, price and totals math, shop filters, reviews, and the view
//! models rendered from them. Nothing here performs I/O; the `storefront-app`
//! crate talks to the REST API and drives these types.

pub mod assets;
pub mod cart;
pub mod feedback;
pub mod filters;
pub mod ids;
pub mod notices;
pub mod pagination;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod quantity;
pub mod users;
pub mod views;
