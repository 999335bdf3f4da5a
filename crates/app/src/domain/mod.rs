//! Storefront Domain Concerns

pub mod carts;
pub mod feedback;
pub mod products;
pub mod shop;
pub mod view_state;
