//! Carts

pub mod errors;
pub mod service;

pub use errors::CartError;
pub use service::*;
