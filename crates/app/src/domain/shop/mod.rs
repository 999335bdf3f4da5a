//! Shop

pub mod errors;
pub mod service;

pub use errors::ShopError;
pub use service::*;
