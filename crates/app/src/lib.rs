//! Storefront application: REST client, shared state, and action services.

pub mod api;
pub mod config;
pub mod context;
pub mod domain;
pub mod notices;
pub mod observability;
pub mod store;
