//! Feedback

pub mod errors;
pub mod service;

pub use errors::FeedbackError;
pub use service::*;
