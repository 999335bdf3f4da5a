//! REST API client.
//!
//! Thin typed wrappers over the storefront's HTTP endpoints. Every call goes
//! through [`HttpTransport`], which owns the base URL, the cookie jar that
//! carries the session, and the error mapping.

use std::{sync::Arc, time::Duration};

use reqwest::{Client, RequestBuilder, StatusCode, Url, cookie::Jar};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use storefront::pagination::Pagination;
use thiserror::Error;
use tracing::debug;

pub mod cart;
pub mod feedback;
pub mod products;

pub use cart::{CartApi, HttpCartApi, MockCartApi};
pub use feedback::{FeedbackApi, HttpFeedbackApi, MockFeedbackApi};
pub use products::{HttpProductsApi, MockProductsApi, ProductsApi};

/// Cookie name used when the configured session carries no name.
pub const SESSION_COOKIE: &str = "token";

/// Errors raised by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connection, timeout, TLS.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response.
    #[error("server responded with {status}")]
    Status {
        /// Response status.
        status: StatusCode,

        /// `message` from the error body, if any.
        message: Option<String>,
    },

    /// Body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configured base URL cannot be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Message supplied by the server, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Text to show the user: the server message when present, else
    /// `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// Connection settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API base URL, e.g. `http://localhost:5000`.
    pub base_url: String,

    /// Session cookie, either `name=value` or a bare value.
    pub session: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// Shared HTTP plumbing for the API wrappers.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: String,
    http: Client,
}

impl HttpTransport {
    /// Build a transport with a cookie store seeded from the session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] for an unparsable base URL and
    /// [`ApiError::Http`] when the client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base = config.base_url.trim_end_matches('/').to_string();
        let url = Url::parse(&base)
            .map_err(|error| ApiError::InvalidBaseUrl(format!("{base}: {error}")))?;

        let jar = Jar::default();

        if let Some(session) = config.session.as_deref().map(str::trim)
            && !session.is_empty()
        {
            jar.add_cookie_str(&session_cookie(session), &url);
        }

        let http = Client::builder()
            .cookie_provider(Arc::new(jar))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { base, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let body = send(self.http.get(self.url(path)).query(query)).await?;

        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        send(self.http.post(self.url(path)).json(body)).await?;

        Ok(())
    }

    pub(crate) async fn put<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        send(self.http.put(self.url(path)).json(body)).await?;

        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        send(self.http.delete(self.url(path))).await?;

        Ok(())
    }
}

fn session_cookie(session: &str) -> String {
    if session.contains('=') {
        session.to_string()
    } else {
        format!("{SESSION_COOKIE}={session}")
    }
}

async fn send(request: RequestBuilder) -> Result<String, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().path().to_string();
    let text = response.text().await?;

    debug!(%status, %url, "api response");

    if !status.is_success() {
        return Err(ApiError::Status {
            status,
            message: error_message(&text),
        });
    }

    Ok(text)
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    error: Option<String>,
}

fn error_message(text: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .filter(|message| !message.trim().is_empty())
}

/// A single resource, either bare or wrapped under a well-known key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Data { data: T },
    Cart { cart: T },
    Product { product: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Envelope::Data { data } => data,
            Envelope::Cart { cart } => cart,
            Envelope::Product { product } => product,
            Envelope::Bare(inner) => inner,
        }
    }
}

/// One page of a paged listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    #[serde(
        alias = "data",
        alias = "products",
        alias = "reviews",
        alias = "feedback",
        alias = "feedbacks"
    )]
    pub items: Vec<T>,

    /// Pagination block, when the endpoint pages.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

/// A listing body: a page object or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

impl<T> From<Listing<T>> for Page<T> {
    fn from(listing: Listing<T>) -> Self {
        match listing {
            Listing::Paged(page) => page,
            Listing::Bare(items) => Page {
                items,
                pagination: None,
            },
        }
    }
}
