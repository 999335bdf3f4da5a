//! Client configuration.

use std::time::Duration;

use clap::Args;

use crate::api::ApiConfig;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// API connection and session settings.
#[derive(Debug, Args)]
pub struct ClientConfig {
    /// Storefront API base URL
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:5000", global = true)]
    pub api_url: String,

    /// Base URL for product images; defaults to the API URL
    #[arg(long, env = "STOREFRONT_ASSET_URL", global = true)]
    pub asset_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "STOREFRONT_TIMEOUT", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Session cookie, as `name=value` or a bare token
    #[arg(long, env = "STOREFRONT_SESSION", hide_env_values = true, global = true)]
    pub session: Option<String>,

    /// Signed-in user id, used to find your own reviews
    #[arg(long, env = "STOREFRONT_USER_ID", global = true)]
    pub user_id: Option<String>,
}

impl ClientConfig {
    /// Transport settings.
    #[must_use]
    pub fn api(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            session: self.session.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Image base URL.
    #[must_use]
    pub fn asset_url(&self) -> &str {
        self.asset_url.as_deref().unwrap_or(&self.api_url)
    }

    /// Whether a session was supplied.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session
            .as_deref()
            .is_some_and(|session| !session.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(session: Option<&str>) -> ClientConfig {
        ClientConfig {
            api_url: "http://localhost:5000".to_string(),
            asset_url: None,
            timeout_secs: 3,
            session: session.map(str::to_string),
            user_id: None,
        }
    }

    #[test]
    fn asset_url_defaults_to_api_url() {
        assert_eq!(config(None).asset_url(), "http://localhost:5000");
    }

    #[test]
    fn blank_session_is_signed_out() {
        assert!(!config(None).is_authenticated());
        assert!(!config(Some("  ")).is_authenticated());
        assert!(config(Some("abc")).is_authenticated());
    }

    #[test]
    fn timeout_is_seconds() {
        assert_eq!(config(None).api().timeout, Duration::from_secs(3));
    }
}
