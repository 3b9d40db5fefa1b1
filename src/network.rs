//! Network constants and environment lookup for the trading journal API.

use std::time::Duration;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Versioned path segment prepended to every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "TRADEJOURNAL_API_URL";

/// Fallback variable used by the web frontend's build configuration.
pub const API_URL_ENV_FALLBACK: &str = "PUBLIC_API_URL";

/// Resolve the base URL from the environment, falling back to
/// [`DEFAULT_API_URL`]. Blank values are ignored.
pub fn api_url_from_env() -> String {
    [API_URL_ENV, API_URL_ENV_FALLBACK]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
