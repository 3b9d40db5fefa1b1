//! High-level client: `TradeJournalClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the shared state handles.

use crate::auth::client::Auth;
use crate::auth::{MemoryTokenStore, SessionStore, TokenStore};
use crate::domain::tag::client::Tags;
use crate::domain::trade::client::Trades;
use crate::error::SdkError;
use crate::http::{ApiHttp, Transport};
use crate::network::{api_url_from_env, DEFAULT_API_URL, DEFAULT_TIMEOUT};

use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::tag::client::Tags as TagsClient;
pub use crate::domain::trade::client::Trades as TradesClient;

/// The primary entry point for the trading journal SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.auth()`, `client.trades()`, `client.tags()`.
///
/// Cloning is cheap; clones share tokens, session and the refresh gate.
#[derive(Clone, Debug)]
pub struct TradeJournalClient {
    pub(crate) http: ApiHttp,
}

impl TradeJournalClient {
    pub fn builder() -> TradeJournalClientBuilder {
        TradeJournalClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags { client: self }
    }

    // ── Shared state ─────────────────────────────────────────────────────

    /// The low-level HTTP client, for endpoints without a typed wrapper.
    pub fn http(&self) -> &ApiHttp {
        &self.http
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.http.session()
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        self.http.tokens()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct TradeJournalClientBuilder {
    base_url: String,
    timeout: Duration,
    token_store: Option<Arc<dyn TokenStore>>,
    session: Option<Arc<SessionStore>>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for TradeJournalClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token_store: None,
            session: None,
            transport: None,
        }
    }
}

impl TradeJournalClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Take the base URL from `TRADEJOURNAL_API_URL` (or `PUBLIC_API_URL`).
    pub fn from_env(mut self) -> Self {
        self.base_url = api_url_from_env();
        self
    }

    /// Default per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Where credentials live. Defaults to an in-memory store.
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Share a session store with the application (e.g. to subscribe before
    /// the first request).
    pub fn session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Replace the HTTP transport. Defaults to reqwest when the `http`
    /// feature is enabled.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<TradeJournalClient, SdkError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(SdkError::Config("base URL must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(SdkError::Config("timeout must be non-zero".to_string()));
        }

        let transport = match self.transport {
            Some(t) => t,
            None => default_transport()?,
        };
        let tokens = self
            .token_store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));
        let session = self.session.unwrap_or_default();

        Ok(TradeJournalClient {
            http: ApiHttp::new(base_url, self.timeout, transport, tokens, session),
        })
    }
}

#[cfg(feature = "http")]
fn default_transport() -> Result<Arc<dyn Transport>, SdkError> {
    let transport = crate::http::ReqwestTransport::new()
        .map_err(|e| SdkError::Config(format!("failed to build HTTP client: {}", e)))?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "http"))]
fn default_transport() -> Result<Arc<dyn Transport>, SdkError> {
    Err(SdkError::Config(
        "no HTTP transport: enable the `http` feature or call `transport()`".to_string(),
    ))
}
